// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! FUSE front end for [`CouchFs`].

use crate::inodes::{InodeTable, ROOT_INO};
use couchfs::{Attributes, CouchFs, CouchPath, EntryType, Error};
use diagnostics::*;
use fuser::{
    FileAttr, FileType, Filesystem, MountOption, ReplyAttr, ReplyData, ReplyDirectory,
    ReplyEntry, ReplyOpen, Request,
};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};
use tokio::runtime::Runtime;

/// Nothing is cached by the kernel either; every stat goes to the server.
const TTL: Duration = Duration::ZERO;

const BLOCK_SIZE: u32 = 512;

/// How to mount
#[derive(Debug, Clone)]
pub struct MountOptions {
    pub mountpoint: PathBuf,
    /// Filesystem name shown in mount output
    pub fsname: String,
    /// Owner reported for every entry
    pub uid: u32,
    pub gid: u32,
}

impl MountOptions {
    /// Options owned by the user running the process
    pub fn for_current_user(mountpoint: PathBuf) -> Self {
        // SAFETY: getuid and getgid cannot fail
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Self {
            mountpoint,
            fsname: "couchfs".to_string(),
            uid,
            gid,
        }
    }

    fn fuse_options(&self) -> Vec<MountOption> {
        vec![
            MountOption::FSName(self.fsname.clone()),
            MountOption::RO,
            MountOption::DefaultPermissions,
        ]
    }
}

/// Error code reported to the kernel
pub fn errno(err: &Error) -> libc::c_int {
    match err {
        Error::NotFound(_) => libc::ENOENT,
        Error::ClassificationMismatch { .. } | Error::Store(_) | Error::Render(_) => libc::EIO,
    }
}

/// Kernel attributes for one entry
pub fn file_attr(ino: u64, attrs: &Attributes, uid: u32, gid: u32) -> FileAttr {
    FileAttr {
        ino,
        size: attrs.size,
        blocks: attrs.size.div_ceil(u64::from(BLOCK_SIZE)),
        atime: UNIX_EPOCH,
        mtime: UNIX_EPOCH,
        ctime: UNIX_EPOCH,
        crtime: UNIX_EPOCH,
        kind: file_type(attrs.entry_type),
        perm: attrs.permissions,
        nlink: attrs.nlink,
        uid,
        gid,
        rdev: 0,
        blksize: BLOCK_SIZE,
        flags: 0,
    }
}

fn file_type(entry_type: EntryType) -> FileType {
    match entry_type {
        EntryType::Directory => FileType::Directory,
        EntryType::File => FileType::RegularFile,
    }
}

/// Type hint for a listed child without fetching it: databases under the
/// root, documents below them.
fn child_type(parent: &CouchPath) -> FileType {
    match parent {
        CouchPath::Root => FileType::Directory,
        _ => FileType::RegularFile,
    }
}

struct CouchFuse {
    fs: CouchFs,
    runtime: Runtime,
    inodes: InodeTable,
    uid: u32,
    gid: u32,
}

impl CouchFuse {
    fn new(fs: CouchFs, runtime: Runtime, options: &MountOptions) -> Self {
        Self {
            fs,
            runtime,
            inodes: InodeTable::new(),
            uid: options.uid,
            gid: options.gid,
        }
    }

    fn describe(&self, path: &CouchPath) -> couchfs::Result<Attributes> {
        let fs = self.fs.clone();
        let path = path.to_path_buf();
        self.runtime.block_on(async move { fs.describe(path).await })
    }

    fn child_path(&self, parent: u64, name: &OsStr) -> Option<CouchPath> {
        let parent = self.inodes.path(parent)?;
        parent.join(name.to_str()?).ok()
    }
}

impl Filesystem for CouchFuse {
    fn lookup(&mut self, _req: &Request, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let Some(path) = self.child_path(parent, name) else {
            reply.error(libc::ENOENT);
            return;
        };

        match self.describe(&path) {
            Ok(attrs) => {
                debug!(
                    "lookup {path}: {entry_type}",
                    path: path.to_string(),
                    entry_type: attrs.entry_type.as_str()
                );
                let ino = self.inodes.lookup(path);
                reply.entry(&TTL, &file_attr(ino, &attrs, self.uid, self.gid), 0);
            }
            Err(err) => {
                debug!("lookup {path} failed: {err}", path: path.to_string(), err: err);
                reply.error(errno(&err));
            }
        }
    }

    fn forget(&mut self, _req: &Request, ino: u64, nlookup: u64) {
        self.inodes.forget(ino, nlookup);
    }

    fn getattr(&mut self, _req: &Request, ino: u64, _fh: Option<u64>, reply: ReplyAttr) {
        let Some(path) = self.inodes.path(ino).cloned() else {
            reply.error(libc::ENOENT);
            return;
        };

        match self.describe(&path) {
            Ok(attrs) => reply.attr(&TTL, &file_attr(ino, &attrs, self.uid, self.gid)),
            Err(err) => reply.error(errno(&err)),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let Some(path) = self.inodes.path(ino).cloned() else {
            reply.error(libc::ENOENT);
            return;
        };

        let fs = self.fs.clone();
        let target = path.to_path_buf();
        let names = match self.runtime.block_on(async move { fs.list(target).await }) {
            Ok(names) => names,
            Err(err) => {
                reply.error(errno(&err));
                return;
            }
        };

        let parent_ino = self.inodes.insert(path.parent());
        let kind = child_type(&path);
        let skip = usize::try_from(offset).unwrap_or(0);

        for (i, name) in names.iter().enumerate().skip(skip) {
            let (entry_ino, entry_kind) = match name.as_str() {
                couchfs::listing::SELF_ENTRY => (ino, FileType::Directory),
                couchfs::listing::PARENT_ENTRY => (parent_ino, FileType::Directory),
                child => match path.join(child) {
                    Ok(child_path) => (self.inodes.insert(child_path), kind),
                    Err(_) => continue,
                },
            };
            let next_offset = i64::try_from(i + 1).unwrap_or(i64::MAX);
            if reply.add(entry_ino, next_offset, entry_kind, name) {
                break;
            }
        }
        reply.ok();
    }

    fn open(&mut self, _req: &Request, ino: u64, flags: i32, reply: ReplyOpen) {
        if self.inodes.path(ino).is_none() {
            reply.error(libc::ENOENT);
            return;
        }
        if flags & libc::O_ACCMODE != libc::O_RDONLY {
            reply.error(libc::EROFS);
            return;
        }
        // Stateless reads: no handle to track, content is fetched per read
        reply.opened(0, 0);
    }

    fn read(
        &mut self,
        _req: &Request,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock: Option<u64>,
        reply: ReplyData,
    ) {
        let Some(path) = self.inodes.path(ino).cloned() else {
            reply.error(libc::ENOENT);
            return;
        };

        let fs = self.fs.clone();
        let target = path.to_path_buf();
        let offset = u64::try_from(offset).unwrap_or(0);
        let result = self
            .runtime
            .block_on(async move { fs.read(target, offset, u64::from(size)).await });

        match result {
            Ok(data) => reply.data(&data),
            Err(err) => {
                debug!("read {path} failed: {err}", path: path.to_string(), err: err);
                reply.error(errno(&err));
            }
        }
    }
}

/// Mount `fs` and serve requests until unmounted.
///
/// Requests are handled one at a time on the calling thread, each blocking
/// on `runtime` for its remote calls.
pub fn mount(fs: CouchFs, runtime: Runtime, options: MountOptions) -> anyhow::Result<()> {
    let fuse_options = options.fuse_options();
    let filesystem = CouchFuse::new(fs, runtime, &options);

    info!(
        "mounting on {mountpoint}",
        mountpoint: options.mountpoint.display().to_string()
    );
    fuser::mount2(filesystem, &options.mountpoint, &fuse_options)?;
    info!("unmounted");
    Ok(())
}
