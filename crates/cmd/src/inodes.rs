// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use couchfs::CouchPath;
use std::collections::HashMap;

/// Inode the kernel uses for the mount root
pub const ROOT_INO: u64 = 1;

struct Slot {
    path: CouchPath,
    /// Kernel references from `lookup`, released by `forget`
    lookups: u64,
}

/// Inode numbers handed to the kernel, one per path seen.
///
/// An inode is released once the kernel forgets every lookup of it; a
/// later lookup of the same path gets a fresh number. Paths only ever
/// reported by `readdir` carry no lookups and stay until unmount. This is
/// the dispatcher's own bookkeeping; it caches no remote data.
pub struct InodeTable {
    slots: HashMap<u64, Slot>,
    inodes: HashMap<CouchPath, u64>,
    next: u64,
}

impl InodeTable {
    pub fn new() -> Self {
        let mut table = Self {
            slots: HashMap::new(),
            inodes: HashMap::new(),
            next: ROOT_INO + 1,
        };
        _ = table.slots.insert(
            ROOT_INO,
            Slot {
                path: CouchPath::Root,
                lookups: 0,
            },
        );
        _ = table.inodes.insert(CouchPath::Root, ROOT_INO);
        table
    }

    pub fn path(&self, ino: u64) -> Option<&CouchPath> {
        self.slots.get(&ino).map(|slot| &slot.path)
    }

    /// Inode for `path`, allocating one on first sight
    pub fn insert(&mut self, path: CouchPath) -> u64 {
        if let Some(ino) = self.inodes.get(&path) {
            return *ino;
        }
        let ino = self.next;
        self.next += 1;
        _ = self.inodes.insert(path.clone(), ino);
        _ = self.slots.insert(ino, Slot { path, lookups: 0 });
        ino
    }

    /// Inode for `path`, counting one kernel reference to it
    pub fn lookup(&mut self, path: CouchPath) -> u64 {
        let ino = self.insert(path);
        if let Some(slot) = self.slots.get_mut(&ino) {
            slot.lookups += 1;
        }
        ino
    }

    /// Drop `nlookup` kernel references; the inode goes when none are left.
    /// The root is never released.
    pub fn forget(&mut self, ino: u64, nlookup: u64) {
        if ino == ROOT_INO {
            return;
        }
        let Some(slot) = self.slots.get_mut(&ino) else {
            return;
        };
        slot.lookups = slot.lookups.saturating_sub(nlookup);
        if slot.lookups == 0 {
            if let Some(slot) = self.slots.remove(&ino) {
                _ = self.inodes.remove(&slot.path);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}
