// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// A filesystem path in the projected namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CouchPath {
    /// `/`
    Root,
    /// `/<name>`, usually a database
    Database(String),
    /// `/<database>/<filename>`
    Document { database: String, filename: String },
}

impl CouchPath {
    /// Parse an absolute or relative path. Anything deeper than two
    /// segments, or containing `..`, is not found.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut segments = Vec::new();

        for component in path.components() {
            match component {
                Component::RootDir | Component::CurDir => {}
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| Error::not_found(path))?;
                    segments.push(name.to_string());
                }
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(Error::not_found(path));
                }
            }
        }

        let mut segments = segments.into_iter();
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Ok(CouchPath::Root),
            (Some(name), None, _) => Ok(CouchPath::Database(name)),
            (Some(database), Some(filename), None) => {
                Ok(CouchPath::Document { database, filename })
            }
            _ => Err(Error::not_found(path)),
        }
    }

    /// Join a child name onto this path
    pub fn join(&self, name: &str) -> Result<Self> {
        match self {
            CouchPath::Root => Ok(CouchPath::Database(name.to_string())),
            CouchPath::Database(database) => Ok(CouchPath::Document {
                database: database.clone(),
                filename: name.to_string(),
            }),
            CouchPath::Document { .. } => Err(Error::not_found(self.to_path_buf().join(name))),
        }
    }

    /// The path one level up; the root is its own parent
    pub fn parent(&self) -> Self {
        match self {
            CouchPath::Root | CouchPath::Database(_) => CouchPath::Root,
            CouchPath::Document { database, .. } => CouchPath::Database(database.clone()),
        }
    }

    pub fn to_path_buf(&self) -> PathBuf {
        match self {
            CouchPath::Root => PathBuf::from("/"),
            CouchPath::Database(name) => Path::new("/").join(name),
            CouchPath::Document { database, filename } => {
                Path::new("/").join(database).join(filename)
            }
        }
    }
}

impl std::fmt::Display for CouchPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path_buf().display())
    }
}
