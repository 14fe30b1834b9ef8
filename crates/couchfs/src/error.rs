// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed failure raised by a store implementation
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by path resolution, listing and reads
#[derive(Error, Debug)]
pub enum Error {
    /// The remote object does not exist, or the path is not one we project
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The remote object exists but has the wrong shape for the operation
    #[error("Not a {expected}: {}", path.display())]
    ClassificationMismatch {
        path: PathBuf,
        expected: &'static str,
    },

    /// The store could not answer at all
    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::NotFound(path.as_ref().to_path_buf())
    }

    pub fn not_a_document<P: AsRef<Path>>(path: P) -> Self {
        Error::ClassificationMismatch {
            path: path.as_ref().to_path_buf(),
            expected: "document",
        }
    }

    pub fn store<E: Into<StoreError>>(err: E) -> Self {
        Error::Store(err.into())
    }

    /// True when the dispatcher should report "no such entry"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
