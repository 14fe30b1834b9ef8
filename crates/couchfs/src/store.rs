// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;
use async_trait::async_trait;

/// HTTP status CouchDB answers for a missing object
pub const STATUS_NOT_FOUND: u16 = 404;

/// Raw answer to a single-object fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok<S: Into<String>>(body: S) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == STATUS_NOT_FOUND
    }
}

/// The remote document store, as the resolver sees it.
///
/// Implementations own the connection. Errors returned here mean the store
/// could not answer at all; a non-success status on `fetch_object` is an
/// answer, not an error.
#[async_trait]
pub trait Store: Send + Sync {
    /// Every database name, in server order
    async fn list_database_names(&self) -> Result<Vec<String>>;

    /// Fetch one object. Without a database, `id` names a top-level object
    /// such as a database descriptor; with one, a document inside it. The
    /// answer is returned as is, whether or not `database` lists `id`.
    async fn fetch_object(&self, database: Option<&str>, id: &str) -> Result<Response>;

    /// Every document id in `database`, design documents included
    async fn list_document_ids(&self, database: &str) -> Result<Vec<String>>;
}
