// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::codec;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::path::CouchPath;
use crate::store::{Response, Store};
use diagnostics::*;
use std::sync::Arc;

/// Longest body prefix written to the log for an unexpected status
const PREVIEW_CHARS: usize = 200;

/// What a path denotes
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The root directory, with the database names it contains
    Root { databases: Vec<String> },
    /// A single fetched and classified object
    Remote(Entity),
}

/// Turns filesystem paths into classified remote objects.
///
/// Holds nothing but the store handle; every call fetches afresh.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn Store>,
}

impl Resolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Resolve a path.
    ///
    /// The root enumerates databases instead of fetching. `/<name>` fetches
    /// the top-level object `<name>` verbatim. `/<db>/<file>` fetches the id
    /// decoded from `<file>` inside `<db>`, without checking that `<db>`
    /// lists it.
    pub async fn resolve(&self, path: &CouchPath) -> Result<Resolved> {
        let (database, id) = match path {
            CouchPath::Root => {
                let databases = self.store.list_database_names().await?;
                return Ok(Resolved::Root { databases });
            }
            CouchPath::Database(name) => (None, name.as_str()),
            CouchPath::Document { database, filename } => {
                (Some(database.as_str()), codec::to_document_id(filename))
            }
        };

        let entity = self.fetch(path, database, id).await?;
        Ok(Resolved::Remote(entity))
    }

    async fn fetch(&self, path: &CouchPath, database: Option<&str>, id: &str) -> Result<Entity> {
        let response = self.store.fetch_object(database, id).await?;

        if response.is_not_found() {
            return Err(Error::not_found(path.to_path_buf()));
        }
        if !response.is_success() {
            log_anomaly(path, &response);
        }

        Ok(Entity::from_body(&response.body))
    }
}

fn log_anomaly(path: &CouchPath, response: &Response) {
    let status = response.status;
    let preview = body_preview(&response.body);
    debug!("strange status {status} fetching {path}", status: status, path: path.to_string());
    debug!("content {preview}", preview: preview.as_str());
}

/// First 200 characters of a body, with ` ...` when cut
pub(crate) fn body_preview(body: &str) -> String {
    let mut chars = body.char_indices();
    match chars.nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{} ...", &body[..cut]),
        None => body.to_string(),
    }
}
