// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use crate::store::{Response, Store};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory store for tests.
///
/// Objects are keyed like the server's URLs: top-level objects by id alone,
/// documents by database and id. Databases map to the ids `_all_docs`
/// would list; registering a database also places its descriptor object
/// under the database name. Listings and stored documents are independent,
/// so a test can list ids that have no document and the reverse.
#[derive(Default)]
pub struct MemoryStore {
    databases: Vec<(String, Vec<String>)>,
    objects: HashMap<(Option<String>, String), Response>,
    fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a database listing the given ids
    pub fn with_database<I, S>(mut self, name: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let descriptor = serde_json::json!({
            "db_name": name,
            "update_seq": format!("{}-g1AAAA", ids.len()),
            "doc_count": ids.len(),
        });
        self.databases.push((name.to_string(), ids));
        self.with_object(name, descriptor)
    }

    /// Place a top-level JSON object under `id`
    pub fn with_object(self, id: &str, value: Value) -> Self {
        self.with_response(None, id, Response::ok(value.to_string()))
    }

    /// Place a JSON document under `id` inside `database`
    pub fn with_document(self, database: &str, id: &str, value: Value) -> Self {
        self.with_response(Some(database), id, Response::ok(value.to_string()))
    }

    /// Place a raw answer under `id`, top-level or inside `database`
    pub fn with_response(mut self, database: Option<&str>, id: &str, response: Response) -> Self {
        let key = (database.map(str::to_string), id.to_string());
        _ = self.objects.insert(key, response);
        self
    }

    /// Number of `fetch_object` calls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_database_names(&self) -> Result<Vec<String>> {
        Ok(self.databases.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn fetch_object(&self, database: Option<&str>, id: &str) -> Result<Response> {
        _ = self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = (database.map(str::to_string), id.to_string());
        Ok(self.objects.get(&key).cloned().unwrap_or_else(|| {
            Response::new(404, r#"{"error":"not_found","reason":"missing"}"#)
        }))
    }

    async fn list_document_ids(&self, database: &str) -> Result<Vec<String>> {
        self.databases
            .iter()
            .find(|(name, _)| name == database)
            .map(|(_, ids)| ids.clone())
            .ok_or_else(|| Error::store(format!("no such database: {database}")))
    }
}
