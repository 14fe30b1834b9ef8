// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::attributes::Attributes;
use crate::content;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::listing;
use crate::path::CouchPath;
use crate::resolver::{Resolved, Resolver};
use crate::store::Store;
use std::path::Path;
use std::sync::Arc;

/// The three operations a filesystem dispatcher needs.
///
/// Stateless apart from the store handle: every call resolves its path
/// again, so concurrent callers never share anything mutable.
#[derive(Clone)]
pub struct CouchFs {
    resolver: Resolver,
}

impl CouchFs {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            resolver: Resolver::new(store),
        }
    }

    /// Resolve a path string
    pub async fn resolve<P: AsRef<Path>>(&self, path: P) -> Result<Resolved> {
        self.resolver.resolve(&CouchPath::parse(path)?).await
    }

    /// Metadata for a path
    pub async fn describe<P: AsRef<Path>>(&self, path: P) -> Result<Attributes> {
        Attributes::of(&self.resolve(path).await?)
    }

    /// Directory entries for a path, `.` and `..` first
    pub async fn list<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let resolved = self.resolve(path).await?;
        listing::list_children(&self.resolver, &resolved).await
    }

    /// Full rendered content of a document path
    pub async fn content<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>> {
        let path = path.as_ref();
        match self.resolve(path).await? {
            Resolved::Remote(Entity::Document(doc)) => content::render(&doc),
            _ => Err(Error::not_a_document(path)),
        }
    }

    /// Up to `size` bytes of a document path starting at `offset`
    pub async fn read<P: AsRef<Path>>(&self, path: P, offset: u64, size: u64) -> Result<Vec<u8>> {
        let content = self.content(path).await?;
        Ok(content::slice(&content, offset, size).to_vec())
    }
}
