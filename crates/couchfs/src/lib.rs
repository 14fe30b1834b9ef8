// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only projection of a CouchDB server onto a filesystem tree.
//!
//! ```text
//! /                   databases
//! /<db>               documents of <db>, design documents hidden
//! /<db>/<id>.json     the document as indented JSON
//! ```

pub mod attributes;
pub mod codec;
pub mod content;
pub mod entity;
pub mod entry_type;
pub mod error;
pub mod fs;
pub mod listing;
pub mod memory;
pub mod path;
pub mod resolver;
pub mod store;

pub use attributes::Attributes;
pub use entity::{DatabaseDescriptor, Document, Entity};
pub use entry_type::EntryType;
pub use error::{Error, Result};
pub use fs::CouchFs;
pub use memory::MemoryStore;
pub use path::CouchPath;
pub use resolver::{Resolved, Resolver};
pub use store::{Response, Store};

#[cfg(test)]
mod tests;
