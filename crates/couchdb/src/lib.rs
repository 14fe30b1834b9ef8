// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! CouchDB HTTP client implementing the couchfs store.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use crate::client::Client;
pub use crate::config::{ConnectionConfig, Credentials};
pub use crate::error::{Error, Result};
