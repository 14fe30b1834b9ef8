// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Classification of fetched objects.
//!
//! A fetched body is inspected exactly once, here, and turned into an
//! [`Entity`]. Nothing downstream looks at raw field names again.

use serde_json::Value;

const DB_NAME_FIELD: &str = "db_name";
const UPDATE_SEQ_FIELD: &str = "update_seq";
const DOC_COUNT_FIELD: &str = "doc_count";
const ID_FIELD: &str = "_id";
const REV_FIELD: &str = "_rev";

/// A database info object, as returned by `GET /{db}`
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseDescriptor {
    pub name: String,
    /// `doc_count`, when the server reports one
    pub document_count: Option<u64>,
}

/// A document at its current revision
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub revision: String,
    /// The complete fetched object, in the field order received
    pub body: Value,
}

/// What a fetched object turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Database(DatabaseDescriptor),
    Document(Document),
    /// Valid but unrecognized, or not JSON at all (kept as a string)
    Opaque { raw: Value },
}

impl Entity {
    /// Classify a decoded value. Total: never fails.
    pub fn classify(value: Value) -> Entity {
        let Some(map) = value.as_object() else {
            return Entity::Opaque { raw: value };
        };

        if present(map.get(DB_NAME_FIELD)) && present(map.get(UPDATE_SEQ_FIELD)) {
            if let Some(name) = map.get(DB_NAME_FIELD).and_then(scalar_text) {
                let document_count = map.get(DOC_COUNT_FIELD).and_then(Value::as_u64);
                return Entity::Database(DatabaseDescriptor {
                    name,
                    document_count,
                });
            }
        }

        if present(map.get(ID_FIELD)) && present(map.get(REV_FIELD)) {
            if let (Some(id), Some(revision)) = (
                map.get(ID_FIELD).and_then(scalar_text),
                map.get(REV_FIELD).and_then(scalar_text),
            ) {
                return Entity::Document(Document {
                    id,
                    revision,
                    body: value,
                });
            }
        }

        Entity::Opaque { raw: value }
    }

    /// Classify a response body. Bodies that are not JSON become opaque text.
    pub fn from_body(body: &str) -> Entity {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Entity::classify(value),
            Err(err) => {
                diagnostics::debug!("json decode failed: {err}", err: err);
                Entity::Opaque {
                    raw: Value::String(body.to_string()),
                }
            }
        }
    }
}

/// Field presence: absent, null, false, "" and empty containers do not count.
/// Numbers always count, so a CouchDB 1.x `update_seq` of 0 still marks a
/// freshly created database.
fn present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
