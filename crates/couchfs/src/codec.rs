// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Mapping between document ids and the file names they appear under.

/// Suffix marking a file as the formatted view of a document
pub const MARKER_SUFFIX: &str = ".json";

/// Prefix reserved by CouchDB for design documents
pub const DESIGN_PREFIX: &str = "_design/";

/// File name for a document id. The suffix is always appended, so an id
/// already ending in `.json` becomes `x.json.json`.
pub fn to_filename(document_id: &str) -> String {
    format!("{document_id}{MARKER_SUFFIX}")
}

/// Document id for a file name.
///
/// Only a trailing suffix is stripped. Names without it are returned
/// unchanged so that bare ids still resolve.
pub fn to_document_id(filename: &str) -> &str {
    filename.strip_suffix(MARKER_SUFFIX).unwrap_or(filename)
}

/// True for ids that never appear in a database listing
pub fn is_design_document(document_id: &str) -> bool {
    document_id.starts_with(DESIGN_PREFIX)
}
