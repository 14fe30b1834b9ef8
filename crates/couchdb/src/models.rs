// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

/// Body of `GET /{db}/_all_docs`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AllDocs {
    #[serde(default)]
    pub total_rows: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    pub rows: Vec<AllDocsRow>,
}

/// One row of `_all_docs`; only the id is used
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AllDocsRow {
    pub id: String,
}

impl AllDocs {
    pub fn into_ids(self) -> Vec<String> {
        self.rows.into_iter().map(|row| row.id).collect()
    }
}
