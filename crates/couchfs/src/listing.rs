// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::codec;
use crate::entity::Entity;
use crate::error::Result;
use crate::resolver::{Resolved, Resolver};
use diagnostics::*;

pub const SELF_ENTRY: &str = ".";
pub const PARENT_ENTRY: &str = "..";

/// Children of a resolved path, led by `.` and `..`.
///
/// The root lists database names in server order. A database lists its
/// documents as file names, design documents excluded. Anything else has
/// no children.
pub async fn list_children(resolver: &Resolver, resolved: &Resolved) -> Result<Vec<String>> {
    let mut names = vec![SELF_ENTRY.to_string(), PARENT_ENTRY.to_string()];

    match resolved {
        Resolved::Root { databases } => names.extend(databases.iter().cloned()),
        Resolved::Remote(Entity::Database(descriptor)) => {
            let ids = resolver
                .store()
                .list_document_ids(&descriptor.name)
                .await?;
            let before = names.len();
            names.extend(
                ids.iter()
                    .filter(|id| !codec::is_design_document(id))
                    .map(|id| codec::to_filename(id)),
            );
            let count = names.len() - before;
            debug!(
                "all docs of {database}: {count}",
                database: descriptor.name.as_str(),
                count: count
            );
        }
        Resolved::Remote(_) => {}
    }

    Ok(names)
}
