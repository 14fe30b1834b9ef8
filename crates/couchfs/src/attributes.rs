// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::EntryType;
use crate::content;
use crate::entity::Entity;
use crate::error::Result;
use crate::resolver::Resolved;

/// Permission bits shared by every entry
pub const PERMISSIONS: u16 = 0o755;

/// Size reported for database directories
pub const DATABASE_SIZE: u64 = 4096;

/// Filesystem metadata for one path, derived on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub entry_type: EntryType,
    pub permissions: u16,
    pub nlink: u32,
    /// Byte size; for documents, exactly the rendered content length
    pub size: u64,
}

impl Attributes {
    fn directory(nlink: u32, size: u64) -> Self {
        Self {
            entry_type: EntryType::Directory,
            permissions: PERMISSIONS,
            nlink,
            size,
        }
    }

    fn file(size: u64) -> Self {
        Self {
            entry_type: EntryType::File,
            permissions: PERMISSIONS,
            nlink: 1,
            size,
        }
    }

    /// Attributes for a resolved path
    pub fn of(resolved: &Resolved) -> Result<Self> {
        Ok(match resolved {
            Resolved::Root { databases } => {
                let nlink = u32::try_from(databases.len())
                    .unwrap_or(u32::MAX)
                    .saturating_add(2);
                Self::directory(nlink, 0)
            }
            Resolved::Remote(Entity::Database(_)) => Self::directory(2, DATABASE_SIZE),
            Resolved::Remote(Entity::Document(doc)) => {
                Self::file(content::render(doc)?.len() as u64)
            }
            Resolved::Remote(Entity::Opaque { .. }) => Self::file(0),
        })
    }
}
