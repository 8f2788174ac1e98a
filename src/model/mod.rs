// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Data model for both sides of the import.
//!
//! `source` and `catalog` describe Arc's sidebar export. `session` and `containers` describe the
//! Zen profile files that get rewritten.

pub mod catalog;
pub mod containers;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod session;
pub mod source;

use serde::{Deserialize, Deserializer};

pub use catalog::{ItemCatalog, PathGuard, WalkError, MAX_TREE_DEPTH};
pub use containers::{ContainerIdentity, ContainerRegistry};
pub use ids::{FolderId, Id, IdError, ItemId, SpaceId, SyncId, WorkspaceId};
pub use session::{
    Folder, Group, PrevSibling, PurgeCounts, Tab, TabEntry, Theme, UserContextRef, Workspace,
    ZenSession,
};
pub use source::{
    IconRef, Item, ItemPayload, ProfileRef, RootRef, SidebarSnapshot, SourceError, Space,
};

/// Reads an explicit JSON `null` as the type's default, like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
