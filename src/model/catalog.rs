// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::ids::ItemId;
use super::source::{Item, RootRef, Space};

/// Deepest folder nesting accepted from an export. Arc's UI stops well before this.
pub const MAX_TREE_DEPTH: usize = 64;

/// Item lookup by id, built once per export.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemId, Item>,
}

impl ItemCatalog {
    /// Later duplicates of an id replace earlier ones.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id.clone(), item)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The space's root items in source order. Markers and unknown ids are skipped.
    pub fn resolve_roots<'a>(&'a self, space: &Space) -> Vec<&'a Item> {
        space
            .roots
            .iter()
            .filter_map(|root| match root {
                RootRef::Item(id) => self.get(id),
                RootRef::Marker => None,
            })
            .collect()
    }

    /// Children of `item` that resolve, in source order.
    pub fn children<'a>(&'a self, item: &'a Item) -> impl Iterator<Item = &'a Item> + 'a {
        item.children.iter().filter_map(move |id| self.get(id.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// `item_id` is its own ancestor.
    Cycle { item_id: ItemId },
    TooDeep { item_id: ItemId, limit: usize },
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { item_id } => {
                write!(f, "Arc item {item_id} is nested inside itself; refusing to import a cyclic tree")
            }
            Self::TooDeep { item_id, limit } => {
                write!(f, "Arc item {item_id} is nested deeper than {limit} levels")
            }
        }
    }
}

impl std::error::Error for WalkError {}

/// Tracks the ids on the current root-to-node path of a depth-first walk.
#[derive(Debug, Default)]
pub struct PathGuard {
    on_path: HashSet<ItemId>,
}

impl PathGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, item: &Item) -> Result<(), WalkError> {
        if self.on_path.len() >= MAX_TREE_DEPTH {
            return Err(WalkError::TooDeep {
                item_id: item.id.clone(),
                limit: MAX_TREE_DEPTH,
            });
        }
        if !self.on_path.insert(item.id.clone()) {
            return Err(WalkError::Cycle {
                item_id: item.id.clone(),
            });
        }
        Ok(())
    }

    pub fn leave(&mut self, item: &Item) {
        self.on_path.remove(&item.id);
    }

    pub fn depth(&self) -> usize {
        self.on_path.len()
    }
}
