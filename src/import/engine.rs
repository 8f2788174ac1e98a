// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Arc space trees rewritten into Zen workspaces, folders and pinned tabs.
//!
//! Zen silently drops structure that does not satisfy three rules, so every emitted folder:
//!
//! - owns at least one anchor tab (`zenIsEmpty`, `about:blank`) whose `groupId` is the folder id,
//! - points at its previous sibling *folder* under the same parent (`null` for the first one),
//! - is paired with a collapsed tab-group record of the same id.
//!
//! Emission is depth-first in source order and single-threaded, so output is deterministic apart
//! from generated uuids and the timestamp prefix of folder ids.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::json;

use super::allocator::ContainerAllocation;
use super::report::{ImportEvent, Reporter};
use crate::favicon::FaviconProvider;
use crate::mapping::IconMapper;
use crate::model::session::{TRIGGERING_PRINCIPAL_BASE64, WORKSPACE_POSITION_STEP};
use crate::model::{
    Folder, FolderId, Group, Item, ItemCatalog, PathGuard, PrevSibling, SidebarSnapshot, Space,
    Tab, TabEntry, WalkError, Workspace, WorkspaceId, ZenSession,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitCounts {
    pub folders: usize,
    pub tabs: usize,
}

impl EmitCounts {
    pub fn total(&self) -> usize {
        self.folders + self.tabs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Timestamp written to `lastAccessed` and used as the folder id prefix.
    pub now_millis: i64,
}

impl TransformOptions {
    pub fn now() -> Self {
        let now_millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or_default();
        Self { now_millis }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    Walk(WalkError),
    /// The allocator was not run over this space's profile.
    UnallocatedProfile { space: String, profile: String },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Walk(err) => err.fmt(f),
            Self::UnallocatedProfile { space, profile } => {
                write!(f, "no container allocated for profile {profile:?} of space \"{space}\"")
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Walk(err) => Some(err),
            Self::UnallocatedProfile { .. } => None,
        }
    }
}

impl From<WalkError> for TransformError {
    fn from(err: WalkError) -> Self {
        Self::Walk(err)
    }
}

/// Sibling scope for previous-sibling chaining.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ParentKey {
    Root,
    Folder(FolderId),
}

impl ParentKey {
    fn of(parent: Option<&FolderId>) -> Self {
        match parent {
            Some(id) => Self::Folder(id.clone()),
            None => Self::Root,
        }
    }
}

pub struct Transformer<'a> {
    mapper: &'a dyn IconMapper,
    favicons: &'a dyn FaviconProvider,
    reporter: &'a dyn Reporter,
    options: TransformOptions,
}

impl<'a> Transformer<'a> {
    pub fn new(
        mapper: &'a dyn IconMapper,
        favicons: &'a dyn FaviconProvider,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            mapper,
            favicons,
            reporter,
            options: TransformOptions::now(),
        }
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Merges every space of `snapshot` into `session`.
    ///
    /// All workspaces are resolved (and purged on a name match) before any item is emitted, so
    /// two Arc spaces with the same name land in one workspace without erasing each other.
    pub fn transform(
        &self,
        snapshot: &SidebarSnapshot,
        allocation: &ContainerAllocation,
        session: &mut ZenSession,
    ) -> Result<EmitCounts, TransformError> {
        let mut targets = Vec::with_capacity(snapshot.spaces.len());
        let mut next_position = session.max_workspace_position() + WORKSPACE_POSITION_STEP;
        for space in &snapshot.spaces {
            let container_id = allocation.container_for(space).ok_or_else(|| {
                TransformError::UnallocatedProfile {
                    space: space.display_name(),
                    profile: space.profile.key().to_owned(),
                }
            })?;
            let workspace = self.resolve_workspace(space, container_id, session, &mut next_position);
            targets.push((space, workspace, container_id));
        }

        let mut counts = EmitCounts::default();
        let mut chains: HashMap<WorkspaceId, HashMap<ParentKey, FolderId>> = HashMap::new();
        let mut taken_folder_ids: HashSet<String> =
            session.folders.iter().map(|f| f.id.as_str().to_owned()).collect();
        for (space, workspace, container_id) in targets {
            let roots = snapshot.catalog.resolve_roots(space);
            self.reporter.report(ImportEvent::SpaceStarted {
                name: space.display_name(),
                roots: roots.len(),
            });

            let last_folder = chains.remove(&workspace).unwrap_or_default();
            let mut walk = SpaceWalk {
                catalog: &snapshot.catalog,
                session: &mut *session,
                favicons: self.favicons,
                reporter: self.reporter,
                workspace,
                container_id,
                now_millis: self.options.now_millis,
                last_folder,
                taken_folder_ids,
                guard: PathGuard::new(),
                counts: EmitCounts::default(),
            };
            for root in roots {
                walk.emit(root, None, 0)?;
            }
            counts.folders += walk.counts.folders;
            counts.tabs += walk.counts.tabs;
            taken_folder_ids = walk.taken_folder_ids;
            chains.insert(walk.workspace, walk.last_folder);
        }
        Ok(counts)
    }

    fn resolve_workspace(
        &self,
        space: &Space,
        container_id: i64,
        session: &mut ZenSession,
        next_position: &mut i64,
    ) -> WorkspaceId {
        let name = space.display_name();
        let icon = self.mapper.map_icon(space.icon_ref().name());

        if let Some(existing) = session.workspace_by_name(&name).map(|w| w.uuid.clone()) {
            let purged = session.purge_workspace_pins(&existing);
            if let Some(workspace) = session.workspace_mut(&existing) {
                workspace.icon = icon;
                workspace.container_tab_id = container_id;
            }
            self.reporter.report(ImportEvent::WorkspaceMerged {
                name,
                container_id,
                removed_tabs: purged.tabs,
                removed_folders: purged.folders,
            });
            return existing;
        }

        let position = *next_position;
        *next_position += WORKSPACE_POSITION_STEP;
        let workspace = Workspace::new(name.clone(), icon, container_id, position);
        let id = workspace.uuid.clone();
        session.spaces.push(workspace);
        self.reporter.report(ImportEvent::WorkspaceCreated {
            name,
            container_id,
            position,
        });
        id
    }
}

/// State for emitting one space. `last_folder` is carried over between spaces that share a
/// workspace and dropped when the run ends.
struct SpaceWalk<'w> {
    catalog: &'w ItemCatalog,
    session: &'w mut ZenSession,
    favicons: &'w dyn FaviconProvider,
    reporter: &'w dyn Reporter,
    workspace: WorkspaceId,
    container_id: i64,
    now_millis: i64,
    last_folder: HashMap<ParentKey, FolderId>,
    taken_folder_ids: HashSet<String>,
    guard: PathGuard,
    counts: EmitCounts,
}

impl SpaceWalk<'_> {
    fn emit(&mut self, item: &Item, parent: Option<&FolderId>, depth: usize) -> Result<(), WalkError> {
        self.guard.enter(item)?;

        let catalog = self.catalog;
        if item.is_container_marker() {
            self.reporter.report(ImportEvent::MarkerSkipped {
                item_id: item.id.to_string(),
                depth,
            });
            for child in catalog.children(item) {
                self.emit(child, parent, depth)?;
            }
        } else if item.has_children() {
            let folder_id = self.emit_folder(item, parent, depth);
            for child in catalog.children(item) {
                self.emit(child, Some(&folder_id), depth + 1)?;
            }
        } else {
            self.emit_tab(item, parent, depth);
        }

        self.guard.leave(item);
        Ok(())
    }

    fn emit_folder(&mut self, item: &Item, parent: Option<&FolderId>, depth: usize) -> FolderId {
        let title = item.resolved_title().to_owned();
        let folder_id = self.next_folder_id();

        let mut anchor = Tab::anchor(
            self.workspace.clone(),
            self.container_id,
            folder_id.clone(),
            self.now_millis,
        );
        anchor.index = self.session.tabs.len();
        let anchor_sync_id = anchor.zen_sync_id.clone();
        self.session.tabs.push(anchor);

        let scope = ParentKey::of(parent);
        let prev = self
            .last_folder
            .insert(scope, folder_id.clone())
            .map(PrevSibling::Folder);

        let mut folder = Folder::new(folder_id.clone(), title.clone(), self.workspace.clone());
        folder.parent_id = parent.cloned();
        folder.prev_sibling_info = prev;
        folder.empty_tab_ids = anchor_sync_id.into_iter().collect();

        self.session.groups.push(Group::for_folder(&folder));
        self.session.folders.push(folder);
        self.counts.folders += 1;
        self.reporter.report(ImportEvent::FolderCreated { title, depth });
        folder_id
    }

    fn emit_tab(&mut self, item: &Item, parent: Option<&FolderId>, depth: usize) {
        let title = item.resolved_title().to_owned();
        let url = item.url().to_owned();
        let image = if url.is_empty() {
            None
        } else {
            self.favicons
                .fetch_data_url(&url)
                .filter(|data_url| !data_url.is_empty())
        };

        let mut tab = Tab::pinned(
            self.workspace.clone(),
            self.container_id,
            TabEntry::new(url.clone(), title.clone()),
            self.now_millis,
        );
        tab.zen_static_label = title.clone();
        tab.zen_pinned_initial_state = json!({
            "entry": {
                "url": url,
                "title": title,
                "triggeringPrincipal_base64": TRIGGERING_PRINCIPAL_BASE64,
            },
            "image": image,
        });
        tab.image = image;
        tab.group_id = parent.cloned();
        tab.index = self.session.tabs.len();

        self.reporter.report(ImportEvent::TabCreated {
            has_favicon: tab.image.is_some(),
            title,
            url,
            depth,
        });
        self.session.tabs.push(tab);
        self.counts.tabs += 1;
    }

    /// `<now>-<n>` with `n` starting at the folder count, skipping ids already taken.
    fn next_folder_id(&mut self) -> FolderId {
        let mut n = self.session.folders.len();
        loop {
            let candidate = format!("{}-{}", self.now_millis, n);
            if !self.taken_folder_ids.contains(&candidate) {
                if let Ok(id) = FolderId::new(candidate.clone()) {
                    self.taken_folder_ids.insert(candidate);
                    return id;
                }
            }
            n += 1;
        }
    }
}
