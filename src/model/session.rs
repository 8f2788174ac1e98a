// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zen's session payload (the JSON inside `zen-sessions.jsonlz4`).
//!
//! Only the fields the importer reads or writes are modelled. Everything else is carried in
//! `extra` so a read-modify-write cycle never drops state Zen relies on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::ids::{opt_id, FolderId, SyncId, WorkspaceId};
use super::null_as_default;

/// Principal Zen writes for pinned entries (`{"3":{}}`, the system principal).
pub const TRIGGERING_PRINCIPAL_BASE64: &str = "eyIzIjp7fX0=";

pub const ABOUT_BLANK: &str = "about:blank";

/// Gap between consecutive workspace positions.
pub const WORKSPACE_POSITION_STEP: i64 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZenSession {
    #[serde(default, deserialize_with = "null_as_default")]
    pub spaces: Vec<Workspace>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tabs: Vec<Tab>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub folders: Vec<Folder>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<Group>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub split_view_data: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_collected: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ZenSession {
    pub fn workspace_by_name(&self, name: &str) -> Option<&Workspace> {
        self.spaces.iter().find(|w| w.name == name)
    }

    pub fn workspace_mut(&mut self, id: &WorkspaceId) -> Option<&mut Workspace> {
        self.spaces.iter_mut().find(|w| &w.uuid == id)
    }

    pub fn max_workspace_position(&self) -> i64 {
        self.spaces.iter().map(|w| w.position).max().unwrap_or(0)
    }

    /// Drops the workspace's pinned tabs and its folders (with their paired groups).
    ///
    /// Unpinned tabs stay: they are the user's open session, not imported state.
    pub fn purge_workspace_pins(&mut self, workspace: &WorkspaceId) -> PurgeCounts {
        let tabs_before = self.tabs.len();
        self.tabs
            .retain(|tab| !(tab.pinned && tab.zen_workspace.as_ref() == Some(workspace)));

        let mut removed_folders = Vec::new();
        self.folders.retain(|folder| {
            let owned = &folder.workspace_id == workspace;
            if owned {
                removed_folders.push(folder.id.clone());
            }
            !owned
        });
        let groups_before = self.groups.len();
        self.groups.retain(|group| !removed_folders.contains(&group.id));

        PurgeCounts {
            tabs: tabs_before - self.tabs.len(),
            folders: removed_folders.len(),
            groups: groups_before - self.groups.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeCounts {
    pub tabs: usize,
    pub folders: usize,
    pub groups: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub uuid: WorkspaceId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub container_tab_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme: Theme,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_collapsed_pinned_tabs: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, container_tab_id: i64, position: i64) -> Self {
        Self {
            uuid: WorkspaceId::braced_uuid(),
            name: name.into(),
            icon: icon.into(),
            container_tab_id,
            position,
            theme: Theme::default(),
            has_collapsed_pinned_tabs: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gradient_colors: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub opacity: f64,
    #[serde(default)]
    pub rotation: Value,
    #[serde(default)]
    pub texture: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            kind: "gradient".to_owned(),
            gradient_colors: Vec::new(),
            opacity: 0.5,
            rotation: Value::Null,
            texture: Value::Null,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "triggeringPrincipal_base64", default, deserialize_with = "null_as_default")]
    pub triggering_principal_base64: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TabEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            triggering_principal_base64: TRIGGERING_PRINCIPAL_BASE64.to_owned(),
            extra: Map::new(),
        }
    }

    pub fn blank() -> Self {
        Self::new(ABOUT_BLANK, "")
    }
}

/// `zenDefaultUserContextId` has been written both as a number and as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContextRef {
    Id(i64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<TabEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_accessed: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hidden: bool,
    #[serde(default, with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub zen_workspace: Option<WorkspaceId>,
    #[serde(default, with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub zen_sync_id: Option<SyncId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zen_essential: bool,
    #[serde(default)]
    pub zen_default_user_context_id: Option<UserContextRef>,
    #[serde(default)]
    pub zen_pinned_icon: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zen_is_empty: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zen_has_static_icon: bool,
    #[serde(default)]
    pub zen_glance_id: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zen_is_glance: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub zen_static_label: String,
    #[serde(rename = "_zenPinnedInitialState", default)]
    pub zen_pinned_initial_state: Value,
    #[serde(default)]
    pub search_mode: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_context_id: i64,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_typed_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_typed_clear: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<FolderId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tab {
    /// A pinned tab in `workspace` with the given history entry.
    pub fn pinned(workspace: WorkspaceId, container_id: i64, entry: TabEntry, now_millis: i64) -> Self {
        Self {
            entries: vec![entry],
            last_accessed: now_millis,
            pinned: true,
            hidden: false,
            zen_workspace: Some(workspace),
            zen_sync_id: Some(SyncId::braced_uuid()),
            zen_essential: false,
            zen_default_user_context_id: Some(UserContextRef::Id(container_id)),
            zen_pinned_icon: Value::Null,
            zen_is_empty: false,
            zen_has_static_icon: false,
            zen_glance_id: Value::Null,
            zen_is_glance: false,
            zen_static_label: String::new(),
            zen_pinned_initial_state: Value::Null,
            search_mode: Value::Null,
            user_context_id: container_id,
            attributes: Value::Object(Map::new()),
            index: 0,
            user_typed_value: String::new(),
            user_typed_clear: 0,
            image: None,
            group_id: None,
            extra: Map::new(),
        }
    }

    /// Zen only materialises a folder's tab-group when at least one tab carries its id.
    pub fn anchor(workspace: WorkspaceId, container_id: i64, folder: FolderId, now_millis: i64) -> Self {
        Self {
            zen_is_empty: true,
            group_id: Some(folder),
            ..Self::pinned(workspace, container_id, TabEntry::blank(), now_millis)
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.zen_is_empty && self.group_id.is_some()
    }

    pub fn first_entry(&self) -> Option<&TabEntry> {
        self.entries.first()
    }
}

/// Where a folder sits relative to its siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum PrevSibling {
    /// Placed right after this folder.
    Folder(FolderId),
    /// A shape this importer does not produce. Kept verbatim for folders it does not touch.
    Unrecognized(Value),
}

impl PrevSibling {
    pub fn folder_id(&self) -> Option<&FolderId> {
        match self {
            Self::Folder(id) => Some(id),
            Self::Unrecognized(_) => None,
        }
    }
}

impl Serialize for PrevSibling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Folder(id) => {
                serde_json::json!({"type": "group", "id": id.as_str()}).serialize(serializer)
            }
            Self::Unrecognized(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PrevSibling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let kind = raw.get("type").and_then(Value::as_str);
        let id = raw.get("id").and_then(Value::as_str);
        match (kind, id) {
            (Some("group"), Some(id)) => match FolderId::new(id) {
                Ok(id) => Ok(Self::Folder(id)),
                Err(_) => Ok(Self::Unrecognized(raw)),
            },
            _ => Ok(Self::Unrecognized(raw)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub split_view_group: bool,
    pub id: FolderId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collapsed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub save_on_window_close: bool,
    #[serde(default, with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
    /// `None` (serialized as `null`) places the folder first among its siblings.
    #[serde(default)]
    pub prev_sibling_info: Option<PrevSibling>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub empty_tab_ids: Vec<SyncId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_icon: String,
    pub workspace_id: WorkspaceId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>, workspace_id: WorkspaceId) -> Self {
        Self {
            pinned: true,
            split_view_group: false,
            id,
            name: name.into(),
            collapsed: true,
            save_on_window_close: true,
            parent_id: None,
            prev_sibling_info: None,
            empty_tab_ids: Vec::new(),
            user_icon: String::new(),
            workspace_id,
            extra: Map::new(),
        }
    }
}

/// Firefox tab-group record paired one-to-one with a [`Folder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: FolderId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub color: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collapsed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub essential: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub split_view: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Group {
    pub fn for_folder(folder: &Folder) -> Self {
        Self {
            id: folder.id.clone(),
            name: folder.name.clone(),
            color: Value::Null,
            collapsed: folder.collapsed,
            pinned: folder.pinned,
            essential: false,
            split_view: false,
            extra: Map::new(),
        }
    }
}
