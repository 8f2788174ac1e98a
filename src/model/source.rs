// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Arc's `StorableSidebar.json` export.
//!
//! The export is loosely typed: `spaces` and `items` interleave opaque string markers with
//! objects, and several fields have more than one shape. Raw serde structs stay private; the
//! public types expose one tagged variant per shape.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::catalog::ItemCatalog;
use super::ids::{ItemId, SpaceId};
use super::null_as_default;

/// Index of the container that holds the user's spaces and items.
const MAIN_CONTAINER_INDEX: usize = 1;

#[derive(Debug)]
pub enum SourceError {
    Json { source: serde_json::Error },
    MissingMainContainer { containers: usize },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "cannot parse Arc sidebar export: {source}"),
            Self::MissingMainContainer { containers } => write!(
                f,
                "no main container found in Arc data (found {containers} container(s), need at least {})",
                MAIN_CONTAINER_INDEX + 1
            ),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::MissingMainContainer { .. } => None,
        }
    }
}

/// Where a space's icon came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconRef<'a> {
    /// `customInfo.iconType.icon`, set when the user picked a symbol.
    Custom(&'a str),
    /// The flat `icon` field.
    Flat(&'a str),
    Unset,
}

impl<'a> IconRef<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Custom(name) | Self::Flat(name) => name,
            Self::Unset => "",
        }
    }
}

/// The Arc profile a space runs under.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileRef {
    #[default]
    Default,
    Custom {
        directory_basename: Option<String>,
    },
}

impl ProfileRef {
    pub const DEFAULT_KEY: &'static str = "default";

    /// Stable key used to group spaces that share a profile.
    pub fn key(&self) -> &str {
        match self {
            Self::Custom {
                directory_basename: Some(name),
            } if !name.is_empty() => name,
            _ => Self::DEFAULT_KEY,
        }
    }
}

/// One entry of a space's `containerIDs` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootRef {
    /// A string that may name an item. Markers such as `"pinned"` also land here and simply fail
    /// to resolve.
    Item(String),
    /// A non-string entry.
    Marker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: SpaceId,
    pub title: String,
    pub icon: String,
    pub custom_icon: Option<String>,
    pub roots: Vec<RootRef>,
    pub profile: ProfileRef,
}

impl Space {
    pub fn icon_ref(&self) -> IconRef<'_> {
        match self.custom_icon.as_deref() {
            Some(name) if !name.is_empty() => IconRef::Custom(name),
            _ if !self.icon.is_empty() => IconRef::Flat(&self.icon),
            _ => IconRef::Unset,
        }
    }

    /// The title Zen shows for this space, with the fallback for untitled spaces.
    pub fn display_name(&self) -> String {
        if self.title.is_empty() {
            format!("Workspace {}", self.id)
        } else {
            self.title.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPayload {
    Tab { saved_title: String, saved_url: String },
    /// Arc-internal grouping node. Emits nothing; its children take its place.
    ContainerMarker,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: Option<String>,
    pub parent_id: Option<ItemId>,
    pub children: Vec<ItemId>,
    pub payload: ItemPayload,
}

impl Item {
    pub fn is_container_marker(&self) -> bool {
        matches!(self.payload, ItemPayload::ContainerMarker)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Explicit title, else the tab's saved title, else `"Untitled"`.
    pub fn resolved_title(&self) -> &str {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title;
        }
        match &self.payload {
            ItemPayload::Tab { saved_title, .. } if !saved_title.is_empty() => saved_title,
            _ => "Untitled",
        }
    }

    pub fn url(&self) -> &str {
        match &self.payload {
            ItemPayload::Tab { saved_url, .. } => saved_url,
            _ => "",
        }
    }
}

/// The parsed export: spaces in source order plus the item catalog.
#[derive(Debug, Clone, Default)]
pub struct SidebarSnapshot {
    pub spaces: Vec<Space>,
    pub catalog: ItemCatalog,
}

impl SidebarSnapshot {
    pub fn from_json(bytes: &[u8]) -> Result<Self, SourceError> {
        let raw: RawExport = serde_json::from_slice(bytes).map_err(|source| SourceError::Json { source })?;
        let containers = raw.sidebar.map(|s| s.containers).unwrap_or_default();
        let count = containers.len();
        let Some(main) = containers.into_iter().nth(MAIN_CONTAINER_INDEX) else {
            return Err(SourceError::MissingMainContainer { containers: count });
        };
        Ok(Self::from_container(main))
    }

    fn from_container(main: RawContainer) -> Self {
        let spaces = main
            .spaces
            .into_iter()
            .filter_map(parse_record::<RawSpace>)
            .filter_map(RawSpace::into_space)
            .collect();

        let items = main
            .items
            .into_iter()
            .filter_map(parse_record::<RawItem>)
            .filter_map(RawItem::into_item);

        Self {
            spaces,
            catalog: ItemCatalog::from_items(items),
        }
    }
}

/// Objects with an `id` are parsed; string markers and malformed records are skipped.
fn parse_record<T: for<'de> Deserialize<'de>>(value: Value) -> Option<T> {
    let has_id = value.as_object().is_some_and(|obj| obj.contains_key("id"));
    if !has_id {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!(error = %err, "skipping malformed sidebar record");
            None
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Deserialize)]
struct RawExport {
    sidebar: Option<RawSidebar>,
}

#[derive(Debug, Deserialize)]
struct RawSidebar {
    #[serde(default)]
    containers: Vec<RawContainer>,
}

#[derive(Debug, Default, Deserialize)]
struct RawContainer {
    #[serde(default)]
    spaces: Vec<Value>,
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpace {
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    icon: String,
    #[serde(default, rename = "containerIDs", deserialize_with = "null_as_default")]
    container_ids: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    custom_info: Option<RawCustomInfo>,
    #[serde(default, deserialize_with = "lenient")]
    profile: Option<RawProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomInfo {
    #[serde(default, deserialize_with = "lenient")]
    icon_type: Option<RawIconType>,
}

#[derive(Debug, Deserialize)]
struct RawIconType {
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawProfile {
    Default {},
    Custom {
        #[serde(default, rename = "_0")]
        data: Option<RawCustomProfile>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomProfile {
    #[serde(default)]
    directory_basename: Option<String>,
}

impl RawSpace {
    fn into_space(self) -> Option<Space> {
        let id = SpaceId::new(self.id).ok()?;
        let roots = self
            .container_ids
            .into_iter()
            .map(|entry| match entry {
                Value::String(s) => RootRef::Item(s),
                _ => RootRef::Marker,
            })
            .collect();
        let profile = match self.profile {
            None | Some(RawProfile::Default {}) => ProfileRef::Default,
            Some(RawProfile::Custom { data }) => ProfileRef::Custom {
                directory_basename: data.and_then(|d| d.directory_basename),
            },
        };
        Some(Space {
            id,
            title: self.title,
            icon: self.icon,
            custom_icon: self.custom_info.and_then(|c| c.icon_type).and_then(|t| t.icon),
            roots,
            profile,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "parentID")]
    parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    children_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    data: Option<RawItemData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItemData {
    #[serde(default, deserialize_with = "lenient")]
    tab: Option<RawTab>,
    #[serde(default)]
    item_container: Option<RawItemContainer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTab {
    #[serde(default, deserialize_with = "null_as_default")]
    saved_title: String,
    #[serde(default, rename = "savedURL", deserialize_with = "null_as_default")]
    saved_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItemContainer {
    #[serde(default)]
    container_type: Option<Value>,
}

impl RawItem {
    fn into_item(self) -> Option<Item> {
        let id = ItemId::new(self.id).ok()?;
        let payload = match self.data {
            Some(RawItemData {
                item_container:
                    Some(RawItemContainer {
                        container_type: Some(_),
                    }),
                ..
            }) => ItemPayload::ContainerMarker,
            Some(RawItemData { tab: Some(tab), .. }) => ItemPayload::Tab {
                saved_title: tab.saved_title,
                saved_url: tab.saved_url,
            },
            _ => ItemPayload::Other,
        };
        Some(Item {
            id,
            title: self.title,
            parent_id: self.parent_id.and_then(|p| ItemId::new(p).ok()),
            children: self
                .children_ids
                .into_iter()
                .filter_map(|child| ItemId::new(child).ok())
                .collect(),
            payload,
        })
    }
}
