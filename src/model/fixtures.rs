// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::ItemCatalog;
use super::ids::{ItemId, SpaceId};
use super::source::{Item, ItemPayload, ProfileRef, RootRef, SidebarSnapshot, Space};

fn iid(value: &str) -> ItemId {
    ItemId::new(value).expect("item id")
}

pub(crate) fn tab(id: &str, title: &str, url: &str) -> Item {
    Item {
        id: iid(id),
        title: (!title.is_empty()).then(|| title.to_owned()),
        parent_id: None,
        children: Vec::new(),
        payload: ItemPayload::Tab {
            saved_title: String::new(),
            saved_url: url.to_owned(),
        },
    }
}

pub(crate) fn folder(id: &str, title: &str, children: &[&str]) -> Item {
    Item {
        id: iid(id),
        title: Some(title.to_owned()),
        parent_id: None,
        children: children.iter().map(|c| iid(c)).collect(),
        payload: ItemPayload::Other,
    }
}

pub(crate) fn container_marker(id: &str, children: &[&str]) -> Item {
    Item {
        id: iid(id),
        title: None,
        parent_id: None,
        children: children.iter().map(|c| iid(c)).collect(),
        payload: ItemPayload::ContainerMarker,
    }
}

pub(crate) fn space(id: &str, title: &str, roots: &[&str]) -> Space {
    Space {
        id: SpaceId::new(id).expect("space id"),
        title: title.to_owned(),
        icon: String::new(),
        custom_icon: None,
        roots: roots.iter().map(|r| RootRef::Item((*r).to_owned())).collect(),
        profile: ProfileRef::Default,
    }
}

pub(crate) fn space_with_profile(id: &str, title: &str, roots: &[&str], profile: &str) -> Space {
    Space {
        profile: ProfileRef::Custom {
            directory_basename: Some(profile.to_owned()),
        },
        ..space(id, title, roots)
    }
}

pub(crate) fn snapshot(spaces: Vec<Space>, items: Vec<Item>) -> SidebarSnapshot {
    SidebarSnapshot {
        spaces,
        catalog: ItemCatalog::from_items(items),
    }
}

/// "Work" space with one root folder "Proj" holding two tabs.
pub(crate) fn work_project_snapshot() -> SidebarSnapshot {
    snapshot(
        vec![space("space-work", "Work", &["pinned", "proj"])],
        vec![
            folder("proj", "Proj", &["tab-a", "tab-b"]),
            tab("tab-a", "A", "https://a.com"),
            tab("tab-b", "B", "https://b.com"),
        ],
    )
}
