// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 2 spaces, 4 folders each, 5 tabs per folder.
    Small,
    /// 6 spaces, 3 levels of nested folders, 8 tabs per folder.
    MediumNested,
    /// 12 spaces with long titles and URLs.
    LargeLongLabels,
}

struct Params {
    spaces: usize,
    folders: usize,
    depth: usize,
    tabs: usize,
    label_len: usize,
}

fn params(case: Case) -> Params {
    match case {
        Case::Small => Params {
            spaces: 2,
            folders: 4,
            depth: 1,
            tabs: 5,
            label_len: 16,
        },
        Case::MediumNested => Params {
            spaces: 6,
            folders: 3,
            depth: 3,
            tabs: 8,
            label_len: 24,
        },
        Case::LargeLongLabels => Params {
            spaces: 12,
            folders: 6,
            depth: 2,
            tabs: 12,
            label_len: 180,
        },
    }
}

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len.max(prefix.len()));
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

struct Builder {
    params: Params,
    items: Vec<Value>,
}

impl Builder {
    fn folder(&mut self, id: String, depth: usize) -> String {
        let mut children = Vec::new();
        for t in 0..self.params.tabs {
            let tab_id = format!("{id}-t{t}");
            let title = ascii_repeat_to_len(&format!("Tab {tab_id} "), 'x', self.params.label_len);
            let url = ascii_repeat_to_len(
                &format!("https://host{}.example/{tab_id}/", t % 7),
                'p',
                self.params.label_len + 20,
            );
            self.items.push(json!({
                "id": tab_id,
                "parentID": id,
                "childrenIds": [],
                "data": { "tab": { "savedTitle": title, "savedURL": url } }
            }));
            children.push(tab_id);
        }
        if depth > 1 {
            for f in 0..self.params.folders {
                children.push(self.folder(format!("{id}-f{f}"), depth - 1));
            }
        }
        self.items.push(json!({
            "id": id,
            "title": ascii_repeat_to_len(&format!("Folder {id} "), 'y', self.params.label_len),
            "childrenIds": children,
            "data": { "list": {} }
        }));
        id
    }
}

/// A complete `StorableSidebar.json` document for `case`.
pub fn arc_export(case: Case) -> Vec<u8> {
    let mut builder = Builder {
        params: params(case),
        items: Vec::new(),
    };
    let mut spaces = Vec::new();
    for s in 0..builder.params.spaces {
        let mut roots = vec![Value::from("pinned")];
        for f in 0..builder.params.folders {
            let depth = builder.params.depth;
            roots.push(Value::from(builder.folder(format!("s{s}-f{f}"), depth)));
        }
        roots.push(json!({ "unpinned": {} }));
        spaces.push(Value::from("pinned"));
        spaces.push(json!({
            "id": format!("space-{s}"),
            "title": format!("Space {s}"),
            "containerIDs": roots,
            "customInfo": { "iconType": { "icon": "briefcase" } },
            "profile": if s % 2 == 0 {
                json!({ "default": {} })
            } else {
                json!({ "custom": { "_0": { "directoryBasename": format!("Profile {s}") } } })
            }
        }));
    }

    let doc = json!({
        "sidebar": {
            "containers": [
                { "global": {} },
                { "spaces": spaces, "items": builder.items }
            ]
        }
    });
    serde_json::to_vec(&doc).expect("serialize fixture")
}

pub fn checksum_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(bytes.len() as u64, |acc, b| acc.wrapping_mul(131).wrapping_add(u64::from(*b)))
}
