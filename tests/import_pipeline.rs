// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::{json, Value};
use tempfile::TempDir;

use zenport::codec;
use zenport::favicon::{FaviconProvider, WarmOutcome};
use zenport::import::{ImportError, ImportEvent, ImportOptions, Importer, RecordingReporter, TransformOptions};
use zenport::model::{ContainerRegistry, PrevSibling, ZenSession};
use zenport::store::ProfileDir;

const NOW: i64 = 1_700_000_000_000;

/// Every https URL gets a fixed icon; anything else fails.
struct StaticFavicons;

impl FaviconProvider for StaticFavicons {
    fn fetch_data_url(&self, page_url: &str) -> Option<String> {
        page_url
            .starts_with("https://")
            .then(|| "data:image/png;base64,AA==".to_owned())
    }

    fn warm(&self, page_url: &str) -> WarmOutcome {
        if page_url.starts_with("https://") {
            WarmOutcome::Fetched
        } else {
            WarmOutcome::Failed
        }
    }
}

fn arc_export() -> Value {
    json!({
        "sidebar": {
            "containers": [
                { "global": {} },
                {
                    "spaces": [
                        "space-work",
                        {
                            "id": "space-work",
                            "title": "Work",
                            "customInfo": { "iconType": { "icon": "briefcase" } },
                            "containerIDs": ["pinned", "proj", "a", "b", { "unpinned": {} }],
                            "profile": { "default": {} }
                        },
                        {
                            "id": "space-foo",
                            "title": "Foo",
                            "containerIDs": ["wrap"],
                            "profile": { "custom": { "_0": { "directoryBasename": "Profile 1" } } }
                        },
                        {
                            "id": "space-bar",
                            "title": "Bar",
                            "containerIDs": ["loose"],
                            "profile": { "custom": { "_0": { "directoryBasename": "Profile 1" } } }
                        }
                    ],
                    "items": [
                        "proj",
                        { "id": "proj", "title": "Proj", "childrenIds": ["tab-a", "tab-b"], "data": { "list": {} } },
                        { "id": "tab-a", "parentID": "proj", "title": "A", "childrenIds": [],
                          "data": { "tab": { "savedTitle": "A saved", "savedURL": "https://a.com" } } },
                        { "id": "tab-b", "parentID": "proj", "childrenIds": [],
                          "data": { "tab": { "savedTitle": "B", "savedURL": "http://b.com" } } },
                        { "id": "a", "title": "A folder", "childrenIds": ["inner"], "data": { "list": {} } },
                        { "id": "inner", "childrenIds": [], "data": { "tab": { "savedURL": "https://inner.com" } } },
                        { "id": "b", "title": "B folder", "childrenIds": ["b1"], "data": { "list": {} } },
                        { "id": "b1", "title": "B1", "childrenIds": [], "data": { "tab": { "savedURL": "https://b1.com" } } },
                        { "id": "wrap", "childrenIds": ["foo-tab"],
                          "data": { "itemContainer": { "containerType": { "spaceItems": { "_0": "space-foo" } } } } },
                        { "id": "foo-tab", "title": "Foo tab", "childrenIds": [],
                          "data": { "tab": { "savedURL": "https://foo.com" } } },
                        { "id": "loose", "title": "Bar tab", "childrenIds": [],
                          "data": { "tab": { "savedURL": "https://bar.com" } } },
                        { "title": "no id, skipped" }
                    ]
                }
            ]
        }
    })
}

struct Ctx {
    _tmp: TempDir,
    arc_data: PathBuf,
    profile: PathBuf,
}

#[fixture]
fn ctx() -> Ctx {
    let tmp = tempfile::tempdir().expect("tempdir");
    let arc_data = tmp.path().join("StorableSidebar.json");
    fs::write(&arc_data, serde_json::to_vec(&arc_export()).expect("json")).expect("write arc data");
    let profile = tmp.path().join("zen-profile");
    fs::create_dir(&profile).expect("profile dir");
    Ctx {
        _tmp: tmp,
        arc_data,
        profile,
    }
}

fn importer(profile: &Path, dry_run: bool, reporter: Arc<RecordingReporter>) -> Importer {
    Importer::new(
        ProfileDir::new(profile),
        ImportOptions {
            dry_run,
            favicon_workers: 2,
        },
    )
    .with_reporter(reporter)
    .with_favicons(Arc::new(StaticFavicons))
    .with_transform_options(TransformOptions { now_millis: NOW })
}

fn read_session(profile: &Path) -> ZenSession {
    let bytes = fs::read(profile.join("zen-sessions.jsonlz4")).expect("session file");
    assert_eq!(&bytes[..8], codec::MAGIC);
    codec::decode_json(&bytes).expect("decode session")
}

fn read_registry(profile: &Path) -> ContainerRegistry {
    let text = fs::read_to_string(profile.join("containers.json")).expect("containers.json");
    serde_json::from_str(&text).expect("registry json")
}

fn assert_structural_invariants(session: &ZenSession) {
    let folder_ids: HashSet<_> = session.folders.iter().map(|f| f.id.as_str().to_owned()).collect();
    for folder in &session.folders {
        let anchors = session
            .tabs
            .iter()
            .filter(|t| t.is_anchor() && t.group_id.as_ref() == Some(&folder.id))
            .count();
        assert!(anchors >= 1, "folder {} has no anchor tab", folder.name);
        assert!(session.groups.iter().any(|g| g.id == folder.id));
        if let Some(prev) = folder.prev_sibling_info.as_ref().and_then(PrevSibling::folder_id) {
            assert!(folder_ids.contains(prev.as_str()), "prev sibling must be a folder");
        }
    }
}

#[rstest]
fn first_import_writes_session_and_registry(ctx: Ctx) {
    let reporter = Arc::new(RecordingReporter::new());
    let summary = importer(&ctx.profile, false, reporter.clone())
        .run(&ctx.arc_data)
        .expect("import");

    assert_eq!(summary.spaces, 3);
    assert_eq!(summary.emitted.folders, 3);
    assert_eq!(summary.emitted.tabs, 6);
    assert_eq!(summary.items, 9);
    assert_eq!(summary.containers_created, 2);
    assert_eq!(summary.favicons.total, 6);
    assert_eq!(summary.favicons.failed, 1);
    assert!(summary.backup.is_none(), "nothing to back up on a fresh profile");

    let session = read_session(&ctx.profile);
    assert_eq!(session.spaces.len(), 3);
    assert_structural_invariants(&session);

    let work = session.workspace_by_name("Work").expect("Work workspace");
    let proj = session.folders.iter().find(|f| f.name == "Proj").expect("Proj folder");
    assert_eq!(proj.workspace_id, work.uuid);
    assert_eq!(proj.prev_sibling_info, None);
    let a = session.folders.iter().find(|f| f.name == "A folder").expect("A");
    let b = session.folders.iter().find(|f| f.name == "B folder").expect("B");
    assert_eq!(a.prev_sibling_info, Some(PrevSibling::Folder(proj.id.clone())));
    assert_eq!(b.prev_sibling_info, Some(PrevSibling::Folder(a.id.clone())));

    let tab_a = session
        .tabs
        .iter()
        .find(|t| t.first_entry().is_some_and(|e| e.url == "https://a.com"))
        .expect("tab a");
    assert_eq!(tab_a.first_entry().map(|e| e.title.as_str()), Some("A"));
    assert_eq!(tab_a.group_id.as_ref(), Some(&proj.id));
    assert_eq!(tab_a.image.as_deref(), Some("data:image/png;base64,AA=="));
    let tab_b = session
        .tabs
        .iter()
        .find(|t| t.first_entry().is_some_and(|e| e.url == "http://b.com"))
        .expect("tab b");
    assert_eq!(tab_b.image, None);

    let foo = session.workspace_by_name("Foo").expect("Foo");
    let bar = session.workspace_by_name("Bar").expect("Bar");
    assert_eq!(foo.container_tab_id, bar.container_tab_id);

    let registry = read_registry(&ctx.profile);
    assert!(registry.identities.iter().all(|i| !i.public || i.has_valid_id()));
    let names: Vec<_> = registry.identities.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Work", "Foo"]);
    assert_eq!(registry.last_user_context_id, 2);
    assert_eq!(Some(foo.container_tab_id), registry.identities[1].user_context_id);

    assert!(reporter
        .events()
        .iter()
        .any(|e| matches!(e, ImportEvent::PrefetchFinished { .. })));
}

#[rstest]
fn reimport_merges_and_backs_up(ctx: Ctx) {
    let reporter = Arc::new(RecordingReporter::new());
    importer(&ctx.profile, false, reporter.clone())
        .run(&ctx.arc_data)
        .expect("first import");
    let first = read_session(&ctx.profile);

    let summary = importer(&ctx.profile, false, reporter.clone())
        .run(&ctx.arc_data)
        .expect("second import");
    let second = read_session(&ctx.profile);

    assert_eq!(second.spaces.len(), 3, "one workspace per name");
    assert_eq!(second.folders.len(), first.folders.len());
    assert_eq!(second.tabs.len(), first.tabs.len());
    assert_eq!(second.groups.len(), first.groups.len());
    for workspace in &first.spaces {
        let again = second.workspace_by_name(&workspace.name).expect("workspace kept");
        assert_eq!(again.uuid, workspace.uuid);
        assert_eq!(again.position, workspace.position);
    }
    assert_structural_invariants(&second);
    assert_eq!(summary.containers_created, 0);
    assert_eq!(read_registry(&ctx.profile).identities.len(), 2);

    let backup = summary.backup.expect("backup of the first session");
    assert!(backup.starts_with(ctx.profile.join("zen-sessions-backup")));
    let backed_up: ZenSession =
        codec::decode_json(&fs::read(&backup).expect("backup file")).expect("decode backup");
    assert_eq!(backed_up, first);

    let merged = reporter
        .events()
        .into_iter()
        .filter(|e| matches!(e, ImportEvent::WorkspaceMerged { .. }))
        .count();
    assert_eq!(merged, 3);
}

#[rstest]
fn unknown_fields_survive_a_merge(ctx: Ctx) {
    let existing = json!({
        "spaces": [{ "uuid": "{keep-me}", "name": "Personal", "icon": "", "position": 4000,
                     "futureField": { "nested": true } }],
        "tabs": [{ "entries": [{ "url": "https://open.example", "title": "Open" }],
                   "pinned": false, "zenWorkspace": "{keep-me}", "someZenFlag": 7 }],
        "folders": [],
        "groups": [],
        "splitViewData": [],
        "lastCollected": 99,
        "windows": [{ "selected": 1 }]
    });
    fs::write(
        ctx.profile.join("zen-sessions.jsonlz4"),
        codec::encode_json(&existing).expect("encode"),
    )
    .expect("seed session");
    fs::write(
        ctx.profile.join("containers.json"),
        serde_json::to_vec_pretty(&json!({
            "version": 5,
            "lastUserContextId": 3,
            "identities": [
                { "userContextId": 3, "name": "Shopping", "icon": "cart", "color": "pink", "public": true },
                { "name": "Broken", "icon": "", "color": "", "public": true },
                { "userContextId": 4294967295u64, "name": "userContextIdInternal.thumbnail",
                  "icon": "", "color": "", "public": false, "accessKey": "" }
            ]
        }))
        .expect("json"),
    )
    .expect("seed registry");

    let reporter = Arc::new(RecordingReporter::new());
    importer(&ctx.profile, false, reporter.clone())
        .run(&ctx.arc_data)
        .expect("import");

    let raw: Value = codec::decode_json(&fs::read(ctx.profile.join("zen-sessions.jsonlz4")).unwrap()).unwrap();
    assert_eq!(raw["windows"], json!([{ "selected": 1 }]));
    assert_eq!(raw["lastCollected"], json!(99));
    assert_eq!(raw["spaces"][0]["futureField"], json!({ "nested": true }));
    assert_eq!(raw["tabs"][0]["someZenFlag"], json!(7));

    let session = read_session(&ctx.profile);
    let work = session.workspace_by_name("Work").expect("Work");
    assert_eq!(work.position, 5000);

    let registry = read_registry(&ctx.profile);
    assert!(registry.identities.iter().all(|i| i.name != "Broken"));
    assert_eq!(work.container_tab_id, 4, "reserved internal id is not counted");
    assert!(reporter
        .events()
        .contains(&ImportEvent::InvalidIdentitiesPruned { count: 1 }));
}

#[rstest]
fn dry_run_writes_nothing(ctx: Ctx) {
    let reporter = Arc::new(RecordingReporter::new());
    let summary = importer(&ctx.profile, true, reporter.clone())
        .run(&ctx.arc_data)
        .expect("dry run");

    assert_eq!(summary.items, 9);
    assert!(summary.backup.is_none());
    assert_eq!(fs::read_dir(&ctx.profile).expect("profile").count(), 0);
    assert_eq!(reporter.events().last(), Some(&ImportEvent::WritesSkipped));
}

#[rstest]
fn missing_inputs_are_reported(ctx: Ctx) {
    let reporter = Arc::new(RecordingReporter::new());
    let err = importer(&ctx.profile, false, reporter.clone())
        .run(&ctx.profile.join("nope.json"))
        .unwrap_err();
    assert!(matches!(err, ImportError::ReadSource { .. }));

    fs::write(&ctx.arc_data, br#"{"sidebar":{"containers":[{}]}}"#).unwrap();
    let err = importer(&ctx.profile, false, reporter.clone())
        .run(&ctx.arc_data)
        .unwrap_err();
    assert!(matches!(err, ImportError::Source { .. }));

    let not_a_dir = ctx.profile.join("file");
    fs::write(&not_a_dir, b"x").unwrap();
    let err = importer(&not_a_dir, false, reporter)
        .run(&ctx.arc_data)
        .unwrap_err();
    assert!(matches!(err, ImportError::Store(_)));
}
