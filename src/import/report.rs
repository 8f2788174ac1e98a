// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Progress events emitted while an import runs.
//!
//! Library code never prints. Every stage receives a `&dyn Reporter` and describes what it did;
//! the binary forwards those events to `tracing`.

use std::path::PathBuf;

use crate::favicon::PrefetchSummary;

#[derive(Debug, Clone, PartialEq)]
pub enum ImportEvent {
    ContainerReused {
        name: String,
        profile: String,
        user_context_id: i64,
    },
    ContainerCreated {
        name: String,
        profile: String,
        user_context_id: i64,
    },
    InvalidIdentitiesPruned {
        count: usize,
    },
    WorkspaceMerged {
        name: String,
        container_id: i64,
        removed_tabs: usize,
        removed_folders: usize,
    },
    WorkspaceCreated {
        name: String,
        container_id: i64,
        position: i64,
    },
    SpaceStarted {
        name: String,
        roots: usize,
    },
    MarkerSkipped {
        item_id: String,
        depth: usize,
    },
    FolderCreated {
        title: String,
        depth: usize,
    },
    TabCreated {
        title: String,
        url: String,
        depth: usize,
        has_favicon: bool,
    },
    PrefetchStarted {
        urls: usize,
    },
    PrefetchProgress {
        done: usize,
        total: usize,
    },
    PrefetchFinished {
        summary: PrefetchSummary,
    },
    BackupWritten {
        path: PathBuf,
    },
    WritesSkipped,
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: ImportEvent);
}

/// Forwards events to `tracing`. Per-item events are `debug`, stage milestones `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter {
    dry_run: bool,
}

impl TracingReporter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    fn verb<'a>(&self, done: &'a str, planned: &'a str) -> &'a str {
        if self.dry_run {
            planned
        } else {
            done
        }
    }
}

impl Reporter for TracingReporter {
    fn report(&self, event: ImportEvent) {
        match event {
            ImportEvent::ContainerReused {
                name,
                profile,
                user_context_id,
            } => tracing::info!(
                %profile,
                user_context_id,
                "{} container \"{name}\"",
                self.verb("reusing", "would reuse")
            ),
            ImportEvent::ContainerCreated {
                name,
                profile,
                user_context_id,
            } => tracing::info!(
                %profile,
                user_context_id,
                "{} container \"{name}\"",
                self.verb("created", "would create")
            ),
            ImportEvent::InvalidIdentitiesPruned { count } => {
                tracing::warn!(count, "dropped container identities without a valid id")
            }
            ImportEvent::WorkspaceMerged {
                name,
                container_id,
                removed_tabs,
                removed_folders,
            } => tracing::info!(
                container_id,
                removed_tabs,
                removed_folders,
                "{} existing space \"{name}\"",
                self.verb("merging into", "would merge into")
            ),
            ImportEvent::WorkspaceCreated {
                name,
                container_id,
                position,
            } => tracing::info!(
                container_id,
                position,
                "{} space \"{name}\"",
                self.verb("created", "would create")
            ),
            ImportEvent::SpaceStarted { name, roots } => {
                tracing::info!(roots, "processing space \"{name}\"")
            }
            ImportEvent::MarkerSkipped { item_id, depth } => {
                tracing::debug!(depth, "skipping Arc container item {item_id}")
            }
            ImportEvent::FolderCreated { title, depth } => {
                tracing::debug!(depth, "folder \"{title}\"")
            }
            ImportEvent::TabCreated {
                title,
                url,
                depth,
                has_favicon,
            } => tracing::debug!(depth, has_favicon, %url, "tab \"{title}\""),
            ImportEvent::PrefetchStarted { urls } => {
                tracing::info!(urls, "pre-caching favicons")
            }
            ImportEvent::PrefetchProgress { done, total } => {
                tracing::trace!(done, total, "favicon prefetch progress")
            }
            ImportEvent::PrefetchFinished { summary } => tracing::info!(
                cached = summary.cached,
                fetched = summary.fetched,
                failed = summary.failed,
                "favicon pre-cache complete"
            ),
            ImportEvent::BackupWritten { path } => {
                tracing::info!(path = %path.display(), "session backed up")
            }
            ImportEvent::WritesSkipped => tracing::info!("dry run, skipping file writes"),
        }
    }
}

/// Keeps every event in memory, for tests and embedders that render their own output.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: std::sync::Mutex<Vec<ImportEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ImportEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: ImportEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
