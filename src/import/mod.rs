// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The import pipeline.
//!
//! read Arc export → parse → collect URLs → favicon prefetch (barrier) → allocate containers →
//! transform → prune registry → write registry → back up session → write session.

pub mod allocator;
pub mod engine;
pub mod report;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use allocator::{allocate_containers, ContainerAllocation, CONTAINER_PALETTE};
pub use engine::{EmitCounts, TransformError, TransformOptions, Transformer};
pub use report::{ImportEvent, RecordingReporter, Reporter, TracingReporter};

use crate::favicon::{self, FaviconProvider, PrefetchSummary, WarmOutcome};
use crate::mapping::{IconMapper, ZenIconMapper};
use crate::model::{SidebarSnapshot, SourceError};
use crate::store::{ProfileDir, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Run every stage but write nothing to the profile.
    pub dry_run: bool,
    /// Favicon prefetch threads; 0 picks the default.
    pub favicon_workers: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            favicon_workers: favicon::DEFAULT_WORKERS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub spaces: usize,
    /// Folders plus tabs emitted (anchor tabs not counted).
    pub items: usize,
    /// Identities in the registry after the import.
    pub containers: usize,
    pub favicons: PrefetchSummary,
    pub emitted: EmitCounts,
    pub containers_created: usize,
    pub backup: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ImportError {
    ReadSource {
        path: PathBuf,
        source: io::Error,
    },
    Source {
        path: PathBuf,
        source: SourceError,
    },
    Store(StoreError),
    Transform(TransformError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadSource { path, source } => {
                write!(f, "cannot read Arc data at {path:?}: {source}")
            }
            Self::Source { path, source } => write!(f, "invalid Arc data in {path:?}: {source}"),
            Self::Store(err) => err.fmt(f),
            Self::Transform(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadSource { source, .. } => Some(source),
            Self::Source { source, .. } => Some(source),
            Self::Store(err) => Some(err),
            Self::Transform(err) => Some(err),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<TransformError> for ImportError {
    fn from(err: TransformError) -> Self {
        Self::Transform(err)
    }
}

/// Used when no favicon provider is configured: every tab gets `image: null`.
struct NoFavicons;

impl FaviconProvider for NoFavicons {
    fn fetch_data_url(&self, _page_url: &str) -> Option<String> {
        None
    }

    fn warm(&self, _page_url: &str) -> WarmOutcome {
        WarmOutcome::Failed
    }
}

pub struct Importer {
    profile: ProfileDir,
    options: ImportOptions,
    reporter: Arc<dyn Reporter>,
    mapper: Arc<dyn IconMapper>,
    favicons: Option<Arc<dyn FaviconProvider>>,
    transform_options: Option<TransformOptions>,
}

impl Importer {
    pub fn new(profile: ProfileDir, options: ImportOptions) -> Self {
        Self {
            profile,
            options,
            reporter: Arc::new(TracingReporter::new(options.dry_run)),
            mapper: Arc::new(ZenIconMapper),
            favicons: None,
            transform_options: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_mapper(mut self, mapper: Arc<dyn IconMapper>) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn with_favicons(mut self, favicons: Arc<dyn FaviconProvider>) -> Self {
        self.favicons = Some(favicons);
        self
    }

    /// Pins the timestamp used for folder ids and `lastAccessed`.
    pub fn with_transform_options(mut self, options: TransformOptions) -> Self {
        self.transform_options = Some(options);
        self
    }

    pub fn profile(&self) -> &ProfileDir {
        &self.profile
    }

    pub fn run(&self, arc_data: &Path) -> Result<ImportSummary, ImportError> {
        self.profile.validate()?;
        tracing::info!(profile = %self.profile.root().display(), dry_run = self.options.dry_run, "starting Arc import");

        let snapshot = read_snapshot(arc_data)?;
        tracing::info!(
            spaces = snapshot.spaces.len(),
            items = snapshot.catalog.len(),
            "read Arc sidebar"
        );

        let mut session = match self.profile.load_session()? {
            Some(session) => session,
            None => {
                tracing::info!("no session file yet, starting from an empty session");
                Default::default()
            }
        };
        let mut registry = self.profile.load_or_init_registry()?;

        let no_favicons = NoFavicons;
        let favicons: &dyn FaviconProvider = match &self.favicons {
            Some(provider) => provider.as_ref(),
            None => &no_favicons,
        };
        let reporter = self.reporter.as_ref();

        let urls = favicon::collect_urls(&snapshot).map_err(TransformError::from)?;
        let favicon_summary = if self.favicons.is_some() {
            favicon::prefetch(&urls, favicons, self.options.favicon_workers, reporter)
        } else {
            PrefetchSummary::default()
        };

        let allocation =
            allocate_containers(&snapshot.spaces, &mut registry, self.mapper.as_ref(), reporter);

        let transformer = Transformer::new(self.mapper.as_ref(), favicons, reporter)
            .with_options(self.transform_options.unwrap_or_else(TransformOptions::now));
        let emitted = transformer.transform(&snapshot, &allocation, &mut session)?;

        let pruned = registry.prune_invalid();
        if pruned > 0 {
            reporter.report(ImportEvent::InvalidIdentitiesPruned { count: pruned });
        }

        let mut backup = None;
        if self.options.dry_run {
            reporter.report(ImportEvent::WritesSkipped);
        } else {
            self.profile.save_registry(&registry)?;
            backup = self.profile.backup_session()?;
            if let Some(path) = &backup {
                reporter.report(ImportEvent::BackupWritten { path: path.clone() });
            }
            self.profile.save_session(&session)?;
        }

        Ok(ImportSummary {
            spaces: snapshot.spaces.len(),
            items: emitted.total(),
            containers: registry.identities.len(),
            favicons: favicon_summary,
            emitted,
            containers_created: allocation.created,
            backup,
        })
    }
}

fn read_snapshot(path: &Path) -> Result<SidebarSnapshot, ImportError> {
    let bytes = fs::read(path).map_err(|source| ImportError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    SidebarSnapshot::from_json(&bytes).map_err(|source| ImportError::Source {
        path: path.to_path_buf(),
        source,
    })
}
