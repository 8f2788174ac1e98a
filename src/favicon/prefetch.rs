// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Concurrent favicon warm-up, run to completion before the tree is emitted.

use std::collections::HashSet;

use crossbeam_channel::unbounded;
use rayon::prelude::*;

use super::{FaviconProvider, WarmOutcome};
use crate::import::report::{ImportEvent, Reporter};
use crate::model::{Item, ItemCatalog, PathGuard, SidebarSnapshot, WalkError};

pub const DEFAULT_WORKERS: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchSummary {
    pub total: usize,
    pub cached: usize,
    pub fetched: usize,
    pub failed: usize,
}

impl PrefetchSummary {
    fn record(&mut self, outcome: WarmOutcome) {
        match outcome {
            WarmOutcome::AlreadyCached => self.cached += 1,
            WarmOutcome::Fetched => self.fetched += 1,
            WarmOutcome::Failed => self.failed += 1,
        }
    }

    pub fn processed(&self) -> usize {
        self.cached + self.fetched + self.failed
    }
}

/// Distinct non-empty tab URLs reachable from the space roots, in first-seen order.
pub fn collect_urls(snapshot: &SidebarSnapshot) -> Result<Vec<String>, WalkError> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for space in &snapshot.spaces {
        for root in snapshot.catalog.resolve_roots(space) {
            let mut guard = PathGuard::new();
            collect_from(&snapshot.catalog, root, &mut guard, &mut seen, &mut urls)?;
        }
    }
    Ok(urls)
}

fn collect_from(
    catalog: &ItemCatalog,
    item: &Item,
    guard: &mut PathGuard,
    seen: &mut HashSet<String>,
    urls: &mut Vec<String>,
) -> Result<(), WalkError> {
    guard.enter(item)?;
    if item.is_container_marker() || item.has_children() {
        for child in catalog.children(item) {
            collect_from(catalog, child, guard, seen, urls)?;
        }
    } else {
        let url = item.url();
        if !url.is_empty() && seen.insert(url.to_owned()) {
            urls.push(url.to_owned());
        }
    }
    guard.leave(item);
    Ok(())
}

/// Warms the favicon cache for every URL on a pool of `workers` threads (0 means the default).
///
/// Workers only send outcomes; this thread owns the counters and reports progress. Returns once
/// every URL has an outcome.
pub fn prefetch(
    urls: &[String],
    favicons: &dyn FaviconProvider,
    workers: usize,
    reporter: &dyn Reporter,
) -> PrefetchSummary {
    let mut summary = PrefetchSummary {
        total: urls.len(),
        ..PrefetchSummary::default()
    };
    if urls.is_empty() {
        return summary;
    }
    reporter.report(ImportEvent::PrefetchStarted { urls: urls.len() });

    let workers = if workers == 0 { DEFAULT_WORKERS } else { workers };
    let (tx, rx) = unbounded::<WarmOutcome>();

    std::thread::scope(|scope| {
        scope.spawn(move || {
            let warm_all = |tx: crossbeam_channel::Sender<WarmOutcome>| {
                urls.par_iter().for_each_with(tx, |tx, url| {
                    let _ = tx.send(favicons.warm(url));
                });
            };
            match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(|| warm_all(tx)),
                Err(err) => {
                    tracing::warn!("favicon worker pool unavailable, warming sequentially: {err}");
                    for url in urls {
                        let _ = tx.send(favicons.warm(url));
                    }
                }
            }
        });

        for outcome in rx.iter() {
            summary.record(outcome);
            reporter.report(ImportEvent::PrefetchProgress {
                done: summary.processed(),
                total: summary.total,
            });
        }
    });

    reporter.report(ImportEvent::PrefetchFinished { summary });
    summary
}
