// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zenport CLI entrypoint.
//!
//! By default this imports the Arc sidebar into the given Zen profile directory. Zen must not be
//! running while the session file is rewritten.
//!
//! `--decompress` prints any `mozLz4` file as pretty JSON; the `--favicon-*` flags maintain the
//! favicon cache without touching a profile.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use zenport::favicon::{FaviconCache, HttpFaviconProvider};
use zenport::import::{ImportOptions, ImportSummary, Importer};
use zenport::store::{ProfileDir, WriteDurability};

const FAVICON_CACHE_ENV_VAR: &str = "ZENPORT_FAVICON_CACHE";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--dry-run] [--verbose] [--durable-writes] [--workers <n>] [--arc-data <file>] [--favicon-cache <dir>] [--no-favicons] <zen-profile-dir>\n  {program} --decompress <file>\n  {program} (--favicon-stats | --favicon-retry-failed | --favicon-clear-cache) [--favicon-cache <dir>]\n\nImport mode reads Arc's StorableSidebar.json (default: ~/Library/Application Support/Arc/StorableSidebar.json)\nand merges it into <zen-profile-dir>. Close Zen first.\n\n--dry-run runs every stage but writes nothing.\n--workers sets the favicon prefetch threads (default {}).\n--favicon-cache overrides the cache directory (env {FAVICON_CACHE_ENV_VAR}; default ~/.zenport/favicons).\n--no-favicons skips favicon downloads; tabs are imported without icons.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\nSet ZENPORT_LOG to adjust log filtering.",
        zenport::favicon::DEFAULT_WORKERS
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheAction {
    Stats,
    RetryFailed,
    Clear,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    dry_run: bool,
    verbose: bool,
    durable_writes: bool,
    no_favicons: bool,
    workers: Option<usize>,
    arc_data: Option<String>,
    favicon_cache: Option<String>,
    profile_dir: Option<String>,
    decompress: Option<String>,
    cache_action: Option<CacheAction>,
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn set_value<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dry-run" => set_flag(&mut options.dry_run)?,
            "--verbose" | "-v" => set_flag(&mut options.verbose)?,
            "--durable-writes" => set_flag(&mut options.durable_writes)?,
            "--no-favicons" => set_flag(&mut options.no_favicons)?,
            "--workers" => {
                let raw = args.next().ok_or(())?;
                let workers: usize = raw.parse().map_err(|_| ())?;
                if workers == 0 {
                    return Err(());
                }
                set_value(&mut options.workers, workers)?;
            }
            "--arc-data" => set_value(&mut options.arc_data, args.next().ok_or(())?)?,
            "--favicon-cache" => set_value(&mut options.favicon_cache, args.next().ok_or(())?)?,
            "--decompress" => set_value(&mut options.decompress, args.next().ok_or(())?)?,
            "--favicon-stats" => set_value(&mut options.cache_action, CacheAction::Stats)?,
            "--favicon-retry-failed" => {
                set_value(&mut options.cache_action, CacheAction::RetryFailed)?
            }
            "--favicon-clear-cache" => set_value(&mut options.cache_action, CacheAction::Clear)?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_value(&mut options.profile_dir, arg)?,
        }
    }

    let import_only = options.dry_run
        || options.durable_writes
        || options.no_favicons
        || options.workers.is_some()
        || options.arc_data.is_some()
        || options.profile_dir.is_some();

    if options.decompress.is_some()
        && (import_only || options.cache_action.is_some() || options.favicon_cache.is_some())
    {
        return Err(());
    }

    if options.cache_action.is_some() && import_only {
        return Err(());
    }

    if options.decompress.is_none()
        && options.cache_action.is_none()
        && options.profile_dir.is_none()
    {
        return Err(());
    }

    if options.no_favicons && (options.favicon_cache.is_some() || options.workers.is_some()) {
        return Err(());
    }

    Ok(options)
}

fn default_arc_data() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join("Library")
            .join("Application Support")
            .join("Arc")
            .join("StorableSidebar.json")
    })
}

fn favicon_cache(options: &CliOptions) -> Result<FaviconCache, Box<dyn Error>> {
    let dir = options
        .favicon_cache
        .clone()
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(FAVICON_CACHE_ENV_VAR).map(PathBuf::from))
        .or_else(FaviconCache::default_dir)
        .ok_or("cannot determine the home directory; pass --favicon-cache <dir>")?;
    Ok(FaviconCache::new(dir))
}

fn run_cache_action(action: CacheAction, cache: &FaviconCache) -> Result<(), Box<dyn Error>> {
    match action {
        CacheAction::Stats => {
            let stats = cache.stats()?;
            println!("favicon cache: {}", cache.dir().display());
            println!("  entries:    {}", stats.total);
            println!("  successful: {}", stats.successful);
            println!("  failed:     {}", stats.failed);
        }
        CacheAction::RetryFailed => {
            let removed = cache.clear_failed()?;
            println!("removed {removed} failed favicon entries; they are retried on the next import");
        }
        CacheAction::Clear => {
            let removed = cache.clear()?;
            println!("removed {removed} favicon cache entries from {}", cache.dir().display());
        }
    }
    Ok(())
}

fn decompress(path: &str) -> Result<(), Box<dyn Error>> {
    let bytes = std::fs::read(path).map_err(|err| format!("cannot read {path}: {err}"))?;
    let value: serde_json::Value = zenport::codec::decode_json(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_summary(summary: &ImportSummary, dry_run: bool) {
    let heading = if dry_run {
        "dry run finished, nothing was written"
    } else {
        "import finished"
    };
    println!("{heading}");
    println!("  spaces:     {}", summary.spaces);
    println!(
        "  items:      {} ({} folders, {} tabs)",
        summary.items, summary.emitted.folders, summary.emitted.tabs
    );
    println!(
        "  containers: {} ({} new)",
        summary.containers, summary.containers_created
    );
    if summary.favicons.total > 0 {
        println!(
            "  favicons:   {} cached, {} fetched, {} failed",
            summary.favicons.cached, summary.favicons.fetched, summary.favicons.failed
        );
    }
    if let Some(backup) = &summary.backup {
        println!("  backup:     {}", backup.display());
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "zenport".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        zenport::telemetry::init(options.verbose);

        if let Some(path) = &options.decompress {
            return decompress(path);
        }

        if let Some(action) = options.cache_action {
            return run_cache_action(action, &favicon_cache(&options)?);
        }

        let Some(dir) = options.profile_dir.clone() else {
            print_usage(&program);
            std::process::exit(2);
        };
        let arc_data = options
            .arc_data
            .clone()
            .map(PathBuf::from)
            .or_else(default_arc_data)
            .ok_or("cannot determine the home directory; pass --arc-data <file>")?;

        let profile = if options.durable_writes {
            ProfileDir::new(dir).with_durability(WriteDurability::Durable)
        } else {
            ProfileDir::new(dir)
        };
        let import_options = ImportOptions {
            dry_run: options.dry_run,
            favicon_workers: options.workers.unwrap_or(zenport::favicon::DEFAULT_WORKERS),
        };
        let mut importer = Importer::new(profile, import_options);
        if !options.no_favicons {
            let provider = HttpFaviconProvider::new(favicon_cache(&options)?)?;
            importer = importer.with_favicons(Arc::new(provider));
        }

        let summary = importer.run(&arc_data)?;
        print_summary(&summary, options.dry_run);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("zenport: {err}");
        std::process::exit(1);
    }
}
