// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Overrides the level filter, e.g. `ZENPORT_LOG=zenport::favicon=debug`.
pub const LOG_ENV_VAR: &str = "ZENPORT_LOG";

/// Installs the global subscriber. Logs go to stderr so `--decompress` output stays pipeable.
///
/// Calling this twice is harmless; the second call leaves the first subscriber in place.
pub fn init(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbose(verbose).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time();

    let _ = Registry::default().with(filter).with(stderr).try_init();
}

fn level_from_verbose(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

#[cfg(test)]
mod tests {
    use tracing::metadata::LevelFilter;

    use super::level_from_verbose;

    #[test]
    fn verbose_enables_debug() {
        assert_eq!(level_from_verbose(false), LevelFilter::INFO);
        assert_eq!(level_from_verbose(true), LevelFilter::DEBUG);
    }
}
