// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for a Zen profile directory.
//!
//! Reads and writes `zen-sessions.jsonlz4` and `containers.json`, and keeps a timestamped copy of
//! the session under `zen-sessions-backup/` before it is replaced.

mod atomic;
pub mod profile_dir;

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::codec::CodecError;

pub(crate) use atomic::{ensure_dir, write_atomic};
pub use profile_dir::ProfileDir;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Codec {
        path: PathBuf,
        source: CodecError,
    },
    NotADirectory {
        path: PathBuf,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Codec { path, source } => write!(f, "cannot decode {path:?}: {source}"),
            Self::NotADirectory { path } => {
                write!(f, "Zen profile directory not found at {path:?}")
            }
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Codec { source, .. } => Some(source),
            Self::NotADirectory { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Flushes file contents and the rename to stable storage where the platform allows.
    Durable,
}
