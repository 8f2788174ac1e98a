// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;

use super::{ensure_dir, write_atomic, StoreError, WriteDurability};
use crate::codec;
use crate::model::{ContainerRegistry, ZenSession};

pub const SESSION_FILENAME: &str = "zen-sessions.jsonlz4";
pub const CONTAINERS_FILENAME: &str = "containers.json";
pub const BACKUP_DIRNAME: &str = "zen-sessions-backup";

/// A Zen profile directory on disk.
#[derive(Debug, Clone)]
pub struct ProfileDir {
    root: PathBuf,
    durability: WriteDurability,
}

impl ProfileDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILENAME)
    }

    pub fn containers_path(&self) -> PathBuf {
        self.root.join(CONTAINERS_FILENAME)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIRNAME)
    }

    /// The directory must already exist; it is never created.
    pub fn validate(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.root) {
            Ok(md) if md.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::NotADirectory {
                path: self.root.clone(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StoreError::NotADirectory {
                path: self.root.clone(),
            }),
            Err(source) => Err(StoreError::Io {
                path: self.root.clone(),
                source,
            }),
        }
    }

    /// Reads the session, or `None` when the profile has none yet.
    pub fn load_session(&self) -> Result<Option<ZenSession>, StoreError> {
        let path = self.session_path();
        let Some(bytes) = read_optional(&path)? else {
            return Ok(None);
        };
        let payload = codec::decode(&bytes).map_err(|source| StoreError::Codec {
            path: path.clone(),
            source,
        })?;
        let session = serde_json::from_slice(&payload).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        Ok(Some(session))
    }

    pub fn load_or_init_session(&self) -> Result<ZenSession, StoreError> {
        Ok(self.load_session()?.unwrap_or_default())
    }

    pub fn save_session(&self, session: &ZenSession) -> Result<(), StoreError> {
        let path = self.session_path();
        let bytes = codec::encode_json(session).map_err(|source| StoreError::Codec {
            path: path.clone(),
            source,
        })?;
        write_atomic(&path, &bytes, self.durability)
    }

    pub fn load_registry(&self) -> Result<Option<ContainerRegistry>, StoreError> {
        let path = self.containers_path();
        let Some(bytes) = read_optional(&path)? else {
            return Ok(None);
        };
        let registry = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        Ok(Some(registry))
    }

    pub fn load_or_init_registry(&self) -> Result<ContainerRegistry, StoreError> {
        Ok(self.load_registry()?.unwrap_or_default())
    }

    /// Writes pretty-printed JSON, the way Firefox itself stores the file.
    pub fn save_registry(&self, registry: &ContainerRegistry) -> Result<(), StoreError> {
        let path = self.containers_path();
        let mut bytes =
            serde_json::to_vec_pretty(registry).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
        bytes.push(b'\n');
        write_atomic(&path, &bytes, self.durability)
    }

    /// Copies the current session into the backup directory. `None` when there is nothing to copy.
    pub fn backup_session(&self) -> Result<Option<PathBuf>, StoreError> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.backup_session_at(now)
    }

    pub fn backup_session_at(&self, at: OffsetDateTime) -> Result<Option<PathBuf>, StoreError> {
        let source = self.session_path();
        let Some(bytes) = read_optional(&source)? else {
            return Ok(None);
        };

        let backup_dir = self.backup_dir();
        ensure_dir(&backup_dir)?;
        let target = free_backup_path(&backup_dir, at)?;
        write_atomic(&target, &bytes, self.durability)?;
        Ok(Some(target))
    }
}

/// First backup path for `at` that is not on disk yet. Backups taken within the same second get
/// a `-1`, `-2`, ... suffix.
fn free_backup_path(backup_dir: &Path, at: OffsetDateTime) -> Result<PathBuf, StoreError> {
    let mut attempt = 0u32;
    loop {
        let candidate = backup_dir.join(backup_file_name(at, attempt));
        match fs::symlink_metadata(&candidate) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(candidate),
            Err(source) => {
                return Err(StoreError::Io {
                    path: candidate,
                    source,
                })
            }
            Ok(_) => attempt += 1,
        }
    }
}

fn backup_file_name(at: OffsetDateTime, attempt: u32) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]-[minute]-[second]");
    // The description only uses numeric components, so formatting cannot fail in practice.
    let stamp = at
        .format(format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    match attempt {
        0 => format!("zen-sessions-{stamp}.jsonlz4"),
        n => format!("zen-sessions-{stamp}-{n}.jsonlz4"),
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
