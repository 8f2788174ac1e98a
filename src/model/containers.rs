// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Firefox `containers.json` (contextual identities).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

pub const REGISTRY_VERSION: u32 = 5;

/// Firefox reserves this id for the internal thumbnail/idle-daily identity.
pub const RESERVED_USER_CONTEXT_ID: i64 = u32::MAX as i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRegistry {
    #[serde(default = "default_version", deserialize_with = "version_or_default")]
    pub version: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_user_context_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identities: Vec<ContainerIdentity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> u32 {
    REGISTRY_VERSION
}

fn version_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(REGISTRY_VERSION))
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self {
            version: REGISTRY_VERSION,
            last_user_context_id: 0,
            identities: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl ContainerRegistry {
    /// Highest user-assigned id across `last_user_context_id` and the identities.
    pub fn max_user_context_id(&self) -> i64 {
        self.identities
            .iter()
            .filter_map(|identity| identity.user_context_id)
            .filter(|id| *id != RESERVED_USER_CONTEXT_ID)
            .fold(self.last_user_context_id.max(0), i64::max)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ContainerIdentity> {
        self.identities
            .iter()
            .find(|identity| identity.public && identity.has_valid_id() && identity.name == name)
    }

    /// Drops public identities that would make Firefox reject the file. Returns how many went.
    pub fn prune_invalid(&mut self) -> usize {
        let before = self.identities.len();
        self.identities
            .retain(|identity| !identity.public || identity.has_valid_id());
        before - self.identities.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l10n_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContainerIdentity {
    pub fn new(user_context_id: i64, name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            user_context_id: Some(user_context_id),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            public: true,
            l10n_id: None,
            access_key: None,
            extra: Map::new(),
        }
    }

    pub fn has_valid_id(&self) -> bool {
        self.user_context_id.is_some_and(|id| id > 0)
    }
}
