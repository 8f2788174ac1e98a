// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zenport: imports an Arc sidebar into a Zen browser profile.
//!
//! The Arc export (`StorableSidebar.json`) is parsed into [`model::SidebarSnapshot`], merged into
//! the profile's `zen-sessions.jsonlz4` by [`import::Importer`], and container identities are
//! allocated in `containers.json` so each Arc profile keeps its own cookie jar.

pub mod codec;
pub mod favicon;
pub mod import;
pub mod mapping;
pub mod model;
pub mod store;
pub mod telemetry;
