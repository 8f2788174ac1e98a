// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Binary container formats.
//!
//! Zen persists its session as a `mozLz40` container: a fixed magic header, the uncompressed
//! length, and a single raw LZ4 block. The layout must be bit-exact or Zen discards the file.

pub mod mozlz4;

pub use mozlz4::{decode, decode_json, encode, encode_json, CodecError, HEADER_LEN, MAGIC};
