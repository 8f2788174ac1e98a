// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// `mozLz40` followed by a single NUL byte.
pub const MAGIC: &[u8; 8] = b"mozLz40\0";

const LENGTH_FIELD_LEN: usize = 4;

/// Magic plus the little-endian length field.
pub const HEADER_LEN: usize = MAGIC.len() + LENGTH_FIELD_LEN;

#[derive(Debug)]
pub enum CodecError {
    /// Input is truncated or does not start with [`MAGIC`].
    Format { reason: FormatReason },
    /// The LZ4 block is corrupt or does not expand to the declared length.
    Decompression { expected_len: usize, detail: String },
    /// Payload does not fit the 32-bit length field.
    TooLarge { len: usize },
    Json { source: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatReason {
    TooShort { len: usize },
    BadMagic { found: Vec<u8> },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format {
                reason: FormatReason::TooShort { len },
            } => write!(f, "mozlz4 container too short: {len} bytes (need at least {HEADER_LEN})"),
            Self::Format {
                reason: FormatReason::BadMagic { found },
            } => write!(
                f,
                "invalid mozlz4 header: expected {:?}, got {:?}",
                String::from_utf8_lossy(MAGIC),
                String::from_utf8_lossy(found)
            ),
            Self::Decompression { expected_len, detail } => {
                write!(f, "lz4 block decompression failed (expected {expected_len} bytes): {detail}")
            }
            Self::TooLarge { len } => {
                write!(f, "payload of {len} bytes exceeds the mozlz4 32-bit length field")
            }
            Self::Json { source } => write!(f, "json error in mozlz4 payload: {source}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Format { .. } | Self::Decompression { .. } | Self::TooLarge { .. } => None,
        }
    }
}

impl CodecError {
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    pub fn is_decompression(&self) -> bool {
        matches!(self, Self::Decompression { .. })
    }
}

/// Decodes a `mozLz40` container into its raw payload.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Format {
            reason: FormatReason::TooShort { len: bytes.len() },
        });
    }

    let (magic, rest) = bytes.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(CodecError::Format {
            reason: FormatReason::BadMagic {
                found: magic.to_vec(),
            },
        });
    }

    let (len_field, block) = rest.split_at(LENGTH_FIELD_LEN);
    let mut len_bytes = [0u8; LENGTH_FIELD_LEN];
    len_bytes.copy_from_slice(len_field);
    let expected_len = u32::from_le_bytes(len_bytes) as usize;

    let payload = lz4_flex::block::decompress(block, expected_len).map_err(|err| {
        CodecError::Decompression {
            expected_len,
            detail: err.to_string(),
        }
    })?;

    if payload.len() != expected_len {
        return Err(CodecError::Decompression {
            expected_len,
            detail: format!("block expanded to {} bytes", payload.len()),
        });
    }

    Ok(payload)
}

/// Encodes `payload` as a `mozLz40` container.
pub fn encode(payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let len = u32::try_from(payload.len()).map_err(|_| CodecError::TooLarge { len: payload.len() })?;

    let block = lz4_flex::block::compress(payload);

    let mut out = Vec::with_capacity(HEADER_LEN + block.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&block);
    Ok(out)
}

/// Serializes `value` as compact JSON and wraps it in a container.
pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    let json = serde_json::to_vec(value).map_err(|source| CodecError::Json { source })?;
    encode(&json)
}

pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    let payload = decode(bytes)?;
    serde_json::from_slice(&payload).map_err(|source| CodecError::Json { source })
}
