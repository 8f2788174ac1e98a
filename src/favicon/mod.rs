// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Favicons for imported tabs, as `data:` URLs.
//!
//! Arc does not export favicons, so they are fetched from `/favicon.ico` of each host and cached
//! on disk per host. The prefetch stage warms the cache concurrently before the tree is emitted;
//! emission then only hits the cache.

mod cache;
mod http;
pub mod prefetch;

use std::fmt;

pub use cache::{CacheEntry, CacheStats, FaviconCache};
pub use http::HttpFaviconProvider;
pub use prefetch::{collect_urls, prefetch, PrefetchSummary, DEFAULT_WORKERS};

/// What a warm-up call did for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmOutcome {
    /// Present in the cache before the call, as a data URL or as a failure marker.
    AlreadyCached,
    Fetched,
    Failed,
}

pub trait FaviconProvider: Send + Sync {
    /// The favicon for `page_url` as a `data:` URL, or `None`. Never fails the import.
    fn fetch_data_url(&self, page_url: &str) -> Option<String>;

    /// Ensures the cache has an entry for `page_url`.
    fn warm(&self, page_url: &str) -> WarmOutcome;
}

#[derive(Debug)]
pub enum FaviconError {
    UnsupportedUrl {
        url: String,
    },
    Client {
        source: reqwest::Error,
    },
    Request {
        url: String,
        source: reqwest::Error,
    },
    Status {
        url: String,
        status: u16,
    },
    Body {
        url: String,
        source: std::io::Error,
    },
    TooLarge {
        url: String,
        limit: usize,
    },
    Empty {
        url: String,
    },
}

impl fmt::Display for FaviconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedUrl { url } => write!(f, "no favicon source for {url:?}"),
            Self::Client { source } => write!(f, "cannot build HTTP client: {source}"),
            Self::Request { url, source } => write!(f, "request to {url} failed: {source}"),
            Self::Status { url, status } => write!(f, "{url} answered with status {status}"),
            Self::Body { url, source } => write!(f, "cannot read favicon body from {url}: {source}"),
            Self::TooLarge { url, limit } => {
                write!(f, "favicon at {url} is larger than {limit} bytes")
            }
            Self::Empty { url } => write!(f, "favicon at {url} is empty"),
        }
    }
}

impl std::error::Error for FaviconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client { source } => Some(source),
            Self::Request { source, .. } => Some(source),
            Self::Body { source, .. } => Some(source),
            Self::UnsupportedUrl { .. }
            | Self::Status { .. }
            | Self::TooLarge { .. }
            | Self::Empty { .. } => None,
        }
    }
}
