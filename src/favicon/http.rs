// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::Read;
use std::time::Duration;

use base64::Engine as _;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

use super::cache::{CacheEntry, FaviconCache};
use super::{FaviconError, FaviconProvider, WarmOutcome};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_REDIRECTS: usize = 5;
/// Bodies of this size or larger are rejected.
pub const MAX_FAVICON_BYTES: usize = 1024 * 1024;
const FALLBACK_MIME: &str = "image/x-icon";

/// Fetches `/favicon.ico` from each page's host, backed by a [`FaviconCache`].
#[derive(Debug, Clone)]
pub struct HttpFaviconProvider {
    cache: FaviconCache,
    client: Client,
}

impl HttpFaviconProvider {
    pub fn new(cache: FaviconCache) -> Result<Self, FaviconError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("zenport/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FaviconError::Client { source })?;
        Ok(Self { cache, client })
    }

    pub fn cache(&self) -> &FaviconCache {
        &self.cache
    }

    fn download(&self, page_url: &str) -> Result<String, FaviconError> {
        let favicon_url = favicon_url(page_url).ok_or_else(|| FaviconError::UnsupportedUrl {
            url: page_url.to_owned(),
        })?;
        let url = favicon_url.to_string();

        let response = self
            .client
            .get(favicon_url)
            .send()
            .map_err(|source| FaviconError::Request {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FaviconError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(FALLBACK_MIME)
            .to_owned();

        let mut body = Vec::new();
        response
            .take(MAX_FAVICON_BYTES as u64)
            .read_to_end(&mut body)
            .map_err(|source| FaviconError::Body {
                url: url.clone(),
                source,
            })?;
        if body.len() >= MAX_FAVICON_BYTES {
            return Err(FaviconError::TooLarge {
                url,
                limit: MAX_FAVICON_BYTES,
            });
        }

        encode_data_url(&body, &content_type).ok_or(FaviconError::Empty { url })
    }

    fn fetch_and_store(&self, page_url: &str) -> Option<String> {
        let entry = match self.download(page_url) {
            Ok(data_url) => CacheEntry::DataUrl(data_url),
            Err(err) => {
                tracing::debug!(url = page_url, "favicon unavailable: {err}");
                CacheEntry::Failed
            }
        };
        if let Err(err) = self.cache.put(page_url, &entry) {
            tracing::warn!(url = page_url, "cannot write favicon cache: {err}");
        }
        match entry {
            CacheEntry::DataUrl(data_url) => Some(data_url),
            CacheEntry::Failed => None,
        }
    }
}

impl FaviconProvider for HttpFaviconProvider {
    fn fetch_data_url(&self, page_url: &str) -> Option<String> {
        favicon_url(page_url)?;
        match self.cache.get(page_url) {
            Some(CacheEntry::DataUrl(data_url)) => Some(data_url),
            Some(CacheEntry::Failed) => None,
            None => self.fetch_and_store(page_url),
        }
    }

    fn warm(&self, page_url: &str) -> WarmOutcome {
        if self.cache.get(page_url).is_some() {
            return WarmOutcome::AlreadyCached;
        }
        match self.fetch_and_store(page_url) {
            Some(_) => WarmOutcome::Fetched,
            None => WarmOutcome::Failed,
        }
    }
}

/// `{scheme}://{host[:port]}/favicon.ico` for http(s) pages.
pub(crate) fn favicon_url(page_url: &str) -> Option<Url> {
    let page = Url::parse(page_url).ok()?;
    if !matches!(page.scheme(), "http" | "https") {
        return None;
    }
    let mut favicon = page;
    favicon.set_path("/favicon.ico");
    favicon.set_query(None);
    favicon.set_fragment(None);
    if !favicon.username().is_empty() {
        favicon.set_username("").ok()?;
    }
    favicon.set_password(None).ok()?;
    Some(favicon)
}

pub(crate) fn encode_data_url(body: &[u8], content_type: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let mime = normalize_content_type(content_type);
    let encoded = base64::engine::general_purpose::STANDARD.encode(body);
    Some(format!("data:{mime};base64,{encoded}"))
}

fn normalize_content_type(content_type: &str) -> &'static str {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => "image/png",
        "image/jpeg" | "image/jpg" => "image/jpeg",
        "image/gif" => "image/gif",
        "image/svg+xml" => "image/svg+xml",
        "image/webp" => "image/webp",
        _ => FALLBACK_MIME,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{encode_data_url, favicon_url, normalize_content_type, HttpFaviconProvider};
    use crate::favicon::{CacheEntry, FaviconCache, FaviconProvider, WarmOutcome};

    #[rstest]
    #[case("https://example.com/some/page?q=1#frag", Some("https://example.com/favicon.ico"))]
    #[case("http://user:pw@localhost:8080/x", Some("http://localhost:8080/favicon.ico"))]
    #[case("ftp://example.com/file", None)]
    #[case("chrome://settings", None)]
    #[case("", None)]
    fn builds_favicon_urls(#[case] page: &str, #[case] expected: Option<&str>) {
        assert_eq!(favicon_url(page).map(|u| u.to_string()).as_deref(), expected);
    }

    #[rstest]
    #[case("image/vnd.microsoft.icon", "image/x-icon")]
    #[case("image/ico", "image/x-icon")]
    #[case("image/png; charset=binary", "image/png")]
    #[case("image/jpg", "image/jpeg")]
    #[case("IMAGE/SVG+XML", "image/svg+xml")]
    #[case("text/html", "image/x-icon")]
    fn normalizes_content_types(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_content_type(raw), expected);
    }

    #[test]
    fn data_url_shape() {
        assert_eq!(encode_data_url(b"", "image/png"), None);
        assert_eq!(
            encode_data_url(b"\x89PNG", "image/png").as_deref(),
            Some("data:image/png;base64,iVBORw==")
        );
    }

    #[test]
    fn cached_entries_short_circuit_the_network() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = FaviconCache::new(tmp.path());
        cache
            .put("https://a.com/", &CacheEntry::DataUrl("data:image/png;base64,AA==".into()))
            .unwrap();
        cache.put("https://b.com/", &CacheEntry::Failed).unwrap();
        let provider = HttpFaviconProvider::new(cache).expect("client");

        assert_eq!(
            provider.fetch_data_url("https://a.com/page").as_deref(),
            Some("data:image/png;base64,AA==")
        );
        assert_eq!(provider.fetch_data_url("https://b.com/page"), None);
        assert_eq!(provider.warm("https://a.com/other"), WarmOutcome::AlreadyCached);
        assert_eq!(provider.warm("https://b.com/other"), WarmOutcome::AlreadyCached);
    }

    #[test]
    fn unsupported_schemes_are_never_fetched() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let provider = HttpFaviconProvider::new(FaviconCache::new(tmp.path())).expect("client");
        assert_eq!(provider.fetch_data_url("file:///etc/hosts"), None);
        assert_eq!(provider.warm("about:blank"), WarmOutcome::Failed);
    }
}
