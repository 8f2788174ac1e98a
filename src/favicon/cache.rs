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

use url::Url;

use crate::store::{ensure_dir, write_atomic, StoreError, WriteDurability};

/// Written instead of a data URL when a host had no usable favicon, so it is not retried.
pub const FAILED_MARKER: &str = "FAILED";

const ENTRY_EXTENSION: &str = "txt";
const MAX_FILE_STEM_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    DataUrl(String),
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// One file per host under `dir`.
#[derive(Debug, Clone)]
pub struct FaviconCache {
    dir: PathBuf,
}

impl FaviconCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.zenport/favicons`, when a home directory is known.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".zenport").join("favicons"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The cache file for `page_url`, or `None` when the URL has no host.
    pub fn entry_path(&self, page_url: &str) -> Option<PathBuf> {
        let key = host_key(page_url)?;
        Some(self.dir.join(format!("{key}.{ENTRY_EXTENSION}")))
    }

    pub fn get(&self, page_url: &str) -> Option<CacheEntry> {
        let path = self.entry_path(page_url)?;
        let text = fs::read_to_string(path).ok()?;
        match text.as_str() {
            "" => None,
            FAILED_MARKER => Some(CacheEntry::Failed),
            _ => Some(CacheEntry::DataUrl(text)),
        }
    }

    pub fn put(&self, page_url: &str, entry: &CacheEntry) -> Result<(), StoreError> {
        let Some(path) = self.entry_path(page_url) else {
            return Ok(());
        };
        let contents = match entry {
            CacheEntry::DataUrl(data_url) if data_url.is_empty() => return Ok(()),
            CacheEntry::DataUrl(data_url) => data_url.as_str(),
            CacheEntry::Failed => FAILED_MARKER,
        };
        ensure_dir(&self.dir)?;
        write_atomic(&path, contents.as_bytes(), WriteDurability::BestEffort)
    }

    pub fn stats(&self) -> Result<CacheStats, StoreError> {
        let mut stats = CacheStats::default();
        for path in self.entry_files()? {
            stats.total += 1;
            match fs::read_to_string(&path) {
                Ok(text) if text == FAILED_MARKER => stats.failed += 1,
                Ok(_) => stats.successful += 1,
                Err(_) => {}
            }
        }
        Ok(stats)
    }

    /// Removes every entry. Returns how many files went.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for path in self.entry_files()? {
            if fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Removes only failure markers, so the next import retries those hosts.
    pub fn clear_failed(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for path in self.entry_files()? {
            let is_failed = fs::read_to_string(&path).is_ok_and(|text| text == FAILED_MARKER);
            if is_failed && fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(StoreError::io(&self.dir))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// `host[:port]` of `page_url`, made safe to use as a file name.
pub(crate) fn host_key(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    let host = url.host_str().filter(|host| !host.is_empty())?;
    let raw = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    };
    Some(sanitize_file_stem(&raw))
}

fn sanitize_file_stem(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | ' ' => '_',
            other => other,
        })
        .take(MAX_FILE_STEM_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{host_key, CacheEntry, CacheStats, FaviconCache, FAILED_MARKER};

    #[fixture]
    fn cache() -> (TempDir, FaviconCache) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = FaviconCache::new(tmp.path().join("favicons"));
        (tmp, cache)
    }

    #[rstest]
    #[case("https://example.com/a/b?c=d", Some("example.com"))]
    #[case("http://localhost:8080/", Some("localhost_8080"))]
    #[case("https://[::1]:3000/", Some("[__1]_3000"))]
    #[case("about:blank", None)]
    #[case("not a url", None)]
    fn host_keys(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(host_key(url).as_deref(), expected);
    }

    #[test]
    fn host_key_is_truncated() {
        let long = format!("https://{}/", vec!["a".repeat(50); 5].join("."));
        assert_eq!(host_key(&long).map(|k| k.chars().count()), Some(200));
    }

    #[rstest]
    fn entries_are_shared_per_host(cache: (TempDir, FaviconCache)) {
        let (_tmp, cache) = cache;
        assert_eq!(cache.get("https://a.com/x"), None);

        cache
            .put("https://a.com/x", &CacheEntry::DataUrl("data:image/png;base64,AA==".into()))
            .expect("put");
        assert_eq!(
            cache.get("https://a.com/other"),
            Some(CacheEntry::DataUrl("data:image/png;base64,AA==".into()))
        );

        cache.put("https://b.com/", &CacheEntry::Failed).expect("put failed");
        assert_eq!(cache.get("https://b.com/"), Some(CacheEntry::Failed));
        let raw = std::fs::read_to_string(cache.entry_path("https://b.com/").unwrap()).unwrap();
        assert_eq!(raw, FAILED_MARKER);
    }

    #[rstest]
    fn stats_and_clearing(cache: (TempDir, FaviconCache)) {
        let (_tmp, cache) = cache;
        assert_eq!(cache.stats().expect("stats of missing dir"), CacheStats::default());

        cache.put("https://a.com/", &CacheEntry::DataUrl("data:x".into())).unwrap();
        cache.put("https://b.com/", &CacheEntry::Failed).unwrap();
        cache.put("https://c.com/", &CacheEntry::Failed).unwrap();
        std::fs::write(cache.dir().join("notes.md"), "ignored").unwrap();

        assert_eq!(
            cache.stats().unwrap(),
            CacheStats {
                total: 3,
                successful: 1,
                failed: 2
            }
        );
        assert_eq!(cache.clear_failed().unwrap(), 2);
        assert_eq!(cache.stats().unwrap().total, 1);
        assert_eq!(cache.clear().unwrap(), 1);
        assert!(cache.dir().join("notes.md").exists());
    }
}
