use crate::adapters::storage::LocalStorage;
use crate::domain::ports::{Page, PageFetcher, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    size: usize,
}

/// On-disk response cache keyed by the SHA-256 of the URL.
///
/// Each entry is a body file plus a JSON metadata file; the metadata URL is
/// checked on read so a stale or foreign file is never served.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    storage: LocalStorage,
}

impl ResponseCache {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            storage: LocalStorage::new(dir),
        }
    }

    pub fn dir(&self) -> &str {
        self.storage.base_path()
    }

    pub fn key(url: &Url) -> String {
        format!("{:x}", Sha256::digest(url.as_str().as_bytes()))
    }

    pub async fn get(&self, url: &Url) -> Option<Vec<u8>> {
        let key = Self::key(url);
        let meta = self.storage.read_file(&format!("{}.json", key)).await.ok()?;
        let entry: CacheEntry = serde_json::from_slice(&meta).ok()?;
        if entry.url != url.as_str() {
            tracing::warn!("Cache key collision for {}; ignoring entry", url);
            return None;
        }
        let body = self.storage.read_file(&format!("{}.body", key)).await.ok()?;
        if body.len() != entry.size {
            tracing::warn!("Truncated cache entry for {}; ignoring", url);
            return None;
        }
        Some(body)
    }

    pub async fn put(&self, url: &Url, body: &[u8]) -> Result<()> {
        let key = Self::key(url);
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            size: body.len(),
        };
        self.storage.write_file(&format!("{}.body", key), body).await?;
        self.storage
            .write_file(&format!("{}.json", key), &serde_json::to_vec(&entry)?)
            .await?;
        Ok(())
    }

    /// Removes the cache's own entry files and leaves anything else in the
    /// directory alone. A missing directory is not an error.
    pub async fn clear(&self) -> Result<usize> {
        let mut entries = match tokio::fs::read_dir(self.dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if !Self::is_entry_file(&name.to_string_lossy()) || !entry.file_type().await?.is_file()
            {
                continue;
            }
            tokio::fs::remove_file(entry.path()).await?;
            removed += 1;
        }
        tracing::debug!("Removed {} cache files from {}", removed, self.dir());
        Ok(removed)
    }

    /// `<sha256 hex>.body` or `<sha256 hex>.json`
    fn is_entry_file(name: &str) -> bool {
        let Some((stem, ext)) = name.rsplit_once('.') else {
            return false;
        };
        matches!(ext, "body" | "json")
            && stem.len() == 64
            && stem.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

/// HTTP client that serves repeated requests from a [`ResponseCache`].
#[derive(Debug, Clone)]
pub struct CachedClient {
    client: Client,
    cache: Option<ResponseCache>,
}

impl CachedClient {
    pub fn new(client: Client, cache: Option<ResponseCache>) -> Self {
        Self { client, cache }
    }

    pub fn build(
        timeout: Duration,
        user_agent: &str,
        cache: Option<ResponseCache>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self::new(client, cache))
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url).await {
                tracing::debug!("Cache hit: {}", url);
                return Ok(body);
            }
        }

        tracing::debug!("Requesting {}", url);
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        tracing::debug!("Response status: {}", response.status());
        let body = response.bytes().await?.to_vec();

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &body).await {
                tracing::warn!("Failed to cache response for {}: {}", url, e);
            }
        }
        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for CachedClient {
    async fn fetch(&self, url: &Url) -> Option<Page> {
        let body = self.fetch_bytes(url).await?;
        // Pages are decoded as UTF-8 regardless of the declared charset.
        Some(Page::new(url.clone(), String::from_utf8_lossy(&body)))
    }

    async fn fetch_bytes(&self, url: &Url) -> Option<Vec<u8>> {
        match self.get_bytes(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!("Failed to load {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn client_with_cache(dir: &TempDir) -> CachedClient {
        let cache = ResponseCache::new(dir.path().join("cache").to_str().unwrap());
        CachedClient::build(Duration::from_secs(5), "docs-scraper-test", Some(cache)).unwrap()
    }

    #[test]
    fn test_cache_key_is_stable_hex() {
        let url = Url::parse("https://peps.python.org/").unwrap();
        let key = ResponseCache::key(&url);
        assert_eq!(key.len(), 64);
        assert_eq!(key, ResponseCache::key(&url));
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/index.html");
            then.status(200).body("<html><h1>Hello</h1></html>");
        });

        let temp_dir = TempDir::new().unwrap();
        let client = client_with_cache(&temp_dir);
        let url = Url::parse(&server.url("/index.html")).unwrap();

        let first = client.fetch(&url).await.unwrap();
        let second = client.fetch(&url).await.unwrap();

        page_mock.assert_hits(1);
        assert_eq!(first.body, second.body);
        assert!(second.body.contains("Hello"));
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200).body("content");
        });

        let temp_dir = TempDir::new().unwrap();
        let client = client_with_cache(&temp_dir);
        let url = Url::parse(&server.url("/page")).unwrap();

        client.fetch(&url).await.unwrap();
        client.cache().unwrap().clear().await.unwrap();
        client.fetch(&url).await.unwrap();

        page_mock.assert_hits(2);
    }

    #[test]
    fn test_entry_file_names() {
        let key = ResponseCache::key(&Url::parse("https://peps.python.org/").unwrap());
        assert!(ResponseCache::is_entry_file(&format!("{}.body", key)));
        assert!(ResponseCache::is_entry_file(&format!("{}.json", key)));
        assert!(!ResponseCache::is_entry_file(&format!("{}.csv", key)));
        assert!(!ResponseCache::is_entry_file("pep_2024.csv"));
        assert!(!ResponseCache::is_entry_file("settings.json"));
    }

    #[tokio::test]
    async fn test_clear_keeps_unrelated_files() {
        let temp_dir = TempDir::new().unwrap();
        let shared = temp_dir.path().join("results");
        let results = LocalStorage::new(shared.to_str().unwrap());
        results.write_file("pep_2024.csv", b"\"Status\",\"Count\"\n").await.unwrap();
        results.write_file("notes.json", b"{}").await.unwrap();

        let cache = ResponseCache::new(shared.to_str().unwrap());
        let url = Url::parse("https://peps.python.org/").unwrap();
        cache.put(&url, b"<html></html>").await.unwrap();
        assert!(cache.get(&url).await.is_some());

        assert_eq!(cache.clear().await.unwrap(), 2);
        assert!(cache.get(&url).await.is_none());
        assert!(results.read_file("pep_2024.csv").await.is_ok());
        assert!(results.read_file("notes.json").await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(temp_dir.path().join("absent").to_str().unwrap());
        assert_eq!(cache.clear().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_error_status_is_a_fetch_failure_and_not_cached() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let temp_dir = TempDir::new().unwrap();
        let client = client_with_cache(&temp_dir);
        let url = Url::parse(&server.url("/missing")).unwrap();

        assert!(client.fetch(&url).await.is_none());
        assert!(client.fetch(&url).await.is_none());
        page_mock.assert_hits(2);
    }

    #[tokio::test]
    async fn test_without_cache_every_fetch_hits_network() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("ok");
        });

        let client = CachedClient::build(Duration::from_secs(5), "test", None).unwrap();
        let url = Url::parse(&server.url("/")).unwrap();
        client.fetch_bytes(&url).await.unwrap();
        client.fetch_bytes(&url).await.unwrap();

        page_mock.assert_hits(2);
    }
}
