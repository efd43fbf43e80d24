//! Revalidating page data cache
//!
//! Entries younger than the revalidate interval are served as-is. Older
//! entries are refetched; if the refetch fails the stale entry keeps being
//! served until a later refetch succeeds.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

struct CachedEntry<V> {
    value: V,
    fetched_at: Instant,
}

pub struct RevalidatingCache<V> {
    name: &'static str,
    revalidate: Duration,
    entries: RwLock<HashMap<String, CachedEntry<V>>>,
}

impl<V: Clone> RevalidatingCache<V> {
    pub fn new(name: &'static str, revalidate: Duration) -> Self {
        Self {
            name,
            revalidate,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached value for `key`, refetched with `fetch` when missing or expired
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: std::fmt::Display,
    {
        if let Some(entry) = self.entries.read().await.get(key) {
            if entry.fetched_at.elapsed() < self.revalidate {
                debug!("{} cache hit: {}", self.name, key);
                return Ok(entry.value.clone());
            }
        }

        match fetch().await {
            Ok(value) => {
                debug!("{} cache refreshed: {}", self.name, key);
                self.insert(key, value.clone()).await;
                Ok(value)
            }
            Err(e) => match self.entries.read().await.get(key) {
                Some(stale) => {
                    warn!("{} refresh failed for {}, serving stale data: {}", self.name, key, e);
                    Ok(stale.value.clone())
                }
                None => Err(e),
            },
        }
    }

    pub async fn insert(&self, key: &str, value: V) {
        self.entries.write().await.insert(
            key.to_string(),
            CachedEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_fresh_entry_skips_fetch() {
        let cache = RevalidatingCache::new("test", Duration::from_secs(3600));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<u32, String> = cache
                .get_or_fetch("k", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
            assert_eq!(value.unwrap(), 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let cache = RevalidatingCache::new("test", Duration::ZERO);

        let first: Result<u32, String> = cache.get_or_fetch("k", || async { Ok(1) }).await;
        let second: Result<u32, String> = cache.get_or_fetch("k", || async { Ok(2) }).await;

        assert_eq!(first.unwrap(), 1);
        assert_eq!(second.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_serves_stale() {
        let cache = RevalidatingCache::new("test", Duration::ZERO);
        cache.insert("k", 5u32).await;

        let value: Result<u32, String> = cache
            .get_or_fetch("k", || async { Err("upstream down".to_string()) })
            .await;
        assert_eq!(value.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_failed_fetch_without_entry_is_error() {
        let cache: RevalidatingCache<u32> = RevalidatingCache::new("test", Duration::ZERO);

        let value: Result<u32, String> = cache
            .get_or_fetch("k", || async { Err("upstream down".to_string()) })
            .await;
        assert_eq!(value.unwrap_err(), "upstream down");

        // Nothing was cached: the next request fetches again
        let value: Result<u32, String> = cache.get_or_fetch("k", || async { Ok(3) }).await;
        assert_eq!(value.unwrap(), 3);
    }
}
