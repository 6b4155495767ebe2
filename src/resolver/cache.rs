//! In-memory cache of resolved subscriptions.
//!
//! One entry per management group, overwritten on every successful resolution
//! and never removed. Entries older than the TTL are kept as a fallback for
//! when a refresh fails.

use crate::models::SubscriptionRecord;
use dashmap::DashMap;
use std::time::{Duration, Instant};

const CACHE_KEY_PREFIX: &str = "azure-subscriptions-";

/// Cache key for a management group.
pub fn cache_key(group_id: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{group_id}")
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// When the resolution that produced `data` started.
    pub timestamp: Instant,
    pub data: Vec<SubscriptionRecord>,
}

impl CacheEntry {
    pub fn new(timestamp: Instant, data: Vec<SubscriptionRecord>) -> Self {
        CacheEntry { timestamp, data }
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.timestamp.elapsed() < ttl
    }
}

/// Concurrent map of cache entries; writes are atomic per key, last writer wins.
#[derive(Debug)]
pub struct SubscriptionCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl SubscriptionCache {
    pub fn new(ttl: Duration) -> Self {
        SubscriptionCache {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Copy of the entry for `key`, fresh or not.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Entry for `key` only while it is within the TTL.
    pub fn get_fresh(&self, key: &str) -> Option<CacheEntry> {
        self.get(key).filter(|entry| entry.is_fresh(self.ttl))
    }

    pub fn insert(&self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SubscriptionRecord> {
        vec![SubscriptionRecord::new("sub-aaa", "Alpha")]
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("root-g"), "azure-subscriptions-root-g");
    }

    #[test]
    fn test_fresh_within_ttl() {
        let cache = SubscriptionCache::new(Duration::from_secs(3600));
        cache.insert(cache_key("g"), CacheEntry::new(Instant::now(), records()));
        let entry = cache.get_fresh(&cache_key("g")).expect("fresh entry");
        assert_eq!(entry.data, records());
    }

    #[test]
    fn test_expired_entry_kept_as_fallback() {
        let cache = SubscriptionCache::new(Duration::ZERO);
        cache.insert(cache_key("g"), CacheEntry::new(Instant::now(), records()));
        assert!(cache.get_fresh(&cache_key("g")).is_none());
        assert_eq!(cache.get(&cache_key("g")).expect("stale entry").data, records());
    }

    #[test]
    fn test_insert_overwrites() {
        let cache = SubscriptionCache::new(Duration::from_secs(3600));
        cache.insert(cache_key("g"), CacheEntry::new(Instant::now(), records()));
        cache.insert(cache_key("g"), CacheEntry::new(Instant::now(), vec![]));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&cache_key("g")).expect("entry").data.is_empty());
    }

    #[test]
    fn test_missing_key() {
        let cache = SubscriptionCache::new(Duration::from_secs(3600));
        assert!(cache.is_empty());
        assert!(cache.get("azure-subscriptions-nope").is_none());
    }
}
