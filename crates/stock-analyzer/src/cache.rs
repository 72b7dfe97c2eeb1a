use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::hash::Hash;

/// Internal cache entry with timestamp
struct CacheEntry<V> {
    value: V,
    created_at: DateTime<Utc>,
}

/// Concurrent key→value store whose entries expire after a fixed TTL.
/// Stale entries are dropped lazily on lookup; there is no background sweep
/// and no capacity bound.
pub struct ExpiringCache<K, V> {
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Return a clone of the value if the entry is still fresh. A stale
    /// entry is removed and reported as absent.
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let entry = self.entries.get(key)?;
            if Utc::now() - entry.created_at < self.ttl {
                return Some(entry.value.clone());
            }
        }

        // Entry was stale. Re-check age under the removal lock so a value
        // refreshed by a concurrent put is not thrown away.
        self.entries
            .remove_if(key, |_, entry| Utc::now() - entry.created_at >= self.ttl);
        None
    }

    /// Store a value with the current timestamp, overwriting any prior entry.
    pub fn put(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
