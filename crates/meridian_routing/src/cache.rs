use std::{collections::VecDeque, time::Duration};

use fxhash::FxHashMap;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;
pub const DEFAULT_CACHE_EVICTION_BATCH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: usize,
    /// Entries dropped, oldest first, when a new key arrives at capacity.
    pub eviction_batch: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            eviction_batch: DEFAULT_CACHE_EVICTION_BATCH,
        }
    }
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

struct CacheState<V> {
    entries: FxHashMap<String, CacheEntry<V>>,
    // Insertion order, oldest at the front. Always holds exactly the keys of `entries`.
    order: VecDeque<String>,
}

impl<V> CacheState<V> {
    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|existing| existing != key);
        }
    }

    fn purge_expired(&mut self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
        let entries = &self.entries;
        self.order.retain(|key| entries.contains_key(key));

        before - self.entries.len()
    }

    fn evict_oldest(&mut self, count: usize) {
        for _ in 0..count {
            match self.order.pop_front() {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

/// Bounded, time-limited store for computed results, keyed by request
/// fingerprint. Safe to share between concurrent requests.
pub struct ResultCache<V> {
    config: CacheConfig,
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState {
                entries: FxHashMap::default(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns a copy of the value if present and younger than the TTL.
    /// Expired entries are removed on the way out.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut state = self.state.lock();

        let expired = match state.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() >= self.config.ttl,
            None => return None,
        };

        if expired {
            state.remove(key);
            return None;
        }

        state.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`. Re-putting a key refreshes its age. A new key
    /// arriving at capacity first purges expired entries, then evicts the
    /// oldest batch if still full.
    pub fn put(&self, key: String, value: V) {
        if self.config.max_entries == 0 {
            return;
        }

        let mut state = self.state.lock();

        if state.entries.contains_key(&key) {
            state.remove(&key);
        } else if state.entries.len() >= self.config.max_entries {
            let purged = state.purge_expired(self.config.ttl);
            if state.entries.len() >= self.config.max_entries {
                let batch = self.config.eviction_batch.max(1);
                state.evict_oldest(batch);
                debug!(
                    "ResultCache: evicted {} oldest entries ({} expired purged)",
                    batch, purged
                );
            }
        }

        state.order.push_back(key.clone());
        state.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
