use crate::config::DEFAULT_SHARDS;
use crate::error::{CacheError, Result};
use crate::single_lru_cache::{Cache, SingleLruCache};
use log::{debug, warn};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A sharded LRU cache implementation for high-concurrency scenarios.
///
/// Keys are routed by hash to one of several independent [`SingleLruCache`]
/// shards, each with its own lock, so operations on keys in different shards
/// never contend.
///
/// **Capacity is per shard.** Every shard holds up to `capacity` entries, so
/// the cache as a whole holds up to `capacity * num_shards` entries. Callers
/// who need a global bound of `n` should construct with `n / num_shards`.
///
/// # Type Parameters
///
/// * `K` - The type of keys used in the cache. Must implement `Clone + Hash + Eq + Send`
/// * `V` - The type of values stored in the cache. Must implement `Clone + Send`
///
/// # Examples
///
/// ```rust
/// use shard_lru::ShardedLruCache;
///
/// let cache = ShardedLruCache::new(1000).unwrap();
/// cache.put("key1".to_string(), "value1".to_string());
/// assert_eq!(cache.get(&"key1".to_string()), Ok("value1".to_string()));
/// assert_eq!(cache.capacity(), 1000 * 16);
/// ```
pub struct ShardedLruCache<K, V> {
    shards: Vec<SingleLruCache<K, V>>,
    shard_capacity: usize,
}

impl<K, V> ShardedLruCache<K, V>
where
    K: Clone + Hash + Eq + Send,
    V: Clone + Send,
{
    /// Creates a sharded cache with [`DEFAULT_SHARDS`] shards of `capacity`
    /// entries each.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_shards(capacity, DEFAULT_SHARDS)
    }

    /// Creates a sharded cache with `shard_count` shards of `capacity`
    /// entries each.
    ///
    /// # Errors
    ///
    /// * [`CacheError::InvalidCapacity`] if `capacity` is 0
    /// * [`CacheError::InvalidShardCount`] if `shard_count` is 0
    pub fn with_shards(capacity: usize, shard_count: usize) -> Result<Self> {
        if capacity == 0 {
            warn!("Rejected sharded LRU cache with zero capacity");
            return Err(CacheError::InvalidCapacity(capacity));
        }
        if shard_count == 0 {
            warn!("Rejected sharded LRU cache with zero shards");
            return Err(CacheError::InvalidShardCount(shard_count));
        }

        let shards = (0..shard_count)
            .map(|_| SingleLruCache::new(capacity))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Created sharded LRU cache: {} shards x {} entries",
            shard_count, capacity
        );

        Ok(Self {
            shards,
            shard_capacity: capacity,
        })
    }

    /// Returns the number of shards in the cache.
    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    /// Returns the capacity of each individual shard.
    pub fn shard_capacity(&self) -> usize {
        self.shard_capacity
    }

    /// Returns the upper bound on total entries, `shard_capacity * num_shards`,
    /// saturating at `usize::MAX`.
    pub fn capacity(&self) -> usize {
        self.shard_capacity.saturating_mul(self.shards.len())
    }

    /// Returns the shard at `index`, if any.
    pub fn shard(&self, index: usize) -> Option<&SingleLruCache<K, V>> {
        self.shards.get(index)
    }

    /// Index of the shard responsible for `key`.
    ///
    /// `DefaultHasher::new()` uses fixed keys, so the result is stable for the
    /// lifetime of the cache.
    pub fn route_shard(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let hash = hasher.finish();
        (hash % self.shards.len() as u64) as usize
    }

    fn shard_for(&self, key: &K) -> &SingleLruCache<K, V> {
        &self.shards[self.route_shard(key)]
    }

    /// Retrieves a value from the cache by its key, promoting it within its shard.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if the key is absent.
    pub fn get(&self, key: &K) -> Result<V> {
        self.shard_for(key).get(key)
    }

    /// Inserts a key-value pair into the key's shard.
    ///
    /// If the shard is full and the key is new, that shard's least recently
    /// used entry is evicted. Other shards are never touched.
    ///
    /// # Returns
    ///
    /// * `Some(V)` if the key already existed (returns the old value)
    /// * `None` if the key didn't exist
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let shard_idx = self.route_shard(&key);
        self.shards[shard_idx].put(key, value)
    }

    /// Removes an entry from the cache by its key.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard_for(key).remove(key)
    }

    pub fn peek(&self, key: &K) -> Option<V> {
        self.shard_for(key).peek(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard_for(key).contains(key)
    }

    /// Returns the number of entries in the cache.
    ///
    /// Shards are locked one at a time, so under concurrent writes this is
    /// not an atomic snapshot.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.is_empty())
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.clear();
        }
    }
}

impl<K, V> Cache<K, V> for ShardedLruCache<K, V>
where
    K: Clone + Hash + Eq + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Result<V> {
        self.get(key)
    }

    fn put(&self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn peek(&self, key: &K) -> Option<V> {
        self.peek(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn capacity(&self) -> usize {
        self.capacity()
    }

    fn clear(&self) {
        self.clear()
    }
}
