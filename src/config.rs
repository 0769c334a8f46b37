use crate::error::{CacheError, Result};
use crate::sharded_lru_cache::ShardedLruCache;
use crate::single_lru_cache::SingleLruCache;
use std::hash::Hash;

pub const DEFAULT_CAPACITY: usize = 1024; // entries per cache (or per shard)
pub const DEFAULT_SHARDS: usize = 16; // shards used by ShardedLruCache::new

/// Construction parameters shared by both cache flavours.
///
/// `capacity` is the bound of a single LRU unit: the whole cache for
/// [`SingleLruCache`], each shard for [`ShardedLruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub shard_count: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            shard_count: DEFAULT_SHARDS,
        }
    }
}

impl CacheConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Checks both fields, capacity first.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        if self.shard_count == 0 {
            return Err(CacheError::InvalidShardCount(self.shard_count));
        }
        Ok(())
    }

    /// Builds an unsharded cache. `shard_count` is ignored.
    pub fn build_single<K, V>(&self) -> Result<SingleLruCache<K, V>>
    where
        K: Clone + Hash + Eq + Send,
        V: Clone + Send,
    {
        SingleLruCache::new(self.capacity)
    }

    pub fn build_sharded<K, V>(&self) -> Result<ShardedLruCache<K, V>>
    where
        K: Clone + Hash + Eq + Send,
        V: Clone + Send,
    {
        self.validate()?;
        ShardedLruCache::with_shards(self.capacity, self.shard_count)
    }
}
