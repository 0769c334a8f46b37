//! A fixed-capacity, thread-safe LRU (Least Recently Used) cache.
//!
//! This crate provides two LRU cache implementations:
//!
//! 1. [`SingleLruCache`] - A capacity-bounded LRU cache behind a single mutex
//! 2. [`ShardedLruCache`] - Independent [`SingleLruCache`] shards selected by key hash
//!
//! # Features
//!
//! - O(1) `get`, `put` and eviction via an arena-backed recency list
//! - Thread-safe: the key index and recency order change together under one lock
//! - Sharding to cut lock contention across unrelated keys
//! - Generic key and value types
//!
//! A lookup miss is an ordinary outcome reported as [`CacheError::NotFound`].
//! For the sharded cache, capacity applies **per shard**: see
//! [`ShardedLruCache`].
//!
//! # Examples
//!
//! ```rust
//! use shard_lru::{Cache, CacheConfig, CacheError, ShardedLruCache, SingleLruCache};
//!
//! let cache: SingleLruCache<u64, String> = SingleLruCache::new(2)?;
//! cache.put(1, "one".to_string());
//! cache.put(2, "two".to_string());
//! cache.get(&1)?;
//! cache.put(3, "three".to_string());
//! assert_eq!(cache.get(&2), Err(CacheError::NotFound));
//!
//! let sharded: ShardedLruCache<String, u32> = CacheConfig::default()
//!     .with_capacity(64)
//!     .with_shard_count(4)
//!     .build_sharded()?;
//! sharded.put("answer".to_string(), 42);
//! assert_eq!(sharded.get(&"answer".to_string()), Ok(42));
//! # Ok::<(), CacheError>(())
//! ```

pub mod config;
pub mod error;
pub mod sharded_lru_cache;
pub mod single_lru_cache;

pub use config::{CacheConfig, DEFAULT_CAPACITY, DEFAULT_SHARDS};
pub use error::{CacheError, Result};
pub use sharded_lru_cache::ShardedLruCache;
pub use single_lru_cache::{Cache, SingleLruCache};
