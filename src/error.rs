use thiserror::Error;

/// Errors surfaced by cache construction and lookup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache capacity must be positive, got {0}")]
    InvalidCapacity(usize),
    #[error("shard count must be positive, got {0}")]
    InvalidShardCount(usize),
    #[error("key not found in cache")]
    NotFound,
}

impl CacheError {
    /// Returns true for a lookup miss, which callers are expected to handle.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
