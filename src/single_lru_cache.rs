use crate::error::{CacheError, Result};
use log::{debug, trace, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;

/// The core trait that defines the behavior of a cache implementation.
///
/// This trait provides the basic operations that any cache implementation
/// must support, including get, put, remove, and various utility methods.
///
/// # Type Parameters
///
/// * `K` - The type of keys used in the cache. Must implement `Clone + Hash + Eq + Send`
/// * `V` - The type of values stored in the cache. Must implement `Clone + Send`
pub trait Cache<K, V>: Send + Sync
where
    K: Clone + Hash + Eq + Send,
    V: Clone + Send,
{
    /// Retrieves a value from the cache by its key.
    ///
    /// If the key exists, the value is cloned and returned, and the entry
    /// is marked as most recently used.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if the key is absent. The recency
    /// order is left untouched in that case.
    fn get(&self, key: &K) -> Result<V>;

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key already exists, the value is replaced, the entry is promoted
    /// and nothing is evicted. Otherwise, if the cache is full, the least
    /// recently used entry is evicted before the new entry is inserted.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    /// * `value` - The value to insert
    ///
    /// # Returns
    ///
    /// * `Some(V)` if the key already existed (returns the old value)
    /// * `None` if the key didn't exist
    fn put(&self, key: K, value: V) -> Option<V>;

    /// Removes an entry from the cache by its key.
    ///
    /// # Returns
    ///
    /// * `Some(V)` if the key existed (returns the removed value)
    /// * `None` if the key didn't exist
    fn remove(&self, key: &K) -> Option<V>;

    /// Returns a clone of the value for `key` without changing its recency.
    fn peek(&self, key: &K) -> Option<V>;

    /// Returns true if `key` is cached. Does not change its recency.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache may hold.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&self);
}

// Link value for "no neighbour"
const NIL: usize = usize::MAX;

// Upper bound on slots reserved at construction; the rest grows on demand
const MAX_PREALLOC: usize = 4096;

// A slot in the arena. `entry` is `None` while the slot sits on the free list.
struct Slot<K, V> {
    entry: Option<(K, V)>,
    prev: usize,
    next: usize,
}

// Doubly linked list threaded through a slot arena, most recently used at
// the head. Freed slots are recycled so positions stay stable indices.
struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // Store a new entry at the front and return its slot index
    fn push_front(&mut self, key: K, value: V) -> usize {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx].entry = Some((key, value));
                idx
            }
            None => {
                self.slots.push(Slot {
                    entry: Some((key, value)),
                    prev: NIL,
                    next: NIL,
                });
                self.slots.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        idx
    }

    fn link_front(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;

        if self.head != NIL {
            self.slots[self.head].prev = idx;
        } else {
            // Empty list case
            self.tail = idx;
        }
        self.head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // Detach the slot and hand its entry back, recycling the slot
    fn remove(&mut self, idx: usize) -> Option<(K, V)> {
        let entry = self.slots[idx].entry.take()?;
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        Some(entry)
    }

    fn pop_back(&mut self) -> Option<(K, V)> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    fn value(&self, idx: usize) -> Option<&V> {
        self.slots[idx].entry.as_ref().map(|(_, v)| v)
    }

    fn value_mut(&mut self, idx: usize) -> Option<&mut V> {
        self.slots[idx].entry.as_mut().map(|(_, v)| v)
    }

    fn keys(&self) -> RecencyKeys<'_, K, V> {
        RecencyKeys {
            list: self,
            cursor: self.head,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }
}

struct RecencyKeys<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: usize,
}

impl<'a, K, V> Iterator for RecencyKeys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let slot = &self.list.slots[self.cursor];
        self.cursor = slot.next;
        slot.entry.as_ref().map(|(k, _)| k)
    }
}

// Index and recency order change together, so they live behind one lock.
struct LruState<K, V> {
    index: HashMap<K, usize>,
    order: RecencyList<K, V>,
}

/// A capacity-bounded LRU cache guarded by a single mutex.
///
/// Keys map to slot indices in an arena-backed doubly linked list, so lookup,
/// promotion and eviction are all O(1). The map and the list are one unit of
/// state behind a [`parking_lot::Mutex`]; every operation holds the lock for
/// its whole duration.
///
/// # Type Parameters
///
/// * `K` - The type of keys used in the cache. Must implement `Clone + Hash + Eq + Send`
/// * `V` - The type of values stored in the cache. Must implement `Clone + Send`
///
/// # Examples
///
/// ```rust
/// use shard_lru::{Cache, SingleLruCache};
///
/// let cache = SingleLruCache::new(2).unwrap();
/// cache.put("key1".to_string(), "value1".to_string());
/// assert_eq!(cache.get(&"key1".to_string()), Ok("value1".to_string()));
/// ```
pub struct SingleLruCache<K, V> {
    cap: usize,
    state: Mutex<LruState<K, V>>,
}

impl<K, V> SingleLruCache<K, V>
where
    K: Clone + Hash + Eq + Send,
    V: Clone + Send,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            warn!("Rejected LRU cache with zero capacity");
            return Err(CacheError::InvalidCapacity(capacity));
        }
        debug!("Creating LRU cache with capacity {}", capacity);
        Ok(Self {
            cap: capacity,
            state: Mutex::new(LruState {
                index: HashMap::with_capacity(capacity.min(MAX_PREALLOC)),
                order: RecencyList::with_capacity(capacity.min(MAX_PREALLOC)),
            }),
        })
    }

    /// Snapshot of the cached keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        let state = self.state.lock();
        state.order.keys().cloned().collect()
    }
}

impl<K, V> Cache<K, V> for SingleLruCache<K, V>
where
    K: Clone + Hash + Eq + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Result<V> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let idx = match state.index.get(key) {
            Some(&idx) => idx,
            None => {
                trace!("Cache miss");
                return Err(CacheError::NotFound);
            }
        };

        let value = state.order.value(idx).cloned().ok_or(CacheError::NotFound)?;
        state.order.move_to_front(idx);
        Ok(value)
    }

    fn put(&self, key: K, value: V) -> Option<V> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        // Update in place, never evicts
        if let Some(&idx) = state.index.get(&key) {
            state.order.move_to_front(idx);
            return state
                .order
                .value_mut(idx)
                .map(|slot| mem::replace(slot, value));
        }

        if state.order.len() >= self.cap {
            if let Some((evicted, _)) = state.order.pop_back() {
                state.index.remove(&evicted);
                trace!("Evicted least recently used entry");
            }
        }

        let idx = state.order.push_front(key.clone(), value);
        state.index.insert(key, idx);
        None
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let idx = state.index.remove(key)?;
        state.order.remove(idx).map(|(_, v)| v)
    }

    fn peek(&self, key: &K) -> Option<V> {
        let state = self.state.lock();
        let idx = *state.index.get(key)?;
        state.order.value(idx).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        self.state.lock().index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.state.lock().index.len()
    }

    fn capacity(&self) -> usize {
        self.cap
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.index.clear();
        state.order.clear();
    }
}
