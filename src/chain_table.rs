//! ChainTable: fixed bucket count, byte-string keys, chained collisions.
//!
//! Each bucket holds the head of a chain in a shared [`Chains`] arena. Keys
//! are copied into the table on first insert; values are stored as given
//! (use `V = &T` to keep values borrowed from the caller).

use crate::chain::{Chains, Link, NodeId};
use crate::error::{AllocError, TableError};
use crate::hash::{self, KeyHasher, ShiftHash};
use core::sync::atomic::{AtomicU64, Ordering};
use log::debug;

/// Stable reference to one entry. Stops resolving once the entry is removed,
/// even if its arena slot is reused.
///
/// A handle is only valid for the table that returned it. It records that
/// table's id, so presenting it to any other table resolves to `None`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    table: u64,
    node: NodeId,
}

impl Handle {
    pub fn key<'a, V, H>(&self, table: &'a ChainTable<V, H>) -> Option<&'a [u8]> {
        table.entry(*self).map(|e| &*e.key)
    }

    pub fn value<'a, V, H>(&self, table: &'a ChainTable<V, H>) -> Option<&'a V> {
        table.entry(*self).map(|e| &e.value)
    }

    pub fn value_mut<'a, V, H>(&self, table: &'a mut ChainTable<V, H>) -> Option<&'a mut V> {
        if self.table != table.id {
            return None;
        }
        table.chains.get_mut(self.node).map(|e| &mut e.value)
    }
}

// Source of table ids stamped into handles.
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct Entry<V> {
    key: Box<[u8]>,
    value: V,
    bucket: usize, // chain this entry is linked into
}

#[derive(Debug)]
pub struct ChainTable<V, H = ShiftHash> {
    id: u64,
    hasher: H,
    buckets: Vec<Link>,
    chains: Chains<Entry<V>>, // every node belongs to exactly one bucket chain
}

impl<V, H> ChainTable<V, H> {
    fn entry(&self, handle: Handle) -> Option<&Entry<V>> {
        if handle.table != self.id {
            return None;
        }
        self.chains.get(handle.node)
    }
}

impl<V> ChainTable<V> {
    /// A table with `bucket_count` empty buckets and the shift-and-add hasher.
    pub fn new(bucket_count: usize) -> Result<Self, TableError> {
        Self::with_hasher(bucket_count, ShiftHash)
    }
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>, AllocError> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|e| AllocError::from_reserve(key.len(), e))?;
    owned.extend_from_slice(key);
    Ok(owned.into_boxed_slice())
}

impl<V, H> ChainTable<V, H>
where
    H: KeyHasher,
{
    pub fn with_hasher(bucket_count: usize, hasher: H) -> Result<Self, TableError> {
        if bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|e| AllocError::from_reserve(bucket_count, e))?;
        buckets.resize(bucket_count, None);
        debug!("chain table init: {} buckets", bucket_count);
        Ok(Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            hasher,
            buckets,
            chains: Chains::new(),
        })
    }

    /// Free every entry and the bucket array.
    ///
    /// The table is left with zero buckets: lookups report absent and inserts
    /// fail with [`TableError::ZeroBuckets`]. Calling it again is a no-op.
    pub fn deinit(&mut self) {
        if self.buckets.is_empty() {
            return;
        }
        let mut freed = 0;
        for head in self.buckets.iter_mut() {
            freed += self.chains.clear_chain(head);
        }
        debug!(
            "chain table deinit: freed {} entries across {} buckets",
            freed,
            self.buckets.len()
        );
        self.buckets = Vec::new();
        self.chains.clear();
    }

    /// Number of live entries across all buckets.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Fixed at construction; 0 only after [`ChainTable::deinit`].
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.len() as f64 / self.buckets.len() as f64
    }

    /// Bucket that `key` (taken as explicit-length bytes) maps to.
    pub fn bucket_index(&self, key: &[u8]) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        Some(self.hasher.fingerprint(key) as usize % self.buckets.len())
    }

    fn locate(&self, key: &[u8]) -> Option<(usize, NodeId)> {
        let idx = self.bucket_index(key)?;
        let id = self.chains.find(self.buckets[idx], |e| &*e.key == key)?;
        Some((idx, id))
    }

    /// Insert `key` (up to its first NUL byte) or update its value.
    pub fn emplace(&mut self, key: &str, value: V) -> Result<Option<V>, TableError> {
        self.emplace_bytes(hash::terminated(key.as_bytes()), value)
    }

    /// Insert or update an explicit-length key.
    ///
    /// An existing entry keeps its node and its place in the chain; the old
    /// value is returned. A new entry is linked at the head of its chain.
    pub fn emplace_bytes(&mut self, key: &[u8], value: V) -> Result<Option<V>, TableError> {
        let idx = self.bucket_index(key).ok_or(TableError::ZeroBuckets)?;
        if let Some(id) = self.chains.find(self.buckets[idx], |e| &*e.key == key) {
            if let Some(entry) = self.chains.get_mut(id) {
                return Ok(Some(core::mem::replace(&mut entry.value, value)));
            }
        }
        let key = copy_key(key)?;
        let entry = Entry {
            key,
            value,
            bucket: idx,
        };
        self.chains.push_front(&mut self.buckets[idx], entry);
        Ok(None)
    }

    /// Unlink `key` (up to its first NUL byte) and return its value.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        self.delete_bytes(hash::terminated(key.as_bytes()))
    }

    pub fn delete_bytes(&mut self, key: &[u8]) -> Option<V> {
        let idx = self.bucket_index(key)?;
        self.chains
            .unlink(&mut self.buckets[idx], |e| &*e.key == key)
            .map(|e| e.value)
    }

    pub fn search(&self, key: &str) -> Option<&V> {
        self.search_bytes(hash::terminated(key.as_bytes()))
    }

    pub fn search_bytes(&self, key: &[u8]) -> Option<&V> {
        let (_, id) = self.locate(key)?;
        self.chains.get(id).map(|e| &e.value)
    }

    pub fn search_mut(&mut self, key: &str) -> Option<&mut V> {
        self.search_bytes_mut(hash::terminated(key.as_bytes()))
    }

    pub fn search_bytes_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let (_, id) = self.locate(key)?;
        self.chains.get_mut(id).map(|e| &mut e.value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.has_bytes(hash::terminated(key.as_bytes()))
    }

    pub fn has_bytes(&self, key: &[u8]) -> bool {
        self.locate(key).is_some()
    }

    pub fn find(&self, key: &str) -> Option<Handle> {
        self.find_bytes(hash::terminated(key.as_bytes()))
    }

    pub fn find_bytes(&self, key: &[u8]) -> Option<Handle> {
        self.locate(key).map(|(_, node)| Handle {
            table: self.id,
            node,
        })
    }

    /// Remove the entry behind `handle`, returning its owned key and value.
    ///
    /// Returns `None` and leaves the table untouched if the handle is stale
    /// or was returned by a different table.
    pub fn remove(&mut self, handle: Handle) -> Option<(Box<[u8]>, V)> {
        let bucket = self.entry(handle)?.bucket;
        let head = self.buckets.get_mut(bucket)?;
        self.chains
            .unlink_node(head, handle.node)
            .map(|e| (e.key, e.value))
    }

    /// Number of entries chained in `bucket` (0 when out of range).
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.bucket_keys(bucket).count()
    }

    /// Keys chained in `bucket`, most recently inserted first.
    pub fn bucket_keys(&self, bucket: usize) -> impl Iterator<Item = &[u8]> + '_ {
        let head = self.buckets.get(bucket).copied().flatten();
        self.chains.iter(head).map(|(_, e)| &*e.key)
    }
}
