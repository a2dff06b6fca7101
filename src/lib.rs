//! chain-collections: a growable vector and a fixed-bucket chained hash
//! table for single-threaded, single-owner use.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: two small containers whose structural invariants are easy to
//!   state and check, built on safe Rust.
//! - Pieces:
//!   - `hash`: one shift-and-add fold over bytes. The terminated entry
//!     point is a prefix computation on top of the explicit-length one, so
//!     the two always agree on keys without interior NULs.
//!   - `Vector<T>`: exact logical capacity; doubles when full, halves once
//!     fewer than a quarter of the slots are live.
//!   - `Chains<T>`: singly linked lists in a generational arena. Links are
//!     indices, so unlinking cannot leave a dangling predecessor and a node
//!     cannot be freed twice.
//!   - `DChains<T>`: the doubly linked sibling of `Chains`. Each node also
//!     links back to its predecessor, so a known node unlinks in O(1).
//!   - `ChainTable<V, H>`: a fixed array of chain heads over one `Chains`
//!     arena, keyed by owned byte strings.
//!
//! Constraints
//! - Bucket count is fixed at construction; the table never rehashes, so
//!   chains grow with load.
//! - No duplicate keys: `emplace` updates in place.
//! - New entries go to the head of their chain.
//! - Allocation failure on reported paths (vector buffers, bucket array, key
//!   copies) leaves the container as it was and returns an error.
//!
//! - Handles carry the id of the table that issued them; any other table
//!   treats them as absent.
//!
//! Ownership
//! - `Vector<T>` owns its elements. Truncating `realloc` drops them;
//!   `realloc_with` hands them to the caller instead.
//! - `ChainTable` owns its buckets, nodes and keys. Values are stored as
//!   `V`; use `V = &T` to keep them owned by the caller.
//!
//! Non-goals
//! - Thread safety, rehashing, general iteration protocols, sorting.

pub mod chain;
pub mod chain_table;
mod chain_table_proptest;
pub mod dchain;
mod error;
pub mod hash;
pub mod vector;

// Public surface
pub use chain_table::{ChainTable, Handle};
pub use error::{AllocError, PushError, TableError};
pub use hash::{fingerprint, fingerprint_terminated, KeyHasher, ShiftHash};
pub use vector::Vector;
