//! Shift-and-add key fingerprints.
//!
//! `hash = (hash << 5) + byte` over a `u32` accumulator starting at zero.
//! Cheap and deterministic; not collision resistant.
//!
//! There is a single fold. The terminated entry point only computes the
//! prefix before the first zero byte and hands it to [`fingerprint`], so a
//! key inserted by explicit length and looked up by its terminated form can
//! never disagree.

use core::hash::{BuildHasherDefault, Hasher};

#[inline]
fn fold(state: u32, bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(state, |h, &b| (h << 5).wrapping_add(u32::from(b)))
}

/// Fingerprint of an explicit-length byte sequence.
#[inline]
pub fn fingerprint(bytes: &[u8]) -> u32 {
    fold(0, bytes)
}

/// The bytes before the first zero byte, or all of `bytes` if there is none.
#[inline]
pub fn terminated(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

/// Fingerprint of a zero-terminated byte sequence.
#[inline]
pub fn fingerprint_terminated(bytes: &[u8]) -> u32 {
    fingerprint(terminated(bytes))
}

/// Strategy used by [`ChainTable`](crate::ChainTable) to place keys in buckets.
pub trait KeyHasher {
    fn fingerprint(&self, key: &[u8]) -> u32;
}

/// The default shift-and-add strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftHash;

impl KeyHasher for ShiftHash {
    #[inline]
    fn fingerprint(&self, key: &[u8]) -> u32 {
        fingerprint(key)
    }
}

/// [`Hasher`] running the same fold, for use with std or hashbrown maps.
///
/// Note that `Hash for str` also writes a `0xff` suffix, so hashing a `&str`
/// through this type differs from [`fingerprint`] on its bytes.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShiftHasher {
    state: u32,
}

impl Hasher for ShiftHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.state = fold(self.state, bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }
}

pub type BuildShiftHasher = BuildHasherDefault<ShiftHasher>;
