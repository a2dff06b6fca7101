//! Vector: owned growable buffer with an exact logical capacity.
//!
//! Capacity is tracked explicitly rather than read back from the backing
//! `Vec`, so growth and shrink follow a fixed policy:
//! - push on a full vector grows to 1 (from 0) or doubles;
//! - pop shrinks to half (never below `len`) once `len < capacity / 4`.
//!
//! The gap between the grow point (`len == capacity`) and the shrink point
//! (`len < capacity / 4`) keeps alternating push/pop from reallocating on
//! every call.

use crate::error::{AllocError, PushError};
use core::ops::{Index, IndexMut};
use log::{debug, trace};

#[derive(Debug)]
pub struct Vector<T> {
    data: Vec<T>,
    capacity: usize,
}

impl<T> Vector<T> {
    /// An empty vector that owns no buffer.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    /// Allocate exactly `initial_capacity` slots.
    ///
    /// Never fails loudly: if the allocation cannot be made the vector is
    /// returned empty, so a caller that asked for a nonzero capacity and got
    /// `capacity() == 0` back must treat that as failure. Use
    /// [`Vector::try_with_capacity`] to see the error.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::try_with_capacity(initial_capacity).unwrap_or_default()
    }

    pub fn try_with_capacity(initial_capacity: usize) -> Result<Self, AllocError> {
        let mut v = Self::new();
        if initial_capacity > 0 {
            v.data
                .try_reserve_exact(initial_capacity)
                .map_err(|e| AllocError::from_reserve(initial_capacity, e))?;
            v.capacity = initial_capacity;
        }
        Ok(v)
    }

    /// Drop every element, release the buffer and return to the empty state.
    /// Calling it again is a no-op.
    pub fn deinit(&mut self) {
        if self.capacity > 0 {
            debug!(
                "vector deinit: releasing {} of {} slots",
                self.data.len(),
                self.capacity
            );
        }
        self.data = Vec::new();
        self.capacity = 0;
    }

    /// Resize the buffer to exactly `new_capacity` slots.
    ///
    /// Elements past `new_capacity` are dropped. On allocation failure the
    /// vector is left untouched.
    pub fn realloc(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        self.realloc_with(new_capacity, drop)
    }

    /// Like [`Vector::realloc`], but every element past `new_capacity` is
    /// passed to `evict` in index order instead of being dropped in place.
    pub fn realloc_with<F>(&mut self, new_capacity: usize, evict: F) -> Result<(), AllocError>
    where
        F: FnMut(T),
    {
        debug!("vector realloc: {} -> {} slots", self.capacity, new_capacity);
        self.resize_buffer(new_capacity, evict)
    }

    fn resize_buffer<F>(&mut self, new_capacity: usize, evict: F) -> Result<(), AllocError>
    where
        F: FnMut(T),
    {
        let len = self.data.len();
        // Reserve before touching any element so failure leaves us unchanged.
        if new_capacity > len {
            self.data
                .try_reserve_exact(new_capacity - len)
                .map_err(|e| AllocError::from_reserve(new_capacity, e))?;
        }
        if len > new_capacity {
            self.data.drain(new_capacity..).for_each(evict);
        }
        if new_capacity == 0 {
            self.data = Vec::new();
        } else {
            self.data.shrink_to(new_capacity);
        }
        self.capacity = new_capacity;
        Ok(())
    }

    /// Append `value`, growing to 1 or doubling when full.
    ///
    /// If growth fails the vector is unchanged and `value` comes back inside
    /// the error.
    pub fn push_back(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.data.len() == self.capacity {
            let grown = match self.capacity {
                0 => 1,
                c => match c.checked_mul(2) {
                    Some(n) => n,
                    None => return Err(PushError::new(value, AllocError::new(usize::MAX))),
                },
            };
            trace!("vector grow: {} -> {} slots", self.capacity, grown);
            if let Err(e) = self.resize_buffer(grown, drop) {
                return Err(PushError::new(value, e));
            }
        }
        self.data.push(value);
        Ok(())
    }

    /// Remove and return the last element, or `None` if the vector is empty.
    ///
    /// Afterwards, if `capacity > 1` and `len < capacity / 4`, the buffer is
    /// halved (but kept at least `len`). A shrink that cannot allocate is
    /// skipped; the pop itself still succeeds.
    pub fn pop_back(&mut self) -> Option<T> {
        let value = self.data.pop()?;
        let len = self.data.len();
        if self.capacity > 1 && len < self.capacity / 4 {
            let shrunk = (self.capacity / 2).max(len);
            trace!("vector shrink: {} -> {} slots", self.capacity, shrunk);
            if self.resize_buffer(shrunk, drop).is_err() {
                trace!("vector shrink skipped at {} slots", self.capacity);
            }
        }
        Some(value)
    }

    /// Live element count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical slot count; always `>= len()`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a buffer is currently owned (`capacity() > 0`).
    pub fn is_allocated(&self) -> bool {
        self.capacity > 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
        }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}
