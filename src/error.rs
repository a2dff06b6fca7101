//! Error types shared by the vector and the chained table.
//!
//! Every failure is returned to the immediate caller; the structure that
//! reported it is left in the state it had before the call.

use core::fmt;
use std::collections::TryReserveError;

/// An allocation of `requested` slots (or key bytes) could not be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocError {
    requested: usize,
    reserve: Option<TryReserveError>, // set when the allocator reported the failure
}

impl AllocError {
    pub(crate) fn new(requested: usize) -> Self {
        Self {
            requested,
            reserve: None,
        }
    }

    pub(crate) fn from_reserve(requested: usize, err: TryReserveError) -> Self {
        Self {
            requested,
            reserve: Some(err),
        }
    }

    /// Number of elements the failed allocation asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocation of {} elements failed", self.requested)
    }
}

impl std::error::Error for AllocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.reserve
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// `push_back` could not grow the buffer. The rejected value is handed back.
pub struct PushError<T> {
    value: T,
    cause: AllocError,
}

impl<T> PushError<T> {
    pub(crate) fn new(value: T, cause: AllocError) -> Self {
        Self { value, cause }
    }

    /// The allocation failure behind the rejected push.
    pub fn cause(&self) -> &AllocError {
        &self.cause
    }

    /// Recover the value that was not pushed.
    pub fn into_inner(self) -> T {
        self.value
    }
}

// Manual impls so `T` needs no bounds of its own.
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push_back rejected: {}", self.cause)
    }
}

impl<T> std::error::Error for PushError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The table has no buckets: it was requested with zero, or deinitialized.
    ZeroBuckets,
    /// The bucket array or a key copy could not be allocated.
    Alloc(AllocError),
}

impl From<AllocError> for TableError {
    fn from(err: AllocError) -> Self {
        TableError::Alloc(err)
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::ZeroBuckets => f.write_str("table has no buckets"),
            TableError::Alloc(err) => write!(f, "table allocation failed: {err}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::ZeroBuckets => None,
            TableError::Alloc(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_error_returns_value() {
        let err = PushError::new(String::from("kept"), AllocError::new(8));
        assert_eq!(err.cause().requested(), 8);
        assert_eq!(err.into_inner(), "kept");
    }

    #[test]
    fn table_error_wraps_alloc() {
        let err: TableError = AllocError::new(3).into();
        assert_eq!(err, TableError::Alloc(AllocError::new(3)));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(TableError::ZeroBuckets.to_string(), "table has no buckets");
    }

    #[test]
    fn reserve_failure_is_kept_as_source() {
        let reserve = Vec::<u64>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = AllocError::from_reserve(usize::MAX, reserve.clone());
        let source = std::error::Error::source(&err).expect("reserve error kept");
        assert_eq!(source.to_string(), reserve.to_string());
        assert!(std::error::Error::source(&AllocError::new(1)).is_none());
    }
}
