use pyo3::PyErr;
use pyo3::exceptions::{PyMemoryError, PyOverflowError, PyValueError};
use std::collections::TryReserveError;
use thiserror::Error;

/// Failures reported by the growing and inserting operations of an `IndexBuf`.
///
/// Every operation which returns one of these errors leaves the buffer exactly as it was before
/// the call.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum IndexBufError {
    /// `len + additional` isn't representable as `usize`
    #[error("Can't reserve {additional} slots on top of {len} elements: length would overflow")]
    Overflow { len: usize, additional: usize },
    /// The allocator couldn't satisfy the growth request
    #[error("Failed to grow index buffer: {0}")]
    Alloc(#[from] TryReserveError),
    /// Growing would exceed the configured `max_capacity`
    #[error("Requested capacity {requested} exceeds the configured limit of {limit}")]
    CapacityLimit { requested: usize, limit: usize },
    /// `commit()` was called for more slots than were reserved
    #[error("Can't commit {count} slots on top of {len} elements with capacity {capacity}")]
    Overcommit {
        len: usize,
        count: usize,
        capacity: usize,
    },
    /// Insertion into a handle which doesn't hold a buffer
    #[error("Index buffer handle is absent")]
    Absent,
}

impl From<IndexBufError> for PyErr {
    fn from(e: IndexBufError) -> Self {
        match e {
            IndexBufError::Overflow { .. } => PyOverflowError::new_err(format!("{e}")),
            IndexBufError::Alloc(_) | IndexBufError::CapacityLimit { .. } => {
                PyMemoryError::new_err(format!("{e}"))
            }
            IndexBufError::Overcommit { .. } | IndexBufError::Absent => {
                PyValueError::new_err(format!("{e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_message() {
        let e = IndexBufError::Overflow {
            len: 3,
            additional: usize::MAX,
        };
        assert_eq!(
            format!("{e}"),
            format!(
                "Can't reserve {} slots on top of 3 elements: length would overflow",
                usize::MAX
            )
        );
    }

    #[test]
    fn test_capacity_limit_message() {
        let e = IndexBufError::CapacityLimit {
            requested: 9,
            limit: 8,
        };
        assert_eq!(
            format!("{e}"),
            "Requested capacity 9 exceeds the configured limit of 8"
        );
    }

    #[test]
    fn test_alloc_from_try_reserve_error() {
        let mut v: Vec<usize> = vec![];
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        let e: IndexBufError = err.into();
        assert!(matches!(e, IndexBufError::Alloc(_)));
        assert!(format!("{e}").starts_with("Failed to grow index buffer: "));
    }
}
