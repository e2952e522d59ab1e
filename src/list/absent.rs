use super::{IndexBuf, IndexList};
use crate::error::IndexBufError;

/// An optional buffer handle. `None` is the absent handle: queries find nothing, removals and
/// reorderings do nothing and insertions fail with `IndexBufError::Absent`. Destroying the handle
/// releases the buffer and leaves `None` behind.
impl IndexList for Option<IndexBuf> {
    #[inline]
    fn create() -> Self {
        Some(IndexBuf::new())
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().map_or(0, IndexBuf::len)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.as_ref().map_or(0, IndexBuf::capacity)
    }

    fn destroy(&mut self) {
        if let Some(mut b) = self.take() {
            b.destroy();
        }
    }

    fn reserve(&mut self, additional: usize) -> Result<&mut [usize], IndexBufError> {
        match self {
            Some(b) => b.reserve(additional),
            None if additional == 0 => Ok(&mut []),
            None => Err(IndexBufError::Absent),
        }
    }

    fn append_many(&mut self, values: &[usize]) -> Result<(), IndexBufError> {
        match self {
            Some(b) => b.append_many(values),
            None if values.is_empty() => Ok(()),
            None => Err(IndexBufError::Absent),
        }
    }

    fn find(&self, value: usize) -> Option<usize> {
        self.as_ref()?.find(value)
    }

    fn remove_unordered(&mut self, value: usize) {
        if let Some(b) = self {
            b.remove_unordered(value);
        }
    }

    fn set_insert(&mut self, value: usize) -> Result<usize, IndexBufError> {
        self.as_mut().ok_or(IndexBufError::Absent)?.set_insert(value)
    }

    fn remove_first_match(&mut self, value: usize) -> Option<usize> {
        self.as_mut()?.remove_first_match(value)
    }

    fn move_to_end(&mut self, value: usize) {
        if let Some(b) = self {
            b.move_to_end(value);
        }
    }

    fn move_to_front(&mut self, value: usize) {
        if let Some(b) = self {
            b.move_to_front(value);
        }
    }
}
