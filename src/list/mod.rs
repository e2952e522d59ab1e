mod absent;
mod indexbuf;

use crate::error::IndexBufError;

/// Defines the shared interface between an `IndexBuf` and an optional buffer handle
/// (`Option<IndexBuf>`), where the absent handle behaves like a buffer which holds no elements.
pub trait IndexList {
    fn create() -> Self;
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn destroy(&mut self);
    fn reserve(&mut self, additional: usize) -> Result<&mut [usize], IndexBufError>;
    fn append_many(&mut self, values: &[usize]) -> Result<(), IndexBufError>;
    fn append_one(&mut self, value: usize) -> Result<(), IndexBufError> {
        self.append_many(std::slice::from_ref(&value))
    }
    fn find(&self, value: usize) -> Option<usize>;
    fn remove_unordered(&mut self, value: usize);
    fn set_insert(&mut self, value: usize) -> Result<usize, IndexBufError>;
    fn remove_first_match(&mut self, value: usize) -> Option<usize>;
    fn move_to_end(&mut self, value: usize);
    fn move_to_front(&mut self, value: usize);
}

/// Returns the 0-indexed position of the first occurrence of `value`, if it's found
fn first_pos(items: &[usize], value: usize) -> Option<usize> {
    items.iter().position(|&v| v == value)
}

/// Returns the 0-indexed position of the last occurrence of `value`, if it's found
fn last_pos(items: &[usize], value: usize) -> Option<usize> {
    items.iter().rposition(|&v| v == value)
}

pub use indexbuf::*;
