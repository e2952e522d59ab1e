use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;
use std::collections::TryReserveError;

use super::{IndexList, first_pos, last_pos};
use crate::config::{Config, GrowthStrategy};
use crate::error::IndexBufError;

/// A growable buffer of indices which supports list-like use (ordered, duplicates allowed),
/// set-like use (see [`IndexBuf::set_insert()`]) and moving elements to either end.
///
/// The buffer tracks its logical length separately from its allocated capacity. Capacity only
/// grows, by doubling or to exactly the requested size if that's larger, and every slot added by
/// growing is zeroed. No memory is allocated until the first non-empty reservation.
#[pyclass]
#[derive(Clone, Default)]
pub struct IndexBuf {
    /// Allocated slots. `storage.len()` is the buffer's capacity, elements at `len..` aren't part
    /// of the buffer's contents.
    storage: Vec<usize>,
    /// Number of valid elements at the start of `storage`.
    len: usize,
    config: Config,
}

impl IndexBuf {
    /// Creates a new empty buffer. Doesn't allocate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty buffer which grows according to `config`. Doesn't allocate.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            storage: vec![],
            len: 0,
            config,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.storage[..self.len]
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<usize> {
        self.as_slice().get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.as_slice().iter()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, value: usize) -> bool {
        self.find(value).is_some()
    }

    /// Releases the buffer's storage and resets it to the state of a freshly created buffer.
    /// Destroying an empty or already destroyed buffer does nothing.
    pub fn destroy(&mut self) {
        self.storage = vec![];
        self.len = 0;
    }

    /// Drops all elements but keeps the allocated capacity.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Ensures that at least `additional` slots are free after the buffer's current elements
    /// and returns those slots.
    ///
    /// The returned window doesn't change the buffer's length. Use [`IndexBuf::commit()`] to
    /// make values written into the window part of the buffer.
    ///
    /// Fails without modifying the buffer when `len() + additional` overflows, when growing
    /// would exceed the configured `max_capacity`, or when the allocation fails. Reserving 0
    /// slots always succeeds.
    pub fn reserve(&mut self, additional: usize) -> Result<&mut [usize], IndexBufError> {
        let target = self
            .len
            .checked_add(additional)
            .ok_or(IndexBufError::Overflow {
                len: self.len,
                additional,
            })?;
        if target > self.capacity() {
            self.grow(target)?;
        }
        Ok(&mut self.storage[self.len..target])
    }

    /// Grows the storage to hold at least `target` slots.
    fn grow(&mut self, target: usize) -> Result<(), IndexBufError> {
        let old_capacity = self.capacity();
        let mut new_capacity = target.max(old_capacity.saturating_mul(2));
        if let Some(limit) = self.config.max_capacity {
            if target > limit {
                tracing::debug!(target, limit, "index buffer growth exceeds capacity limit");
                return Err(IndexBufError::CapacityLimit {
                    requested: target,
                    limit,
                });
            }
            new_capacity = new_capacity.min(limit);
        }

        match self.config.strategy {
            GrowthStrategy::Realloc => {
                self.storage
                    .try_reserve_exact(new_capacity - old_capacity)
                    .inspect_err(|e| log_alloc_failure(new_capacity, e))?;
                // Doesn't reallocate, the capacity was reserved above
                self.storage.resize(new_capacity, 0);
            }
            GrowthStrategy::CopyOnGrow => {
                let mut fresh: Vec<usize> = vec![];
                fresh
                    .try_reserve_exact(new_capacity)
                    .inspect_err(|e| log_alloc_failure(new_capacity, e))?;
                fresh.extend_from_slice(&self.storage);
                fresh.resize(new_capacity, 0);
                self.storage = fresh;
            }
        }
        tracing::trace!(
            old_capacity,
            new_capacity,
            strategy = %self.config.strategy,
            "grew index buffer"
        );
        Ok(())
    }

    /// Makes the first `count` slots of the window returned by the last [`IndexBuf::reserve()`]
    /// part of the buffer.
    pub fn commit(&mut self, count: usize) -> Result<(), IndexBufError> {
        match self.len.checked_add(count) {
            Some(newlen) if newlen <= self.capacity() => {
                self.len = newlen;
                Ok(())
            }
            _ => Err(IndexBufError::Overcommit {
                len: self.len,
                count,
                capacity: self.capacity(),
            }),
        }
    }

    /// Appends all of `values` in order. Appending an empty slice always succeeds.
    pub fn append_many(&mut self, values: &[usize]) -> Result<(), IndexBufError> {
        if values.is_empty() {
            return Ok(());
        }
        let window = self.reserve(values.len())?;
        window.copy_from_slice(values);
        self.len += values.len();
        Ok(())
    }

    pub fn append_one(&mut self, value: usize) -> Result<(), IndexBufError> {
        self.append_many(std::slice::from_ref(&value))
    }

    /// Returns the index of the last occurrence of `value`.
    #[must_use]
    pub fn find(&self, value: usize) -> Option<usize> {
        last_pos(self.as_slice(), value)
    }

    /// Removes the last occurrence of `value` by moving the buffer's last element into its slot.
    ///
    /// Doesn't preserve the order of the remaining elements.
    pub fn remove_unordered(&mut self, value: usize) {
        if let Some(pos) = last_pos(self.as_slice(), value) {
            self.len -= 1;
            self.storage[pos] = self.storage[self.len];
        }
    }

    /// Appends `value` if it's not present yet.
    ///
    /// Returns the index of the existing first occurrence of `value` or the index at which it
    /// was appended.
    pub fn set_insert(&mut self, value: usize) -> Result<usize, IndexBufError> {
        if let Some(pos) = first_pos(self.as_slice(), value) {
            return Ok(pos);
        }
        self.append_one(value)?;
        Ok(self.len - 1)
    }

    /// Removes the first occurrence of `value`, preserving the order of the remaining elements.
    ///
    /// Returns the index at which `value` was found.
    pub fn remove_first_match(&mut self, value: usize) -> Option<usize> {
        let pos = first_pos(self.as_slice(), value)?;
        self.storage.copy_within(pos + 1..self.len, pos);
        self.len -= 1;
        Some(pos)
    }

    /// Moves the first occurrence of `value` to the end of the buffer.
    ///
    /// The last element isn't considered when looking for `value`, so an element which is
    /// already last stays where it is.
    pub fn move_to_end(&mut self, value: usize) {
        let Some(last) = self.len.checked_sub(1) else {
            return;
        };
        if let Some(pos) = first_pos(&self.storage[..last], value) {
            self.storage.copy_within(pos + 1..self.len, pos);
            self.storage[last] = value;
        }
    }

    /// Moves the first occurrence of `value` to the start of the buffer.
    pub fn move_to_front(&mut self, value: usize) {
        if let Some(pos) = first_pos(self.as_slice(), value) {
            self.storage.copy_within(..pos, 1);
            self.storage[0] = value;
        }
    }
}

fn log_alloc_failure(new_capacity: usize, e: &TryReserveError) {
    tracing::debug!(new_capacity, "index buffer growth failed: {e}");
}

impl IndexList for IndexBuf {
    #[inline]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        IndexBuf::capacity(self)
    }

    fn destroy(&mut self) {
        IndexBuf::destroy(self);
    }

    fn reserve(&mut self, additional: usize) -> Result<&mut [usize], IndexBufError> {
        IndexBuf::reserve(self, additional)
    }

    fn append_many(&mut self, values: &[usize]) -> Result<(), IndexBufError> {
        IndexBuf::append_many(self, values)
    }

    fn find(&self, value: usize) -> Option<usize> {
        IndexBuf::find(self, value)
    }

    fn remove_unordered(&mut self, value: usize) {
        IndexBuf::remove_unordered(self, value);
    }

    fn set_insert(&mut self, value: usize) -> Result<usize, IndexBufError> {
        IndexBuf::set_insert(self, value)
    }

    fn remove_first_match(&mut self, value: usize) -> Option<usize> {
        IndexBuf::remove_first_match(self, value)
    }

    fn move_to_end(&mut self, value: usize) {
        IndexBuf::move_to_end(self, value);
    }

    fn move_to_front(&mut self, value: usize) {
        IndexBuf::move_to_front(self, value);
    }
}

impl From<Vec<usize>> for IndexBuf {
    #[inline]
    fn from(items: Vec<usize>) -> Self {
        Self {
            len: items.len(),
            storage: items,
            config: Config::default(),
        }
    }
}

impl From<IndexBuf> for Vec<usize> {
    #[inline]
    fn from(b: IndexBuf) -> Self {
        let mut items = b.storage;
        items.truncate(b.len);
        items
    }
}

impl PartialEq for IndexBuf {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for IndexBuf {}

impl std::fmt::Debug for IndexBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuf")
            .field("items", &self.as_slice())
            .field("capacity", &self.capacity())
            .field("config", &self.config)
            .finish()
    }
}

impl std::fmt::Display for IndexBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[pymethods]
impl IndexBuf {
    #[new]
    #[pyo3(signature = (values=None, config=None))]
    fn new_py(values: Option<Vec<usize>>, config: Option<Config>) -> PyResult<Self> {
        let mut b = Self::with_config(config.unwrap_or_default());
        if let Some(values) = values {
            b.append_many(&values)?;
        }
        Ok(b)
    }

    fn __repr__(&self) -> String {
        format!("IndexBuf({self})")
    }

    fn __len__(&self) -> usize {
        self.len
    }

    fn __contains__(&self, value: usize) -> bool {
        self.contains(value)
    }

    /// Returns the element at `index`. Negative indices count from the end of the buffer.
    fn __getitem__(&self, index: isize) -> PyResult<usize> {
        let pos = if index < 0 {
            self.len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        pos.and_then(|pos| self.get(pos))
            .ok_or_else(|| PyIndexError::new_err(format!("IndexBuf index {index} out of range")))
    }

    #[getter(capacity)]
    fn py_capacity(&self) -> usize {
        self.capacity()
    }

    /// Ensures that at least `additional` slots are free. Raises `OverflowError` or
    /// `MemoryError` if the buffer can't grow.
    #[pyo3(name = "reserve")]
    fn py_reserve(&mut self, additional: usize) -> PyResult<()> {
        self.reserve(additional)?;
        Ok(())
    }

    #[pyo3(name = "append")]
    fn py_append(&mut self, value: usize) -> PyResult<()> {
        Ok(self.append_one(value)?)
    }

    #[pyo3(name = "extend")]
    fn py_extend(&mut self, values: Vec<usize>) -> PyResult<()> {
        Ok(self.append_many(&values)?)
    }

    /// Returns the index of the last occurrence of `value` or `None`.
    #[pyo3(name = "find")]
    fn py_find(&self, value: usize) -> Option<usize> {
        self.find(value)
    }

    #[pyo3(name = "remove_unordered")]
    fn py_remove_unordered(&mut self, value: usize) {
        self.remove_unordered(value);
    }

    #[pyo3(name = "set_insert")]
    fn py_set_insert(&mut self, value: usize) -> PyResult<usize> {
        Ok(self.set_insert(value)?)
    }

    #[pyo3(name = "remove_first_match")]
    fn py_remove_first_match(&mut self, value: usize) -> Option<usize> {
        self.remove_first_match(value)
    }

    #[pyo3(name = "move_to_end")]
    fn py_move_to_end(&mut self, value: usize) {
        self.move_to_end(value);
    }

    #[pyo3(name = "move_to_front")]
    fn py_move_to_front(&mut self, value: usize) {
        self.move_to_front(value);
    }

    #[pyo3(name = "destroy")]
    fn py_destroy(&mut self) {
        self.destroy();
    }

    #[pyo3(name = "clear")]
    fn py_clear(&mut self) {
        self.clear();
    }

    /// Returns a copy of the buffer's elements as a list
    fn to_list(&self) -> Vec<usize> {
        self.as_slice().to_vec()
    }
}
