use anyhow::{Result, anyhow};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Largest number of slots a single buffer allocation can hold.
pub(crate) const MAX_SLOTS: usize = isize::MAX as usize / std::mem::size_of::<usize>();

/// Selects how an `IndexBuf` acquires memory when it needs to grow.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GrowthStrategy {
    /// Grow the existing allocation, moving it only if the allocator has to.
    Realloc,
    /// Allocate a fresh buffer, copy the old slots over and release the old buffer.
    CopyOnGrow,
}

impl Default for GrowthStrategy {
    fn default() -> Self {
        Self::Realloc
    }
}

impl std::fmt::Display for GrowthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Realloc => write!(f, "realloc"),
            Self::CopyOnGrow => write!(f, "copy-on-grow"),
        }
    }
}

/// Growth behavior of a single `IndexBuf`
#[pyclass]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// How the buffer acquires memory when growing
    #[pyo3(get)]
    pub strategy: GrowthStrategy,
    /// Upper bound for the buffer's capacity. Growth beyond this limit fails like an
    /// allocation failure.
    #[pyo3(get)]
    pub max_capacity: Option<usize>,
}

impl Config {
    /// Creates a validated config.
    ///
    /// A `max_capacity` of 0 is rejected since it would forbid any allocation, as is a limit
    /// which no allocation could ever reach.
    pub fn new(strategy: GrowthStrategy, max_capacity: Option<usize>) -> Result<Self> {
        match max_capacity {
            Some(0) => Err(anyhow!(
                "max_capacity must be at least 1, a limit of 0 forbids any allocation"
            )),
            Some(limit) if limit > MAX_SLOTS => Err(anyhow!(
                "max_capacity {limit} exceeds the largest possible allocation of {MAX_SLOTS} slots"
            )),
            _ => Ok(Self {
                strategy,
                max_capacity,
            }),
        }
    }
}

#[pymethods]
impl Config {
    #[new]
    #[pyo3(signature = (strategy=GrowthStrategy::Realloc, max_capacity=None))]
    fn new_py(strategy: GrowthStrategy, max_capacity: Option<usize>) -> PyResult<Self> {
        Self::new(strategy, max_capacity).map_err(|e| PyValueError::new_err(format!("{e}")))
    }

    fn __repr__(&self) -> String {
        format!("{self:#?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let c = Config::default();
        assert_eq!(c.strategy, GrowthStrategy::Realloc);
        assert_eq!(c.max_capacity, None);
    }

    #[test]
    fn test_config_new() {
        let c = Config::new(GrowthStrategy::CopyOnGrow, Some(16)).unwrap();
        assert_eq!(c.strategy, GrowthStrategy::CopyOnGrow);
        assert_eq!(c.max_capacity, Some(16));
    }

    #[test]
    #[should_panic(expected = "max_capacity must be at least 1")]
    fn test_config_zero_limit() {
        Config::new(GrowthStrategy::Realloc, Some(0)).unwrap();
    }

    #[test]
    fn test_config_unreachable_limit() {
        let e = Config::new(GrowthStrategy::Realloc, Some(usize::MAX)).unwrap_err();
        assert_eq!(
            format!("{e}"),
            format!(
                "max_capacity {} exceeds the largest possible allocation of {MAX_SLOTS} slots",
                usize::MAX
            )
        );
        assert!(Config::new(GrowthStrategy::Realloc, Some(MAX_SLOTS)).is_ok());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(format!("{}", GrowthStrategy::Realloc), "realloc");
        assert_eq!(format!("{}", GrowthStrategy::CopyOnGrow), "copy-on-grow");
    }
}
