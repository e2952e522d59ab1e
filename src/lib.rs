#![deny(clippy::suspicious)]
#![warn(clippy::pedantic)]
#![warn(let_underscore_drop)]
// Allows need to be after warn/deny
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod list;

use pyo3::prelude::*;

pub use config::{Config, GrowthStrategy};
pub use error::IndexBufError;
pub use list::{IndexBuf, IndexList};

include!(concat!(env!("OUT_DIR"), "/rustc_version.rs"));

#[pymodule]
fn indexbuf_rs(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register the `IndexBuf` Python class
    m.add_class::<IndexBuf>()?;
    // Register the `Config` class and `GrowthStrategy` enum
    m.add_class::<Config>()?;
    m.add_class::<GrowthStrategy>()?;
    m.add("__rustc_version__", RUSTC_VERSION)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rustc_version_stamped() {
        assert!(RUSTC_VERSION.starts_with("rustc "));
    }
}
