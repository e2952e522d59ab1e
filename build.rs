use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use rustc_version::version_meta;

/// Stamps the compiler version into `$OUT_DIR/rustc_version.rs` for the Python module's
/// `__rustc_version__` attribute.
fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    let rustc_version = version_meta()?.short_version_string;
    let dest_path = PathBuf::from(env::var("OUT_DIR")?).join("rustc_version.rs");
    fs::write(
        dest_path,
        format!("const RUSTC_VERSION: &str = {rustc_version:?};\n"),
    )?;
    Ok(())
}
