//! Step output file
//!
//! A CI runner exposes a file (usually through `GITHUB_OUTPUT`) into which
//! a step appends `name=value` lines. This action writes exactly one.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::error::{Result, WebstoreError};

/// Output key the run result is reported under.
pub const RESULT_KEY: &str = "result";

/// Appends `name=value` to the output file, creating it if needed.
///
/// # Examples
///
/// ```
/// use webstore_publish::output::write_output;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("output");
/// write_output(&path, "result", "testOK").unwrap();
/// assert_eq!(std::fs::read_to_string(&path).unwrap(), "result=testOK\n");
/// ```
pub fn write_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(WebstoreError::Io)
        .with_context(|| format!("failed to open output file {}", path.display()))?;

    writeln!(file, "{}={}", name, value)
        .map_err(WebstoreError::Io)
        .with_context(|| format!("failed to write output file {}", path.display()))?;

    Ok(())
}
