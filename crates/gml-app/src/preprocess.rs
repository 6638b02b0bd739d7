//! Macro expansion through an external C preprocessor.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::debug;

/// Source text of `path`, expanded by `cpp` when one is given.
pub fn read_source(path: &Path, cpp: Option<&str>) -> Result<String> {
    match cpp {
        Some(program) => preprocess(program, path),
        None => fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display())),
    }
}

/// Runs `<program> -E -x c -P <path>` and returns its standard output.
pub fn preprocess(program: &str, path: &Path) -> Result<String> {
    debug!("preprocessing {} with {program}", path.display());
    let output = Command::new(program)
        .args(["-E", "-x", "c", "-P"])
        .arg(path)
        .output()
        .with_context(|| format!("cannot run preprocessor `{program}`"))?;
    if !output.status.success() {
        bail!(
            "`{program}` failed on {} ({}): {}",
            path.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    String::from_utf8(output.stdout).context("preprocessor output is not valid UTF-8")
}
