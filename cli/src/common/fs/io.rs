//! # Helpkit Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach context to I/O errors:
//! - **`ensure_dir_exists`**: creates a directory (and parents) when missing and
//!   rejects a path that exists but is not a directory. Used when the registry
//!   creates the helper root and when `make` creates sub-directories.
//! - **`read_file_to_string`**: reads a helper file for `list --details`.
//! - **`write_string_to_file`**: writes a rendered helper, creating parents first.
//!
use crate::core::error::{HelpkitError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// the directory fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(HelpkitError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file, overwriting it and creating parent directories.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}
