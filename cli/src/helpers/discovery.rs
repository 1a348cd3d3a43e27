//! # Helper File Discovery
//!
//! File: cli/src/helpers/discovery.rs
//!
//! ## Overview
//!
//! Recursively walks a helper root and collects every regular `.lua` file,
//! including symlinks pointing at one. Symlinked directories are not entered.
//! Hidden entries (names starting with `.`) below the root are skipped along
//! with everything inside hidden directories. A missing root is not an error;
//! it simply has no candidates.
//!
//! Results come back in filesystem iteration order. Callers that display them
//! sort with [`sorted_by_path`].
//!
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Source extension of helper files.
pub const HELPER_EXTENSION: &str = "lua";

/// A helper file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Full path as produced by the walk; used verbatim as the file's identity.
    pub path: String,
    pub loaded: bool,
}

impl CandidateFile {
    fn new(path: String) -> Self {
        Self {
            path,
            loaded: false,
        }
    }

    /// Path relative to `root` with `/` separators, falling back to the full path.
    pub fn relative_to(&self, root: &Path) -> String {
        match Path::new(&self.path).strip_prefix(root) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => self.path.clone(),
        }
    }
}

/// Lists helper files under `root`, recursing without a depth limit.
pub fn discover(root: &Path) -> Vec<CandidateFile> {
    if !root.is_dir() {
        debug!("Helper root '{}' does not exist; nothing to discover.", root.display());
        return Vec::new();
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to access entry during walk in '{}': {}",
                    root.display(),
                    e
                );
                continue;
            }
        };
        if is_regular_file(&entry) && has_helper_extension(entry.path()) {
            files.push(CandidateFile::new(entry.path().to_string_lossy().into_owned()));
        }
    }
    debug!("Discovered {} helper file(s) in '{}'", files.len(), root.display());
    files
}

/// Sorts candidates by their path so listings are deterministic.
pub fn sorted_by_path(mut files: Vec<CandidateFile>) -> Vec<CandidateFile> {
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Regular files, including symlinks that resolve to one.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn has_helper_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(HELPER_EXTENSION)
}
