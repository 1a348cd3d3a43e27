//! # Helpkit List Command
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! Implements `helpkit list`, which shows every helper file under the helper
//! root together with whether the registry managed to load it at startup.
//!
//! The file count and `--details` always cover every discovered file;
//! `--loaded` only filters the table rows.
//!
//! ## Examples
//!
//! ```bash
//! helpkit list
//! helpkit list --loaded
//! helpkit list --details
//! helpkit list --reload
//! ```
//!
//! Example output:
//!
//! ```
//! Found 2 helper file(s):
//!
//! File                 | Status
//! ---------------------+-----------
//! StringHelper.lua     | Loaded
//! Text/SlugHelper.lua  | Not Loaded
//! ```
//!
use crate::common::fs::io;
use crate::core::error::Result;
use crate::helpers::discovery::{self, CandidateFile};
use crate::helpers::registry::HelperRegistry;
use clap::Parser;
use regex::Regex;
use std::path::Path;
use tracing::{info, warn};

const MAKE_HINT: &str = "Run \"helpkit make example\" to create your first helper file.";

/// Arguments for `helpkit list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only show helper files that were loaded.
    #[arg(long)]
    pub loaded: bool,

    /// Show the functions defined by each helper file.
    #[arg(long)]
    pub details: bool,

    /// Reload every helper into a fresh runtime before listing.
    #[arg(long)]
    pub reload: bool,
}

/// One row of the listing.
#[derive(Debug, PartialEq)]
struct HelperRow {
    relative: String,
    path: String,
    loaded: bool,
}

impl HelperRow {
    fn status(&self) -> &'static str {
        if self.loaded {
            "Loaded"
        } else {
            "Not Loaded"
        }
    }
}

pub fn handle_list(args: ListArgs, registry: &mut HelperRegistry) -> Result<()> {
    info!("Handling list command...");
    if args.reload {
        registry.reload()?;
    }
    let root = registry.root().to_path_buf();
    if !root.is_dir() {
        println!("Helper directory does not exist: {}", root.display());
        println!("{}", MAKE_HINT);
        return Ok(());
    }

    let files = discovery::sorted_by_path(registry.discover());
    if files.is_empty() {
        println!("No helper files found.");
        println!("{}", MAKE_HINT);
        return Ok(());
    }

    println!("Found {} helper file(s):\n", files.len());
    let rows = build_rows(&files, &root, args.loaded);
    if rows.is_empty() {
        println!("No loaded helper files.");
    } else {
        print_table(&rows);
    }

    if args.details {
        print_details(&build_rows(&files, &root, false), registry)?;
    }
    Ok(())
}

fn build_rows(files: &[CandidateFile], root: &Path, only_loaded: bool) -> Vec<HelperRow> {
    let mut rows: Vec<HelperRow> = files
        .iter()
        .filter(|file| !only_loaded || file.loaded)
        .map(|file| HelperRow {
            relative: file.relative_to(root),
            path: file.path.clone(),
            loaded: file.loaded,
        })
        .collect();
    rows.sort_by(|a, b| a.relative.cmp(&b.relative));
    rows
}

fn print_table(rows: &[HelperRow]) {
    let width = rows
        .iter()
        .map(|row| row.relative.len())
        .max()
        .unwrap_or(10)
        .clamp(10, 60);

    println!("{:<width$} | Status", "File", width = width);
    println!("{:-<width$}-+-{:-<10}", "", "", width = width);
    for row in rows {
        println!("{:<width$} | {}", row.relative, row.status(), width = width);
    }
}

fn print_details(rows: &[HelperRow], registry: &HelperRegistry) -> Result<()> {
    println!("\nDetailed Information:");
    for row in rows {
        let functions = if row.loaded {
            registry
                .functions_in(&row.path)
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            match io::read_file_to_string(Path::new(&row.path)) {
                Ok(source) => scan_functions(&source)?,
                Err(e) => {
                    warn!("Could not read '{}': {:#}", row.path, e);
                    Vec::new()
                }
            }
        };

        println!("\n{}", row.relative);
        println!("  Path:      {}", row.path);
        println!("  Status:    {}", row.status());
        if functions.is_empty() {
            println!("  Functions: (none)");
        } else {
            println!("  Functions: {}", functions.join(", "));
        }
    }
    Ok(())
}

/// Function names declared in Lua source, in order of appearance.
fn scan_functions(source: &str) -> Result<Vec<String>> {
    let re = Regex::new(r"function\s+([A-Za-z_][A-Za-z0-9_.:]*)\s*\(")?;
    Ok(re
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .collect())
}
