//! # Helpkit Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level subcommands of the helpkit CLI. Each module defines its
//! `clap` argument struct and a `handle_*` function that `main.rs` dispatches
//! to once configuration is loaded and the helper registry is booted.
//!
//! ## Commands
//!
//! - `make`: Generate a new helper file from the helper stub
//! - `list`: Show helper files and whether they were loaded
//! - `call`: Invoke a loaded helper function with JSON arguments
//!

/// Generates helper files (`helpkit make <NAME>`).
pub mod make;
/// Lists helper files and their load status (`helpkit list`).
pub mod list;
/// Invokes loaded helper functions (`helpkit call <FUNCTION>`).
pub mod call;
