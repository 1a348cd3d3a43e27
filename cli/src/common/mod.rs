//! # Helpkit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by both the helper registry (`helpers::`) and the
//! command handlers (`commands::`). Today this is only filesystem I/O:
//!
//! - **`fs`**: directory creation and file read/write with error context.
//!

/// Utilities for filesystem operations.
pub mod fs;
