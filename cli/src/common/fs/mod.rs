//! # Helpkit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!

/// Basic file and directory I/O.
pub mod io;
