//! # Helpkit Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by the helper core and the command handlers:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Placeholder replacement for helper stubs
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{HelpkitError, Result}; // For error handling
//! use crate::core::templating; // For rendering helper stubs
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
