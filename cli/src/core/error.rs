//! # Helpkit Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout helpkit. Specific,
//! user-recoverable failures get their own `HelpkitError` variant; everything
//! else travels as `anyhow::Error` with context attached at each layer.
//!
//! ## Architecture
//!
//! - `HelpkitError`: A custom error enum using `thiserror` for specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error kinds cover:
//! - Configuration errors
//! - Filesystem errors
//! - Helper name validation and generation conflicts
//! - Helper load failures and runtime (Lua) errors
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if target.exists() && !force {
//!     return Err(HelpkitError::AlreadyExists { path: target.display().to_string() })?;
//! }
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<HelpkitError>().map_or(false, |he| matches!(he, HelpkitError::UnknownFunction { .. })) => {
//!         println!("No such helper function");
//!     },
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for helpkit.
#[derive(Error, Debug)]
pub enum HelpkitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// The normalized leaf name does not satisfy the identifier grammar.
    #[error("The name must be in CamelCase format (e.g., StringHelper, ArrayHelper). '{input}' was converted to '{normalized}'.")]
    InvalidName { input: String, normalized: String },

    #[error("Helper file already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Failed to load helper file '{path}': {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Function '{name}' from '{path}' is already defined.")]
    DuplicateFunction { name: String, path: String },

    #[error("Helper function '{name}' is not defined.")]
    UnknownFunction { name: String },

    #[error("Lua error: {source}")]
    Script {
        #[from]
        source: mlua::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
