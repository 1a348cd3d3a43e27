//! # Helpkit Stub Rendering
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Generated helper files start from a stub: a plain Lua file containing
//! `{{token}}` placeholders. Rendering is flat placeholder replacement. Each
//! `{{key}}` is replaced by the literal value, with no escaping, no
//! conditionals and no re-rendering of substituted values. Tokens without a
//! value are left verbatim.
//!
//! The built-in stub lives at `cli/stubs/helper.lua.stub` and is embedded into
//! the binary; a project may point `helpers.stub` at its own file instead.
//!
//! ## Examples
//!
//! ```rust
//! let mut values = HashMap::new();
//! values.insert("functionName", "stringHelper".to_string());
//! let source = templating::render("function {{functionName}}() end", &values);
//! assert_eq!(source, "function stringHelper() end");
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Stub shipped with helpkit.
pub const DEFAULT_HELPER_STUB: &str = include_str!("../../stubs/helper.lua.stub");

/// Replaces every `{{key}}` occurrence with its value in a single pass.
pub fn render(template: &str, values: &HashMap<&str, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let key = &after_open[..end];
                match values.get(key) {
                    Some(value) => rendered.push_str(value),
                    None => {
                        rendered.push_str("{{");
                        rendered.push_str(key);
                        rendered.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                rendered.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Reads the configured stub, or returns the built-in one.
pub fn load_stub(custom: Option<&Path>) -> Result<String> {
    match custom {
        Some(path) => {
            debug!("Using custom helper stub: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read helper stub '{}'", path.display()))
        }
        None => Ok(DEFAULT_HELPER_STUB.to_string()),
    }
}
