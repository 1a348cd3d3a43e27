//! # Helper Name Normalization
//!
//! File: cli/src/helpers/naming.rs
//!
//! ## Overview
//!
//! Turns a free-form name typed by the user (`my_file/array`, `test-case`,
//! `UserHelper`) into the canonical, possibly nested, identifier used for a
//! generated helper file.
//!
//! ## Rules
//!
//! 1. Drop every character that is not an ASCII letter or digit, whitespace,
//!    `-`, `_`, `/` or `\`.
//! 2. Split on either slash. All parts but the last are directories; the last
//!    is the leaf identifier.
//! 3. Studly-case each part (`-`/`_` act as word breaks).
//! 4. Append the required suffix to the leaf unless it already ends with it.
//!
//! Only the leaf has to be a valid identifier (`^[A-Z][a-zA-Z0-9]*$`);
//! directory segments merely need to be usable as path components.
//!
use std::path::PathBuf;

/// Result of [`normalize`]: studly-cased segments, the last one being the leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    segments: Vec<String>,
}

impl NormalizedName {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The file/function identifier.
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Directory components in front of the leaf (empty for a plain name).
    pub fn directories(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, dirs)) => dirs,
            None => &[],
        }
    }

    /// Segments joined with `/`, e.g. `Test/ArrayHelper`.
    pub fn display(&self) -> String {
        self.segments.join("/")
    }

    /// Path of the generated file relative to the helper root.
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self
            .directories()
            .iter()
            .filter(|dir| !dir.is_empty())
            .collect();
        path.push(format!("{}.{}", self.leaf(), extension));
        path
    }
}

/// Normalizes `raw` into studly-cased segments with `suffix` guaranteed on the leaf.
pub fn normalize(raw: &str, suffix: &str) -> NormalizedName {
    let sanitized: String = raw
        .trim()
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_' | '/' | '\\')
        })
        .collect();

    let mut segments: Vec<String> = sanitized
        .split(['/', '\\'])
        .map(|part| studly(&part.replace(['-', '_'], " ")))
        .collect();

    if let Some(leaf) = segments.last_mut() {
        if !leaf.ends_with(suffix) {
            leaf.push_str(suffix);
        }
    }

    NormalizedName { segments }
}

/// Checks the leaf segment against the identifier grammar.
pub fn validate_leaf(name: &NormalizedName) -> bool {
    is_valid_identifier(name.leaf())
}

/// `^[A-Z][a-zA-Z0-9]*$`
pub fn is_valid_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Capitalizes the first letter of each whitespace-delimited word and joins them.
pub fn studly(input: &str) -> String {
    input.split_whitespace().map(upper_first).collect()
}

/// Lower-cases the first character of a studly identifier (`ArrayHelper` -> `arrayHelper`).
pub fn function_name(leaf: &str) -> String {
    let mut chars = leaf.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
