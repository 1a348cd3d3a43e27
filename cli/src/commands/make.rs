//! # Helpkit Make Command
//!
//! File: cli/src/commands/make.rs
//!
//! ## Overview
//!
//! Implements `helpkit make <NAME>`, which generates a new helper file from
//! the helper stub. The name typed by the user is normalized first
//! (`my_file/array` becomes `MyFile/ArrayHelper`), so sub-directories under
//! the helper root are created on demand.
//!
//! ## Workflow
//!
//! 1. Normalize the name and validate its leaf; on failure print guidance and
//!    return `HelpkitError::InvalidName`.
//! 2. Report the conversion when the normalized name differs from the input.
//! 3. Refuse to overwrite an existing file unless `--force` is given.
//! 4. Create missing directories, render the stub and write the file.
//!
//! ## Examples
//!
//! ```bash
//! helpkit make string
//! # Converting 'string' to 'StringHelper'
//! # Helper file created: Helpers/StringHelper.lua
//!
//! helpkit make text/slug --description "Slug utilities" --author "Jane Doe"
//! helpkit make StringHelper --force
//! ```
//!
use crate::common::fs::io;
use crate::core::config::Config;
use crate::core::error::{HelpkitError, Result};
use crate::core::templating;
use crate::helpers::discovery::HELPER_EXTENSION;
use crate::helpers::naming::{self, NormalizedName};
use clap::Parser;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Arguments for `helpkit make`.
#[derive(Parser, Debug)]
pub struct MakeArgs {
    /// Helper name, optionally nested with `/` (e.g. `StringHelper`, `text/slug`).
    pub name: String,

    /// Overwrite the helper file if it already exists.
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Description written into the generated file.
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Author written into the generated file (defaults to config, then $USER).
    #[arg(long, short = 'a')]
    pub author: Option<String>,
}

/// Handles `helpkit make`, writing the new helper below `helpers_dir`.
pub fn handle_make(args: MakeArgs, cfg: &Config, helpers_dir: &Path) -> Result<()> {
    info!("Handling make command for '{}'", args.name);
    let input = args.name.trim();
    if input.is_empty() {
        anyhow::bail!("The helper name cannot be empty.");
    }

    let name = naming::normalize(input, &cfg.helpers.suffix);
    let normalized = name.display();
    debug!("Normalized '{}' to {:?}", input, name.segments());

    if !naming::validate_leaf(&name) {
        print_name_guidance(input, &normalized, &cfg.helpers.suffix);
        return Err(HelpkitError::InvalidName {
            input: input.to_string(),
            normalized,
        }
        .into());
    }
    if normalized != input {
        println!("Converting '{}' to '{}'", input, normalized);
    }

    let target = helpers_dir.join(name.relative_path(HELPER_EXTENSION));
    if target.exists() && !args.force {
        println!("Use --force to overwrite the existing file.");
        return Err(HelpkitError::AlreadyExists {
            path: display_path(&target),
        }
        .into());
    }

    if let Some(parent) = target.parent() {
        if !parent.exists() {
            io::ensure_dir_exists(parent)?;
            println!("Created directory: {}", display_path(parent));
        }
    }

    let stub = templating::load_stub(cfg.helpers.stub.as_deref().map(Path::new))?;
    let values = stub_values(&name, &args, cfg, helpers_dir);
    io::write_string_to_file(&target, &templating::render(&stub, &values))?;

    println!("Helper file created: {}", display_path(&target));
    Ok(())
}

fn print_name_guidance(input: &str, normalized: &str, suffix: &str) {
    println!(
        "Valid examples: String{s}, Array{s}, Date{s}, User{s}",
        s = suffix
    );
    println!("For subdirectories: test/Array{s}, utils/String{s}", s = suffix);
    println!("Auto-conversion applied: {} → {}", input, normalized);
}

/// Placeholder values for the helper stub.
fn stub_values(
    name: &NormalizedName,
    args: &MakeArgs,
    cfg: &Config,
    helpers_dir: &Path,
) -> HashMap<&'static str, String> {
    let mut values = HashMap::new();
    values.insert("name", name.leaf().to_string());
    values.insert("functionName", naming::function_name(name.leaf()));
    values.insert(
        "description",
        args.description
            .clone()
            .unwrap_or_else(|| format!("Helper functions for {}", name.display())),
    );
    values.insert(
        "author",
        resolve_author(args.author.as_deref(), cfg.helpers.author.as_deref()),
    );
    values.insert(
        "date",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    values.insert("namespace", namespace(helpers_dir, name));
    values
}

/// Explicit author, then the configured one, then the login name.
fn resolve_author(explicit: Option<&str>, configured: Option<&str>) -> String {
    explicit
        .or(configured)
        .map(str::to_string)
        .or_else(|| env::var("USER").or_else(|_| env::var("USERNAME")).ok())
        .filter(|author| !author.trim().is_empty())
        .unwrap_or_else(|| "Helpkit".to_string())
}

/// Helper root name followed by the sub-directories, dot separated.
fn namespace(helpers_dir: &Path, name: &NormalizedName) -> String {
    let root = helpers_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Helpers".to_string());
    std::iter::once(root)
        .chain(name.directories().iter().filter(|d| !d.is_empty()).cloned())
        .collect::<Vec<_>>()
        .join(".")
}

/// Path relative to the current directory when possible.
fn display_path(path: &Path) -> String {
    env::current_dir()
        .ok()
        .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(name: &str) -> MakeArgs {
        MakeArgs {
            name: name.to_string(),
            force: false,
            description: None,
            author: None,
        }
    }

    #[test]
    fn test_make_args_parsing() {
        let parsed = MakeArgs::try_parse_from([
            "make",
            "text/slug",
            "--force",
            "--description",
            "Slugs",
            "-a",
            "Jane",
        ])
        .unwrap();
        assert_eq!(parsed.name, "text/slug");
        assert!(parsed.force);
        assert_eq!(parsed.description.as_deref(), Some("Slugs"));
        assert_eq!(parsed.author.as_deref(), Some("Jane"));

        assert!(MakeArgs::try_parse_from(["make"]).is_err());
    }

    #[test]
    fn test_stub_values() {
        let cfg = Config::default();
        let name = naming::normalize("utils/date-time/format", "Helper");
        let mut make = args("utils/date-time/format");
        make.author = Some("Jane".into());
        let values = stub_values(&name, &make, &cfg, Path::new("/app/Helpers"));

        assert_eq!(values["name"], "FormatHelper");
        assert_eq!(values["functionName"], "formatHelper");
        assert_eq!(values["description"], "Helper functions for Utils/DateTime/FormatHelper");
        assert_eq!(values["author"], "Jane");
        assert_eq!(values["namespace"], "Helpers.Utils.DateTime");
        assert_eq!(values["date"].len(), "2024-01-31 12:00:00".len());
    }

    #[test]
    fn test_resolve_author_precedence() {
        assert_eq!(resolve_author(Some("Cli"), Some("Config")), "Cli");
        assert_eq!(resolve_author(None, Some("Config")), "Config");
        assert!(!resolve_author(None, None).is_empty());
    }

    #[test]
    fn test_namespace_without_directories() {
        let name = naming::normalize("string", "Helper");
        assert_eq!(namespace(Path::new("/app/Lib"), &name), "Lib");
    }

    #[test]
    fn test_handle_make_writes_helper() -> Result<()> {
        let dir = tempdir()?;
        let helpers = dir.path().join("Helpers");
        handle_make(args("my_file/array"), &Config::default(), &helpers)?;

        let created = helpers.join("MyFile").join("ArrayHelper.lua");
        let content = fs::read_to_string(&created)?;
        assert!(content.contains("function arrayHelper("));
        assert!(content.contains("Helpers.MyFile"));
        assert!(!content.contains("{{"));
        Ok(())
    }

    #[test]
    fn test_handle_make_respects_force() -> Result<()> {
        let dir = tempdir()?;
        let helpers = dir.path().join("Helpers");
        let target = helpers.join("StringHelper.lua");
        fs::create_dir_all(&helpers)?;
        fs::write(&target, "-- keep me")?;

        let err = handle_make(args("StringHelper"), &Config::default(), &helpers).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HelpkitError>(),
            Some(HelpkitError::AlreadyExists { .. })
        ));
        assert_eq!(fs::read_to_string(&target)?, "-- keep me");

        let mut forced = args("StringHelper");
        forced.force = true;
        handle_make(forced, &Config::default(), &helpers)?;
        assert!(fs::read_to_string(&target)?.contains("function stringHelper("));
        Ok(())
    }

    #[test]
    fn test_handle_make_rejects_invalid_name() {
        let dir = tempdir().unwrap();
        let helpers = dir.path().join("Helpers");
        let err = handle_make(args("123abc"), &Config::default(), &helpers).unwrap_err();
        match err.downcast_ref::<HelpkitError>() {
            Some(HelpkitError::InvalidName { input, normalized }) => {
                assert_eq!(input, "123abc");
                assert_eq!(normalized, "123abcHelper");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!helpers.exists());
    }

    #[test]
    fn test_handle_make_uses_custom_stub() -> Result<()> {
        let dir = tempdir()?;
        let stub = dir.path().join("custom.stub");
        fs::write(&stub, "-- {{name}} by {{author}}\n")?;
        let mut cfg = Config::default();
        cfg.helpers.stub = Some(stub.to_string_lossy().into_owned());
        cfg.helpers.author = Some("Team".into());

        let helpers = dir.path().join("Helpers");
        handle_make(args("date"), &cfg, &helpers)?;
        assert_eq!(
            fs::read_to_string(helpers.join("DateHelper.lua"))?,
            "-- DateHelper by Team\n"
        );
        Ok(())
    }
}
