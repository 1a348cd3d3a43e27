//! # Helper Registry
//!
//! File: cli/src/helpers/registry.rs
//!
//! ## Overview
//!
//! `HelperRegistry` discovers helper files under the configured root and
//! executes each one exactly once in an embedded Lua VM. It is constructed once
//! at startup (see `main.rs`) and handed to whichever command needs it.
//!
//! ## Loading Model
//!
//! Each file runs as its own chunk with a private environment table whose
//! `__index` falls back to the VM globals. Once the chunk finishes, every
//! function left in that table is a helper. The registry then:
//!
//! 1. rejects the whole file if any of those names already exists in the VM
//!    globals (a Lua builtin or a helper from an earlier file),
//! 2. publishes the functions into the globals so later helpers can call them,
//! 3. records `name -> function` in its own map and marks the path as loaded.
//!
//! A file that fails (unreadable, syntax error, runtime error, name clash)
//! contributes nothing. Under [`LoadPolicy::BestEffort`] the failure is
//! swallowed and loading continues; under [`LoadPolicy::FailFast`] it is
//! returned as [`HelpkitError::LoadFailed`].
//!
//! `reload()` throws the VM away together with the map and the loaded set, so
//! every discovered file loads again into a clean state.
//!
//! ## Examples
//!
//! ```rust
//! let mut registry = HelperRegistry::new(cfg.helpers_dir(&app_root), cfg.helpers.load_policy);
//! registry.load_helpers()?;
//! let slug = registry.call("slugify", &[json!("Hello World")])?;
//! ```
//!
use crate::common::fs::io;
use crate::core::config::LoadPolicy;
use crate::core::error::{HelpkitError, Result};
use crate::helpers::discovery::{self, CandidateFile};
use anyhow::Context;
use mlua::{Function, Lua, LuaSerdeExt, MultiValue, RegistryKey, SerializeOptions, Table, Value};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A helper function committed from a loaded file.
struct HelperFunction {
    key: RegistryKey,
    path: String,
}

pub struct HelperRegistry {
    root: PathBuf,
    policy: LoadPolicy,
    lua: Lua,
    /// Loaded paths in insertion order.
    loaded: Vec<String>,
    loaded_index: HashSet<String>,
    functions: BTreeMap<String, HelperFunction>,
}

impl HelperRegistry {
    pub fn new(root: impl Into<PathBuf>, policy: LoadPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
            lua: Lua::new(),
            loaded: Vec::new(),
            loaded_index: HashSet::new(),
            functions: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads every helper file under the root that has not been loaded yet.
    ///
    /// A missing root is created and left empty. A root that exists but is not
    /// a directory is an error.
    pub fn load_helpers(&mut self) -> Result<()> {
        let existed = self.root.exists();
        io::ensure_dir_exists(&self.root).with_context(|| {
            format!("Invalid helper directory '{}'", self.root.display())
        })?;
        if !existed {
            info!("Created helper directory: {}", self.root.display());
            return Ok(());
        }

        for file in discovery::discover(&self.root) {
            if self.is_loaded(&file.path) {
                debug!("Helper already loaded, skipping: {}", file.path);
                continue;
            }
            match self.load_file(&file.path) {
                Ok(names) => {
                    debug!("Loaded helper '{}' ({} function(s))", file.path, names.len());
                    self.loaded_index.insert(file.path.clone());
                    self.loaded.push(file.path);
                }
                Err(e) => match self.policy {
                    LoadPolicy::BestEffort => {
                        debug!("Skipping helper '{}': {:#}", file.path, e);
                    }
                    LoadPolicy::FailFast => {
                        return Err(HelpkitError::LoadFailed {
                            path: file.path,
                            source: e.into(),
                        }
                        .into());
                    }
                },
            }
        }
        info!(
            "{} helper file(s) loaded from {}",
            self.loaded.len(),
            self.root.display()
        );
        Ok(())
    }

    /// Executes one file and commits its functions. Returns the committed names.
    ///
    /// Globals created while a failing file ran are removed again.
    fn load_file(&mut self, path: &str) -> Result<Vec<String>> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read helper file '{}'", path))?;

        let globals = self.lua.globals();
        let before = global_names(&globals)?;
        let committed = match exec_and_commit(&self.lua, &globals, path, &source) {
            Ok(committed) => committed,
            Err(e) => {
                if let Err(cleanup) = remove_new_globals(&globals, &before) {
                    warn!("Failed to clean up after helper '{}': {:#}", path, cleanup);
                }
                return Err(e);
            }
        };

        let mut names = Vec::with_capacity(committed.len());
        for (name, key) in committed {
            self.functions.insert(
                name.clone(),
                HelperFunction {
                    key,
                    path: path.to_string(),
                },
            );
            names.push(name);
        }
        Ok(names)
    }

    /// Exact-string membership test against the loaded set.
    pub fn is_loaded(&self, path: &str) -> bool {
        self.loaded_index.contains(path)
    }

    /// Loaded paths in the order they were loaded.
    pub fn loaded_files(&self) -> Vec<String> {
        self.loaded.clone()
    }

    /// Candidates under the root with their `loaded` flag filled in.
    pub fn discover(&self) -> Vec<CandidateFile> {
        discovery::discover(&self.root)
            .into_iter()
            .map(|mut file| {
                file.loaded = self.is_loaded(&file.path);
                file
            })
            .collect()
    }

    /// Starts over with an empty VM and re-runs [`load_helpers`](Self::load_helpers).
    pub fn reload(&mut self) -> Result<()> {
        info!("Reloading helpers from {}", self.root.display());
        // Registry keys belong to the current VM; release them first.
        self.functions.clear();
        self.loaded.clear();
        self.loaded_index.clear();
        self.lua = Lua::new();
        self.load_helpers()
    }

    /// Names of all helper functions, sorted.
    pub fn functions(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Names of the helper functions defined by `path`, sorted.
    pub fn functions_in(&self, path: &str) -> Vec<&str> {
        self.functions
            .iter()
            .filter(|(_, helper)| helper.path == path)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Calls a helper function with JSON arguments and converts the result back to JSON.
    ///
    /// JSON `null` arrives in Lua as `nil`.
    pub fn call(&self, name: &str, args: &[serde_json::Value]) -> Result<serde_json::Value> {
        let helper = self
            .functions
            .get(name)
            .ok_or_else(|| HelpkitError::UnknownFunction {
                name: name.to_string(),
            })?;
        let func: Function = self.lua.registry_value(&helper.key)?;

        let mut lua_args = Vec::with_capacity(args.len());
        for arg in args {
            lua_args.push(self.lua.to_value_with(arg, nil_for_null())?);
        }

        debug!("Calling helper '{}' with {} argument(s)", name, args.len());
        let out: Value = func
            .call(MultiValue::from_vec(lua_args))
            .with_context(|| format!("Helper function '{}' failed", name))?;
        let json = self
            .lua
            .from_value(out)
            .with_context(|| format!("Helper function '{}' returned a value that cannot be represented as JSON", name))?;
        Ok(json)
    }
}

/// Runs `source` in a private environment, rejects name clashes and publishes
/// the functions it defined into `globals`.
fn exec_and_commit<'lua>(
    lua: &'lua Lua,
    globals: &Table<'lua>,
    path: &str,
    source: &str,
) -> Result<Vec<(String, RegistryKey)>> {
    let env = lua.create_table()?;
    let meta = lua.create_table()?;
    meta.set("__index", globals.clone())?;
    env.set_metatable(Some(meta));
    // `_G.name = ...` stays inside the file's environment.
    env.raw_set("_G", env.clone())?;

    lua.load(source)
        .set_name(format!("@{}", path))
        .set_environment(env.clone())
        .exec()
        .map_err(|err| HelpkitError::Script { source: err })?;

    let mut defined: Vec<(String, Function)> = Vec::new();
    for pair in env.pairs::<Value, Value>() {
        let (key, value) = pair?;
        if let (Value::String(name), Value::Function(func)) = (key, value) {
            defined.push((name.to_str()?.to_string(), func));
        }
    }
    defined.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, _) in &defined {
        if globals.contains_key(name.as_str())? {
            return Err(HelpkitError::DuplicateFunction {
                name: name.clone(),
                path: path.to_string(),
            }
            .into());
        }
    }

    let mut committed = Vec::with_capacity(defined.len());
    for (name, func) in defined {
        globals.set(name.as_str(), func.clone())?;
        committed.push((name, lua.create_registry_value(func)?));
    }
    Ok(committed)
}

fn remove_new_globals(globals: &Table, before: &HashSet<String>) -> Result<()> {
    for name in global_names(globals)?.difference(before) {
        debug!("Removing global '{}' left by a failed helper", name);
        globals.raw_set(name.as_str(), Value::Nil)?;
    }
    Ok(())
}

/// String keys currently present in `table`.
fn global_names(table: &Table) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for pair in table.clone().pairs::<Value, Value>() {
        if let (Value::String(name), _) = pair? {
            names.insert(name.to_str()?.to_string());
        }
    }
    Ok(names)
}

fn nil_for_null() -> SerializeOptions {
    SerializeOptions::new()
        .serialize_none_to_null(false)
        .serialize_unit_to_null(false)
}
