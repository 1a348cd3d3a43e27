//! # Helpkit Call Command
//!
//! File: cli/src/commands/call.rs
//!
//! ## Overview
//!
//! Implements `helpkit call <FUNCTION> [ARGS]...`, which invokes a loaded
//! helper function and prints its result as JSON. Each argument is parsed as
//! JSON when possible (`42`, `true`, `[1,2]`, `{"a":1}`, `null`), otherwise it
//! is passed as a plain string.
//!
//! ## Examples
//!
//! ```bash
//! helpkit call stringHelper "hello"
//! # "hello"
//! helpkit call add 2 3
//! # 5
//! ```
//!
use crate::core::error::Result;
use crate::helpers::registry::HelperRegistry;
use clap::Parser;
use serde_json::Value;
use tracing::info;

/// Arguments for `helpkit call`.
#[derive(Parser, Debug)]
pub struct CallArgs {
    /// Name of a loaded helper function.
    pub function: String,

    /// Arguments, each parsed as JSON or taken as a string.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub fn handle_call(args: CallArgs, registry: &HelperRegistry) -> Result<()> {
    info!("Calling helper function '{}'", args.function);
    if !registry.functions().contains(&args.function.as_str()) {
        println!(
            "Available helper functions: {}",
            registry.functions().join(", ")
        );
    }
    let values: Vec<Value> = args.args.iter().map(|raw| parse_arg(raw)).collect();
    let result = registry.call(&args.function, &values)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
