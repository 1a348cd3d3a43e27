//! # Helpkit Helper Core
//!
//! File: cli/src/helpers/mod.rs
//!
//! ## Overview
//!
//! The two pieces the commands are built on:
//!
//! - `naming`: normalizes and validates the names of generated helper files
//! - `discovery` + `registry`: finds helper files on disk and loads each one
//!   once into the embedded Lua runtime
//!
//! They share nothing but the directory convention: one `.lua` file under the
//! helper root is one loadable unit.
//!
pub mod discovery;
pub mod naming;
pub mod registry;
