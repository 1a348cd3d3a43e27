//! # Helpkit CLI Call Integration Tests
//!
//! File: cli/tests/call.rs
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_call_returns_json() {
    let project = Project::new();
    project.write(
        "Helpers/MathHelper.lua",
        "function add(a, b) return a + b end\nfunction pair(a, b) return { a, b } end",
    );

    project
        .cmd()
        .args(["call", "add", "2", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));

    project
        .cmd()
        .args(["call", "pair", "x", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"x\"").and(predicate::str::contains("true")));
}

/// Helpers can call each other and the Lua standard library.
#[test]
fn test_helpers_share_functions() {
    let project = Project::new();
    project.write(
        "Helpers/StringHelper.lua",
        "function shout(s) return string.upper(s) .. bang() end",
    );
    project.write("Helpers/Text/PunctuationHelper.lua", "function bang() return '!' end");
    project
        .cmd()
        .args(["call", "shout", "hey"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"HEY!\""));
}

#[test]
fn test_call_unknown_function() {
    let project = Project::new();
    project
        .cmd()
        .args(["call", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Helper function 'nope' is not defined."));
}

#[test]
fn test_call_runtime_error() {
    let project = Project::new();
    project.write("Helpers/FailHelper.lua", "function explode() error('kaboom') end");
    project
        .cmd()
        .args(["call", "explode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Helper function 'explode' failed"));
}
