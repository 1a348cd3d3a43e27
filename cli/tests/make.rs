//! # Helpkit CLI Make Integration Tests
//!
//! File: cli/tests/make.rs
//!
//! ## Overview
//!
//! Integration tests for `helpkit make`: name conversion, nested directories,
//! overwrite protection and stub rendering.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_make_creates_helper_file() {
    let project = Project::new();
    project
        .cmd()
        .args(["make", "TestHelper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Helper file created:"))
        .stdout(predicate::str::contains("Converting").not());

    let content = fs::read_to_string(project.helpers_dir().join("TestHelper.lua")).unwrap();
    assert!(content.contains("function testHelper("));
    assert!(content.contains("Helper functions for TestHelper"));
    assert!(content.contains("Namespace: Helpers"));
}

#[test]
fn test_make_converts_name() {
    let project = Project::new();
    project
        .cmd()
        .args(["make", "test-case"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converting 'test-case' to 'TestCaseHelper'"));
    assert!(project.helpers_dir().join("TestCaseHelper.lua").is_file());
}

#[test]
fn test_make_creates_subdirectories() {
    let project = Project::new();
    project
        .cmd()
        .args(["make", "my_file/array"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created directory:"))
        .stdout(predicate::str::contains("MyFile/ArrayHelper"));

    let path = project.helpers_dir().join("MyFile").join("ArrayHelper.lua");
    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("function arrayHelper("));
    assert!(content.contains("Namespace: Helpers.MyFile"));
}

#[test]
fn test_make_rejects_invalid_name() {
    let project = Project::new();
    project
        .cmd()
        .args(["make", "123abc"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Valid examples:"))
        .stdout(predicate::str::contains("For subdirectories:"))
        .stderr(predicate::str::contains("CamelCase"));
    assert!(!project.helpers_dir().join("123abcHelper.lua").exists());
}

#[test]
fn test_make_refuses_to_overwrite_without_force() {
    let project = Project::new();
    let existing = project.write("Helpers/StringHelper.lua", "-- original");

    project
        .cmd()
        .args(["make", "StringHelper"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("--force"))
        .stderr(predicate::str::contains("Helper file already exists"));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "-- original");

    project
        .cmd()
        .args(["make", "StringHelper", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&existing)
        .unwrap()
        .contains("function stringHelper("));
}

#[test]
fn test_make_description_and_author() {
    let project = Project::new();
    project
        .cmd()
        .args([
            "make",
            "date",
            "--description",
            "Date formatting",
            "--author",
            "Jane Doe",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(project.helpers_dir().join("DateHelper.lua")).unwrap();
    assert!(content.contains("Date formatting"));
    assert!(content.contains("Jane Doe"));
}

#[test]
fn test_make_uses_configured_suffix() {
    let project = Project::new();
    project.write(".helpkit.toml", "[helpers]\nsuffix = \"Util\"\n");
    project.cmd().args(["make", "string"]).assert().success();
    assert!(project.helpers_dir().join("StringUtil.lua").is_file());
}

/// A freshly generated helper loads on the next run.
#[test]
fn test_generated_helper_is_loadable() {
    let project = Project::new();
    project.cmd().args(["make", "echo"]).assert().success();
    project
        .cmd()
        .args(["call", "echoHelper", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hi\""));
}
