// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Basic CLI tests - help, version, usage errors

mod common;

use common::envswitch_cmd;
use predicates::prelude::*;

#[test]
fn test_envswitch_version() {
    let dir = tempfile::tempdir().unwrap();
    envswitch_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("envswitch"));
}

#[test]
fn test_envswitch_help_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    envswitch_cmd(dir.path())
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("switch"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_envswitch_help_long() {
    let dir = tempfile::tempdir().unwrap();
    envswitch_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_switch_help() {
    let dir = tempfile::tempdir().unwrap();
    envswitch_cmd(dir.path())
        .args(["switch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<ENVIRONMENT>"));
}

#[test]
fn test_unrecognized_command_prints_usage_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    envswitch_cmd(dir.path())
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_command_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    envswitch_cmd(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_switch_requires_environment() {
    let dir = tempfile::tempdir().unwrap();
    envswitch_cmd(dir.path())
        .arg("switch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<ENVIRONMENT>"));
}
