//! CLI behavior: argument parsing, output shapes, exit codes.

use std::io::Write;

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use refind::cli::{Cli, Commands};

const NESTED: &str = "namespace N { class C { void M() { int x = 1; } } }\n";

fn cpp_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".cpp")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

#[test]
fn find_flag_parsing() {
    let argv = vec![
        "refind", "find", "a.cpp", "--text", "int x = 1", "--line", "12", "--signature",
        "N::C::M", "--all", "--json",
    ];
    let cli = Cli::parse_from(argv);

    let Commands::Find(args) = cli.command;
    assert_eq!(args.file.as_str(), "a.cpp");
    assert_eq!(args.text, "int x = 1");
    assert_eq!(args.line, 12);
    assert_eq!(args.signature.as_deref(), Some("N::C::M"));
    assert!(args.all);
    assert!(args.json);
    assert!(!args.scope_first);
    assert_eq!(args.threshold, 50);
}

#[test]
fn finds_snippet_with_signature() {
    let file = cpp_fixture(NESTED);

    Command::cargo_bin("refind")
        .unwrap()
        .args(["find", file.path().to_str().unwrap()])
        .args(["--text", "int x = 1", "--line", "1", "--signature", "N::C::M"])
        .assert()
        .success()
        .stdout(predicate::str::contains(":1"))
        .stdout(predicate::str::contains("scope +0"));
}

#[test]
fn json_output_is_machine_readable() {
    let file = cpp_fixture(NESTED);

    let output = Command::cargo_bin("refind")
        .unwrap()
        .args(["find", file.path().to_str().unwrap()])
        .args(["--text", "int x = 1", "--line", "1", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["line"], 1);
    assert_eq!(value["scope_checked"], true);
}

#[test]
fn all_lists_every_candidate() {
    let file = cpp_fixture("void F() { go(); }\nvoid G() { go(); }\n");

    let output = Command::cargo_bin("refind")
        .unwrap()
        .args(["find", file.path().to_str().unwrap()])
        .args(["--text", "go();", "--line", "1", "--all", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn missing_snippet_fails_with_context() {
    let file = cpp_fixture(NESTED);

    Command::cargo_bin("refind")
        .unwrap()
        .args(["find", file.path().to_str().unwrap()])
        .args(["--text", "gone_forever", "--line", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no confident match"));
}

#[test]
fn unreadable_file_reports_path() {
    Command::cargo_bin("refind")
        .unwrap()
        .args(["find", "does/not/exist.cpp", "--text", "x", "--line", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist.cpp"));
}
