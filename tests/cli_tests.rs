//! # CLI tests
//!
//! The local subcommands (resolve, insert, tags) run without a backend,
//! so they are exercised end to end through the binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

const CHANNEL_YAML: &str = r#"
id: ch-9
name: Release Notes
kind: newsletter
url: https://news.example.com
prompt: "Summarize {{content}}"
content: "shipped the prompt editor"
"#;

#[test]
fn resolve_substitutes_cli_tags() {
    let prompt = write_file("Hello {{name}}!");

    Command::cargo_bin("stanza")
        .unwrap()
        .args(["resolve", prompt.path().to_str().unwrap(), "--tag", "name=World"])
        .assert()
        .success()
        .stdout("Hello World!");
}

#[test]
fn resolve_passes_unknown_markers_through() {
    let prompt = write_file("{{missing}} stays");

    Command::cargo_bin("stanza")
        .unwrap()
        .args(["resolve", prompt.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout("{{missing}} stays");
}

#[test]
fn resolve_uses_channel_derived_tags() {
    let prompt = write_file("{{title}}: {{content}}");
    let channel = write_file(CHANNEL_YAML);

    Command::cargo_bin("stanza")
        .unwrap()
        .args([
            "resolve",
            prompt.path().to_str().unwrap(),
            "--channel",
            channel.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("Release Notes: shipped the prompt editor");
}

#[test]
fn resolve_cli_tag_overrides_channel_tag() {
    let prompt = write_file("{{title}}");
    let channel = write_file(CHANNEL_YAML);

    Command::cargo_bin("stanza")
        .unwrap()
        .args([
            "resolve",
            prompt.path().to_str().unwrap(),
            "--channel",
            channel.path().to_str().unwrap(),
            "--tag",
            "title=Override",
        ])
        .assert()
        .success()
        .stdout("Override");
}

#[test]
fn resolve_rejects_malformed_tag_spec() {
    let prompt = write_file("x");

    Command::cargo_bin("stanza")
        .unwrap()
        .args(["resolve", prompt.path().to_str().unwrap(), "--tag", "nopair"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tag spec"))
        .stderr(predicate::str::contains("label=value"));
}

#[test]
fn insert_splices_marker_at_offset() {
    let prompt = write_file("Write about ");

    Command::cargo_bin("stanza")
        .unwrap()
        .args([
            "insert",
            prompt.path().to_str().unwrap(),
            "--label",
            "content",
            "--at",
            "12",
        ])
        .assert()
        .success()
        .stdout("Write about {{content}}");
}

#[test]
fn insert_replaces_a_range() {
    let prompt = write_file("Write SOMETHING here");

    Command::cargo_bin("stanza")
        .unwrap()
        .args([
            "insert",
            prompt.path().to_str().unwrap(),
            "--label",
            "title",
            "--at",
            "6",
            "--end",
            "15",
        ])
        .assert()
        .success()
        .stdout("Write {{title}} here");
}

#[test]
fn insert_rejects_bad_label() {
    let prompt = write_file("x");

    Command::cargo_bin("stanza")
        .unwrap()
        .args([
            "insert",
            prompt.path().to_str().unwrap(),
            "--label",
            "9bad label",
            "--at",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tag label"));
}

#[test]
fn tags_lists_standard_set() {
    let channel = write_file(CHANNEL_YAML);

    Command::cargo_bin("stanza")
        .unwrap()
        .args(["tags", channel.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release Notes"))
        .stdout(predicate::str::contains("{{title}}"))
        .stdout(predicate::str::contains("{{content}}"))
        .stdout(predicate::str::contains("{{date}}"));
}

#[test]
fn unknown_channel_kind_fails_with_suggestion() {
    let channel = write_file("id: c\nname: N\nkind: pigeon\n");

    Command::cargo_bin("stanza")
        .unwrap()
        .args(["tags", channel.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
