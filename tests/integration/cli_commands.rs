#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

fn write_dictionary(root: &Path) {
    fs::write(
        root.join("data.noun"),
        "  1 license header\n\
         00000001 03 n 01 entity 0 001 ~ 00000002 n 0000 | that which exists  \n\
         00000002 03 n 01 physical_entity 0 001 @ 00000001 n 0000 | g  \n",
    )
    .expect("write data.noun");
    fs::write(
        root.join("index.noun"),
        "entity n 1 1 ~ 1 0 00000001  \nphysical_entity n 1 1 @ 1 0 00000002  \n",
    )
    .expect("write index.noun");
    fs::write(
        root.join("data.verb"),
        "00000003 42 v 02 breathe 0 respire 0 000 02 + 02 00 + 08 01 | draw air  \n",
    )
    .expect("write data.verb");
    fs::write(root.join("noun.exc"), "geese goose\n").expect("write noun.exc");
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn stats_reports_counts_as_json() {
    let dir = TempDir::new().expect("tempdir");
    write_dictionary(dir.path());

    let output = cargo_bin_cmd!("lexgraph")
        .args(["--format", "json", "stats"])
        .arg(dir.path())
        .output()
        .expect("run stats");
    assert!(output.status.success(), "stats failed: {output:?}");
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["totals"]["synsets"], 3);
    assert_eq!(json["totals"]["index_entries"], 2);
    assert_eq!(json["totals"]["exceptions"], 1);
    assert_eq!(json["parts"][0]["pos"], "noun");
    assert_eq!(json["parts"][1]["synsets"], 1);
}

#[test]
fn stats_text_lists_each_part_of_speech() {
    let dir = TempDir::new().expect("tempdir");
    write_dictionary(dir.path());

    let output = cargo_bin_cmd!("lexgraph")
        .arg("stats")
        .arg(dir.path())
        .output()
        .expect("run stats");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("noun  synsets=2 index_entries=2 exceptions=1"), "{stdout}");
    assert!(stdout.contains("Total: synsets=3"), "{stdout}");
}

#[test]
fn verify_passes_on_canonical_files() {
    let dir = TempDir::new().expect("tempdir");
    write_dictionary(dir.path());

    let output = cargo_bin_cmd!("lexgraph")
        .args(["verify", "--level", "full"])
        .arg(dir.path())
        .output()
        .expect("run verify");
    assert!(output.status.success(), "verify failed: {output:?}");
    assert!(stdout_of(&output).contains("success=true"));
}

#[test]
fn verify_exits_with_two_on_mismatch() {
    let dir = TempDir::new().expect("tempdir");
    write_dictionary(dir.path());
    fs::write(dir.path().join("verb.exc"), "was  be\n").expect("write verb.exc");

    let output = cargo_bin_cmd!("lexgraph")
        .args(["--format", "json", "verify"])
        .arg(dir.path())
        .output()
        .expect("run verify");
    assert_eq!(output.status.code(), Some(2));
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["success"], false);
    assert_eq!(json["counts"]["mismatches"], 1);
    assert_eq!(json["findings"][0]["line_number"], 1);
}

#[test]
fn full_verify_reports_an_unloadable_graph() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("data.noun"),
        "00000001 03 n 01 entity 0 000 | g  \n00000001 03 n 01 thing 0 000 | h  \n",
    )
    .expect("write data.noun");

    let output = cargo_bin_cmd!("lexgraph")
        .args(["--format", "json", "verify", "--level", "full"])
        .arg(dir.path())
        .output()
        .expect("run verify");
    assert_eq!(output.status.code(), Some(2), "{output:?}");
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["counts"]["duplicate_offsets"], 1);
    assert_eq!(json["counts"]["graph_errors"], 1);
}

#[test]
fn frames_lists_the_builtin_table() {
    let output = cargo_bin_cmd!("lexgraph")
        .args(["frames", "--lemma", "run"])
        .output()
        .expect("run frames");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 35);
    assert!(stdout.lines().next().unwrap_or_default().contains("Something run"), "{stdout}");
}

#[test]
fn frames_of_one_synset_are_instantiated_per_word() {
    let dir = TempDir::new().expect("tempdir");
    write_dictionary(dir.path());

    let output = cargo_bin_cmd!("lexgraph")
        .args(["frames", "--synset", "3"])
        .arg(dir.path())
        .output()
        .expect("run frames");
    assert!(output.status.success(), "frames failed: {output:?}");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("breathe (1)"));
    assert!(stdout.contains("respire (2)"));
    assert!(stdout.contains("Somebody breathes\n"), "{stdout}");
    assert!(stdout.contains("Somebody breathes something"), "{stdout}");
    assert!(stdout.contains("Somebody respires\n"), "{stdout}");
    assert!(!stdout.contains("Somebody respires something"), "{stdout}");
}

#[test]
fn config_file_supplies_the_root() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().join("wn");
    fs::create_dir(&root).expect("mkdir");
    write_dictionary(&root);
    let config = dir.path().join("lexgraph.toml");
    fs::write(&config, "root = \"wn\"\n").expect("write config");

    let output = cargo_bin_cmd!("lexgraph")
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "stats"])
        .output()
        .expect("run stats");
    assert!(output.status.success(), "stats failed: {output:?}");
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["totals"]["synsets"], 3);
}

#[test]
fn missing_directory_fails() {
    let dir = TempDir::new().expect("tempdir");
    cargo_bin_cmd!("lexgraph")
        .arg("stats")
        .arg(dir.path().join("absent"))
        .assert()
        .failure();
}
