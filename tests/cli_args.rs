//! Tests for the `tally` binary.

mod common;

use std::fs;

use common::{tally_cmd, temp_workspace};

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_help_lists_subcommands() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    let output = tally_cmd(&storage_dir, &config_path)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["show", "increment", "decrement", "reset", "clear"] {
        assert!(stdout.contains(name), "help is missing {}", name);
    }
}

#[test]
fn test_fresh_storage_shows_zero() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    let output = tally_cmd(&storage_dir, &config_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0");
}

#[test]
fn test_count_persists_across_invocations() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    let run = |args: &[&str]| {
        let output = tally_cmd(&storage_dir, &config_path)
            .args(args)
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success(), "{:?} failed: {:?}", args, output);
        stdout_of(&output)
    };

    assert_eq!(run(&["increment"]), "1");
    assert_eq!(run(&["increment", "--by", "5"]), "6");
    assert_eq!(run(&["decrement", "--by", "2"]), "4");
    assert_eq!(run(&["show"]), "4");
    assert_eq!(run(&["increment", "--by", "-10"]), "-6");
    assert_eq!(run(&["reset"]), "0");
    assert_eq!(run(&["show"]), "0");

    assert!(storage_dir.join("counter-storage.json").exists());
}

#[test]
fn test_invalid_amount_exits_with_error() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    let output = tally_cmd(&storage_dir, &config_path)
        .args(["increment", "--by", "lots"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Invalid amount 'lots'"), "got: {}", stderr);
    assert!(!storage_dir.join("counter-storage.json").exists());
}

#[test]
fn test_no_persist_leaves_storage_untouched() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    let output = tally_cmd(&storage_dir, &config_path)
        .args(["increment", "--no-persist"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "1");
    assert!(!storage_dir.exists());
}

#[test]
fn test_clear_removes_record() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    tally_cmd(&storage_dir, &config_path)
        .args(["increment", "--by", "3"])
        .output()
        .expect("Failed to execute command");

    let output = tally_cmd(&storage_dir, &config_path)
        .arg("clear")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert!(!storage_dir.join("counter-storage.json").exists());

    let output = tally_cmd(&storage_dir, &config_path)
        .output()
        .expect("Failed to execute command");
    assert_eq!(stdout_of(&output), "0");
}

#[test]
fn test_config_key_is_honoured() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    fs::write(&config_path, "[storage]\nkey = \"custom\"\n").unwrap();

    let output = tally_cmd(&storage_dir, &config_path)
        .arg("increment")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(storage_dir.join("custom.json").exists());
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    fs::write(&config_path, "invalid { toml }").unwrap();

    let output = tally_cmd(&storage_dir, &config_path)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "got: {}", stderr);
}

#[test]
fn test_corrupt_record_starts_from_zero() {
    let (_temp, storage_dir, config_path) = temp_workspace();
    fs::create_dir_all(&storage_dir).unwrap();
    fs::write(storage_dir.join("counter-storage.json"), "garbage").unwrap();

    let output = tally_cmd(&storage_dir, &config_path)
        .arg("increment")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "1");
}
