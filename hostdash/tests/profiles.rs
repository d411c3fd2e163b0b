//! Tests for profile load/save through the binary (non-interactive paths only)
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn run_hostdash(config_home: &Path, args: &[&str]) -> (bool, String) {
    let exe = env!("CARGO_BIN_EXE_hostdash");
    let output = Command::new(exe)
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("HOSTDASH_URL")
        .stdin(Stdio::null())
        .output()
        .expect("run hostdash");
    let ok = output.status.success();
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (ok, text)
}

fn profiles_path(config_home: &Path) -> PathBuf {
    config_home.join("hostdash").join("profiles.json")
}

#[test]
fn test_profile_created_on_first_use() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_hostdash(td.path(), &["--profile", "unittest", "http://example:1", "--dry-run"]);
    assert!(ok, "{out}");
    let data = fs::read_to_string(profiles_path(td.path())).expect("profiles.json created");
    assert!(data.contains("unittest"), "profiles.json missing profile entry: {data}");
    assert!(data.contains("http://example:1"), "{data}");
}

#[test]
fn test_profile_overwrite_only_when_changed() {
    let td = tempfile::tempdir().unwrap();
    let (_ok, _out) = run_hostdash(td.path(), &["--profile", "prod", "http://one:8000", "--dry-run"]);
    let first = fs::read_to_string(profiles_path(td.path())).unwrap();
    // identical input must not rewrite the file
    let (_ok2, _out2) = run_hostdash(td.path(), &["--profile", "prod", "http://one:8000", "--dry-run"]);
    let second = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert_eq!(first, second, "Profile file changed despite identical input");
    // changed URL without --save: prompt reads EOF, answer is "no"
    let (_ok3, _out3) = run_hostdash(td.path(), &["--profile", "prod", "http://two:8000", "--dry-run"]);
    let third = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert_eq!(first, third);
    // --save overwrites without asking
    let (_ok4, _out4) = run_hostdash(
        td.path(),
        &["--profile", "prod", "--save", "http://two:8000", "--dry-run"],
    );
    let fourth = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(fourth.contains("two"), "Updated URL not written: {fourth}");
}

#[test]
fn test_saved_profile_is_loaded_by_name() {
    let td = tempfile::tempdir().unwrap();
    let (ok, _) = run_hostdash(
        td.path(),
        &["--profile", "lab", "-i", "10", "http://lab-host:8000", "--dry-run"],
    );
    assert!(ok);
    let data = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(data.contains("\"interval_secs\": 10"), "{data}");

    let (ok, out) = run_hostdash(td.path(), &["-P", "lab", "--dry-run"]);
    assert!(ok, "{out}");
    assert!(out.contains("http://lab-host:8000/ every 10s"), "{out}");
}

#[test]
fn test_unknown_profile_without_input_aborts() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_hostdash(td.path(), &["-P", "ghost", "--dry-run"]);
    assert!(ok, "{out}");
    assert!(out.contains("does not exist yet"), "{out}");
    assert!(!profiles_path(td.path()).exists());
}
