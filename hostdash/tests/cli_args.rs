//! CLI arg parsing tests for hostdash
use assert_cmd::Command;

fn run(args: &[&str]) -> (bool, String) {
    let output = Command::cargo_bin("hostdash")
        .expect("hostdash binary")
        .args(args)
        .env_remove("HOSTDASH_URL")
        .output()
        .expect("run hostdash");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (output.status.success(), text)
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let (ok, text) = run(&["--help"]);
    assert!(ok, "hostdash --help failed\n{text}");
    assert!(
        text.contains("--profile")
            && text.contains("-P")
            && text.contains("--interval")
            && text.contains("--headless")
            && text.contains("--log-format"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_dry_run_prints_target_and_cadence() {
    let (ok, text) = run(&["--dry-run", "http://127.0.0.1:8000"]);
    assert!(ok, "dry run failed\n{text}");
    assert!(text.contains("http://127.0.0.1:8000/ every 5s"), "{text}");

    let (ok, text) = run(&["--dry-run", "-i", "2", "http://127.0.0.1:8000/srv"]);
    assert!(ok, "dry run failed\n{text}");
    assert!(text.contains("http://127.0.0.1:8000/srv/ every 2s"), "{text}");
}

#[test]
fn test_rejects_non_http_url_and_bad_log_format() {
    Command::cargo_bin("hostdash")
        .unwrap()
        .args(["--dry-run", "ws://127.0.0.1:3000/ws"])
        .env_remove("HOSTDASH_URL")
        .assert()
        .failure();

    let (ok, text) = run(&["--log-format", "xml", "--dry-run", "http://h:1"]);
    assert!(!ok);
    assert!(text.contains("Invalid log format"), "{text}");
}
