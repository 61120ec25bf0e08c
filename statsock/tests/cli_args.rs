//! CLI arg parsing tests for statsock, run against the built binary.
use assert_cmd::Command;

fn output(args: &[&str]) -> (bool, Option<i32>, String) {
    let out = Command::cargo_bin("statsock")
        .unwrap()
        .args(args)
        .output()
        .expect("run statsock");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    (out.status.success(), out.status.code(), text)
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let (ok, _, text) = output(&["--help"]);
    assert!(ok);
    for flag in [
        "--tls-ca", "-t", "--profile", "-P", "--save", "--history", "--reconnect", "--log-file",
        "--dry-run",
    ] {
        assert!(text.contains(flag), "help text missing {flag}\n{text}");
    }
}

#[test]
fn test_flags_accepted_before_help() {
    for args in [
        &["--tls-ca", "/tmp/cert.pem", "--help"][..],
        &["-t", "/tmp/cert.pem", "--help"][..],
        &["--profile", "dev", "--help"][..],
        &["--history", "30", "--reconnect", "--help"][..],
    ] {
        let (ok, _, text) = output(args);
        assert!(ok, "statsock {args:?} did not succeed");
        assert!(text.contains("Usage:"));
    }
}

#[test]
fn test_invalid_arguments_exit_with_usage_error() {
    let (ok, code, text) = output(&["--history", "nope"]);
    assert!(!ok);
    assert_eq!(code, Some(2));
    assert!(text.contains("--history expects a positive number"));

    let (_, code, _) = output(&["http://a:1", "http://b:2"]);
    assert_eq!(code, Some(2));
}
