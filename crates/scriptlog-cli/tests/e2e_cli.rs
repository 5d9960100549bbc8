//! E2E tests for scriptlog CLI command execution.
//!
//! These tests spawn the actual CLI binary and verify:
//! - Exit codes
//! - stdout/stderr output
//! - Command behavior

use std::io::Write;
use std::process::{Command, Output};

/// Path to the compiled binary (in debug or release mode).
fn get_binary_path() -> String {
    env!("CARGO_BIN_EXE_scriptlog").to_string()
}

/// Helper to run the CLI with an isolated config dir and plain output.
fn run_cli(args: &[&str]) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    Command::new(get_binary_path())
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("SCRIPTLOG_PLAIN", "1")
        .env_remove("SCRIPTLOG_FORCE_COLOR")
        .env_remove("SCRIPTLOG_DEBUG")
        .env_remove("SCRIPTLOG_PREFIX")
        .env_remove("SCRIPTLOG_DATETIME")
        .env_remove("SCRIPTLOG_CONFIG")
        .output()
        .expect("Failed to execute CLI binary")
}

/// Helper to get stdout as string.
fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to get stderr as string.
fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Help Command Tests
// =============================================================================

#[test]
fn e2e_cli_help_shows_usage() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success(), "help should exit 0");

    let stdout = stdout_str(&output);
    assert!(stdout.contains("scriptlog"), "Should mention scriptlog");
    assert!(stdout.contains("format"), "Should list format command");
    assert!(stdout.contains("inspect"), "Should list inspect command");
    assert!(stdout.contains("log"), "Should list log command");
}

#[test]
fn e2e_cli_unknown_command_fails() {
    let output = run_cli(&["frobnicate"]);
    assert!(!output.status.success());
}

// =============================================================================
// Format Command Tests
// =============================================================================

#[test]
fn e2e_format_substitutes_tokens() {
    let output = run_cli(&["format", "%s=%d (%%)", "x", "5"]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "x=5 (%)\n");
}

#[test]
fn e2e_format_json_token() {
    let output = run_cli(&["format", "payload %j", r#"{"a":[1,2]}"#]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "payload {\"a\":[1,2]}\n");
}

#[test]
fn e2e_format_appends_extra_values() {
    let output = run_cli(&["format", "state", r#"{"open":true}"#, "-1"]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "state { open: true } -1\n");
}

#[test]
fn e2e_format_non_string_first_value() {
    let output = run_cli(&["format", "[1,\"a\"]", "null"]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "[ 1, 'a' ] null\n");
}

// =============================================================================
// Inspect Command Tests
// =============================================================================

const NESTED: &str = r#"{"a":{"b":{"c":{"d":1}}}}"#;

#[test]
fn e2e_inspect_default_depth() {
    let output = run_cli(&["inspect", NESTED]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "{ a: { b: { c: [Object] } } }\n");
}

#[test]
fn e2e_inspect_depth_zero() {
    let output = run_cli(&["inspect", NESTED, "--depth", "0"]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "{ a: [Object] }\n");
}

#[test]
fn e2e_inspect_unlimited() {
    let output = run_cli(&["inspect", NESTED, "--unlimited"]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "{ a: { b: { c: { d: 1 } } } }\n");
}

#[test]
fn e2e_inspect_options_object() {
    let output = run_cli(&["inspect", NESTED, "--options", r#"{"depth":null}"#]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "{ a: { b: { c: { d: 1 } } } }\n");
}

#[test]
fn e2e_inspect_colors() {
    let output = run_cli(&["inspect", "5", "--colors"]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "\u{1b}[33m5\u{1b}[39m\n");
}

#[test]
fn e2e_inspect_plain_string_is_quoted() {
    let output = run_cli(&["inspect", "hello"]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "'hello'\n");
}

#[test]
fn e2e_inspect_rejects_conflicting_depth() {
    let output = run_cli(&["inspect", "{}", "--depth", "1", "--unlimited"]);
    assert!(!output.status.success());
}

// =============================================================================
// Log Command Tests
// =============================================================================

#[test]
fn e2e_log_info_with_timestamp() {
    let output = run_cli(&["log", "info", "hello %s", "world"]);

    assert!(output.status.success());
    assert!(stdout_str(&output).is_empty(), "log writes to stderr only");
    let stderr = stderr_str(&output);
    assert!(stderr.starts_with("[scriptlog] ["), "got: {stderr}");
    assert!(stderr.ends_with("][INFO] hello world\n"), "got: {stderr}");
}

#[test]
fn e2e_log_without_date() {
    let output = run_cli(&["log", "--no-date", "warn", "careful"]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[scriptlog] [WARN] careful\n");
}

#[test]
fn e2e_log_flags_after_values() {
    let output = run_cli(&["log", "info", "hello", "--no-date", "--prefix", "[late] "]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[late] [INFO] hello\n");
}

#[test]
fn e2e_log_hyphen_value_after_separator() {
    let output = run_cli(&["log", "--no-date", "info", "--", "--no-date"]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[scriptlog] [INFO] --no-date\n");
}

#[test]
fn e2e_log_custom_prefix() {
    let output = run_cli(&["log", "--no-date", "--prefix", "[tracker] ", "log", "x"]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[tracker] [LOG] x\n");
}

#[test]
fn e2e_log_unknown_category() {
    let output = run_cli(&["log", "--no-date", "verbose", "x"]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[scriptlog] [????] x\n");
}

#[test]
fn e2e_log_debug_gate() {
    let quiet = run_cli(&["log", "--no-date", "debug", "hidden"]);
    assert!(quiet.status.success());
    assert!(stderr_str(&quiet).is_empty());

    let loud = run_cli(&["log", "--no-date", "--debug", "debug", "shown"]);
    assert!(loud.status.success());
    assert_eq!(stderr_str(&loud), "[scriptlog] [DBUG] shown\n");
}

#[test]
fn e2e_log_error_quotes_first_value() {
    let output = run_cli(&["log", "--no-date", "error", "boom", "7"]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[scriptlog] [ERR!] 'boom' 7\n");
}

#[test]
fn e2e_log_dir_dumps_value() {
    let output = run_cli(&["log", "--no-date", "dir", r#"{"n":1}"#, "snapshot"]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[scriptlog] [DIR?] snapshot\n{ n: 1 }\n");
}

#[test]
fn e2e_log_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "show_date_time = false\nprefix = \"[cfg] \"").expect("write config");

    let path = file.path().to_string_lossy().to_string();
    let output = run_cli(&["log", "--config", &path, "info", "from file"]);

    assert!(output.status.success());
    assert_eq!(stderr_str(&output), "[cfg] [INFO] from file\n");
}

#[test]
fn e2e_log_bad_config_file_fails() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "show_date_time = \"sometimes\"").expect("write config");

    let path = file.path().to_string_lossy().to_string();
    let output = run_cli(&["log", "--config", &path, "info", "x"]);

    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("invalid config"));
}
