//! Integration tests for the non-interactive flags

use std::io::Write;
use std::process::Command;

fn run_tabmode(args: &[&str]) -> (String, String, i32) {
    let logs = tempfile::tempdir().expect("log dir");
    let output = Command::new(env!("CARGO_BIN_EXE_tabmode"))
        // Keep logs out of the user's data dir.
        .arg("--log-file")
        .arg(logs.path())
        .args(args)
        .output()
        .expect("Failed to execute tabmode");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn commands_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

#[test]
fn test_help() {
    let (_, stderr, code) = run_tabmode(&["--help"]);
    assert!(stderr.contains("--list-commands"));
    assert_eq!(code, 0);
}

#[test]
fn test_list_custom_commands() {
    let file = commands_file(
        ".toml",
        r#"
leader = "C-space"

[[command]]
key = "open_tab"
name = "tabopen"
short_cmd = "o"
long_cmd = "C-t"
default_value = "about:blank"
help = "Open a tab"
"#,
    );
    let path = file.path().to_str().expect("utf-8 path");
    let (stdout, _, code) = run_tabmode(&["--commands", path, "--list-commands"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Ctrl+Space"), "{stdout}");
    assert!(stdout.contains("o / Ctrl+t"), "{stdout}");
    assert!(stdout.contains("tabopen"), "{stdout}");
    assert!(stdout.contains("(default: about:blank)"), "{stdout}");
}

#[test]
fn test_json_commands() {
    let file = commands_file(
        ".json",
        r#"{"commands": [{"key": "find", "name": "find", "shortCmd": "/", "numberOfArguments": 1}]}"#,
    );
    let path = file.path().to_str().expect("utf-8 path");
    let (stdout, _, code) = run_tabmode(&["--commands", path, "--list-commands"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(":find"), "{stdout}");
}

#[test]
fn test_duplicate_key_exits_with_error() {
    let file = commands_file(
        ".toml",
        r#"
[[command]]
key = "find"
name = "find"

[[command]]
key = "find"
name = "grep"
"#,
    );
    let path = file.path().to_str().expect("utf-8 path");
    let (stdout, stderr, code) = run_tabmode(&["--commands", path, "--list-commands"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(stderr.contains("Duplicate command key 'find'"), "{stderr}");
}

#[test]
fn test_conflicts_are_warnings() {
    let file = commands_file(
        ".toml",
        r#"
[[command]]
key = "scroll_down"
name = "down"
short_cmd = "g"

[[command]]
key = "move_right"
name = "next"
short_cmd = "g t"
"#,
    );
    let path = file.path().to_str().expect("utf-8 path");
    let (_, stderr, code) = run_tabmode(&["--commands", path, "--list-commands"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Warning:") && stderr.contains("shadows"), "{stderr}");
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_tabmode(&["--bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --bogus"));
}
