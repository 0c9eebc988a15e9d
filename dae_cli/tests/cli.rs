//! End-to-end checks of the `daelex` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn daelex(args: &[&Path], json: bool) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_daelex"));
    command
        .args(args)
        .env("DAE_LOGGING_ENABLE_CONSOLE", "false")
        .env_remove("DAE_OUTPUT_FORMAT");
    if json {
        command.env("DAE_OUTPUT_FORMAT", "json");
    }
    command.output().unwrap()
}

#[test]
fn test_missing_argument_fails_with_message() {
    let output = daelex(&[], false);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No file provided"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_prints_one_tuple_per_token() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("Startup.d");
    fs::write(&script, "VAR int x;\n").unwrap();

    let output = daelex(&[&script], false);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "(Token.Keyword.Declaration, 'VAR')",
            "(Token.Text.Whitespace, ' ')",
            "(Token.Keyword.Type, 'int')",
            "(Token.Text.Whitespace, ' ')",
            "(Token.Name, 'x')",
            "(Token.Punctuation, ';')",
            "(Token.Text.Whitespace, '\\n')",
        ]
    );
}

#[test]
fn test_json_lines_output() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("Dialog.d");
    fs::write(&script, "NPC_GETDISTTONPC(self, other);").unwrap();

    let output = daelex(&[&script], true);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["category"], "Name.Builtin.Externals");
    assert_eq!(first["lexeme"], "NPC_GETDISTTONPC");

    let lexemes: String = stdout
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .map(|token| token["lexeme"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(lexemes, "NPC_GETDISTTONPC(self, other);");
}

#[test]
fn test_unreadable_file_fails() {
    let dir = tempdir().unwrap();
    let output = daelex(&[&dir.path().join("missing.d")], false);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
}
