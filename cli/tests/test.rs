use std::path::PathBuf;

use assert_cmd::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tally() -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("XDG_CONFIG_HOME", fixture("no-config"))
        .env_remove("TALLY_LOG")
        .args(["--color", "never"]);
    cmd
}

#[test]
fn evaluate_expression() {
    tally().arg("2+3*4").assert().success().stdout("14\n");
}

#[test]
fn words_are_joined() {
    tally()
        .args(["-2", "*", "(3", "+", "4)"])
        .assert()
        .success()
        .stdout("-14\n");
}

#[test]
fn mark_error_after_line_end() {
    let output = "\
1 │ 4 -
  │    ^
  │ Syntax error: missing operand

";

    tally().arg("4 -").assert().failure().stdout(output);
}

#[test]
fn mark_both_operands() {
    let output = "\
1 │ 7 / (2 - 2)
  │ ^   ^^^^^^^
  │ Attempted to divide by 0

";

    tally().arg("7 / (2 - 2)").assert().failure().stdout(output);
}

#[test]
fn json_value() {
    tally()
        .args(["--format", "json", "pow(2, 10)"])
        .assert()
        .success()
        .stdout("{\"value\":1024.0}\n");
}

#[test]
fn json_error() {
    let output = r#"{"errors":[{"kind":"domain_error","desc":"sqrt is only defined for non-negative numbers, found -4","spans":[{"start":0,"end":8}]}]}
"#;

    tally()
        .args(["-f", "json", "sqrt(-4)"])
        .assert()
        .failure()
        .stdout(output);
}

#[test]
fn run_file() {
    let output = "\
2
8
4 │ 2 * (3
  │     ^
  │ Syntax error: missing closing parenthesis

";

    tally()
        .arg("run")
        .arg(fixture("lines.txt"))
        .assert()
        .failure()
        .stdout(output);
}

#[test]
fn check_file() {
    let output = r#"{"ok":true}
{"ok":true}
{"errors":[{"kind":"syntax_error","desc":"Syntax error: missing closing parenthesis","spans":[{"start":4,"end":5}],"line":4}]}
"#;

    tally()
        .args(["check", "--format", "json"])
        .arg(fixture("lines.txt"))
        .assert()
        .failure()
        .stdout(output);
}

#[test]
fn missing_file() {
    let assert = tally().args(["run", "nope.txt"]).assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("Error reading file: nope.txt"), "{stderr}");
}

#[test]
fn config_file() {
    tally()
        .arg("--config")
        .arg(fixture("config.toml"))
        .arg("6*7")
        .assert()
        .success()
        .stdout("{\"value\":42.0}\n");
}

#[test]
fn flag_overrides_config_file() {
    tally()
        .arg("--config")
        .arg(fixture("config.toml"))
        .args(["--format", "pretty", "6*7"])
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn missing_config_file() {
    let assert = tally()
        .arg("--config")
        .arg(fixture("missing.toml"))
        .arg("1")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("Error reading config file"), "{stderr}");
}

#[test]
fn repl_chains_results() {
    let output = "\
Started interactive repl
 >> 42
 >> 21
 >> 42/2 = 21
6*7 = 42
 >> ";

    tally()
        .arg("interactive")
        .write_stdin("6*7\n/2\nhistory\nexit\n")
        .assert()
        .success()
        .stdout(output);
}

#[test]
fn repl_fresh() {
    let output = "\
Started interactive repl
 >> 42
 >> 1 │ /2
  │ ^
  │ Syntax error: missing operand

 >> 2
 >> ";

    tally()
        .args(["i", "--chain", "fresh"])
        .write_stdin("6*7\n/2\n1+1\n")
        .assert()
        .success()
        .stdout(output);
}

#[test]
fn repl_clear() {
    let output = "\
Started interactive repl
 >> 42
 >>  >> 1 │ +1
  │ ^
  │ Syntax error: missing operand

 >> ";

    tally()
        .arg("interactive")
        .write_stdin("6*7\nclear\n+1\n")
        .assert()
        .success()
        .stdout(output);
}

#[test]
fn deep_nesting_fails_cleanly() {
    let output = r#"{"errors":[{"kind":"syntax_error","desc":"Syntax error: expression nested too deeply","spans":[{"start":256,"end":257}]}]}
"#;

    tally()
        .args(["--format", "json", "--"])
        .arg(format!("{}1", "-".repeat(100_000)))
        .assert()
        .failure()
        .stdout(output);
}
