use std::fs;

use assert_cmd::Command;
use tempfile::NamedTempFile;

fn kiwi() -> Command {
    let mut cmd = Command::cargo_bin("kiwi").expect("binary exists");
    cmd.arg("--no-color");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run kiwi");
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[test]
fn eval_prints_the_value() {
    let mut cmd = kiwi();
    cmd.args(["--eval", "2 + 3 * 4"]);

    cmd.assert().success();
    assert_eq!(stdout_of(&mut cmd), "14\n");
}

#[test]
fn eval_reports_parse_errors() {
    let mut cmd = kiwi();
    cmd.args(["--eval", "const x;"]);

    cmd.assert().failure();
}

#[test]
fn runs_a_script_file() {
    let script = NamedTempFile::new().expect("create tmp script");
    fs::write(
        script.path(),
        "let a = 7;\nfn show(v) { print(v, { a }) }\nshow(a * 6);\n",
    )
    .expect("write script");

    let mut cmd = kiwi();
    cmd.arg(script.path());

    cmd.assert().success();
    assert_eq!(stdout_of(&mut cmd), "42 { a: 7 }\n");
}

#[test]
fn script_runtime_errors_fail() {
    let script = NamedTempFile::new().expect("create tmp script");
    fs::write(script.path(), "let a = 1;\nlet a = 2;\n").expect("write script");

    let output = kiwi().arg(script.path()).output().expect("run kiwi");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("Cannot declare 'a'"), "{}", stderr);
}

#[test]
fn missing_script_fails() {
    kiwi().arg("does/not/exist.kiwi").assert().failure();
}

#[test]
fn repl_recovers_per_line() {
    let mut cmd = kiwi();
    cmd.write_stdin("let x = 2;\nx # 1\nx * 21\nexit\n");

    let out = stdout_of(&mut cmd);
    assert!(out.contains("error:"), "{}", out);
    assert!(out.contains("> 42\n"), "{}", out);
}

#[test]
fn repl_halt_on_error() {
    let mut cmd = kiwi();
    cmd.arg("--halt-on-error").write_stdin("x # 1\n1\n");

    cmd.assert().failure();
}

#[test]
fn ast_flag_prints_tree() {
    let mut cmd = kiwi();
    cmd.args(["--ast", "--eval", "a.b(1)"]);

    let out = stdout_of(&mut cmd);
    assert!(out.contains("Call"), "{}", out);
    assert!(out.contains("Member"), "{}", out);
}

#[test]
fn repl_survives_runaway_recursion() {
    let mut cmd = kiwi();
    cmd.write_stdin("fn f() { f() }\nf()\n1\n");

    let out = stdout_of(&mut cmd);
    assert!(out.contains("Maximum call depth"), "{}", out);
    assert!(out.contains("> 1\n"), "{}", out);
}
