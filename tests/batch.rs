#![cfg(unix)]

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn dash(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dash"))
        .args(args)
        .current_dir(cwd)
        .env_remove("DASH_LOG")
        .output()
        .expect("failed to run dash")
}

fn run_batch(script: &str) -> (Output, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let batch = dir.path().join("batch.txt");
    fs::write(&batch, script).unwrap();
    let out = dash(&[batch.to_str().unwrap()], dir.path());
    (out, dir)
}

#[test]
fn batch_mode_prints_no_prompt() {
    let (out, _dir) = run_batch("path /bin /usr/bin\necho one\necho two\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "one\ntwo\n");
    assert_eq!(String::from_utf8_lossy(&out.stderr), "");
}

#[test]
fn redirect_keeps_interpreter_stdout_clean() {
    let (out, dir) = run_batch("echo hi > out.txt\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "");
    assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "hi\n");
}

#[test]
fn runtime_errors_are_reported_and_skipped() {
    let (out, _dir) = run_batch("no_such_command\ncd\nexit 3\necho still here\n");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stderr),
        "An error has occurred\n".repeat(3)
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout), "still here\n");
}

#[test]
fn exit_stops_reading() {
    let (out, _dir) = run_batch("echo before\nexit\necho after\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "before\n");
}

#[test]
fn crlf_lines_are_accepted() {
    let (out, _dir) = run_batch("echo a\r\necho b\r\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "a\nb\n");
    assert_eq!(String::from_utf8_lossy(&out.stderr), "");
}

#[test]
fn missing_batch_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = dash(&["does-not-exist.txt"], dir.path());
    assert!(!out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stderr), "An error has occurred\n");
    assert_eq!(String::from_utf8_lossy(&out.stdout), "");
}

#[test]
fn two_arguments_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = dash(&["a.txt", "b.txt"], dir.path());
    assert!(!out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stderr), "An error has occurred\n");
}

#[test]
fn help_flag_is_a_missing_batch_file() {
    let dir = tempfile::tempdir().unwrap();
    for arg in ["--help", "-h", "help"] {
        let out = dash(&[arg], dir.path());
        assert!(!out.status.success(), "{arg}");
        assert_eq!(String::from_utf8_lossy(&out.stderr), "An error has occurred\n");
        assert_eq!(String::from_utf8_lossy(&out.stdout), "");
    }
}

#[test]
fn batch_file_names_may_look_like_flags() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["-script", "--help", "help"] {
        fs::write(dir.path().join(name), "echo ran\n").unwrap();
        let out = dash(&[name], dir.path());
        assert!(out.status.success(), "{name}");
        assert_eq!(String::from_utf8_lossy(&out.stdout), "ran\n");
        assert_eq!(String::from_utf8_lossy(&out.stderr), "");
    }
}
