//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{json, Value};

use modmap::cassette::format::{Method, Port};
use modmap::cassette::recorder::CassetteRecorder;

fn modmap(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_modmap"));
    cmd.current_dir(dir)
        .env_remove("MODMAP_REPLAY")
        .env_remove("MODMAP_RECORD")
        .env_remove("MODMAP_ROOT")
        .env_remove("MODMAP_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn help_lists_the_flags() {
    let dir = scratch_dir("modmap_cli_help");
    let output = modmap(&dir)
        .arg("--help")
        .env("OPENAI_API_KEY", "sk-secret")
        .output()
        .expect("failed to run modmap binary");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--root"));
    assert!(stdout.contains("--on-error"));
    assert!(stdout.contains("--max-tool-rounds"));
    assert!(!stdout.contains("sk-secret"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_root_fails_before_any_oracle_call() {
    let dir = scratch_dir("modmap_cli_missing_root");
    let output = modmap(&dir)
        .args(["--root", "does/not/exist"])
        .env("OPENAI_API_KEY", "sk-test")
        .output()
        .expect("failed to run modmap binary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("failed to enumerate"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_api_key_is_reported() {
    let dir = scratch_dir("modmap_cli_no_key");
    let output = modmap(&dir)
        .env_remove("OPENAI_API_KEY")
        .output()
        .expect("failed to run modmap binary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("OPENAI_API_KEY"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_project_writes_an_empty_map() {
    let dir = scratch_dir("modmap_cli_empty");
    std::fs::write(dir.join("README.md"), "# nothing to map\n").unwrap();
    std::fs::create_dir_all(dir.join("node_modules/lib")).unwrap();
    std::fs::write(dir.join("node_modules/lib/index.ts"), "export {};\n").unwrap();

    let output = modmap(&dir)
        .env("OPENAI_API_KEY", "sk-test")
        .output()
        .expect("failed to run modmap binary");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Mapped 0 files (0 skipped)"));
    assert!(stdout.contains("No source files found."));

    let written = std::fs::read_to_string(dir.join(".modmap/module_map.yaml")).unwrap();
    assert_eq!(written, "{}\n");
    let _ = std::fs::remove_dir_all(&dir);
}

/// Port calls of a one-file run over `/project`, in recording order.
fn greeting_run() -> Vec<(Method, Value, Value)> {
    vec![
        (Method::ListFiles, json!({"path": "/project"}), json!({"ok": ["main.ts"]})),
        (
            Method::ReadToString,
            json!({"path": "/project/main.ts"}),
            json!({"ok": "console.log('hi');\n"}),
        ),
        (
            Method::Chat,
            json!({"model": "gpt-4o"}),
            json!({"ok": {"message": {
                "role": "assistant",
                "content": "{\"description\": \"Prints a greeting\", \"modules\": {}}"
            }}}),
        ),
        (Method::Write, json!({"path": "/project/.modmap/module_map.yaml"}), json!({"ok": null})),
    ]
}

fn assert_greeting_replayed(dir: &Path, replay: &Path) {
    let output = modmap(dir)
        .args(["--root", "/project"])
        .env("MODMAP_REPLAY", replay)
        .env_remove("OPENAI_API_KEY")
        .output()
        .expect("failed to run modmap binary");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Mapped 1 files (0 skipped)"));
    assert!(stdout.contains("main.ts:\n  description: Prints a greeting"));
}

#[test]
fn replayed_run_needs_no_api_key() {
    let dir = scratch_dir("modmap_cli_replay");
    let cassette = dir.join("run.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&cassette, "cli-replay", "abc123");
    for (method, input, output) in greeting_run() {
        recorder.record(method, input, output);
    }
    recorder.finish().unwrap();

    assert_greeting_replayed(&dir, &cassette);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn replay_accepts_a_recorded_session_directory() {
    let dir = scratch_dir("modmap_cli_replay_session");
    let session = dir.join("cassettes/20240101-000000");

    let mut fs = CassetteRecorder::new(session.join("fs.cassette.yaml"), "fs", "abc123");
    let mut llm = CassetteRecorder::new(session.join("llm.cassette.yaml"), "llm", "abc123");
    for (method, input, output) in greeting_run() {
        match method.port() {
            Port::Fs => fs.record(method, input, output),
            Port::Llm => llm.record(method, input, output),
        }
    }
    fs.finish().unwrap();
    llm.finish().unwrap();

    assert_greeting_replayed(&dir, &session);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unknown_failure_policy_is_rejected() {
    let dir = scratch_dir("modmap_cli_bad_policy");
    let output = modmap(&dir)
        .args(["--on-error", "retry"])
        .output()
        .expect("failed to run modmap binary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("retry"));
    let _ = std::fs::remove_dir_all(&dir);
}
