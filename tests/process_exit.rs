//! Process-level behavior of the built binary
//!
//! Spawns `fault-service` as a subprocess with fault settings in its
//! environment and checks exit status and stdout.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

const BIN: &str = env!("CARGO_BIN_EXE_fault-service");

const FAULT_VARS: [&str; 5] = [
    "ERROR_TYPE",
    "ERROR_RATE",
    "CRASH_AFTER",
    "OOM_TRIGGER",
    "FAULT_SEED",
];

fn command(args: &[&str], env: &[(&str, &str)]) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env_remove("RUST_LOG");
    for var in FAULT_VARS {
        cmd.env_remove(var);
    }
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd
}

/// Wait for the child, killing it if it outlives `timeout`
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    let _ = child.kill();
    let _ = child.wait();
    None
}

fn read_stdout(child: &mut Child) -> String {
    let mut out = String::new();
    if let Some(mut stdout) = child.stdout.take() {
        stdout.read_to_string(&mut out).unwrap();
    }
    out
}

#[test]
fn test_crash_after_exits_with_code_one() {
    let mut child = command(
        &["serve", "--host", "127.0.0.1", "--port", "0", "--tick-interval-ms", "20"],
        &[("CRASH_AFTER", "2")],
    )
    .spawn()
    .unwrap();

    let status = wait_with_timeout(&mut child, Duration::from_secs(20))
        .expect("service did not exit after reaching its crash limit");
    let stdout = read_stdout(&mut child);

    assert_eq!(status.code(), Some(1));
    assert!(stdout.contains("[CRITICAL]"));
    assert!(stdout.contains("Crash limit reached after 2 requests"));
    assert_eq!(stdout.matches("Crash limit reached").count(), 1);
    assert!(stdout.contains("[INFO] 📈 Status: 1 requests processed"));
}

#[test]
fn test_no_crash_limit_keeps_running() {
    let mut child = command(
        &["serve", "--host", "127.0.0.1", "--port", "0", "--tick-interval-ms", "10"],
        &[],
    )
    .spawn()
    .unwrap();

    let status = wait_with_timeout(&mut child, Duration::from_millis(500));
    assert!(status.is_none(), "service exited on its own: {:?}", status);
}

#[test]
fn test_config_command_prints_json() {
    let output = command(
        &["config"],
        &[("ERROR_TYPE", "api-error"), ("ERROR_RATE", "0.5"), ("OOM_TRIGGER", "true")],
    )
    .output()
    .unwrap();

    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["error_type"], "api-error");
    assert_eq!(config["error_rate"], 0.5);
    assert_eq!(config["crash_after"], 0);
    assert_eq!(config["oom_trigger"], true);
    assert!(config["seed"].is_null());
}

#[test]
fn test_invalid_env_fails_startup() {
    let output = command(&["serve", "--port", "0"], &[("ERROR_RATE", "lots")])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("FAULT_CLI_CONFIG_ERROR"));
    assert!(stderr.contains("ERROR_RATE"));
}
