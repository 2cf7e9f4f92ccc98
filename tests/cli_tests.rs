// Binary-level failure contract: exit status, stderr message, stdout left empty

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

fn run_snapshot(config_dir: &Path, socket: &Path) -> Output {
    let config_path = config_dir.join("bosun.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        "[docker]\nsocket = {:?}\ntimeout_secs = 5\n",
        socket.to_string_lossy()
    )
    .unwrap();

    Command::new(env!("CARGO_BIN_EXE_bosun"))
        .arg("--config")
        .arg(&config_path)
        .args(["labels", "snapshot"])
        .env_remove("RUST_LOG")
        .env_remove("BOSUN_CONFIG")
        .output()
        .expect("run bosun")
}

fn error_lines(stderr: &str) -> Vec<&str> {
    stderr.lines().filter(|l| l.starts_with("Error: ")).collect()
}

#[test]
fn test_missing_socket_fails_with_message_and_empty_stdout() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = run_snapshot(dir.path(), &dir.path().join("missing.sock"));
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert_eq!(out.status.code(), Some(1), "stderr: {stderr}");
    assert!(out.stdout.is_empty(), "stdout: {:?}", out.stdout);
    let lines = error_lines(&stderr);
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    assert_eq!(lines[0].matches("Is Docker running?").count(), 1, "{stderr}");
    // bollard's cause is printed by the chain, not repeated in our message
    assert_eq!(lines[0].matches("Socket not found").count(), 1, "{stderr}");
}

#[test]
fn test_unreachable_daemon_is_reported_once() {
    let dir = tempfile::TempDir::new().unwrap();
    // a regular file: the client builds, every list call fails to connect
    let socket = dir.path().join("not-a-socket");
    std::fs::write(&socket, b"").unwrap();
    let out = run_snapshot(dir.path(), &socket);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert_eq!(out.status.code(), Some(1), "stderr: {stderr}");
    assert!(out.stdout.is_empty(), "stdout: {:?}", out.stdout);
    let lines = error_lines(&stderr);
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    assert_eq!(lines[0].matches("is Docker running?").count(), 1, "{stderr}");
    assert_eq!(lines[0].matches("cannot reach Docker while listing").count(), 1, "{stderr}");
    // the failure is printed once, not also logged at the default level
    assert!(!stderr.contains("snapshot failed"), "stderr: {stderr}");
    assert!(!stderr.contains("WARN"), "stderr: {stderr}");
}
