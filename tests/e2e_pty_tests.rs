// End-to-End PTY-based tests
// These spawn the real binary in a PTY, the way an operator would run it.

use rexpect::session::spawn_command;
use std::process::Command;
use tempfile::TempDir;

fn spawn_app(home: &TempDir, docker_host: &str) -> Result<rexpect::session::PtySession, rexpect::error::Error> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_enterthematrix"));

    // Keep config and logs out of the real home directory
    cmd.env("HOME", home.path());
    cmd.env("DOCKER_HOST", docker_host);
    cmd.env("RUST_LOG", "enterthematrix=debug");

    spawn_command(cmd, Some(15000))
}

#[test]
#[ignore] // Run with: cargo test --test e2e_pty_tests -- --ignored
fn test_e2e_unreachable_daemon_reports_connection_failure() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let socket = home.path().join("missing.sock");
    let mut session = spawn_app(&home, &format!("unix://{}", socket.display()))?;

    session.exp_string("Failed to connect to Docker API")?;
    session.exp_eof()?;

    // The run left a log file behind
    let logs = std::fs::read_dir(home.path().join(".enterthematrix").join("logs"))?;
    assert!(logs.count() > 0);

    Ok(())
}

#[test]
#[ignore] // Requires a Docker daemon with no server containers running
fn test_e2e_no_servers_exits_with_message() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut session = spawn_app(&home, "unix:///var/run/docker.sock")?;

    session.exp_string("no running servers")?;
    session.exp_eof()?;

    Ok(())
}
