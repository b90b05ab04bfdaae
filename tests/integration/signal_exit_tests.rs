//! End-to-end shutdown of the host binary: a termination signal must end
//! the loop through the normal exit path, so the display is blanked and
//! the series summary is logged.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};

const READY_LINE: &str = "System ready";

fn spawn_controller() -> Child {
    Command::new(env!("CARGO_BIN_EXE_soilguard"))
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn soilguard binary")
}

/// Send `signal` once the loop is running and return everything logged,
/// plus whether the process exited cleanly.
fn run_until_signal(signal: &str) -> (String, bool) {
    let mut child = spawn_controller();
    let mut reader = BufReader::new(child.stdout.take().expect("piped stdout"));

    let mut log = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).expect("read log line") == 0 {
            break;
        }
        log.push_str(&line);
        if line.contains(READY_LINE) {
            break;
        }
    }
    assert!(log.contains(READY_LINE), "controller never became ready:\n{log}");

    let status = Command::new("kill")
        .args([signal, &child.id().to_string()])
        .status()
        .expect("run kill");
    assert!(status.success());

    reader.read_to_string(&mut log).expect("read remaining log");
    let exit = child.wait().expect("wait for controller");
    (log, exit.success())
}

#[test]
fn sigterm_runs_the_termination_hook() {
    let (log, clean) = run_until_signal("-TERM");
    assert!(clean, "SIGTERM must end the loop, not the process:\n{log}");
    assert!(log.contains("Shutdown requested"), "{log}");
    assert!(log.contains("DISPLAY | (off)"), "{log}");
    assert!(log.contains("Display shut down"), "{log}");
    assert!(log.contains("SERIES |"), "{log}");
}

#[test]
fn sigint_runs_the_termination_hook() {
    let (log, clean) = run_until_signal("-INT");
    assert!(clean, "{log}");
    assert_eq!(log.matches("Display shut down").count(), 1, "{log}");
}
