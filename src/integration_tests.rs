//! Integration test code.
//!
//! Runs the relay loop on a thread against real FIFOs under a temporary
//! directory, with this test acting as the external writer process.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::relay::{self, RelayConfig, Shutdown};

fn temp_cfg(dir: &tempfile::TempDir) -> RelayConfig {
    RelayConfig {
        pipe_path: dir.path().join("relay.pipe"),
        output_path: dir.path().join("relay.out"),
    }
}

/// Start the relay on its own thread.  The pipe does not exist before this
/// call, so waiting for it to appear is enough to know startup finished.
fn spawn_relay(cfg: &RelayConfig) -> JoinHandle<Result<Shutdown, relay::error::RelayError>> {
    let cfg = cfg.clone();
    thread::spawn(move || relay::run(&cfg))
}

/// Wait until the relay has created its pipe.
fn wait_for_pipe(path: &Path) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !path.exists() {
        assert!(
            Instant::now() < deadline,
            "pipe never appeared at {}",
            path.display()
        );
        thread::sleep(Duration::from_millis(10));
    }
}

/// Connect a writer to the pipe.  Blocks until the relay holds the read
/// end, which is the rendezvous the design relies on.
fn open_writer(path: &Path) -> File {
    OpenOptions::new()
        .write(true)
        .open(path)
        .expect("could not connect a writer to the pipe")
}

#[test]
fn records_commands_in_arrival_order() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = temp_cfg(&dir);
    let relay = spawn_relay(&cfg);
    wait_for_pipe(&cfg.pipe_path);

    let mut writer = open_writer(&cfg.pipe_path);
    writer.write_all(b"hiq").unwrap();
    drop(writer);

    let shutdown = relay.join().unwrap().expect("relay failed");
    assert_eq!(shutdown, Shutdown::Quit);
    assert_eq!(std::fs::read_to_string(&cfg.output_path).unwrap(), "h\ni\n");
    assert!(!cfg.pipe_path.exists(), "pipe must be removed after the run");
}

#[test]
fn quit_stops_the_loop_before_later_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = temp_cfg(&dir);
    let relay = spawn_relay(&cfg);
    wait_for_pipe(&cfg.pipe_path);

    let mut writer = open_writer(&cfg.pipe_path);
    // The 'z' sits behind the quit byte and must never be consumed.
    writer.write_all(b"aqz").unwrap();
    drop(writer);

    let shutdown = relay.join().unwrap().expect("relay failed");
    assert_eq!(shutdown, Shutdown::Quit);
    assert_eq!(std::fs::read_to_string(&cfg.output_path).unwrap(), "a\n");
}

#[test]
fn survives_writer_disconnects() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = temp_cfg(&dir);
    let relay = spawn_relay(&cfg);
    wait_for_pipe(&cfg.pipe_path);

    // First writer drops without sending the quit byte.
    let mut writer = open_writer(&cfg.pipe_path);
    writer.write_all(b"ab").unwrap();
    drop(writer);

    // The relay must go back to waiting instead of exiting or spinning.
    let mut writer = open_writer(&cfg.pipe_path);
    writer.write_all(b"cq").unwrap();
    drop(writer);

    let shutdown = relay.join().unwrap().expect("relay failed");
    assert_eq!(shutdown, Shutdown::Quit);
    assert_eq!(
        std::fs::read_to_string(&cfg.output_path).unwrap(),
        "a\nb\nc\n"
    );
}

#[test]
fn unprintable_bytes_are_consumed_without_effect() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = temp_cfg(&dir);
    let relay = spawn_relay(&cfg);
    wait_for_pipe(&cfg.pipe_path);

    let mut writer = open_writer(&cfg.pipe_path);
    writer.write_all(b"h\n\ti\x07q").unwrap();
    drop(writer);

    let shutdown = relay.join().unwrap().expect("relay failed");
    assert_eq!(shutdown, Shutdown::Quit);
    assert_eq!(std::fs::read_to_string(&cfg.output_path).unwrap(), "h\ni\n");
}

#[test]
fn refuses_to_start_over_a_regular_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = temp_cfg(&dir);
    std::fs::write(&cfg.pipe_path, b"occupied").unwrap();

    match relay::run(&cfg) {
        Err(relay::error::RelayError::PipeCreation(_)) => {}
        other => panic!("expected a startup failure, got {other:?}"),
    }
    // The refused path is left untouched.
    assert_eq!(std::fs::read(&cfg.pipe_path).unwrap(), b"occupied");
}
