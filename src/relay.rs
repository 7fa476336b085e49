// SPDX-License-Identifier: MIT

//! Manages the relay loop: owns the named pipe for the process lifetime,
//! drains single-byte commands out of it, and records them in the output
//! log until the quit command arrives.
//!
//! The `run` function is the main entry point.  It takes a `RelayConfig`
//! with the pipe and output locations, acquires the pipe path as a scoped
//! resource, and blocks until either the quit byte is read or a shutdown
//! signal interrupts a pipe operation.  The pipe path is removed on every
//! exit path, including panics, because removal lives in the guard's drop.

pub mod error;
pub mod fifo;
pub mod reader;
pub mod signal;
pub mod sink;

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::relay::error::RelayError;
use crate::relay::fifo::FifoGuard;
use crate::relay::reader::ReadOutcome;
use crate::relay::sink::CommandLog;

/// The reserved command byte.  Receiving it stops the relay; it is never
/// recorded in the output log.
pub const QUIT: u8 = b'q';

/// Default location of the command pipe.
pub const DEFAULT_PIPE_PATH: &str = "/tmp/pipelog.pipe";

/// Default location of the output log.
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/pipelog.out";

/// Environment override for the command pipe location.
pub const ENV_PIPE_PATH: &str = "PIPELOG_PIPE_PATH";

/// Environment override for the output log location.
pub const ENV_OUTPUT_PATH: &str = "PIPELOG_OUTPUT_PATH";

/// Describes where the relay reads commands and where it records them.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub pipe_path: PathBuf,
    pub output_path: PathBuf,
}

impl RelayConfig {
    /// Resolve the paths from the command line and the environment.
    /// A command-line value wins over the environment variable, which wins
    /// over the built-in default.
    pub fn resolve(pipe: Option<&String>, output: Option<&String>) -> Self {
        RelayConfig {
            pipe_path: pick(pipe, ENV_PIPE_PATH, DEFAULT_PIPE_PATH),
            output_path: pick(output, ENV_OUTPUT_PATH, DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            pipe_path: PathBuf::from(DEFAULT_PIPE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

fn pick(arg: Option<&String>, env_key: &str, fallback: &str) -> PathBuf {
    match arg {
        Some(p) => PathBuf::from(p),
        None => match std::env::var(env_key) {
            Ok(p) if !p.is_empty() => PathBuf::from(p),
            _ => PathBuf::from(fallback),
        },
    }
}

/// How the relay loop came to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The quit byte was read from the pipe.
    Quit,
    /// A shutdown signal interrupted a pipe operation.
    Signaled,
}

/// Run the relay until the quit byte arrives or a shutdown signal is
/// observed.
///
/// Acquires the pipe path (creating the FIFO when absent, adopting an
/// existing FIFO, refusing anything else) and keeps it until return; the
/// path is unlinked when the guard drops.  Opening the pipe blocks until a
/// writer connects, so an idle relay sits here without consuming CPU.
pub fn run(cfg: &RelayConfig) -> Result<Shutdown, RelayError> {
    let pipe = FifoGuard::create(&cfg.pipe_path)?;
    let sink = CommandLog::new(&cfg.output_path);
    drain(&pipe, &sink)
}

/// The blocking read loop.  One byte per iteration.
fn drain(pipe: &FifoGuard, sink: &CommandLog) -> Result<Shutdown, RelayError> {
    loop {
        if signal::shutdown_requested() {
            return Ok(Shutdown::Signaled);
        }
        let mut source = match pipe.open_reader() {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                // EINTR while waiting for a writer.  Loop back to the
                // shutdown check.
                continue;
            }
            Err(e) => return Err(RelayError::PipeRead(e)),
        };
        log::debug!("writer connected to {}", pipe.path().display());

        loop {
            if signal::shutdown_requested() {
                return Ok(Shutdown::Signaled);
            }
            match reader::read_byte(&mut source) {
                Ok(ReadOutcome::Byte(QUIT)) => return Ok(Shutdown::Quit),
                Ok(ReadOutcome::Byte(c)) => {
                    if !is_recordable(c) {
                        log::trace!("skipping unprintable byte {c:#04x}");
                        continue;
                    }
                    if let Err(e) = sink.record(c) {
                        // Keep draining; the failure is reported on the
                        // diagnostic channel, not the data log.
                        log::error!("dropped command {:?}: {e}", char::from(c));
                    }
                }
                Ok(ReadOutcome::Eof) => {
                    // All writers closed their end.  Reopen and block until
                    // the next writer connects.
                    log::debug!("writers disconnected, waiting for the next one");
                    break;
                }
                Ok(ReadOutcome::Interrupted) => {
                    if signal::shutdown_requested() {
                        return Ok(Shutdown::Signaled);
                    }
                }
                Err(e) => return Err(RelayError::PipeRead(e)),
            }
        }
    }
}

/// Only printable characters are recorded.  Everything else, including the
/// line terminators a shell writer appends, is consumed without effect.
fn is_recordable(c: u8) -> bool {
    c.is_ascii_graphic() || c == b' '
}
