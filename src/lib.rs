//! # pipelog
//!
//! The library that bridges single-character commands pushed into a named
//! pipe (FIFO) into an append-only log file.  One reserved byte, `q`, stops
//! the relay instead of being recorded.

#[cfg(not(unix))]
compile_error!("pipelog relies on POSIX named pipes (FIFOs) and only builds on Unix-like targets");

pub mod logger;
pub mod relay;

pub use relay::{run, RelayConfig, Shutdown, QUIT};

#[cfg(test)]
mod integration_tests;
