// SPDX-License-Identifier: MIT

//! Scoped ownership of the named pipe path.
//!
//! The guard holds the pipe path from startup to process exit.  Removal of
//! the path lives in `Drop`, so every exit path through the relay, normal
//! return, error propagation, or panic unwind, leaves the filesystem clean.

use std::fs::File;
use std::io;
use std::os::unix::fs::FileTypeExt as _;
use std::path::{Path, PathBuf};

use nix::sys::stat::Mode;
use nix::unistd::{mkfifo, unlink};

use crate::relay::error::RelayError;

/// Owns a FIFO path for the lifetime of the value.
pub struct FifoGuard {
    path: PathBuf,
}

impl FifoGuard {
    /// Acquire the pipe path.
    ///
    /// Creates the FIFO when nothing exists at `path`, and adopts an
    /// existing FIFO as-is so a restart reuses the pipe other processes may
    /// already have open.  Anything else at the path is refused; silently
    /// reading a regular file would never block and would misbehave in ways
    /// far harder to diagnose than a startup failure.
    pub fn create(path: &Path) -> Result<Self, RelayError> {
        match std::fs::metadata(path) {
            Ok(md) => {
                if !md.file_type().is_fifo() {
                    return Err(RelayError::PipeCreation(format!(
                        "{} already exists and is not a named pipe",
                        path.display()
                    )));
                }
                log::debug!("adopting existing pipe at {}", path.display());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // Only the owner gets to push commands by default.
                mkfifo(path, Mode::S_IRUSR | Mode::S_IWUSR).map_err(|e| {
                    RelayError::PipeCreation(format!(
                        "cannot create pipe at {}: {e}",
                        path.display()
                    ))
                })?;
                log::info!("pipe created at {}", path.display());
            }
            Err(e) => {
                return Err(RelayError::PipeCreation(format!(
                    "cannot inspect {}: {e}",
                    path.display()
                )));
            }
        }
        Ok(FifoGuard {
            path: path.to_path_buf(),
        })
    }

    /// Open the pipe for reading.
    ///
    /// Blocks until at least one writer holds the other end.  This is the
    /// rendezvous point of the design, not an oversight; an idle relay is
    /// parked here by the OS.
    pub fn open_reader(&self) -> Result<File, io::Error> {
        File::open(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FifoGuard {
    fn drop(&mut self) {
        if let Err(e) = unlink(self.path.as_path()) {
            let e = RelayError::Cleanup(e.into());
            log::warn!("leaving {} behind: {e}", self.path.display());
        }
    }
}
