//! Append-only command log.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::relay::error::RelayError;

/// Records one character per line in an append-only file.
///
/// The file is opened per record and not created until the first write, so
/// an idle relay leaves no empty log behind.  No concurrent writer of the
/// log is assumed.
pub struct CommandLog {
    path: PathBuf,
}

impl CommandLog {
    pub fn new(path: &Path) -> Self {
        CommandLog {
            path: path.to_path_buf(),
        }
    }

    /// Append the character plus a line terminator.
    pub fn record(&self, c: u8) -> Result<(), RelayError> {
        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(RelayError::LogWrite)?;
        out.write_all(&[c, b'\n']).map_err(RelayError::LogWrite)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
