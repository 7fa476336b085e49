//! Common error type.
//!

use std::fmt::Display;

#[derive(Debug)]
pub enum RelayError {
    /// The named pipe could not be created or adopted at startup.
    /// Fatal; the relay loop is never entered.
    PipeCreation(String),
    /// A pipe read or open failed for a reason other than EINTR or
    /// end-of-stream.
    PipeRead(std::io::Error),
    /// An append to the output log failed.  Reported and recovered inside
    /// the loop.
    LogWrite(std::io::Error),
    /// Removing the pipe path at shutdown failed.  Never fatal.
    Cleanup(std::io::Error),
}

impl Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::PipeCreation(msg) => write!(f, "pipe setup failed: {msg}"),
            RelayError::PipeRead(e) => write!(f, "pipe read failed: {e}"),
            RelayError::LogWrite(e) => write!(f, "log append failed: {e}"),
            RelayError::Cleanup(e) => write!(f, "pipe removal failed: {e}"),
        }
    }
}

impl From<RelayError> for std::io::Error {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::PipeCreation(msg) => {
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, msg)
            }
            RelayError::PipeRead(e) => e,
            RelayError::LogWrite(e) => e,
            RelayError::Cleanup(e) => e,
        }
    }
}
