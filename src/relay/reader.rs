//! Single-byte reads with an explicit outcome per attempt.
//!
//! Delivery, end-of-stream, and interruption are separate outcomes rather
//! than one boolean, so the loop decides what each one means.

use std::io;

/// What a single read attempt produced.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// One byte was delivered.
    Byte(u8),
    /// All writers closed their end of the pipe.
    Eof,
    /// The read was interrupted by a signal before any data arrived.
    Interrupted,
}

/// Read exactly one byte from the stream.
///
/// EINTR is surfaced as `Interrupted` rather than an error, since for a
/// blocking pipe read it is an expected outcome, not a failure.
pub fn read_byte<R: io::Read>(source: &mut R) -> Result<ReadOutcome, io::Error> {
    let mut buf = [0u8; 1];
    match source.read(&mut buf) {
        Ok(0) => Ok(ReadOutcome::Eof),
        Ok(_) => Ok(ReadOutcome::Byte(buf[0])),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(ReadOutcome::Interrupted),
        Err(e) => Err(e),
    }
}
