// SPDX-License-Identifier: MIT

//! Shutdown signal handling.
//!
//! The relay spends its life blocked inside `open` or `read` on the pipe,
//! so shutdown works through EINTR: the handler only raises a flag, and the
//! interrupted pipe operation returns control to the loop, which checks the
//! flag.  `SA_RESTART` must stay off or the kernel would transparently
//! restart the blocked call and the flag would never be observed.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

// Runs in signal context: nothing here may allocate or lock.
extern "C" fn on_shutdown_signal(_: nix::libc::c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Install handlers for SIGINT and SIGTERM.
pub fn install() -> Result<(), nix::Error> {
    let action = SigAction::new(
        SigHandler::Handler(on_shutdown_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe {
        sigaction(Signal::SIGINT, &action)?;
        sigaction(Signal::SIGTERM, &action)?;
    }
    Ok(())
}

/// Whether a shutdown signal has been observed since startup.
pub fn shutdown_requested() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}
