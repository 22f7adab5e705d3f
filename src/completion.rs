//! Completion signals used to turn callback-driven transfers into blocking calls.
//!
//! A [`Notifier`] is handed to the transport for every transfer and must be
//! fired exactly once when the hardware transfer finishes. It may be fired from
//! an interrupt handler, from another thread, or from inside
//! [`AsyncTransfer::poll`](crate::transport::AsyncTransfer::poll).

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(any(test, feature = "std"))]
use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// Completion and busy state shared between a
/// [`BlockingTransfer`](crate::interface::blocking::BlockingTransfer) and the
/// rest of the firmware.
///
/// Only atomic loads and stores are used, so this works on cores without
/// compare-and-swap. Because the flag lives in a `static`, interrupt handlers
/// and cooperative tasks can query [`is_busy`](Self::is_busy) while the adapter
/// is spinning.
///
/// ```rust
/// use lis3dh_sync::completion::CompletionFlag;
///
/// static ACCEL_DONE: CompletionFlag = CompletionFlag::new();
/// assert!(!ACCEL_DONE.is_set());
/// assert!(!ACCEL_DONE.is_busy());
/// ```
#[derive(Debug)]
pub struct CompletionFlag {
    done: AtomicBool,
    busy: AtomicBool,
}

impl CompletionFlag {
    /// Creates a cleared, idle flag.
    pub const fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
            busy: AtomicBool::new(false),
        }
    }

    /// Returns `true` once the pending transfer has completed.
    pub fn is_set(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Returns `true` from the start of a transfer until its chip-select is released.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub(crate) fn arm(&self) {
        self.done.store(false, Ordering::Release);
        self.busy.store(true, Ordering::Release);
    }

    pub(crate) fn finish(&self) {
        self.busy.store(false, Ordering::Release);
    }

    fn set(&self) {
        self.done.store(true, Ordering::Release);
    }
}

impl Default for CompletionFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot latch used by [`ThreadedTransfer`](crate::interface::threaded::ThreadedTransfer).
#[cfg(any(test, feature = "std"))]
#[derive(Debug, Default)]
pub struct Latch {
    done: Mutex<bool>,
    signal: Condvar,
}

#[cfg(any(test, feature = "std"))]
impl Latch {
    pub(crate) fn arm(&self) {
        *self.done.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    fn release(&self) {
        let mut done = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        *done = true;
        self.signal.notify_one();
    }

    /// Blocks the calling thread until the latch is released.
    pub(crate) fn wait(&self) {
        let mut done = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        while !*done {
            done = self
                .signal
                .wait(done)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

#[derive(Debug)]
enum Target {
    Flag(&'static CompletionFlag),
    #[cfg(any(test, feature = "std"))]
    Latch(Arc<Latch>),
}

/// Handle the transport fires when a transfer has finished.
///
/// Each transfer gets its own notifier, consumed by [`notify`](Self::notify),
/// so a stale completion can never reach the next transfer.
#[derive(Debug)]
pub struct Notifier {
    target: Target,
}

impl Notifier {
    pub(crate) fn flag(flag: &'static CompletionFlag) -> Self {
        Self {
            target: Target::Flag(flag),
        }
    }

    #[cfg(any(test, feature = "std"))]
    pub(crate) fn latch(latch: Arc<Latch>) -> Self {
        Self {
            target: Target::Latch(latch),
        }
    }

    /// Signals completion and wakes the waiting caller.
    pub fn notify(self) {
        match self.target {
            Target::Flag(flag) => flag.set(),
            #[cfg(any(test, feature = "std"))]
            Target::Latch(latch) => latch.release(),
        }
    }
}
