//! Error handling primitives for the LIS3DH driver.

use embedded_hal::digital::ErrorKind;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// Reading the interrupt input line failed.
    Pin(ErrorKind),
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}

/// Errors raised by the transaction adapters.
///
/// Faults that happen after a transfer was started are not reported by the
/// transport, so a completed transfer may still carry garbage data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError<E> {
    /// The transport refused to start the transfer.
    Bus(E),
    /// Driving the chip-select line failed.
    ChipSelect(ErrorKind),
    /// Request and response buffers have different lengths.
    LengthMismatch,
}
