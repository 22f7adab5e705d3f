//! Bus interface abstraction for the LIS3DH driver.

pub mod blocking;
pub mod spi;
#[cfg(any(test, feature = "std"))]
pub mod threaded;

use embedded_hal::digital::{Error as _, OutputPin};

use crate::error::TransferError;

/// Abstraction over the framed full-duplex access required by the driver.
pub trait Lis3dhInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Sends `request` and receives `response.len()` bytes in one framed transfer.
    fn transact(&mut self, request: &[u8], response: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Returns `true` while a transfer is outstanding.
    fn is_busy(&self) -> bool {
        false
    }
}

/// Holds chip-select low around `transfer` and releases it whatever the outcome.
pub(crate) fn with_chip_select<CS, E, F>(cs: &mut CS, transfer: F) -> Result<(), TransferError<E>>
where
    CS: OutputPin,
    F: FnOnce() -> Result<(), TransferError<E>>,
{
    cs.set_low()
        .map_err(|err| TransferError::ChipSelect(err.kind()))?;

    let result = transfer();
    let released = cs
        .set_high()
        .map_err(|err| TransferError::ChipSelect(err.kind()));

    result.and(released)
}
