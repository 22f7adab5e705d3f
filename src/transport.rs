//! Callback-driven bus transfer primitive consumed by the transaction adapters.

use embedded_hal::spi::{Mode, SpiBus, MODE_0};

use crate::completion::Notifier;

/// SPI mode required by the LIS3DH (CPOL = 0, CPHA = 0), MSB first.
pub const SPI_MODE: Mode = MODE_0;
/// Bus clock applied once when the SPI peripheral is configured.
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Non-blocking full-duplex transfer with completion notification.
///
/// The buffers are only borrowed for the duration of `start_transfer`: the
/// request must be consumed and the response filled before it returns. The bus
/// may still be busy afterwards (for example while a FIFO drains), and `done`
/// reports when it has gone idle. The adapters keep chip-select asserted until
/// then.
pub trait AsyncTransfer {
    /// Error type produced when a transfer cannot be started.
    type Error;

    /// Starts sending `request` while receiving into `response`.
    ///
    /// Both slices have the same length. Implementations must not retain either
    /// slice past this call. `done` must be fired once the transfer finished,
    /// unless this returns an error.
    fn start_transfer(
        &mut self,
        request: &[u8],
        response: &mut [u8],
        done: Notifier,
    ) -> core::result::Result<(), Self::Error>;

    /// Poll-once hook called from the spin loop of
    /// [`BlockingTransfer`](crate::interface::blocking::BlockingTransfer).
    ///
    /// Transports that deliver completion cooperatively dispatch it here.
    fn poll(&mut self) {}
}

/// Runs a blocking `SpiBus` transfer and reports completion right away.
pub struct BlockingBus<BUS> {
    bus: BUS,
}

impl<BUS> BlockingBus<BUS> {
    /// Wraps a configured SPI bus.
    pub const fn new(bus: BUS) -> Self {
        Self { bus }
    }

    /// Consumes the wrapper and returns the bus.
    pub fn release(self) -> BUS {
        self.bus
    }
}

impl<BUS> AsyncTransfer for BlockingBus<BUS>
where
    BUS: SpiBus,
{
    type Error = BUS::Error;

    fn start_transfer(
        &mut self,
        request: &[u8],
        response: &mut [u8],
        done: Notifier,
    ) -> core::result::Result<(), Self::Error> {
        self.bus.transfer(response, request)?;
        self.bus.flush()?;
        done.notify();
        Ok(())
    }
}
