//! Cooperative transaction adapter for targets without thread primitives.

use embedded_hal::digital::OutputPin;

use super::{with_chip_select, Lis3dhInterface};
use crate::completion::{CompletionFlag, Notifier};
use crate::error::TransferError;
use crate::log;
use crate::transport::AsyncTransfer;

/// Blocking adapter that spins on a [`CompletionFlag`] until the transport reports completion.
///
/// While spinning it calls [`AsyncTransfer::poll`] once per iteration. The
/// completion must either arrive from an interrupt handler or be dispatched from
/// that hook, otherwise the loop never ends. There is no timeout.
///
/// Each adapter needs its own flag, usually a `static` next to the device:
///
/// ```rust,ignore
/// static ACCEL_DONE: CompletionFlag = CompletionFlag::new();
///
/// let adapter = BlockingTransfer::new(transport, cs_pin, &ACCEL_DONE);
/// let mut accel = Lis3dh::with_interrupt(adapter, int_pin);
/// ```
pub struct BlockingTransfer<T, CS> {
    transport: T,
    cs: CS,
    done: &'static CompletionFlag,
}

impl<T, CS> BlockingTransfer<T, CS>
where
    T: AsyncTransfer,
    CS: OutputPin,
{
    /// Creates the adapter from a transport, its chip-select line and a completion flag.
    pub fn new(transport: T, cs: CS, done: &'static CompletionFlag) -> Self {
        Self {
            transport,
            cs,
            done,
        }
    }

    /// Runs one framed transfer and spins until it completes.
    pub fn transact(&mut self, request: &[u8], response: &mut [u8]) -> Result<(), TransferError<T::Error>> {
        if request.len() != response.len() {
            return Err(TransferError::LengthMismatch);
        }

        let done = self.done;
        done.arm();
        log::trace!(
            "spi transfer: {} bytes, cmd {=u8:#x}",
            request.len(),
            request.first().copied().unwrap_or(0)
        );

        let Self { transport, cs, .. } = &mut *self;
        let result = with_chip_select(cs, || {
            transport
                .start_transfer(request, response, Notifier::flag(done))
                .map_err(TransferError::Bus)?;

            while !done.is_set() {
                transport.poll();
                core::hint::spin_loop();
            }
            Ok(())
        });

        done.finish();
        result
    }

    /// Returns `true` while a transfer is outstanding.
    ///
    /// Code that cannot borrow the adapter, such as an interrupt handler, reads
    /// the same state through [`CompletionFlag::is_busy`].
    pub fn is_busy(&self) -> bool {
        self.done.is_busy()
    }

    /// Consumes the adapter and returns the transport and chip-select line.
    pub fn release(self) -> (T, CS) {
        (self.transport, self.cs)
    }
}

impl<T, CS> Lis3dhInterface for BlockingTransfer<T, CS>
where
    T: AsyncTransfer,
    CS: OutputPin,
{
    type Error = TransferError<T::Error>;

    fn transact(&mut self, request: &[u8], response: &mut [u8]) -> core::result::Result<(), Self::Error> {
        BlockingTransfer::transact(self, request, response)
    }

    fn is_busy(&self) -> bool {
        BlockingTransfer::is_busy(self)
    }
}
