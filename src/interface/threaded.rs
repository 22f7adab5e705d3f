//! Transaction adapter for targets with threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use embedded_hal::digital::OutputPin;

use super::{with_chip_select, Lis3dhInterface};
use crate::completion::{Latch, Notifier};
use crate::error::TransferError;
use crate::log;
use crate::transport::AsyncTransfer;

struct Bus<T, CS> {
    transport: T,
    cs: CS,
}

/// Blocking adapter that parks the caller on a latch until the transport reports completion.
///
/// `transact` takes `&self`, so several threads may share one adapter (or one
/// [`Lis3dh`](crate::Lis3dh) per thread, each borrowing the adapter). Calls are
/// serialized by an internal mutex that is held from chip-select assertion to
/// release. The completion must be fired from a different thread or interrupt
/// context than the caller, otherwise the caller never wakes.
pub struct ThreadedTransfer<T, CS> {
    bus: Mutex<Bus<T, CS>>,
    latch: Arc<Latch>,
    busy: AtomicBool,
}

impl<T, CS> ThreadedTransfer<T, CS>
where
    T: AsyncTransfer,
    CS: OutputPin,
{
    /// Creates the adapter from a transport and its chip-select line.
    pub fn new(transport: T, cs: CS) -> Self {
        Self {
            bus: Mutex::new(Bus { transport, cs }),
            latch: Arc::new(Latch::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Runs one framed transfer, waiting for any transfer already in flight first.
    pub fn transact(&self, request: &[u8], response: &mut [u8]) -> Result<(), TransferError<T::Error>> {
        if request.len() != response.len() {
            return Err(TransferError::LengthMismatch);
        }

        let mut bus = self.bus.lock().unwrap_or_else(PoisonError::into_inner);
        self.busy.store(true, Ordering::Release);
        self.latch.arm();
        log::trace!("spi transfer: {} bytes", request.len());

        let Bus { transport, cs } = &mut *bus;
        let result = with_chip_select(cs, || {
            transport
                .start_transfer(request, response, Notifier::latch(self.latch.clone()))
                .map_err(TransferError::Bus)?;
            self.latch.wait();
            Ok(())
        });

        self.busy.store(false, Ordering::Release);
        result
    }

    /// Returns `true` while a transfer, including its completion wait, is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Consumes the adapter and returns the transport and chip-select line.
    pub fn release(self) -> (T, CS) {
        let bus = self.bus.into_inner().unwrap_or_else(PoisonError::into_inner);
        (bus.transport, bus.cs)
    }
}

impl<T, CS> Lis3dhInterface for &ThreadedTransfer<T, CS>
where
    T: AsyncTransfer,
    CS: OutputPin,
{
    type Error = TransferError<T::Error>;

    fn transact(&mut self, request: &[u8], response: &mut [u8]) -> core::result::Result<(), Self::Error> {
        ThreadedTransfer::transact(*self, request, response)
    }

    fn is_busy(&self) -> bool {
        ThreadedTransfer::is_busy(*self)
    }
}

impl<T, CS> Lis3dhInterface for ThreadedTransfer<T, CS>
where
    T: AsyncTransfer,
    CS: OutputPin,
{
    type Error = TransferError<T::Error>;

    fn transact(&mut self, request: &[u8], response: &mut [u8]) -> core::result::Result<(), Self::Error> {
        ThreadedTransfer::transact(self, request, response)
    }

    fn is_busy(&self) -> bool {
        ThreadedTransfer::is_busy(self)
    }
}
