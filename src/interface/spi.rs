//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.
//!
//! Chip-select and bus sharing are handled by the `SpiDevice` implementation
//! (for example `embedded_hal_bus::spi::ExclusiveDevice`), so this is the
//! path to use when the HAL already offers blocking transfers.

use embedded_hal::spi::SpiDevice;

use super::Lis3dhInterface;

/// SPI-based interface implementation for the LIS3DH driver.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Lis3dhInterface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn transact(&mut self, request: &[u8], response: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if request.is_empty() {
            return Ok(());
        }

        self.spi.transfer(response, request)
    }
}
