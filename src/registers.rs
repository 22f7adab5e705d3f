//! Register map definitions for the LIS3DH accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{DataRate, FullScale};

/// Read flag carried in bit 7 of the SPI command byte.
pub const SPI_READ: u8 = 0x80;
/// Auto-increment flag carried in bit 6 of the SPI command byte.
pub const SPI_INCREMENT: u8 = 0x40;
/// Register address bits of the SPI command byte.
pub const ADDRESS_MASK: u8 = 0x3F;

/// Value reported by `WHO_AM_I`.
pub const WHO_AM_I_VALUE: u8 = 0b0011_0011;

/// Register address of `STATUS_REG_AUX`.
pub const REG_STATUS_AUX: u8 = 0x07;
/// Register address of `OUT_ADC1_L`.
pub const REG_OUT_ADC1_L: u8 = 0x08;
/// Register address of `OUT_ADC2_L`.
pub const REG_OUT_ADC2_L: u8 = 0x0A;
/// Register address of `OUT_ADC3_L`, which carries the temperature when enabled.
pub const REG_OUT_ADC3_L: u8 = 0x0C;
/// Register address of `INT_COUNTER_REG`.
pub const REG_INT_COUNTER: u8 = 0x0E;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x0F;
/// Register address of `TEMP_CFG_REG`.
pub const REG_TEMP_CFG: u8 = 0x1F;
/// Register address of `CTRL_REG1`.
pub const REG_CTRL_REG1: u8 = 0x20;
/// Register address of `CTRL_REG2`.
pub const REG_CTRL_REG2: u8 = 0x21;
/// Register address of `CTRL_REG3`.
pub const REG_CTRL_REG3: u8 = 0x22;
/// Register address of `CTRL_REG4`.
pub const REG_CTRL_REG4: u8 = 0x23;
/// Register address of `CTRL_REG5`.
pub const REG_CTRL_REG5: u8 = 0x24;
/// Register address of `CTRL_REG6`.
pub const REG_CTRL_REG6: u8 = 0x25;
/// Register address of `REFERENCE`. Reading it latches the current acceleration as reference.
pub const REG_REFERENCE: u8 = 0x26;
/// Register address of `STATUS_REG`.
pub const REG_STATUS: u8 = 0x27;
/// Register address of `OUT_X_L`.
pub const REG_OUT_X_L: u8 = 0x28;
/// Register address of `OUT_Y_L`.
pub const REG_OUT_Y_L: u8 = 0x2A;
/// Register address of `OUT_Z_L`.
pub const REG_OUT_Z_L: u8 = 0x2C;
/// Register address of `INT1_CFG`.
pub const REG_INT1_CFG: u8 = 0x30;
/// Register address of `INT1_SRC`. Reading it clears a latched interrupt.
pub const REG_INT1_SRC: u8 = 0x31;
/// Register address of `INT1_THS`.
pub const REG_INT1_THS: u8 = 0x32;
/// Register address of `INT1_DURATION`.
pub const REG_INT1_DURATION: u8 = 0x33;

/// Metadata exposed by every typed register value.
pub trait Register: Copy + Into<u8> {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
}

macro_rules! byte_register {
    ($name:ident, $address:expr) => {
        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.into_bytes()[0]
            }
        }

        impl Register for $name {
            const ADDRESS: u8 = $address;
        }
    };
}

/// Bitfield representation of `CTRL_REG1` (address `0x20`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg1 {
    // X axis enable (bit 0).
    pub x_enable: bool,
    // Y axis enable (bit 1).
    pub y_enable: bool,
    // Z axis enable (bit 2).
    pub z_enable: bool,
    // Low-power mode enable (bit 3).
    pub low_power: bool,
    // Output data rate (bits 7:4).
    pub data_rate: DataRate,
}

byte_register!(CtrlReg1, REG_CTRL_REG1);

/// Bitfield representation of `CTRL_REG2` (address `0x21`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg2 {
    // High-pass filter on the INT1 function (bit 0).
    pub hp_int1: bool,
    // High-pass filter on the INT2 function (bit 1).
    pub hp_int2: bool,
    // High-pass filter on click detection (bit 2).
    pub hp_click: bool,
    // Filtered data selection (bit 3).
    pub filtered_data: bool,
    // High-pass cut-off (bits 5:4).
    pub cutoff: B2,
    // High-pass mode (bits 7:6).
    pub mode: B2,
}

byte_register!(CtrlReg2, REG_CTRL_REG2);

/// Bitfield representation of `CTRL_REG3` (address `0x22`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg3 {
    #[skip]
    __: B1,
    // FIFO overrun on INT1 (bit 1).
    pub i1_overrun: bool,
    // FIFO watermark on INT1 (bit 2).
    pub i1_watermark: bool,
    // 321DA on INT1 (bit 3).
    pub i1_321da: bool,
    // ZYXDA on INT1 (bit 4).
    pub i1_zyxda: bool,
    // IA2 on INT1 (bit 5).
    pub i1_ia2: bool,
    // IA1 on INT1 (bit 6).
    pub i1_ia1: bool,
    // Click on INT1 (bit 7).
    pub i1_click: bool,
}

byte_register!(CtrlReg3, REG_CTRL_REG3);

/// Bitfield representation of `CTRL_REG4` (address `0x23`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg4 {
    // SPI 3-wire mode (bit 0).
    pub spi_3wire: bool,
    // Self-test selection (bits 2:1).
    pub self_test: B2,
    // High-resolution output mode (bit 3).
    pub high_resolution: bool,
    // Full-scale selection (bits 5:4).
    pub full_scale: FullScale,
    // Big-endian data selection (bit 6).
    pub big_endian: bool,
    // Block data update (bit 7).
    pub block_data_update: bool,
}

byte_register!(CtrlReg4, REG_CTRL_REG4);

/// Bitfield representation of `CTRL_REG5` (address `0x24`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg5 {
    // 4D detection on INT2 (bit 0).
    pub d4d_int2: bool,
    // Latch INT2 request until INT2_SRC is read (bit 1).
    pub latch_int2: bool,
    // 4D detection on INT1 (bit 2).
    pub d4d_int1: bool,
    // Latch INT1 request until INT1_SRC is read (bit 3).
    pub latch_int1: bool,
    #[skip]
    __: B2,
    // FIFO enable (bit 6).
    pub fifo_enable: bool,
    // Reboot memory content (bit 7).
    pub boot: bool,
}

byte_register!(CtrlReg5, REG_CTRL_REG5);

/// Bitfield representation of `CTRL_REG6` (address `0x25`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg6 {
    #[skip]
    __: B1,
    // Interrupt outputs active low (bit 1).
    pub active_low: bool,
    #[skip]
    __: B1,
    // Activity interrupt on INT2 (bit 3).
    pub i2_activity: bool,
    // Boot on INT2 (bit 4).
    pub i2_boot: bool,
    // IA2 on INT2 (bit 5).
    pub i2_ia2: bool,
    // IA1 on INT2 (bit 6).
    pub i2_ia1: bool,
    // Click on INT2 (bit 7).
    pub i2_click: bool,
}

byte_register!(CtrlReg6, REG_CTRL_REG6);

/// Bitfield representation of `TEMP_CFG_REG` (address `0x1F`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempConfig {
    #[skip]
    __: B6,
    // Temperature sensor enable (bit 6).
    pub temp_enable: bool,
    // Auxiliary ADC enable (bit 7).
    pub adc_enable: bool,
}

byte_register!(TempConfig, REG_TEMP_CFG);

/// Bitfield representation of `INT1_CFG` (address `0x30`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int1Config {
    // X low event (bit 0).
    pub x_low: bool,
    // X high event (bit 1).
    pub x_high: bool,
    // Y low event (bit 2).
    pub y_low: bool,
    // Y high event (bit 3).
    pub y_high: bool,
    // Z low event (bit 4).
    pub z_low: bool,
    // Z high event (bit 5).
    pub z_high: bool,
    // 6-direction detection (bit 6).
    pub six_d: bool,
    // AND/OR combination of events (bit 7).
    pub and_combination: bool,
}

byte_register!(Int1Config, REG_INT1_CFG);

/// Bitfield representation of `INT1_SRC` (address `0x31`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int1Source {
    // X low event (bit 0).
    pub x_low: bool,
    // X high event (bit 1).
    pub x_high: bool,
    // Y low event (bit 2).
    pub y_low: bool,
    // Y high event (bit 3).
    pub y_high: bool,
    // Z low event (bit 4).
    pub z_low: bool,
    // Z high event (bit 5).
    pub z_high: bool,
    // One or more interrupts active (bit 6).
    pub active: bool,
    #[skip]
    __: B1,
}

byte_register!(Int1Source, REG_INT1_SRC);

#[cfg(feature = "defmt")]
impl defmt::Format for Int1Source {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Int1Source {{ IA: {}, XL: {}, XH: {}, YL: {}, YH: {}, ZL: {}, ZH: {} }}",
            self.active(),
            self.x_low(),
            self.x_high(),
            self.y_low(),
            self.y_high(),
            self.z_low(),
            self.z_high()
        );
    }
}

/// Builds the SPI command byte for a register access.
pub const fn command_byte(register: u8, is_read: bool, increment: bool) -> u8 {
    let mut command = register & ADDRESS_MASK;
    if is_read {
        command |= SPI_READ;
    }
    if increment {
        command |= SPI_INCREMENT;
    }
    command
}
