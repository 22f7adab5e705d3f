//! Strongly typed parameter enumerations for the LIS3DH driver.
//!
//! These enums map directly to datasheet field encodings and are used by the
//! register bitfields and [`WakeConfig`](crate::config::WakeConfig).
//!
//! # Examples
//!
//! ```rust
//! use lis3dh_sync::params::{DataRate, FullScale};
//!
//! let odr = DataRate::Hz10;
//! let fs = FullScale::G2;
//! assert_eq!(odr.hz(), 10);
//! let _ = fs;
//! ```

use modular_bitfield::prelude::Specifier;

/// Output data rate selection (`CTRL_REG1.ODR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum DataRate {
    /// Power-down mode.
    PowerDown = 0b0000,
    /// 1 Hz.
    Hz1 = 0b0001,
    /// 10 Hz.
    Hz10 = 0b0010,
    /// 25 Hz.
    Hz25 = 0b0011,
    /// 50 Hz.
    Hz50 = 0b0100,
    /// 100 Hz.
    Hz100 = 0b0101,
    /// 200 Hz.
    Hz200 = 0b0110,
    /// 400 Hz.
    Hz400 = 0b0111,
    /// 1.6 kHz, low-power mode only.
    LowPower1600Hz = 0b1000,
    /// 1.344 kHz normal mode, 5.376 kHz in low-power mode.
    Hz1344LowPower5376 = 0b1001,
}

impl DataRate {
    /// Returns the nominal rate in hertz for normal mode.
    pub const fn hz(self) -> u32 {
        match self {
            Self::PowerDown => 0,
            Self::Hz1 => 1,
            Self::Hz10 => 10,
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
            Self::Hz400 => 400,
            Self::LowPower1600Hz => 1_600,
            Self::Hz1344LowPower5376 => 1_344,
        }
    }
}

/// Full-scale range selection (`CTRL_REG4.FS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FullScale {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}
