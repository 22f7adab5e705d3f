#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod error;

pub mod completion;
pub mod config;
pub mod device;
pub mod interface;
mod log;
pub mod params;
pub mod registers;
pub mod transport;

pub use crate::device::{Lis3dh, NoInterruptPin};
pub use crate::error::{Error, Result, TransferError};
