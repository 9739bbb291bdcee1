#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod analog;
#[cfg(feature = "async")]
pub mod asynch;
pub mod bus;
mod constants;
mod driver;
mod error;
pub mod i2c;
mod session;
pub mod settings;

pub use analog::Reading;
pub use bus::{RegisterBus, RegisterPointer, ThresholdRegister};
pub use driver::ADS101x;
pub use error::{Error, Unsupported};
pub use i2c::{Address, I2cBus};
pub use settings::{Configuration, ConfigurationChanges, Variant};
