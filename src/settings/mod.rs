//! Configuration register model shared by the ADS1013, ADS1014 and ADS1015.
//!
//! The register is described once, as a table of bit fields ([`CONFIG_BITS`]), and
//! each chip variant selects the fields it implements through its
//! [`CapabilityProfile`]. [`encode`] and [`decode`] convert between the raw register
//! bytes and a symbolic [`Configuration`] for any variant.

mod codec;
mod configuration;
mod fields;
mod profile;
mod table;

pub use codec::{decode, encode};
pub use configuration::{Configuration, ConfigurationChanges};
pub use fields::{
    ComparatorLatch, ComparatorMode, ComparatorPolarity, ComparatorQueue, DataRate, Field,
    FieldValue, GainMode, InputMultiplexer, OperationMode, OperationalStatus,
};
pub use profile::{CapabilityProfile, Variant};
pub use table::{BitField, CONFIG_BITS, bit_field};
