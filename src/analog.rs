//! Conversion results and comparator thresholds.
//!
//! The conversion and threshold registers share a layout: a 12-bit two's-complement
//! value, left-justified in 16 bits, most-significant byte first. The low four bits
//! are always zero.
//!
//! ```text
//! | D11 D10 D9 D8 D7 D6 D5 D4 | D3 D2 D1 D0 0 0 0 0 |
//! ```
//!
//! ## Datasheet
//!
//! See section 8.6.2 (Conversion Register) and 8.6.4 (Lo_thresh and Hi_thresh
//! Registers).
use bit_field::BitField;

use crate::constants::{MAX_READING, MIN_READING, NEGATIVE_FULL_SCALE_BYTES};
use crate::error::Error;

/// A single conversion result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Signed 12-bit reading, `-2048..=2047`.
    pub raw: i16,
    /// Reading scaled by the gain amplifier setting, in millivolts.
    pub millivolts: f64,
}

impl Reading {
    /// Interpret the conversion register bytes with the given gain factor.
    pub fn from_bytes(bytes: [u8; 2], gain_factor: f64) -> Self {
        let raw = sample_from_bytes(bytes);
        Self {
            raw,
            millivolts: f64::from(raw) * gain_factor,
        }
    }
}

/// Extract the signed 12-bit sample from the conversion register bytes.
///
/// The register value is treated as a signed 16-bit integer and shifted right so
/// that the sign propagates. `[0xFF, 0xF0]` is read as negative full scale (-2048).
pub fn sample_from_bytes(bytes: [u8; 2]) -> i16 {
    if bytes == NEGATIVE_FULL_SCALE_BYTES {
        return MIN_READING;
    }
    i16::from_be_bytes(bytes) >> 4
}

/// Scale the conversion register bytes into millivolts.
///
/// `gain_factor` is the millivolts per bit of the active gain setting, see
/// [`GainMode::gain_factor`](crate::settings::GainMode::gain_factor). The ADS1013
/// always uses 1.0.
pub fn decode_conversion(high: u8, low: u8, gain_factor: f64) -> f64 {
    Reading::from_bytes([high, low], gain_factor).millivolts
}

/// Register bytes for a comparator threshold.
///
/// # Errors
///
/// [`Error::OutOfRange`] if `value` is not a 12-bit signed value.
pub fn threshold_to_bytes(value: i16) -> Result<[u8; 2], Error> {
    if !(MIN_READING..=MAX_READING).contains(&value) {
        return Err(Error::OutOfRange(value));
    }
    let mut register = 0u16;
    register.set_bits(4..16, value as u16 & 0x0FFF);
    Ok(register.to_be_bytes())
}

/// Comparator threshold held in the register bytes.
///
/// Unlike [`sample_from_bytes`] there is no special case, so every threshold written
/// with [`threshold_to_bytes`] reads back unchanged.
pub fn threshold_from_bytes(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes) >> 4
}
