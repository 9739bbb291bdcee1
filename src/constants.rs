/// Reserved I2C address of the general call.
pub(crate) const GENERAL_CALL_ADDRESS: u8 = 0x00;

/// General-call command byte that makes supporting devices reset.
pub(crate) const GENERAL_CALL_RESET: u8 = 0x06;

/// Raw conversion value that is read as negative full scale.
pub(crate) const NEGATIVE_FULL_SCALE_BYTES: [u8; 2] = [0xFF, 0xF0];

/// Smallest 12-bit reading.
pub(crate) const MIN_READING: i16 = -2048;

/// Largest 12-bit reading.
pub(crate) const MAX_READING: i16 = 2047;

