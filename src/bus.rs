//! Register access to the ADS101x.
//!
//! The driver does not talk to the I2C bus directly. Instead it uses a
//! [`RegisterBus`], which only knows how to select a register and move its bytes.
//! [`I2cBus`](crate::i2c::I2cBus) implements it on top of any [`embedded_hal`] I2C
//! controller.

/// Device register selected by the address pointer.
///
/// ## Datasheet
///
/// See section 8.6.1 (Address Pointer Register).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterPointer {
    /// Latest conversion result, read-only.
    Conversion,
    /// Configuration register.
    Configuration,
    /// Comparator low threshold (ADS1014 and ADS1015 only).
    LowThreshold,
    /// Comparator high threshold (ADS1014 and ADS1015 only).
    HighThreshold,
}

impl RegisterPointer {
    /// Value written to the address pointer register to select this register.
    pub fn address(&self) -> u8 {
        match self {
            RegisterPointer::Conversion => 0x00,
            RegisterPointer::Configuration => 0x01,
            RegisterPointer::LowThreshold => 0x02,
            RegisterPointer::HighThreshold => 0x03,
        }
    }
}

/// One of the two comparator threshold registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdRegister {
    /// Lo_thresh.
    Low,
    /// Hi_thresh.
    High,
}

impl From<ThresholdRegister> for RegisterPointer {
    fn from(value: ThresholdRegister) -> Self {
        match value {
            ThresholdRegister::Low => RegisterPointer::LowThreshold,
            ThresholdRegister::High => RegisterPointer::HighThreshold,
        }
    }
}

/// Transport used by the driver to reach the device's registers.
///
/// Each method is a single bus transaction. Implementations should not retry.
pub trait RegisterBus {
    /// Error reported by the underlying bus.
    type Error;

    /// Select `pointer` and write both register bytes, most-significant first, in
    /// one transaction.
    fn write_register(&mut self, pointer: RegisterPointer, bytes: [u8; 2])
    -> Result<(), Self::Error>;

    /// Select `pointer` and read `buffer.len()` bytes from it.
    fn read_register(
        &mut self,
        pointer: RegisterPointer,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Issue the general-call reset command.
    ///
    /// This is broadcast to the whole bus and resets every device that supports it,
    /// not only the ADS101x.
    fn general_call_reset(&mut self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_addresses() {
        assert_eq!(RegisterPointer::Conversion.address(), 0x00);
        assert_eq!(RegisterPointer::Configuration.address(), 0x01);
        assert_eq!(RegisterPointer::from(ThresholdRegister::Low).address(), 0x02);
        assert_eq!(RegisterPointer::from(ThresholdRegister::High).address(), 0x03);
    }
}
