//! I2C addressing and the [`embedded_hal`] transport.
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::bus::{RegisterBus, RegisterPointer};
use crate::constants::{GENERAL_CALL_ADDRESS, GENERAL_CALL_RESET};

/// I2C target address, selected by what the ADDR pin is connected to.
///
/// ## Datasheet
///
/// See table 4 in section 8.5.1.1 (I2C Address Selection).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// ADDR connected to GND: 0x48.
    #[default]
    Ground,
    /// ADDR connected to VDD: 0x49.
    Vdd,
    /// ADDR connected to SDA: 0x4A.
    Sda,
    /// ADDR connected to SCL: 0x4B.
    Scl,
}

impl From<Address> for SevenBitAddress {
    fn from(value: Address) -> Self {
        match value {
            Address::Ground => 0x48,
            Address::Vdd => 0x49,
            Address::Sda => 0x4A,
            Address::Scl => 0x4B,
        }
    }
}

/// [`RegisterBus`] over an [`embedded_hal`] I2C controller.
///
/// Register writes send the pointer byte followed by the two register bytes in a
/// single write. Register reads are a write-read of the pointer byte.
#[derive(Debug)]
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C> I2cBus<I2C> {
    /// Wrap `i2c` to talk to the device at `address`.
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self {
            i2c,
            address: address.into(),
        }
    }

    /// The device's 7-bit address.
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Release the I2C controller.
    pub fn free(self) -> I2C {
        self.i2c
    }

    /// Pointer byte followed by the register bytes.
    pub(crate) fn write_buffer(pointer: RegisterPointer, bytes: [u8; 2]) -> [u8; 3] {
        let [high, low] = bytes;
        [pointer.address(), high, low]
    }
}

impl<I2C: I2c> RegisterBus for I2cBus<I2C> {
    type Error = I2C::Error;

    fn write_register(
        &mut self,
        pointer: RegisterPointer,
        bytes: [u8; 2],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write(self.address, &Self::write_buffer(pointer, bytes))
    }

    fn read_register(
        &mut self,
        pointer: RegisterPointer,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.address, &[pointer.address()], buffer)
    }

    fn general_call_reset(&mut self) -> Result<(), Self::Error> {
        self.i2c.write(GENERAL_CALL_ADDRESS, &[GENERAL_CALL_RESET])
    }
}

#[cfg(feature = "async")]
impl<I2C: embedded_hal_async::i2c::I2c> crate::asynch::AsyncRegisterBus for I2cBus<I2C> {
    type Error = I2C::Error;

    async fn write_register(
        &mut self,
        pointer: RegisterPointer,
        bytes: [u8; 2],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write(self.address, &Self::write_buffer(pointer, bytes))
            .await
    }

    async fn read_register(
        &mut self,
        pointer: RegisterPointer,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.address, &[pointer.address()], buffer)
            .await
    }

    async fn general_call_reset(&mut self) -> Result<(), Self::Error> {
        self.i2c
            .write(GENERAL_CALL_ADDRESS, &[GENERAL_CALL_RESET])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn pin_strap_addresses() {
        assert_eq!(SevenBitAddress::from(Address::Ground), 0x48);
        assert_eq!(SevenBitAddress::from(Address::Vdd), 0x49);
        assert_eq!(SevenBitAddress::from(Address::Sda), 0x4A);
        assert_eq!(SevenBitAddress::from(Address::Scl), 0x4B);
    }

    #[test]
    fn register_transactions() {
        let expectations = [
            I2cTransaction::write(0x49, vec![0x01, 0x85, 0x83]),
            I2cTransaction::write_read(0x49, vec![0x00], vec![0x7F, 0xF0]),
            I2cTransaction::write(0x00, vec![0x06]),
        ];
        let mut bus = I2cBus::new(I2cMock::new(&expectations), Address::Vdd);

        bus.write_register(RegisterPointer::Configuration, [0x85, 0x83])
            .unwrap();
        let mut buf = [0u8; 2];
        bus.read_register(RegisterPointer::Conversion, &mut buf)
            .unwrap();
        assert_eq!(buf, [0x7F, 0xF0]);
        bus.general_call_reset().unwrap();

        bus.free().done();
    }
}
