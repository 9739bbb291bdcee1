use embedded_hal::i2c::I2c;

use crate::bus::{RegisterBus, RegisterPointer};
use crate::error::Error;
use crate::i2c::{Address, I2cBus};
use crate::session::Session;
use crate::settings::{CapabilityProfile, Configuration, ConfigurationChanges, Variant};

mod analog;

/// Driver for one ADS1013, ADS1014 or ADS1015.
///
/// # Quick start
///
/// Create the driver with [`ADS101x::new_i2c`], passing any I2C controller that
/// implements [`embedded_hal::i2c::I2c`], the address set by the ADDR pin, and the
/// chip you are talking to. Then take readings with [`ADS101x::one_shot_conversion`].
///
/// ```rust
/// # use embedded_hal_mock::eh1::{delay::NoopDelay, i2c::{Mock, Transaction}};
/// # let i2c = Mock::new(&[
/// #     Transaction::write(0x48, vec![0x01, 0x85, 0x83]),
/// #     Transaction::write_read(0x48, vec![0x01], vec![0x85, 0x83]),
/// #     Transaction::write_read(0x48, vec![0x00], vec![0x1E, 0x20]),
/// # ]);
/// use ads101x_hal::{ADS101x, Address, Variant};
///
/// let mut adc = ADS101x::new_i2c(i2c, Address::Ground, Variant::Ads1015);
/// let reading = adc.one_shot_conversion(&mut NoopDelay::new())?;
/// assert_eq!(reading.millivolts, 482.0);
/// # adc.free().free().done();
/// # Ok::<(), ads101x_hal::Error<embedded_hal::i2c::ErrorKind>>(())
/// ```
///
/// # Overview
///
/// The driver keeps a copy of the configuration register, which starts at the
/// chip's power-on defaults. [`ADS101x::configuration`] returns that copy without
/// touching the bus, while [`ADS101x::read_configuration`] and [`ADS101x::busy`]
/// always read the device and refresh it. Conversion readings are scaled with the
/// gain in the copy.
///
/// Fields and registers that the chip variant lacks are rejected with
/// [`Error::UnsupportedOperation`] before anything is sent.
#[derive(Debug)]
pub struct ADS101x<B> {
    /// Register transport, exclusively owned.
    bus: B,
    /// Chip profile and the stored configuration.
    session: Session,
}

impl<I2C: I2c> ADS101x<I2cBus<I2C>> {
    /// Create a driver for the `variant` chip at `address` on the given I2C bus.
    ///
    /// No bus traffic takes place, the chip is assumed to be in its power-on state.
    pub fn new_i2c(i2c: I2C, address: Address, variant: Variant) -> Self {
        Self::new(I2cBus::new(i2c, address), variant)
    }
}

impl<B: RegisterBus> ADS101x<B> {
    /// Create a driver for the `variant` chip reached through `bus`.
    ///
    /// No bus traffic takes place, the chip is assumed to be in its power-on state.
    pub fn new(bus: B, variant: Variant) -> Self {
        Self {
            bus,
            session: Session::new(variant),
        }
    }

    /// Release the register bus.
    pub fn free(self) -> B {
        self.bus
    }

    /// Chip variant this driver was created for.
    pub fn variant(&self) -> Variant {
        self.session.profile().variant
    }

    /// Fields and registers implemented by the chip.
    pub fn profile(&self) -> &'static CapabilityProfile {
        self.session.profile()
    }

    /// The configuration last written to or read from the device.
    ///
    /// This does not read the device. Use [`ADS101x::read_configuration`] for that.
    ///
    /// The operational status is always one the device can report. After a
    /// single-shot start it is [`Converting`] until the status is next read.
    ///
    /// [`Converting`]: crate::settings::OperationalStatus::Converting
    pub fn configuration(&self) -> &Configuration {
        self.session.configuration()
    }

    /// Read the configuration register.
    ///
    /// The stored copy returned by [`ADS101x::configuration`] is updated.
    pub fn read_configuration(&mut self) -> Result<Configuration, Error<B::Error>> {
        let mut bytes = [0u8; 2];
        self.bus
            .read_register(RegisterPointer::Configuration, &mut bytes)
            .map_err(Error::Transport)?;
        Ok(self.session.read(bytes))
    }

    /// Change the configuration register.
    ///
    /// The changes are applied on top of the current configuration and the whole
    /// register is written at once. The register is then read back, and the
    /// configuration the device reports is returned. Empty `changes` skip the write
    /// and only read the register.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] if `changes` include a field the chip does not
    /// implement. Nothing is written in that case.
    ///
    /// # Datasheet
    ///
    /// See section 8.6.3 for the Config register.
    pub fn configure(
        &mut self,
        changes: &ConfigurationChanges,
    ) -> Result<Configuration, Error<B::Error>> {
        if !changes.is_empty() {
            let (config, bytes) = self
                .session
                .configuration_write(changes)
                .map_err(Error::lift)?;
            self.write_configuration(config, bytes)?;
        }
        self.read_configuration()
    }

    /// Check whether a conversion is in progress.
    ///
    /// This always reads the configuration register, as conversions complete in
    /// hardware without notice.
    pub fn busy(&mut self) -> Result<bool, Error<B::Error>> {
        self.read_configuration()?;
        Ok(self.session.busy())
    }

    /// Reset the device with an I2C general call.
    ///
    /// <div class="warning">
    ///
    /// The general-call reset is broadcast, so every device on the bus that supports
    /// it will reset too.
    ///
    /// </div>
    ///
    /// The stored configuration returns to the chip's power-on defaults and any
    /// unread conversion is lost.
    ///
    /// # Datasheet
    ///
    /// See section 8.5.1.2 (I2C General Call).
    pub fn general_reset(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.general_call_reset().map_err(Error::Transport)?;
        self.session.reset();
        Ok(())
    }

    /// Write an encoded configuration, keeping it as the stored copy.
    fn write_configuration(
        &mut self,
        config: Configuration,
        bytes: [u8; 2],
    ) -> Result<(), Error<B::Error>> {
        self.bus
            .write_register(RegisterPointer::Configuration, bytes)
            .map_err(Error::Transport)?;
        self.session.wrote(config);
        Ok(())
    }
}
