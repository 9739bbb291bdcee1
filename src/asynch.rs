//! Async driver, built on [`embedded_hal_async`].
//!
//! This mirrors the blocking [`ADS101x`](crate::ADS101x) method for method. Only the
//! bus transactions and the poll delay are awaited. Encoding, caching, validation
//! and logging are shared with the blocking driver.
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::analog::Reading;
use crate::bus::{RegisterPointer, ThresholdRegister};
use crate::error::Error;
use crate::i2c::{Address, I2cBus};
use crate::session::{PollBudget, Session};
use crate::settings::{CapabilityProfile, Configuration, ConfigurationChanges, Variant};

/// Async counterpart of [`RegisterBus`](crate::bus::RegisterBus).
pub trait AsyncRegisterBus {
    /// Error reported by the underlying bus.
    type Error;

    /// Select `pointer` and write both register bytes in one transaction.
    fn write_register(
        &mut self,
        pointer: RegisterPointer,
        bytes: [u8; 2],
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Select `pointer` and read `buffer.len()` bytes from it.
    fn read_register(
        &mut self,
        pointer: RegisterPointer,
        buffer: &mut [u8],
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Issue the general-call reset command to the whole bus.
    fn general_call_reset(&mut self) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Async driver for one ADS1013, ADS1014 or ADS1015.
///
/// See the blocking [`ADS101x`](crate::ADS101x) for an overview.
#[derive(Debug)]
pub struct ADS101x<B> {
    bus: B,
    session: Session,
}

impl<I2C: I2c> ADS101x<I2cBus<I2C>> {
    /// Create a driver for the `variant` chip at `address` on the given I2C bus.
    pub fn new_i2c(i2c: I2C, address: Address, variant: Variant) -> Self {
        Self::new(I2cBus::new(i2c, address), variant)
    }
}

impl<B: AsyncRegisterBus> ADS101x<B> {
    /// Create a driver for the `variant` chip reached through `bus`.
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
    pub fn configuration(&self) -> &Configuration {
        self.session.configuration()
    }

    /// Read the configuration register, updating the stored copy.
    pub async fn read_configuration(&mut self) -> Result<Configuration, Error<B::Error>> {
        let mut bytes = [0u8; 2];
        self.bus
            .read_register(RegisterPointer::Configuration, &mut bytes)
            .await
            .map_err(Error::Transport)?;
        Ok(self.session.read(bytes))
    }

    /// Apply `changes`, write the register, and read it back.
    pub async fn configure(
        &mut self,
        changes: &ConfigurationChanges,
    ) -> Result<Configuration, Error<B::Error>> {
        if !changes.is_empty() {
            let (config, bytes) = self
                .session
                .configuration_write(changes)
                .map_err(Error::lift)?;
            self.write_configuration(config, bytes).await?;
        }
        self.read_configuration().await
    }

    /// Check whether a conversion is in progress. Always reads the device.
    pub async fn busy(&mut self) -> Result<bool, Error<B::Error>> {
        self.read_configuration().await?;
        Ok(self.session.busy())
    }

    /// Reset every device on the bus with an I2C general call.
    pub async fn general_reset(&mut self) -> Result<(), Error<B::Error>> {
        self.bus
            .general_call_reset()
            .await
            .map_err(Error::Transport)?;
        self.session.reset();
        Ok(())
    }

    /// Read the latest conversion result, scaled with the stored gain.
    pub async fn conversion(&mut self) -> Result<Reading, Error<B::Error>> {
        let mut bytes = [0u8; 2];
        self.bus
            .read_register(RegisterPointer::Conversion, &mut bytes)
            .await
            .map_err(Error::Transport)?;
        Ok(self.session.reading(bytes))
    }

    /// Ask the device to start a single conversion. Refused in continuous mode.
    pub async fn request_one_shot_conversion(&mut self) -> Result<(), Error<B::Error>> {
        let (config, bytes) = self.session.one_shot_write().map_err(Error::lift)?;
        self.write_configuration(config, bytes).await
    }

    /// Perform a single conversion, polling once per sample interval until done.
    pub async fn one_shot_conversion<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<Reading, Error<B::Error>> {
        self.request_one_shot_conversion().await?;
        self.wait_for_conversion(delay, PollBudget::new(None)).await?;
        self.conversion().await
    }

    /// Perform a single conversion, reading the status at most `max_polls` times.
    pub async fn one_shot_conversion_bounded<D: DelayNs>(
        &mut self,
        delay: &mut D,
        max_polls: u32,
    ) -> Result<Reading, Error<B::Error>> {
        self.request_one_shot_conversion().await?;
        self.wait_for_conversion(delay, PollBudget::new(Some(max_polls)))
            .await?;
        self.conversion().await
    }

    /// Read a comparator threshold (ADS1014 and ADS1015 only).
    pub async fn threshold(&mut self, register: ThresholdRegister) -> Result<i16, Error<B::Error>> {
        let pointer = self
            .session
            .threshold_pointer(register)
            .map_err(Error::lift)?;
        let mut bytes = [0u8; 2];
        self.bus
            .read_register(pointer, &mut bytes)
            .await
            .map_err(Error::Transport)?;
        Ok(self.session.threshold(pointer, bytes))
    }

    /// Write a comparator threshold (ADS1014 and ADS1015 only).
    pub async fn set_threshold(
        &mut self,
        register: ThresholdRegister,
        value: i16,
    ) -> Result<(), Error<B::Error>> {
        let (pointer, bytes) = self
            .session
            .threshold_write(register, value)
            .map_err(Error::lift)?;
        self.bus
            .write_register(pointer, bytes)
            .await
            .map_err(Error::Transport)
    }

    /// Read the low comparator threshold.
    pub async fn low_threshold(&mut self) -> Result<i16, Error<B::Error>> {
        self.threshold(ThresholdRegister::Low).await
    }

    /// Read the high comparator threshold.
    pub async fn high_threshold(&mut self) -> Result<i16, Error<B::Error>> {
        self.threshold(ThresholdRegister::High).await
    }

    /// Write the low comparator threshold.
    pub async fn set_low_threshold(&mut self, value: i16) -> Result<(), Error<B::Error>> {
        self.set_threshold(ThresholdRegister::Low, value).await
    }

    /// Write the high comparator threshold.
    pub async fn set_high_threshold(&mut self, value: i16) -> Result<(), Error<B::Error>> {
        self.set_threshold(ThresholdRegister::High, value).await
    }

    async fn wait_for_conversion<D: DelayNs>(
        &mut self,
        delay: &mut D,
        mut budget: PollBudget,
    ) -> Result<(), Error<B::Error>> {
        loop {
            budget.poll().map_err(Error::lift)?;
            if !self.busy().await? {
                budget.finished();
                return Ok(());
            }
            delay.delay_us(self.session.poll_interval_us()).await;
        }
    }

    async fn write_configuration(
        &mut self,
        config: Configuration,
        bytes: [u8; 2],
    ) -> Result<(), Error<B::Error>> {
        self.bus
            .write_register(RegisterPointer::Configuration, bytes)
            .await
            .map_err(Error::Transport)?;
        self.session.wrote(config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Unsupported;
    use crate::settings::{DataRate, Field, GainMode, OperationMode, OperationalStatus};
    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn async_one_shot_conversion() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x01, 0x85, 0x83]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0x05, 0x83]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0x85, 0x83]),
            I2cTransaction::write_read(0x48, vec![0x00], vec![0xFF, 0xA0]),
        ];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1015,
        );
        let reading = block_on(adc.one_shot_conversion(&mut NoopDelay::new())).unwrap();
        assert_eq!(reading.raw, -6);
        adc.free().free().done();
    }

    #[test]
    fn async_start_request_caches_converting() {
        let expectations = [I2cTransaction::write(0x48, vec![0x01, 0x85, 0x83])];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1015,
        );
        block_on(adc.request_one_shot_conversion()).unwrap();
        assert_eq!(
            adc.configuration().operational_status(),
            OperationalStatus::Converting
        );
        adc.free().free().done();
    }

    #[test]
    fn async_bounded_one_shot_times_out() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x01, 0x85, 0x83]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0x05, 0x83]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0x05, 0x83]),
        ];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1015,
        );
        let result = block_on(adc.one_shot_conversion_bounded(&mut NoopDelay::new(), 2));
        assert!(matches!(result, Err(Error::ConversionTimeout { polls: 2 })));
        adc.free().free().done();
    }

    #[test]
    fn async_one_shot_refused_in_continuous_mode() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x01, 0x04, 0x83]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0x04, 0x83]),
        ];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1015,
        );
        let mut changes = ConfigurationChanges::new();
        changes.with_operation_mode(OperationMode::Continuous);
        block_on(adc.configure(&changes)).unwrap();
        let result = block_on(adc.one_shot_conversion(&mut NoopDelay::new()));
        assert!(matches!(
            result,
            Err(Error::UnsupportedOperation(Unsupported::ContinuousMode))
        ));
        adc.free().free().done();
    }

    #[test]
    fn async_general_reset_restores_defaults() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x01, 0x05, 0xC3]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0x85, 0xC3]),
            I2cTransaction::write(0x00, vec![0x06]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0x85, 0x83]),
        ];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1015,
        );
        let mut changes = ConfigurationChanges::new();
        changes.with_data_rate(DataRate::Sps3300);
        let config = block_on(adc.configure(&changes)).unwrap();
        assert_eq!(config.data_rate(), DataRate::Sps3300);

        block_on(adc.general_reset()).unwrap();
        assert_eq!(adc.configuration(), &adc.profile().defaults);
        let config = block_on(adc.read_configuration()).unwrap();
        assert_eq!(config, Variant::Ads1015.profile().defaults);
        adc.free().free().done();
    }

    #[test]
    fn async_empty_changes_only_read() {
        let expectations = [I2cTransaction::write_read(0x48, vec![0x01], vec![0x85, 0x83])];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1014,
        );
        let config = block_on(adc.configure(&ConfigurationChanges::new())).unwrap();
        assert_eq!(config, Variant::Ads1014.profile().defaults);
        adc.free().free().done();
    }

    #[test]
    fn async_ads1013_rejects_gain() {
        let mut adc = ADS101x::new_i2c(I2cMock::new(&[]), Address::Ground, Variant::Ads1013);
        let mut changes = ConfigurationChanges::new();
        changes.with_gain_mode(GainMode::FS_4_096V);
        let result = block_on(adc.configure(&changes));
        assert!(matches!(
            result,
            Err(Error::UnsupportedOperation(Unsupported::Field(Field::GainMode)))
        ));
        assert_eq!(adc.configuration(), &Variant::Ads1013.profile().defaults);
        adc.free().free().done();
    }

    #[test]
    fn async_threshold_limits() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x03, 0x7F, 0xF0]),
            I2cTransaction::write(0x48, vec![0x02, 0x80, 0x00]),
            I2cTransaction::write_read(0x48, vec![0x02], vec![0x80, 0x00]),
            I2cTransaction::write_read(0x48, vec![0x03], vec![0x7F, 0xF0]),
        ];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1014,
        );
        block_on(adc.set_high_threshold(2047)).unwrap();
        block_on(adc.set_low_threshold(-2048)).unwrap();
        assert!(matches!(
            block_on(adc.set_high_threshold(2048)),
            Err(Error::OutOfRange(2048))
        ));
        assert!(matches!(
            block_on(adc.set_low_threshold(-2049)),
            Err(Error::OutOfRange(-2049))
        ));
        assert_eq!(block_on(adc.low_threshold()).unwrap(), -2048);
        assert_eq!(block_on(adc.high_threshold()).unwrap(), 2047);
        adc.free().free().done();
    }

    #[test]
    fn async_threshold_on_ads1013() {
        let mut adc = ADS101x::new_i2c(I2cMock::new(&[]), Address::Ground, Variant::Ads1013);
        let result = block_on(adc.set_threshold(ThresholdRegister::High, 100));
        assert!(matches!(
            result,
            Err(Error::UnsupportedOperation(Unsupported::Register(RegisterPointer::HighThreshold)))
        ));
        adc.free().free().done();
    }

    #[test]
    fn async_transport_error_is_passed_through() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x01, 0x07, 0x83]).with_error(ErrorKind::Other),
        ];
        let mut adc = ADS101x::new_i2c(
            I2cMock::new(&expectations),
            Address::Ground,
            Variant::Ads1015,
        );
        let mut changes = ConfigurationChanges::new();
        changes.with_gain_mode(GainMode::FS_1_024V);
        let result = block_on(adc.configure(&changes));
        assert!(matches!(result, Err(Error::Transport(ErrorKind::Other))));
        assert_eq!(adc.configuration(), &Variant::Ads1015.profile().defaults);
        adc.free().free().done();
    }
}
