//! Conversion and comparator threshold driver methods.
use embedded_hal::delay::DelayNs;

use super::ADS101x;
use crate::Error;
use crate::analog::Reading;
use crate::bus::{RegisterBus, RegisterPointer, ThresholdRegister};
use crate::session::PollBudget;

/// Conversion-related commands.
impl<B: RegisterBus> ADS101x<B> {
    /// Read the latest conversion result.
    ///
    /// The reading is scaled with the gain of the stored configuration (see
    /// [`ADS101x::configuration`]), or 1.0 on the ADS1013.
    ///
    /// # Datasheet
    ///
    /// See section 8.6.2 (Conversion Register).
    pub fn conversion(&mut self) -> Result<Reading, Error<B::Error>> {
        let mut bytes = [0u8; 2];
        self.bus
            .read_register(RegisterPointer::Conversion, &mut bytes)
            .map_err(Error::Transport)?;
        Ok(self.session.reading(bytes))
    }

    /// Ask the device to start a single conversion.
    ///
    /// All other fields keep their current values. Use [`ADS101x::busy`] to find out
    /// when the conversion is done, then [`ADS101x::conversion`] to read it.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] if the stored configuration is in
    /// [`OperationMode::Continuous`]. Nothing is written in that case.
    ///
    /// [`OperationMode::Continuous`]: crate::settings::OperationMode::Continuous
    pub fn request_one_shot_conversion(&mut self) -> Result<(), Error<B::Error>> {
        let (config, bytes) = self.session.one_shot_write().map_err(Error::lift)?;
        self.write_configuration(config, bytes)
    }

    /// Perform a single conversion and return the result.
    ///
    /// Requests a conversion, then reads the operational status every sample
    /// interval (`1 / data rate`) until the conversion is complete.
    ///
    /// <div class="warning">
    ///
    /// This waits for as long as the device reports a conversion in progress. Use
    /// [`ADS101x::one_shot_conversion_bounded`] to give up after a number of polls.
    ///
    /// </div>
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] in continuous mode, where the device never
    /// reports a finished conversion.
    pub fn one_shot_conversion<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<Reading, Error<B::Error>> {
        self.request_one_shot_conversion()?;
        self.wait_for_conversion(delay, PollBudget::new(None))?;
        self.conversion()
    }

    /// Perform a single conversion, reading the status at most `max_polls` times.
    ///
    /// # Errors
    ///
    /// [`Error::ConversionTimeout`] if the conversion is still in progress after
    /// `max_polls` reads of the status. The device still finishes the conversion,
    /// which can be read later with [`ADS101x::conversion`].
    pub fn one_shot_conversion_bounded<D: DelayNs>(
        &mut self,
        delay: &mut D,
        max_polls: u32,
    ) -> Result<Reading, Error<B::Error>> {
        self.request_one_shot_conversion()?;
        self.wait_for_conversion(delay, PollBudget::new(Some(max_polls)))?;
        self.conversion()
    }

    /// Poll the operational status until the device is idle.
    fn wait_for_conversion<D: DelayNs>(
        &mut self,
        delay: &mut D,
        mut budget: PollBudget,
    ) -> Result<(), Error<B::Error>> {
        loop {
            budget.poll().map_err(Error::lift)?;
            if !self.busy()? {
                budget.finished();
                return Ok(());
            }
            delay.delay_us(self.session.poll_interval_us());
        }
    }
}

/// Comparator threshold commands (ADS1014 and ADS1015 only).
impl<B: RegisterBus> ADS101x<B> {
    /// Read a comparator threshold as a signed 12-bit value.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] on the ADS1013, which has no comparator.
    ///
    /// # Datasheet
    ///
    /// See section 8.6.4 (Lo_thresh and Hi_thresh Registers).
    pub fn threshold(&mut self, register: ThresholdRegister) -> Result<i16, Error<B::Error>> {
        let pointer = self
            .session
            .threshold_pointer(register)
            .map_err(Error::lift)?;
        let mut bytes = [0u8; 2];
        self.bus
            .read_register(pointer, &mut bytes)
            .map_err(Error::Transport)?;
        Ok(self.session.threshold(pointer, bytes))
    }

    /// Write a comparator threshold.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] on the ADS1013, and [`Error::OutOfRange`] if
    /// `value` is outside `-2048..=2047`. Nothing is written in either case.
    pub fn set_threshold(
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
            .map_err(Error::Transport)
    }

    /// Read the low comparator threshold.
    pub fn low_threshold(&mut self) -> Result<i16, Error<B::Error>> {
        self.threshold(ThresholdRegister::Low)
    }

    /// Read the high comparator threshold.
    pub fn high_threshold(&mut self) -> Result<i16, Error<B::Error>> {
        self.threshold(ThresholdRegister::High)
    }

    /// Write the low comparator threshold.
    pub fn set_low_threshold(&mut self, value: i16) -> Result<(), Error<B::Error>> {
        self.set_threshold(ThresholdRegister::Low, value)
    }

    /// Write the high comparator threshold.
    pub fn set_high_threshold(&mut self, value: i16) -> Result<(), Error<B::Error>> {
        self.set_threshold(ThresholdRegister::High, value)
    }
}
