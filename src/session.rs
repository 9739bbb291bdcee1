//! Driver state and the bus-free steps shared by the blocking and async drivers.
//!
//! Each driver method does its bus transactions itself and hands the bytes to a
//! [`Session`] to be prepared or interpreted, so both drivers log, cache and
//! validate in exactly the same way.
use log::{debug, trace};

use crate::analog::{self, Reading};
use crate::bus::{RegisterPointer, ThresholdRegister};
use crate::error::{Error, Unsupported};
use crate::settings::{
    self, CapabilityProfile, Configuration, ConfigurationChanges, OperationMode,
    OperationalStatus, Variant,
};

/// Chip profile and the cached configuration register.
#[derive(Debug)]
pub(crate) struct Session {
    profile: &'static CapabilityProfile,
    configuration: Configuration,
}

impl Session {
    /// Session for a `variant` chip in its power-on state.
    pub(crate) fn new(variant: Variant) -> Self {
        let profile = variant.profile();
        Self {
            profile,
            configuration: profile.defaults,
        }
    }

    pub(crate) fn profile(&self) -> &'static CapabilityProfile {
        self.profile
    }

    pub(crate) fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Merge `changes` into the cached configuration and encode the result.
    pub(crate) fn configuration_write(
        &self,
        changes: &ConfigurationChanges,
    ) -> Result<(Configuration, [u8; 2]), Error> {
        let merged = self.configuration.merge(changes)?;
        let bytes = settings::encode(&merged)?;
        debug!("ADS101x configuration write {bytes:02X?} for {changes:?}");
        Ok((merged, bytes))
    }

    /// Configuration that starts a single conversion.
    ///
    /// In continuous mode the device never reports a finished conversion, so a
    /// start request is refused.
    pub(crate) fn one_shot_write(&self) -> Result<(Configuration, [u8; 2]), Error> {
        if self.configuration.operation_mode() == OperationMode::Continuous {
            debug!("ADS101x single-shot conversion refused in continuous mode");
            return Err(Error::UnsupportedOperation(Unsupported::ContinuousMode));
        }
        self.configuration_write(ConfigurationChanges::new().start_one_shot())
    }

    /// Record a configuration that was written to the device.
    ///
    /// The cache only ever holds readable status values: a start request is stored
    /// as [`OperationalStatus::Converting`], and "no operation" keeps the previous
    /// status.
    pub(crate) fn wrote(&mut self, mut written: Configuration) {
        let status = match written.operational_status() {
            OperationalStatus::StartOneShot => OperationalStatus::Converting,
            OperationalStatus::NoOp => self.configuration.operational_status(),
            status => status,
        };
        written.set_operational_status(status);
        self.configuration = written;
    }

    /// Decode and cache the configuration register bytes.
    pub(crate) fn read(&mut self, bytes: [u8; 2]) -> Configuration {
        trace!("ADS101x configuration read {bytes:02X?}");
        self.configuration = settings::decode(self.profile.variant, bytes);
        self.configuration
    }

    /// Whether the cached configuration reports a conversion in progress.
    pub(crate) fn busy(&self) -> bool {
        let busy = self.configuration.is_converting();
        trace!("ADS101x busy: {busy}");
        busy
    }

    /// Back to power-on defaults after a general-call reset.
    pub(crate) fn reset(&mut self) {
        debug!("ADS101x general call reset");
        self.configuration = self.profile.defaults;
    }

    /// Interpret conversion register bytes with the cached gain.
    pub(crate) fn reading(&self, bytes: [u8; 2]) -> Reading {
        trace!("ADS101x conversion read {bytes:02X?}");
        Reading::from_bytes(bytes, self.configuration.gain_factor())
    }

    /// Microseconds between status polls at the cached data rate.
    pub(crate) fn poll_interval_us(&self) -> u32 {
        self.configuration.data_rate().interval().as_micros() as u32
    }

    /// Register pointer for `register`, if the chip has it.
    pub(crate) fn threshold_pointer(
        &self,
        register: ThresholdRegister,
    ) -> Result<RegisterPointer, Error> {
        let pointer = register.into();
        if self.profile.has_thresholds {
            Ok(pointer)
        } else {
            Err(Error::UnsupportedOperation(Unsupported::Register(pointer)))
        }
    }

    /// Register pointer and bytes to write `value` as a threshold.
    pub(crate) fn threshold_write(
        &self,
        register: ThresholdRegister,
        value: i16,
    ) -> Result<(RegisterPointer, [u8; 2]), Error> {
        let pointer = self.threshold_pointer(register)?;
        let bytes = analog::threshold_to_bytes(value)?;
        debug!("ADS101x {pointer:?} write {bytes:02X?}");
        Ok((pointer, bytes))
    }

    /// Interpret threshold register bytes read from `pointer`.
    pub(crate) fn threshold(&self, pointer: RegisterPointer, bytes: [u8; 2]) -> i16 {
        trace!("ADS101x {pointer:?} read {bytes:02X?}");
        analog::threshold_from_bytes(bytes)
    }
}

/// Number of status reads a single-shot conversion may still make.
#[derive(Debug)]
pub(crate) struct PollBudget {
    max_polls: Option<u32>,
    polls: u32,
}

impl PollBudget {
    /// `None` never runs out.
    pub(crate) fn new(max_polls: Option<u32>) -> Self {
        Self { max_polls, polls: 0 }
    }

    /// Count one status read.
    ///
    /// Fails with [`Error::ConversionTimeout`] once `max_polls` reads have been made.
    pub(crate) fn poll(&mut self) -> Result<(), Error> {
        if self.max_polls.is_some_and(|max| self.polls >= max) {
            debug!("ADS101x conversion not done after {} polls", self.polls);
            return Err(Error::ConversionTimeout { polls: self.polls });
        }
        self.polls += 1;
        Ok(())
    }

    pub(crate) fn finished(&self) {
        trace!("ADS101x conversion done after {} polls", self.polls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DataRate;

    #[test]
    fn start_request_caches_converting() {
        let mut session = Session::new(Variant::Ads1015);
        let (written, bytes) = session.one_shot_write().unwrap();
        assert_eq!(bytes, [0x85, 0x83]);
        assert_eq!(written.operational_status(), OperationalStatus::StartOneShot);
        session.wrote(written);
        assert_eq!(
            session.configuration().operational_status(),
            OperationalStatus::Converting
        );
        assert!(session.busy());
    }

    #[test]
    fn no_op_write_keeps_status() {
        let mut session = Session::new(Variant::Ads1014);
        let mut changes = ConfigurationChanges::new();
        changes.with_data_rate(DataRate::Sps128);
        let (written, bytes) = session.configuration_write(&changes).unwrap();
        assert_eq!(bytes, [0x05, 0x03]);
        session.wrote(written);
        let cached = session.configuration();
        assert_eq!(cached.operational_status(), OperationalStatus::NotConverting);
        assert_eq!(cached.data_rate(), DataRate::Sps128);
    }

    #[test]
    fn start_request_refused_in_continuous_mode() {
        let mut session = Session::new(Variant::Ads1013);
        let mut changes = ConfigurationChanges::new();
        changes.with_operation_mode(OperationMode::Continuous);
        let (written, _) = session.configuration_write(&changes).unwrap();
        session.wrote(written);
        assert!(matches!(
            session.one_shot_write(),
            Err(Error::UnsupportedOperation(Unsupported::ContinuousMode))
        ));
    }

    #[test]
    fn poll_budget() {
        let mut unbounded = PollBudget::new(None);
        for _ in 0..1000 {
            unbounded.poll().unwrap();
        }

        let mut bounded = PollBudget::new(Some(2));
        bounded.poll().unwrap();
        bounded.poll().unwrap();
        assert!(matches!(bounded.poll(), Err(Error::ConversionTimeout { polls: 2 })));

        let mut empty = PollBudget::new(Some(0));
        assert!(matches!(empty.poll(), Err(Error::ConversionTimeout { polls: 0 })));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut session = Session::new(Variant::Ads1015);
        session.read([0x05, 0xE3]);
        assert!(session.busy());
        session.reset();
        assert_eq!(session.configuration(), &Variant::Ads1015.profile().defaults);
    }

    #[test]
    fn thresholds_gated_by_profile() {
        let session = Session::new(Variant::Ads1013);
        assert!(matches!(
            session.threshold_write(ThresholdRegister::Low, 0),
            Err(Error::UnsupportedOperation(Unsupported::Register(RegisterPointer::LowThreshold)))
        ));
        let session = Session::new(Variant::Ads1014);
        assert_eq!(
            session.threshold_write(ThresholdRegister::High, -1).unwrap(),
            (RegisterPointer::HighThreshold, [0xFF, 0xF0])
        );
    }
}
