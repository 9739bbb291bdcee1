//! Complete register configurations and requested changes to them.

use super::fields::{
    ComparatorLatch, ComparatorMode, ComparatorPolarity, ComparatorQueue, DataRate, Field,
    FieldValue, GainMode, InputMultiplexer, OperationMode, OperationalStatus,
};
use super::profile::Variant;
use super::table::bit_field;
use crate::error::{Error, Unsupported};

/// Symbolic contents of the configuration register for one chip variant.
///
/// A `Configuration` always holds a value for every field its [`Variant`] implements
/// and never holds a value for a field the variant lacks. Values are created by the
/// driver, from the power-on defaults or by decoding the register, and changed only
/// by [`Configuration::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    variant: Variant,
    values: [Option<FieldValue>; Field::COUNT],
}

/// Generate a getter for a field that only some variants implement.
#[doc(hidden)]
macro_rules! optional_field {
    ($(#[$doc:meta])* $name:ident, $symbol:ident) => {
        $(#[$doc])*
        pub fn $name(&self) -> Option<$symbol> {
            match self.get(Field::$symbol) {
                Some(FieldValue::$symbol(value)) => Some(value),
                _ => None,
            }
        }
    };
}

impl Configuration {
    /// Power-on configuration holding exactly `fields`.
    pub(crate) const fn power_on(variant: Variant, fields: &[Field]) -> Self {
        let mut values = [None; Field::COUNT];
        let mut i = 0;
        while i < fields.len() {
            let field = fields[i];
            values[field.index()] = Some(power_on_value(field));
            i += 1;
        }
        Self { variant, values }
    }

    /// Build a configuration from decoded values.
    pub(crate) fn from_values(
        variant: Variant,
        values: [Option<FieldValue>; Field::COUNT],
    ) -> Self {
        Self { variant, values }
    }

    /// Chip variant this configuration belongs to.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Value of `field`, or `None` if the chip does not implement it.
    pub fn get(&self, field: Field) -> Option<FieldValue> {
        self.values[field.index()]
    }

    /// Values of every implemented field, most-significant bit first.
    pub fn values(&self) -> impl Iterator<Item = FieldValue> + '_ {
        self.values.iter().flatten().copied()
    }

    /// Operational status of the device.
    pub fn operational_status(&self) -> OperationalStatus {
        match self.get(Field::OperationalStatus) {
            Some(FieldValue::OperationalStatus(status)) => status,
            _ => unreachable!("All variants have an operational status field."),
        }
    }

    pub(crate) fn set_operational_status(&mut self, status: OperationalStatus) {
        self.values[Field::OperationalStatus.index()] = Some(status.into());
    }

    /// True if the device reported a conversion in progress.
    pub fn is_converting(&self) -> bool {
        self.operational_status() == OperationalStatus::Converting
    }

    /// Continuous or single-shot conversion mode.
    pub fn operation_mode(&self) -> OperationMode {
        match self.get(Field::OperationMode) {
            Some(FieldValue::OperationMode(mode)) => mode,
            _ => unreachable!("All variants have an operation mode field."),
        }
    }

    /// Conversion data rate.
    pub fn data_rate(&self) -> DataRate {
        match self.get(Field::DataRate) {
            Some(FieldValue::DataRate(rate)) => rate,
            _ => unreachable!("All variants have a data rate field."),
        }
    }

    optional_field!(
        /// Input multiplexer setting (ADS1015 only).
        input_multiplexer,
        InputMultiplexer
    );
    optional_field!(
        /// Gain amplifier setting (ADS1014 and ADS1015 only).
        gain_mode,
        GainMode
    );
    optional_field!(
        /// Comparator mode (ADS1014 and ADS1015 only).
        comparator_mode,
        ComparatorMode
    );
    optional_field!(
        /// ALERT/RDY polarity (ADS1014 and ADS1015 only).
        comparator_polarity,
        ComparatorPolarity
    );
    optional_field!(
        /// ALERT/RDY latching (ADS1014 and ADS1015 only).
        comparator_latch,
        ComparatorLatch
    );
    optional_field!(
        /// Comparator queue (ADS1014 and ADS1015 only).
        comparator_queue,
        ComparatorQueue
    );

    /// Millivolts per bit of a conversion reading under this configuration.
    ///
    /// The ADS1013 has no gain amplifier, so this is always 1.0 for it.
    pub fn gain_factor(&self) -> f64 {
        self.gain_mode().map_or(1.0, |gain| gain.gain_factor())
    }

    /// Apply `changes` on top of this configuration.
    ///
    /// The operational status is reset to [`OperationalStatus::NoOp`] unless the
    /// changes request a single-shot conversion, so writing the result never starts
    /// a conversion by accident.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] if the changes name a field this chip
    /// does not implement.
    pub fn merge(&self, changes: &ConfigurationChanges) -> Result<Configuration, Error> {
        let profile = self.variant.profile();
        let mut merged = *self;
        merged.values[Field::OperationalStatus.index()] = Some(OperationalStatus::NoOp.into());
        for value in changes.requested() {
            let field = value.field();
            if !profile.supports(field) {
                return Err(Error::UnsupportedOperation(Unsupported::Field(field)));
            }
            merged.values[field.index()] = Some(value);
        }
        Ok(merged)
    }
}

/// Power-on value of each field.
const fn power_on_value(field: Field) -> FieldValue {
    match field {
        Field::OperationalStatus => FieldValue::OperationalStatus(OperationalStatus::NotConverting),
        Field::InputMultiplexer => FieldValue::InputMultiplexer(InputMultiplexer::Ain0_Ain1),
        Field::GainMode => FieldValue::GainMode(GainMode::FS_2_048V),
        Field::OperationMode => FieldValue::OperationMode(OperationMode::OneShot),
        Field::DataRate => FieldValue::DataRate(DataRate::Sps1600),
        Field::ComparatorMode => FieldValue::ComparatorMode(ComparatorMode::Traditional),
        Field::ComparatorPolarity => FieldValue::ComparatorPolarity(ComparatorPolarity::ActiveLow),
        Field::ComparatorLatch => FieldValue::ComparatorLatch(ComparatorLatch::NonLatching),
        Field::ComparatorQueue => FieldValue::ComparatorQueue(ComparatorQueue::Disabled),
    }
}

/// Changes to be applied to the configuration register.
///
/// Fields left unset keep their current value. Build up the changes and pass them to
/// [`ADS101x::configure`]:
///
/// ```rust
/// # use ads101x_hal::settings::{ConfigurationChanges, DataRate, GainMode};
/// let mut changes = ConfigurationChanges::new();
/// changes
///     .with_data_rate(DataRate::Sps250)
///     .with_gain_mode(GainMode::FS_4_096V);
/// ```
///
/// Whether the chip implements each field is only checked when the changes are
/// applied.
///
/// [`ADS101x::configure`]: crate::ADS101x::configure
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigurationChanges {
    values: [Option<FieldValue>; Field::COUNT],
}

impl ConfigurationChanges {
    /// Create an empty set of changes.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no field has been changed.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Requested values, most-significant bit first.
    pub fn requested(&self) -> impl Iterator<Item = FieldValue> + '_ {
        self.values.iter().flatten().copied()
    }

    /// Request any field value.
    pub fn with(&mut self, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into();
        self.values[value.field().index()] = Some(value);
        self
    }

    /// Request `value` for `field`, checking that it belongs to the field.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFieldValue`] if `value` is not one of the field's symbols.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<&mut Self, Error> {
        if bit_field(field).code_for(value).is_none() {
            return Err(Error::InvalidFieldValue { field, value: Some(value) });
        }
        self.values[field.index()] = Some(value);
        Ok(self)
    }

    /// Start a single conversion when written.
    ///
    /// Only meaningful when the device is in [`OperationMode::OneShot`]. Prefer
    /// [`ADS101x::one_shot_conversion`](crate::ADS101x::one_shot_conversion).
    pub fn start_one_shot(&mut self) -> &mut Self {
        self.with(OperationalStatus::StartOneShot)
    }

    /// Change the input multiplexer (ADS1015 only).
    pub fn with_input_multiplexer(&mut self, mux: InputMultiplexer) -> &mut Self {
        self.with(mux)
    }

    /// Change the gain amplifier full-scale range (ADS1014 and ADS1015 only).
    pub fn with_gain_mode(&mut self, gain: GainMode) -> &mut Self {
        self.with(gain)
    }

    /// Change between continuous and single-shot conversion.
    pub fn with_operation_mode(&mut self, mode: OperationMode) -> &mut Self {
        self.with(mode)
    }

    /// Change the data rate.
    pub fn with_data_rate(&mut self, rate: DataRate) -> &mut Self {
        self.with(rate)
    }

    /// Change the comparator mode (ADS1014 and ADS1015 only).
    pub fn with_comparator_mode(&mut self, mode: ComparatorMode) -> &mut Self {
        self.with(mode)
    }

    /// Change the ALERT/RDY polarity (ADS1014 and ADS1015 only).
    pub fn with_comparator_polarity(&mut self, polarity: ComparatorPolarity) -> &mut Self {
        self.with(polarity)
    }

    /// Change ALERT/RDY latching (ADS1014 and ADS1015 only).
    pub fn with_comparator_latch(&mut self, latch: ComparatorLatch) -> &mut Self {
        self.with(latch)
    }

    /// Change the comparator queue (ADS1014 and ADS1015 only).
    pub fn with_comparator_queue(&mut self, queue: ComparatorQueue) -> &mut Self {
        self.with(queue)
    }
}
