//! Symbolic values for each field of the configuration register.
//!
//! Every field of the 16-bit configuration register has its own enum here. The
//! mapping between these symbols and the raw bit patterns lives in the bit-field
//! table (see [`CONFIG_BITS`]), not on the enums themselves.
//!
//! [`CONFIG_BITS`]: crate::settings::CONFIG_BITS
//!
//! ## Datasheet
//!
//! See section 8.6.3 (Config Register) of the ADS101x datasheet for the register
//! layout and the meaning of each field.

use std::time::Duration;

/// Name of a configuration register field.
///
/// The discriminant is the field's index into a [`Configuration`].
///
/// [`Configuration`]: crate::settings::Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Operational status (OS), bit 15.
    OperationalStatus,
    /// Input multiplexer (MUX), bits 14..=12. ADS1015 only.
    InputMultiplexer,
    /// Programmable gain amplifier (PGA), bits 11..=9. ADS1014 and ADS1015 only.
    GainMode,
    /// Device operating mode (MODE), bit 8.
    OperationMode,
    /// Data rate (DR), bits 7..=5.
    DataRate,
    /// Comparator mode (COMP_MODE), bit 4. ADS1014 and ADS1015 only.
    ComparatorMode,
    /// Comparator polarity (COMP_POL), bit 3. ADS1014 and ADS1015 only.
    ComparatorPolarity,
    /// Latching comparator (COMP_LAT), bit 2. ADS1014 and ADS1015 only.
    ComparatorLatch,
    /// Comparator queue and disable (COMP_QUE), bits 1..=0. ADS1014 and ADS1015 only.
    ComparatorQueue,
}

impl Field {
    /// Number of distinct configuration fields.
    pub const COUNT: usize = 9;

    /// All fields, most-significant bit first.
    pub const ALL: [Field; Field::COUNT] = [
        Field::OperationalStatus,
        Field::InputMultiplexer,
        Field::GainMode,
        Field::OperationMode,
        Field::DataRate,
        Field::ComparatorMode,
        Field::ComparatorPolarity,
        Field::ComparatorLatch,
        Field::ComparatorQueue,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Operational status or single-shot conversion start.
///
/// This field reads differently to how it is written. When read, it reports whether
/// a conversion is in progress. When written, a 1 starts a single conversion (only
/// meaningful in [`OperationMode::OneShot`]) and a 0 has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationalStatus {
    /// The device is performing a conversion. Read-side value of bit 15 clear.
    Converting,
    /// The device is not performing a conversion (power-on default). Read-side
    /// value of bit 15 set.
    NotConverting,
    /// Start a single conversion. Write-side value of bit 15 set.
    StartOneShot,
    /// Leave the conversion state alone. Write-side value of bit 15 clear.
    NoOp,
}

/// Input multiplexer configuration (ADS1015 only).
///
/// Each case names the positive and negative inputs (AINp and AINn) of the
/// converter. `Gnd` cases are single-ended measurements.
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMultiplexer {
    /// AINp = AIN0 and AINn = AIN1 (power-on default).
    #[default]
    Ain0_Ain1,
    /// AINp = AIN0 and AINn = AIN3.
    Ain0_Ain3,
    /// AINp = AIN1 and AINn = AIN3.
    Ain1_Ain3,
    /// AINp = AIN2 and AINn = AIN3.
    Ain2_Ain3,
    /// AINp = AIN0 and AINn = GND.
    Ain0_Gnd,
    /// AINp = AIN1 and AINn = GND.
    Ain1_Gnd,
    /// AINp = AIN2 and AINn = GND.
    Ain2_Gnd,
    /// AINp = AIN3 and AINn = GND.
    Ain3_Gnd,
}

/// Programmable gain amplifier full-scale range (ADS1014 and ADS1015 only).
///
/// The ADS1013 has no gain amplifier and always behaves as if set to ±2.048 V.
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GainMode {
    /// FSR = ±6.144 V.
    FS_6_144V,
    /// FSR = ±4.096 V.
    FS_4_096V,
    /// FSR = ±2.048 V (power-on default).
    #[default]
    FS_2_048V,
    /// FSR = ±1.024 V.
    FS_1_024V,
    /// FSR = ±0.512 V.
    FS_0_512V,
    /// FSR = ±0.256 V.
    ///
    /// Three bit patterns (`0b101`, `0b110`, `0b111`) select this range.
    FS_0_256V,
}

impl GainMode {
    /// Positive full-scale range in millivolts.
    pub fn full_scale_millivolts(&self) -> u16 {
        match self {
            GainMode::FS_6_144V => 6144,
            GainMode::FS_4_096V => 4096,
            GainMode::FS_2_048V => 2048,
            GainMode::FS_1_024V => 1024,
            GainMode::FS_0_512V => 512,
            GainMode::FS_0_256V => 256,
        }
    }

    /// Millivolts per least-significant bit of a 12-bit reading.
    ///
    /// This is the full-scale range divided by 2048, so 1.0 at the default ±2.048 V.
    pub fn gain_factor(&self) -> f64 {
        f64::from(self.full_scale_millivolts()) / 2048.0
    }
}

/// Continuous or single-shot conversion mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Continuous-conversion mode.
    Continuous,
    /// Single-shot (power-down) mode (power-on default).
    #[default]
    OneShot,
}

/// Conversion data rate, in samples per second.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DataRate {
    /// 128 SPS.
    Sps128,
    /// 250 SPS.
    Sps250,
    /// 490 SPS.
    Sps490,
    /// 920 SPS.
    Sps920,
    /// 1600 SPS (power-on default).
    #[default]
    Sps1600,
    /// 2400 SPS.
    Sps2400,
    /// 3300 SPS.
    ///
    /// Two bit patterns (`0b110`, `0b111`) select this rate.
    Sps3300,
}

impl DataRate {
    /// Number of samples per second.
    pub fn samples_per_second(&self) -> u32 {
        match self {
            DataRate::Sps128 => 128,
            DataRate::Sps250 => 250,
            DataRate::Sps490 => 490,
            DataRate::Sps920 => 920,
            DataRate::Sps1600 => 1600,
            DataRate::Sps2400 => 2400,
            DataRate::Sps3300 => 3300,
        }
    }

    /// Time between two samples, rounded down to the microsecond.
    pub fn interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.samples_per_second()))
    }
}

/// Comparator operating mode (ADS1014 and ADS1015 only).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorMode {
    /// Traditional comparator with hysteresis (power-on default).
    #[default]
    Traditional,
    /// Window comparator.
    Window,
}

/// Polarity of the ALERT/RDY pin (ADS1014 and ADS1015 only).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorPolarity {
    /// Active low (power-on default).
    #[default]
    ActiveLow,
    /// Active high.
    ActiveHigh,
}

/// Whether the ALERT/RDY pin latches once asserted (ADS1014 and ADS1015 only).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorLatch {
    /// The pin de-asserts when the reading returns within the thresholds
    /// (power-on default).
    #[default]
    NonLatching,
    /// The pin stays asserted until the conversion data is read.
    Latching,
}

/// Number of successive out-of-threshold conversions before ALERT/RDY asserts
/// (ADS1014 and ADS1015 only).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorQueue {
    /// Assert after one conversion.
    OneConversion,
    /// Assert after two conversions.
    TwoConversions,
    /// Assert after four conversions.
    FourConversions,
    /// Disable the comparator and put ALERT/RDY in high-impedance
    /// (power-on default).
    #[default]
    Disabled,
}

/// A symbolic value of any configuration field.
///
/// Values are created with `From` from the individual field enums:
///
/// ```rust
/// # use ads101x_hal::settings::{DataRate, Field, FieldValue};
/// let value = FieldValue::from(DataRate::Sps250);
/// assert_eq!(value.field(), Field::DataRate);
/// ```
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    OperationalStatus(OperationalStatus),
    InputMultiplexer(InputMultiplexer),
    GainMode(GainMode),
    OperationMode(OperationMode),
    DataRate(DataRate),
    ComparatorMode(ComparatorMode),
    ComparatorPolarity(ComparatorPolarity),
    ComparatorLatch(ComparatorLatch),
    ComparatorQueue(ComparatorQueue),
}

impl FieldValue {
    /// The field this value belongs to.
    pub fn field(&self) -> Field {
        match self {
            FieldValue::OperationalStatus(_) => Field::OperationalStatus,
            FieldValue::InputMultiplexer(_) => Field::InputMultiplexer,
            FieldValue::GainMode(_) => Field::GainMode,
            FieldValue::OperationMode(_) => Field::OperationMode,
            FieldValue::DataRate(_) => Field::DataRate,
            FieldValue::ComparatorMode(_) => Field::ComparatorMode,
            FieldValue::ComparatorPolarity(_) => Field::ComparatorPolarity,
            FieldValue::ComparatorLatch(_) => Field::ComparatorLatch,
            FieldValue::ComparatorQueue(_) => Field::ComparatorQueue,
        }
    }
}

/// Implement `From<$symbol> for FieldValue`.
#[doc(hidden)]
macro_rules! field_value_from {
    ($($symbol:ident),+ $(,)?) => {
        $(
            impl From<$symbol> for FieldValue {
                fn from(value: $symbol) -> Self {
                    FieldValue::$symbol(value)
                }
            }
        )+
    };
}

field_value_from!(
    OperationalStatus,
    InputMultiplexer,
    GainMode,
    OperationMode,
    DataRate,
    ComparatorMode,
    ComparatorPolarity,
    ComparatorLatch,
    ComparatorQueue,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_factors() {
        assert_eq!(GainMode::FS_6_144V.gain_factor(), 3.0);
        assert_eq!(GainMode::FS_4_096V.gain_factor(), 2.0);
        assert_eq!(GainMode::FS_2_048V.gain_factor(), 1.0);
        assert_eq!(GainMode::FS_1_024V.gain_factor(), 0.5);
        assert_eq!(GainMode::FS_0_512V.gain_factor(), 0.25);
        assert_eq!(GainMode::FS_0_256V.gain_factor(), 0.125);
    }

    #[test]
    fn data_rate_interval() {
        assert_eq!(DataRate::Sps128.interval(), Duration::from_micros(7812));
        assert_eq!(DataRate::Sps1600.interval(), Duration::from_micros(625));
        assert_eq!(DataRate::Sps3300.interval(), Duration::from_micros(303));
    }

    #[test]
    fn field_indices_follow_all() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }
}
