//! Chip variants and the configuration fields each one implements.

use super::configuration::Configuration;
use super::fields::Field;

/// Member of the ADS101x family.
///
/// The three chips share a register map. The ADS1014 adds the gain amplifier,
/// the comparator and its threshold registers to the ADS1013, and the ADS1015 adds
/// the input multiplexer to the ADS1014.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// ADS1013: single input, fixed ±2.048 V range, no comparator.
    Ads1013,
    /// ADS1014: single input with gain amplifier and comparator.
    Ads1014,
    /// ADS1015: four-input multiplexer, gain amplifier and comparator.
    Ads1015,
}

impl Variant {
    /// Capability profile for this chip.
    pub fn profile(&self) -> &'static CapabilityProfile {
        match self {
            Variant::Ads1013 => &ADS1013,
            Variant::Ads1014 => &ADS1014,
            Variant::Ads1015 => &ADS1015,
        }
    }
}

/// The configuration fields and registers that exist on one chip variant.
#[derive(Debug)]
pub struct CapabilityProfile {
    /// Chip this profile describes.
    pub variant: Variant,
    /// Configuration fields the chip implements, most-significant bit first.
    pub fields: &'static [Field],
    /// Whether the chip has the Lo_thresh and Hi_thresh registers.
    pub has_thresholds: bool,
    /// Register contents after power-on or general-call reset.
    pub defaults: Configuration,
}

impl CapabilityProfile {
    /// Whether `field` is implemented by this chip.
    pub fn supports(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

const BASE_FIELDS: [Field; 3] = [Field::OperationalStatus, Field::OperationMode, Field::DataRate];

const EXTENDED_FIELDS: [Field; 8] = [
    Field::OperationalStatus,
    Field::GainMode,
    Field::OperationMode,
    Field::DataRate,
    Field::ComparatorMode,
    Field::ComparatorPolarity,
    Field::ComparatorLatch,
    Field::ComparatorQueue,
];

const MUX_FIELDS: [Field; 9] = Field::ALL;

static ADS1013: CapabilityProfile = CapabilityProfile {
    variant: Variant::Ads1013,
    fields: &BASE_FIELDS,
    has_thresholds: false,
    defaults: Configuration::power_on(Variant::Ads1013, &BASE_FIELDS),
};

static ADS1014: CapabilityProfile = CapabilityProfile {
    variant: Variant::Ads1014,
    fields: &EXTENDED_FIELDS,
    has_thresholds: true,
    defaults: Configuration::power_on(Variant::Ads1014, &EXTENDED_FIELDS),
};

static ADS1015: CapabilityProfile = CapabilityProfile {
    variant: Variant::Ads1015,
    fields: &MUX_FIELDS,
    has_thresholds: true,
    defaults: Configuration::power_on(Variant::Ads1015, &MUX_FIELDS),
};
