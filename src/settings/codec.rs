//! Conversion between [`Configuration`]s and raw configuration register bytes.

use super::configuration::Configuration;
use super::fields::Field;
use super::profile::Variant;
use super::table::bit_field;
use crate::error::Error;

/// Encode `config` into the two configuration register bytes.
///
/// Both bytes start at zero and only the fields of the configuration's variant are
/// written, so the result depends on nothing but `config`. A missing operational
/// status encodes as "no operation".
///
/// # Errors
///
/// [`Error::InvalidFieldValue`] if a value has no code in its field's table, or if
/// a field other than the operational status is missing.
pub fn encode(config: &Configuration) -> Result<[u8; 2], Error> {
    let mut bytes = [0u8; 2];
    for &field in config.variant().profile().fields {
        let entry = bit_field(field);
        let code = match config.get(field) {
            Some(value) => entry
                .code_for(value)
                .ok_or(Error::InvalidFieldValue { field, value: Some(value) })?,
            None if field == Field::OperationalStatus => 0,
            None => return Err(Error::InvalidFieldValue { field, value: None }),
        };
        entry.insert(&mut bytes, code);
    }
    Ok(bytes)
}

/// Decode the two configuration register bytes read from a `variant` chip.
///
/// Every bit pattern decodes to some value. Bits belonging to fields the variant
/// does not implement are ignored.
pub fn decode(variant: Variant, bytes: [u8; 2]) -> Configuration {
    let mut values = [None; Field::COUNT];
    for &field in variant.profile().fields {
        values[field.index()] = Some(bit_field(field).decode(bytes));
    }
    Configuration::from_values(variant, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{
        ComparatorLatch, ComparatorMode, ComparatorPolarity, ComparatorQueue,
        ConfigurationChanges, DataRate, FieldValue, GainMode, InputMultiplexer, OperationMode,
        OperationalStatus,
    };

    /// Every field except the write-only side of the operational status.
    fn without_status(config: &Configuration) -> Vec<FieldValue> {
        config
            .values()
            .filter(|value| value.field() != Field::OperationalStatus)
            .collect()
    }

    #[test]
    fn decode_power_on_register() {
        let config = decode(Variant::Ads1013, [0x85, 0x83]);
        assert_eq!(config.operational_status(), OperationalStatus::NotConverting);
        assert_eq!(config.operation_mode(), OperationMode::OneShot);
        assert_eq!(config.data_rate(), DataRate::Sps1600);
        assert_eq!(config.gain_mode(), None);
        assert_eq!(config.values().count(), 3);
    }

    #[test]
    fn decode_power_on_register_matches_defaults() {
        for variant in [Variant::Ads1013, Variant::Ads1014, Variant::Ads1015] {
            assert_eq!(decode(variant, [0x85, 0x83]), variant.profile().defaults);
        }
    }

    #[test]
    fn encode_defaults() {
        let defaults = Variant::Ads1015.profile().defaults;
        // Not-converting reads as 1 but writes as 0.
        assert_eq!(encode(&defaults).unwrap(), [0x05, 0x83]);
        let defaults = Variant::Ads1013.profile().defaults;
        assert_eq!(encode(&defaults).unwrap(), [0x01, 0x80]);
    }

    #[test]
    fn encode_ignores_fields_outside_profile() {
        // An ADS1013 leaves the gain, mux and comparator bits at zero.
        let current = Variant::Ads1013.profile().defaults;
        let mut changes = ConfigurationChanges::new();
        changes.with_data_rate(DataRate::Sps250);
        let merged = current.merge(&changes).unwrap();
        assert_eq!(encode(&merged).unwrap(), [0x01, 0x20]);
    }

    #[test]
    fn encode_start_one_shot() {
        let current = Variant::Ads1015.profile().defaults;
        let mut changes = ConfigurationChanges::new();
        changes.start_one_shot();
        let merged = current.merge(&changes).unwrap();
        assert_eq!(encode(&merged).unwrap(), [0x85, 0x83]);
    }

    #[test]
    fn encode_every_field() {
        let current = Variant::Ads1015.profile().defaults;
        let mut changes = ConfigurationChanges::new();
        changes
            .start_one_shot()
            .with_input_multiplexer(InputMultiplexer::Ain2_Gnd)
            .with_gain_mode(GainMode::FS_0_256V)
            .with_operation_mode(OperationMode::Continuous)
            .with_data_rate(DataRate::Sps3300)
            .with_comparator_mode(ComparatorMode::Window)
            .with_comparator_polarity(ComparatorPolarity::ActiveHigh)
            .with_comparator_latch(ComparatorLatch::Latching)
            .with_comparator_queue(ComparatorQueue::TwoConversions);
        let merged = current.merge(&changes).unwrap();
        assert_eq!(encode(&merged).unwrap(), [0b1_110_101_0, 0b110_1_1_1_01]);
    }

    #[test]
    fn round_trip_all_values() {
        let muxes = [
            InputMultiplexer::Ain0_Ain1,
            InputMultiplexer::Ain0_Ain3,
            InputMultiplexer::Ain1_Ain3,
            InputMultiplexer::Ain2_Ain3,
            InputMultiplexer::Ain0_Gnd,
            InputMultiplexer::Ain1_Gnd,
            InputMultiplexer::Ain2_Gnd,
            InputMultiplexer::Ain3_Gnd,
        ];
        let gains = [
            GainMode::FS_6_144V,
            GainMode::FS_4_096V,
            GainMode::FS_2_048V,
            GainMode::FS_1_024V,
            GainMode::FS_0_512V,
            GainMode::FS_0_256V,
        ];
        let rates = [
            DataRate::Sps128,
            DataRate::Sps250,
            DataRate::Sps490,
            DataRate::Sps920,
            DataRate::Sps1600,
            DataRate::Sps2400,
            DataRate::Sps3300,
        ];
        let queues = [
            ComparatorQueue::OneConversion,
            ComparatorQueue::TwoConversions,
            ComparatorQueue::FourConversions,
            ComparatorQueue::Disabled,
        ];

        let current = Variant::Ads1015.profile().defaults;
        for (i, &mux) in muxes.iter().enumerate() {
            for (j, &gain) in gains.iter().enumerate() {
                for &rate in &rates {
                    let mut changes = ConfigurationChanges::new();
                    changes
                        .with_input_multiplexer(mux)
                        .with_gain_mode(gain)
                        .with_data_rate(rate)
                        .with_comparator_queue(queues[(i + j) % queues.len()]);
                    if (i + j) % 2 == 0 {
                        changes
                            .with_operation_mode(OperationMode::Continuous)
                            .with_comparator_mode(ComparatorMode::Window)
                            .with_comparator_polarity(ComparatorPolarity::ActiveHigh)
                            .with_comparator_latch(ComparatorLatch::Latching);
                    }
                    let config = current.merge(&changes).unwrap();
                    let decoded = decode(Variant::Ads1015, encode(&config).unwrap());
                    assert_eq!(without_status(&decoded), without_status(&config));
                }
            }
        }
    }

    #[test]
    fn round_trip_ads1013() {
        let current = Variant::Ads1013.profile().defaults;
        for mode in [OperationMode::Continuous, OperationMode::OneShot] {
            let mut changes = ConfigurationChanges::new();
            changes.with_operation_mode(mode).with_data_rate(DataRate::Sps490);
            let config = current.merge(&changes).unwrap();
            let decoded = decode(Variant::Ads1013, encode(&config).unwrap());
            assert_eq!(without_status(&decoded), without_status(&config));
        }
    }

    #[test]
    fn decode_ignores_bits_outside_profile() {
        let config = decode(Variant::Ads1014, [0xFF, 0xFF]);
        assert_eq!(config.input_multiplexer(), None);
        assert_eq!(config.gain_mode(), Some(GainMode::FS_0_256V));
        assert_eq!(config.data_rate(), DataRate::Sps3300);
        assert_eq!(config.comparator_queue(), Some(ComparatorQueue::Disabled));
    }
}
