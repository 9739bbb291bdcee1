//! Bit-field layout of the configuration register.
//!
//! The register is two bytes, written and read most-significant byte first:
//!
//! ```text
//! byte 0:  | OS | MUX[2:0] | PGA[2:0] | MODE |
//! byte 1:  | DR[2:0] | COMP_MODE | COMP_POL | COMP_LAT | COMP_QUE[1:0] |
//! ```
//!
//! Each field has two explicit tables. The decode map is indexed by the raw code and
//! covers every bit pattern the field can hold, so decoding never fails. The encode
//! map lists every symbol the field accepts with the single code written for it.
//! Where the datasheet gives several codes the same meaning (the 3300 SPS data rate
//! and the ±0.256 V gain), the decode map repeats the symbol and the encode map
//! picks the lowest code.

use bit_field::BitField as _;

use super::fields::{
    ComparatorLatch, ComparatorMode, ComparatorPolarity, ComparatorQueue, DataRate, Field,
    FieldValue, GainMode, InputMultiplexer, OperationMode, OperationalStatus,
};

/// Position, width and symbol tables of one configuration register field.
#[derive(Debug)]
pub struct BitField {
    /// Field described by this entry.
    pub field: Field,
    /// Register byte holding the field, 0 being the most-significant byte.
    pub byte: usize,
    /// Bit offset of the field's least-significant bit within its byte.
    pub offset: usize,
    /// Width of the field in bits.
    pub width: usize,
    /// Symbol for each raw code, indexed by code.
    decode_map: &'static [FieldValue],
    /// Raw code for each accepted symbol.
    encode_map: &'static [(FieldValue, u8)],
}

impl BitField {
    /// Extract this field from the raw register bytes.
    pub fn decode(&self, bytes: [u8; 2]) -> FieldValue {
        let code = bytes[self.byte].get_bits(self.offset..self.offset + self.width);
        // The table checks guarantee one entry per code.
        self.decode_map[code as usize]
    }

    /// Look up the raw code for `value`, if it is part of this field's domain.
    pub fn code_for(&self, value: FieldValue) -> Option<u8> {
        self.encode_map
            .iter()
            .find(|(symbol, _)| *symbol == value)
            .map(|&(_, code)| code)
    }

    /// Place `code` into this field's bits of `bytes`.
    pub(crate) fn insert(&self, bytes: &mut [u8; 2], code: u8) {
        bytes[self.byte].set_bits(self.offset..self.offset + self.width, code);
    }
}

/// Look up the table entry for `field`.
pub fn bit_field(field: Field) -> &'static BitField {
    &CONFIG_BITS[field.index()]
}

use FieldValue as V;

const STATUS_DECODE: [FieldValue; 2] = [
    V::OperationalStatus(OperationalStatus::Converting),
    V::OperationalStatus(OperationalStatus::NotConverting),
];

// Only a start request sets the bit; everything else leaves the device alone.
const STATUS_ENCODE: [(FieldValue, u8); 4] = [
    (V::OperationalStatus(OperationalStatus::NoOp), 0b0),
    (V::OperationalStatus(OperationalStatus::StartOneShot), 0b1),
    (V::OperationalStatus(OperationalStatus::Converting), 0b0),
    (V::OperationalStatus(OperationalStatus::NotConverting), 0b0),
];

const MUX_DECODE: [FieldValue; 8] = [
    V::InputMultiplexer(InputMultiplexer::Ain0_Ain1),
    V::InputMultiplexer(InputMultiplexer::Ain0_Ain3),
    V::InputMultiplexer(InputMultiplexer::Ain1_Ain3),
    V::InputMultiplexer(InputMultiplexer::Ain2_Ain3),
    V::InputMultiplexer(InputMultiplexer::Ain0_Gnd),
    V::InputMultiplexer(InputMultiplexer::Ain1_Gnd),
    V::InputMultiplexer(InputMultiplexer::Ain2_Gnd),
    V::InputMultiplexer(InputMultiplexer::Ain3_Gnd),
];

const MUX_ENCODE: [(FieldValue, u8); 8] = [
    (V::InputMultiplexer(InputMultiplexer::Ain0_Ain1), 0b000),
    (V::InputMultiplexer(InputMultiplexer::Ain0_Ain3), 0b001),
    (V::InputMultiplexer(InputMultiplexer::Ain1_Ain3), 0b010),
    (V::InputMultiplexer(InputMultiplexer::Ain2_Ain3), 0b011),
    (V::InputMultiplexer(InputMultiplexer::Ain0_Gnd), 0b100),
    (V::InputMultiplexer(InputMultiplexer::Ain1_Gnd), 0b101),
    (V::InputMultiplexer(InputMultiplexer::Ain2_Gnd), 0b110),
    (V::InputMultiplexer(InputMultiplexer::Ain3_Gnd), 0b111),
];

const GAIN_DECODE: [FieldValue; 8] = [
    V::GainMode(GainMode::FS_6_144V),
    V::GainMode(GainMode::FS_4_096V),
    V::GainMode(GainMode::FS_2_048V),
    V::GainMode(GainMode::FS_1_024V),
    V::GainMode(GainMode::FS_0_512V),
    V::GainMode(GainMode::FS_0_256V),
    V::GainMode(GainMode::FS_0_256V),
    V::GainMode(GainMode::FS_0_256V),
];

const GAIN_ENCODE: [(FieldValue, u8); 6] = [
    (V::GainMode(GainMode::FS_6_144V), 0b000),
    (V::GainMode(GainMode::FS_4_096V), 0b001),
    (V::GainMode(GainMode::FS_2_048V), 0b010),
    (V::GainMode(GainMode::FS_1_024V), 0b011),
    (V::GainMode(GainMode::FS_0_512V), 0b100),
    (V::GainMode(GainMode::FS_0_256V), 0b101),
];

const MODE_DECODE: [FieldValue; 2] = [
    V::OperationMode(OperationMode::Continuous),
    V::OperationMode(OperationMode::OneShot),
];

const MODE_ENCODE: [(FieldValue, u8); 2] = [
    (V::OperationMode(OperationMode::Continuous), 0b0),
    (V::OperationMode(OperationMode::OneShot), 0b1),
];

const RATE_DECODE: [FieldValue; 8] = [
    V::DataRate(DataRate::Sps128),
    V::DataRate(DataRate::Sps250),
    V::DataRate(DataRate::Sps490),
    V::DataRate(DataRate::Sps920),
    V::DataRate(DataRate::Sps1600),
    V::DataRate(DataRate::Sps2400),
    V::DataRate(DataRate::Sps3300),
    V::DataRate(DataRate::Sps3300),
];

const RATE_ENCODE: [(FieldValue, u8); 7] = [
    (V::DataRate(DataRate::Sps128), 0b000),
    (V::DataRate(DataRate::Sps250), 0b001),
    (V::DataRate(DataRate::Sps490), 0b010),
    (V::DataRate(DataRate::Sps920), 0b011),
    (V::DataRate(DataRate::Sps1600), 0b100),
    (V::DataRate(DataRate::Sps2400), 0b101),
    (V::DataRate(DataRate::Sps3300), 0b110),
];

const COMP_MODE_DECODE: [FieldValue; 2] = [
    V::ComparatorMode(ComparatorMode::Traditional),
    V::ComparatorMode(ComparatorMode::Window),
];

const COMP_MODE_ENCODE: [(FieldValue, u8); 2] = [
    (V::ComparatorMode(ComparatorMode::Traditional), 0b0),
    (V::ComparatorMode(ComparatorMode::Window), 0b1),
];

const COMP_POL_DECODE: [FieldValue; 2] = [
    V::ComparatorPolarity(ComparatorPolarity::ActiveLow),
    V::ComparatorPolarity(ComparatorPolarity::ActiveHigh),
];

const COMP_POL_ENCODE: [(FieldValue, u8); 2] = [
    (V::ComparatorPolarity(ComparatorPolarity::ActiveLow), 0b0),
    (V::ComparatorPolarity(ComparatorPolarity::ActiveHigh), 0b1),
];

const COMP_LAT_DECODE: [FieldValue; 2] = [
    V::ComparatorLatch(ComparatorLatch::NonLatching),
    V::ComparatorLatch(ComparatorLatch::Latching),
];

const COMP_LAT_ENCODE: [(FieldValue, u8); 2] = [
    (V::ComparatorLatch(ComparatorLatch::NonLatching), 0b0),
    (V::ComparatorLatch(ComparatorLatch::Latching), 0b1),
];

const COMP_QUE_DECODE: [FieldValue; 4] = [
    V::ComparatorQueue(ComparatorQueue::OneConversion),
    V::ComparatorQueue(ComparatorQueue::TwoConversions),
    V::ComparatorQueue(ComparatorQueue::FourConversions),
    V::ComparatorQueue(ComparatorQueue::Disabled),
];

const COMP_QUE_ENCODE: [(FieldValue, u8); 4] = [
    (V::ComparatorQueue(ComparatorQueue::OneConversion), 0b00),
    (V::ComparatorQueue(ComparatorQueue::TwoConversions), 0b01),
    (V::ComparatorQueue(ComparatorQueue::FourConversions), 0b10),
    (V::ComparatorQueue(ComparatorQueue::Disabled), 0b11),
];

/// Every configuration register field, in [`Field`] order.
pub static CONFIG_BITS: [BitField; Field::COUNT] = [
    BitField {
        field: Field::OperationalStatus,
        byte: 0,
        offset: 7,
        width: 1,
        decode_map: &STATUS_DECODE,
        encode_map: &STATUS_ENCODE,
    },
    BitField {
        field: Field::InputMultiplexer,
        byte: 0,
        offset: 4,
        width: 3,
        decode_map: &MUX_DECODE,
        encode_map: &MUX_ENCODE,
    },
    BitField {
        field: Field::GainMode,
        byte: 0,
        offset: 1,
        width: 3,
        decode_map: &GAIN_DECODE,
        encode_map: &GAIN_ENCODE,
    },
    BitField {
        field: Field::OperationMode,
        byte: 0,
        offset: 0,
        width: 1,
        decode_map: &MODE_DECODE,
        encode_map: &MODE_ENCODE,
    },
    BitField {
        field: Field::DataRate,
        byte: 1,
        offset: 5,
        width: 3,
        decode_map: &RATE_DECODE,
        encode_map: &RATE_ENCODE,
    },
    BitField {
        field: Field::ComparatorMode,
        byte: 1,
        offset: 4,
        width: 1,
        decode_map: &COMP_MODE_DECODE,
        encode_map: &COMP_MODE_ENCODE,
    },
    BitField {
        field: Field::ComparatorPolarity,
        byte: 1,
        offset: 3,
        width: 1,
        decode_map: &COMP_POL_DECODE,
        encode_map: &COMP_POL_ENCODE,
    },
    BitField {
        field: Field::ComparatorLatch,
        byte: 1,
        offset: 2,
        width: 1,
        decode_map: &COMP_LAT_DECODE,
        encode_map: &COMP_LAT_ENCODE,
    },
    BitField {
        field: Field::ComparatorQueue,
        byte: 1,
        offset: 0,
        width: 2,
        decode_map: &COMP_QUE_DECODE,
        encode_map: &COMP_QUE_ENCODE,
    },
];
