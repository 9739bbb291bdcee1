use std::convert::Infallible;
use std::fmt;

use crate::bus::RegisterPointer;
use crate::settings::{Field, FieldValue};

/// Wrapper for problems when configuring or reading the ADS101x.
///
/// The type parameter is the error type of the underlying [`RegisterBus`]. Functions
/// that never touch the bus (such as [`settings::encode`]) use the default
/// [`Infallible`].
///
/// [`RegisterBus`]: crate::bus::RegisterBus
/// [`settings::encode`]: crate::settings::encode
#[derive(Debug)]
pub enum Error<E = Infallible> {
    /// A value is not part of the field's enumeration.
    ///
    /// This indicates a programming error and is never corrected silently. `value`
    /// is `None` when a required field was missing altogether.
    InvalidFieldValue {
        /// Field being written.
        field: Field,
        /// Offending value.
        value: Option<FieldValue>,
    },
    /// The field or register does not exist on the active chip variant.
    ///
    /// For example, changing the gain on an ADS1013, or reading a comparator
    /// threshold from one. Also returned for a single-shot conversion in continuous
    /// mode.
    UnsupportedOperation(Unsupported),
    /// A comparator threshold outside the 12-bit range `-2048..=2047`.
    OutOfRange(i16),
    /// A bounded single-shot conversion was still in progress after the given
    /// number of status polls.
    ///
    /// The device will still complete the conversion.
    ConversionTimeout {
        /// Number of times the status was read.
        polls: u32,
    },
    /// The bus transaction failed.
    ///
    /// No retry is attempted.
    Transport(E),
}

/// The part of the device that the active chip variant does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    /// Configuration register field.
    Field(Field),
    /// Device register.
    Register(RegisterPointer),
    /// Single-shot conversion while the device is in continuous mode, where it
    /// never reports a finished conversion.
    ContinuousMode,
}

impl Error<Infallible> {
    /// Change the transport type of a bus-free error.
    pub(crate) fn lift<E>(self) -> Error<E> {
        match self {
            Error::InvalidFieldValue { field, value } => Error::InvalidFieldValue { field, value },
            Error::UnsupportedOperation(what) => Error::UnsupportedOperation(what),
            Error::OutOfRange(value) => Error::OutOfRange(value),
            Error::ConversionTimeout { polls } => Error::ConversionTimeout { polls },
            Error::Transport(never) => match never {},
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFieldValue { field, value: Some(value) } => {
                write!(f, "{value:?} is not a valid value for {field:?}")
            }
            Error::InvalidFieldValue { field, value: None } => {
                write!(f, "no value given for {field:?}")
            }
            Error::UnsupportedOperation(Unsupported::Field(field)) => {
                write!(f, "{field:?} is not implemented by this chip")
            }
            Error::UnsupportedOperation(Unsupported::Register(register)) => {
                write!(f, "{register:?} register is not implemented by this chip")
            }
            Error::UnsupportedOperation(Unsupported::ContinuousMode) => {
                write!(f, "single-shot conversion requested in continuous mode")
            }
            Error::OutOfRange(value) => {
                write!(f, "threshold {value} outside the range -2048..=2047")
            }
            Error::ConversionTimeout { polls } => {
                write!(f, "conversion still in progress after {polls} polls")
            }
            Error::Transport(e) => write!(f, "bus error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for Error<E> {}
