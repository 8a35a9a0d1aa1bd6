//! This module defines the canonical, type-safe representation of the element
//! types a sample buffer can carry.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The canonical, internal representation of an element type.
///
/// This enum replaces string-based dtype descriptions at every API boundary,
/// so kernels receive a closed set of variants instead of re-parsing names.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl SampleType {
    /// Size of one element in bytes.
    pub fn byte_width(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Returns `true` if the data type is a signed integer.
    pub fn is_signed_int(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns `true` if the data type is a floating-point number.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns `true` for any integer type, signed or not.
    pub fn is_integer(&self) -> bool {
        !self.is_float()
    }
}

/// Provides the canonical string representation for a `SampleType`.
impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Parses the dtype spellings pipelines commonly pass around: the canonical
/// variant names, lowercase names, and array-protocol codes with an optional
/// native/little-endian prefix (`"u1"`, `"<f4"`, `"B"`, `"H"`, ...).
impl FromStr for SampleType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start_matches(&['<', '=', '|'][..]);
        let parsed = match trimmed {
            "Int8" | "int8" | "i1" | "b" => Self::Int8,
            "Int16" | "int16" | "i2" | "h" => Self::Int16,
            "Int32" | "int32" | "i4" | "i" => Self::Int32,
            "Int64" | "int64" | "i8" | "q" => Self::Int64,
            "UInt8" | "uint8" | "u1" | "B" => Self::UInt8,
            "UInt16" | "uint16" | "u2" | "H" => Self::UInt16,
            "UInt32" | "uint32" | "u4" | "I" => Self::UInt32,
            "UInt64" | "uint64" | "u8" | "Q" => Self::UInt64,
            "Float32" | "float32" | "f4" | "f" => Self::Float32,
            "Float64" | "float64" | "f8" | "d" => Self::Float64,
            _ => {
                return Err(CodecError::InvalidType(format!(
                    "unrecognized sample type '{}'",
                    s
                )))
            }
        };
        Ok(parsed)
    }
}
