//! This module serves as the public API and dispatcher for the collection of all
//! pure, stateless encode and decode kernels.
//!
//! It declares all kernel sub-modules and provides the unified dispatch
//! functions. An `Operation` names a kernel together with its parameters; the
//! dispatchers route it to the byte-buffer or typed-array entry point of that
//! kernel. Every operation is callable in both directions: a direction a
//! kernel does not implement returns `CodecError::Unsupported`.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::types::{SampleArray, SampleType};

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Predictors
pub mod delta;
pub mod floatpred;
pub mod xor_delta;

/// Bit and byte layout
pub mod bitorder;
pub mod packints;

/// Strip decoders
pub mod lzw;
pub mod packbits;

/// Pass-through entropy coders
pub mod bz2;
pub mod lz4;
pub mod lzma;
pub mod zlib;
pub mod zstd;

//==================================================================================
// 2. Operation Contract
//==================================================================================

/// A named kernel and its parameters.
///
/// Serialized as `{"op": "<name>", "params": {...}}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", content = "params", rename_all = "lowercase")]
pub enum Operation {
    /// Copies the input unchanged in both directions.
    #[serde(rename = "none")]
    Identity,
    BitOrder,
    Delta {
        #[serde(default = "default_predictor_axis")]
        axis: isize,
    },
    Xor {
        #[serde(default = "default_predictor_axis")]
        axis: isize,
    },
    /// `dtype` and `shape` describe the array when the input is a raw buffer.
    FloatPred {
        #[serde(default = "default_floatpred_axis")]
        axis: isize,
        #[serde(default)]
        dtype: Option<SampleType>,
        #[serde(default)]
        shape: Option<Vec<usize>>,
    },
    PackBits,
    Lzw {
        #[serde(default)]
        size_hint: Option<usize>,
        #[serde(default)]
        strict_eoi: bool,
    },
    PackInts {
        dtype: SampleType,
        numbits: u32,
        #[serde(default)]
        runlen: usize,
    },
    Zlib {
        level: u32,
    },
    Zstd {
        level: i32,
    },
    Lz4 {
        #[serde(default)]
        header: bool,
        #[serde(default)]
        size: Option<usize>,
    },
    Bz2 {
        level: u32,
    },
    Lzma {
        level: u32,
    },
    Lzf {
        #[serde(default)]
        header: bool,
    },
    Blosc {
        level: u32,
    },
}

fn default_predictor_axis() -> isize {
    -1
}

fn default_floatpred_axis() -> isize {
    -2
}

impl Operation {
    /// The registry name of the kernel.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Identity => "none",
            Operation::BitOrder => "bitorder",
            Operation::Delta { .. } => "delta",
            Operation::Xor { .. } => "xor",
            Operation::FloatPred { .. } => "floatpred",
            Operation::PackBits => "packbits",
            Operation::Lzw { .. } => "lzw",
            Operation::PackInts { .. } => "packints",
            Operation::Zlib { .. } => "zlib",
            Operation::Zstd { .. } => "zstd",
            Operation::Lz4 { .. } => "lz4",
            Operation::Bz2 { .. } => "bz2",
            Operation::Lzma { .. } => "lzma",
            Operation::Lzf { .. } => "lzf",
            Operation::Blosc { .. } => "blosc",
        }
    }
}

/// The error for codecs whose backend is not compiled into this library.
fn unavailable(codec: &str) -> CodecError {
    CodecError::unsupported(format!("{} is not available in this build", codec))
}

fn copy_bytes(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    output_buf.extend_from_slice(input_bytes);
    Ok(())
}

//==================================================================================
// 3. Public API (Unified Dispatchers)
//==================================================================================

/// The single, unified dispatcher for all byte-buffer ENCODE operations.
pub fn dispatch_encode(op: &Operation, input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    log::trace!("encode {} on {} bytes", op.name(), input_bytes.len());
    match op {
        Operation::Identity => copy_bytes(input_bytes, output_buf),
        Operation::BitOrder => bitorder::encode(input_bytes, output_buf),
        Operation::Delta { .. } => delta::encode(input_bytes, output_buf),
        Operation::Xor { .. } => xor_delta::encode(input_bytes, output_buf),
        Operation::PackBits => packbits::encode(input_bytes, output_buf),
        Operation::Lzw { .. } => lzw::encode(input_bytes, output_buf),
        Operation::Zlib { level } => zlib::encode(input_bytes, *level, output_buf),
        Operation::Zstd { level } => zstd::encode(input_bytes, *level, output_buf),
        Operation::Lz4 { header, .. } => lz4::encode(input_bytes, *header, output_buf),
        Operation::Bz2 { level } => bz2::encode(input_bytes, *level, output_buf),
        Operation::Lzma { level } => lzma::encode(input_bytes, *level, output_buf),
        Operation::FloatPred { .. } | Operation::PackInts { .. } => {
            // A raw buffer is a flat run of bytes to the array kernels.
            let samples = SampleArray::from_bytes(SampleType::UInt8, &[input_bytes.len()], input_bytes)?;
            let encoded = dispatch_encode_array(op, &samples)?;
            output_buf.clear();
            output_buf.extend_from_slice(&encoded.to_bytes());
            Ok(())
        }
        Operation::Lzf { .. } | Operation::Blosc { .. } => Err(unavailable(op.name())),
    }
}

/// The single, unified dispatcher for all byte-buffer DECODE operations.
///
/// Kernels that produce typed arrays write their samples as native-endian bytes.
pub fn dispatch_decode(op: &Operation, input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    log::trace!("decode {} on {} bytes", op.name(), input_bytes.len());
    match op {
        Operation::Identity => copy_bytes(input_bytes, output_buf),
        Operation::BitOrder => bitorder::decode(input_bytes, output_buf),
        Operation::Delta { .. } => delta::decode(input_bytes, output_buf),
        Operation::Xor { .. } => xor_delta::decode(input_bytes, output_buf),
        Operation::FloatPred { axis, dtype, shape } => {
            let dtype = dtype.ok_or_else(|| {
                CodecError::InvalidType("floatpred on a raw buffer needs a dtype".to_string())
            })?;
            let shape = shape.as_deref().ok_or_else(|| {
                CodecError::InvalidShape("floatpred on a raw buffer needs a shape".to_string())
            })?;
            floatpred::decode(input_bytes, dtype, shape, *axis, output_buf)
        }
        Operation::PackBits => packbits::decode(input_bytes, output_buf),
        Operation::Lzw { size_hint, strict_eoi } => {
            let status = lzw::decode_with_status(input_bytes, output_buf, *size_hint)?;
            if *strict_eoi && !status.is_complete() {
                return Err(CodecError::Format("LZW strip ends without an EOI code".to_string()));
            }
            Ok(())
        }
        Operation::PackInts { dtype, numbits, runlen } => {
            let decoded = packints::decode(input_bytes, *dtype, *numbits, *runlen)?;
            output_buf.clear();
            output_buf.extend_from_slice(&decoded.to_bytes());
            Ok(())
        }
        Operation::Zlib { .. } => zlib::decode(input_bytes, output_buf),
        Operation::Zstd { .. } => zstd::decode(input_bytes, output_buf),
        Operation::Lz4 { header, size } => lz4::decode(input_bytes, *header, *size, output_buf),
        Operation::Bz2 { .. } => bz2::decode(input_bytes, output_buf),
        Operation::Lzma { .. } => lzma::decode(input_bytes, output_buf),
        Operation::Lzf { .. } | Operation::Blosc { .. } => Err(unavailable(op.name())),
    }
}

/// Dispatches an ENCODE operation over a typed array.
pub fn dispatch_encode_array(op: &Operation, data: &SampleArray) -> Result<SampleArray, CodecError> {
    match op {
        Operation::Identity => Ok(data.clone()),
        Operation::BitOrder => {
            let mut reversed = data.clone();
            bitorder::decode_array(&mut reversed)?;
            Ok(reversed)
        }
        Operation::Delta { axis } => delta::encode_array(data, *axis),
        Operation::Xor { axis } => xor_delta::encode_array(data, *axis),
        Operation::FloatPred { axis, .. } => floatpred::encode(data, *axis),
        Operation::PackInts { numbits, .. } => {
            let packed = packints::encode(data, *numbits)?;
            SampleArray::from_bytes(SampleType::UInt8, &[packed.len()], &packed)
        }
        _ => Err(CodecError::unsupported(format!("{} encode of typed arrays", op.name()))),
    }
}

/// Dispatches a DECODE operation over a typed array.
pub fn dispatch_decode_array(op: &Operation, data: &SampleArray) -> Result<SampleArray, CodecError> {
    match op {
        Operation::Identity => Ok(data.clone()),
        Operation::BitOrder => {
            let mut reversed = data.clone();
            bitorder::decode_array(&mut reversed)?;
            Ok(reversed)
        }
        Operation::Delta { axis } => delta::decode_array(data, *axis),
        Operation::Xor { axis } => xor_delta::decode_array(data, *axis),
        Operation::FloatPred { axis, .. } => floatpred::decode_array(data, *axis),
        _ => Err(CodecError::unsupported(format!("{} decode of typed arrays", op.name()))),
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
