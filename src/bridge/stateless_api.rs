// In: src/bridge/stateless_api.rs

//! Name-based entry points. Each call resolves a codec name plus a
//! `CodecConfig` into a `kernels::Operation` and runs it once.

use crate::bridge::imaging;
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::kernels::{self, packints, Operation};
use crate::types::{SampleArray, SampleType};

/// Names of the codecs that `resolve_operation` understands.
pub const KERNEL_CODECS: [&str; 14] = [
    "none", "bitorder", "delta", "xor", "floatpred", "packbits", "lzw", "zlib", "zstd", "lz4", "bz2", "lzma", "lzf", "blosc",
];

/// Builds the operation for `name`, taking every parameter from `config`.
///
/// `packints` needs a dtype and bit width, so it is only reachable through an
/// explicit `Operation` (see [`decode_with_operation`]).
pub fn resolve_operation(name: &str, config: &CodecConfig) -> Result<Operation, CodecError> {
    let op = match name {
        "none" => Operation::Identity,
        "bitorder" => Operation::BitOrder,
        "delta" => Operation::Delta {
            axis: config.predictor_axis,
        },
        "xor" => Operation::Xor {
            axis: config.predictor_axis,
        },
        "floatpred" => Operation::FloatPred {
            axis: config.floatpred_axis,
            dtype: None,
            shape: None,
        },
        "packbits" => Operation::PackBits,
        "lzw" => Operation::Lzw {
            size_hint: None,
            strict_eoi: config.lzw_strict_eoi,
        },
        "zlib" => Operation::Zlib {
            level: config.levels.zlib,
        },
        "zstd" => Operation::Zstd {
            level: config.levels.zstd,
        },
        "lz4" => Operation::Lz4 {
            header: config.lz4_header,
            size: None,
        },
        "bz2" => Operation::Bz2 {
            level: config.levels.bz2,
        },
        "lzma" => Operation::Lzma {
            level: config.levels.lzma,
        },
        "lzf" => Operation::Lzf { header: false },
        "blosc" => Operation::Blosc { level: 9 },
        "packints" => {
            return Err(CodecError::InvalidType(
                "packints needs a dtype and numbits; pass an explicit operation".to_string(),
            ))
        }
        _ => return Err(CodecError::unsupported(format!("unknown codec '{}'", name))),
    };
    Ok(op)
}

/// Encodes a byte buffer with the codec called `name`.
///
/// Raw bytes given to `packints` or an image codec are treated as a flat run
/// of `UInt8` samples.
pub fn encode(name: &str, input_bytes: &[u8], config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    if name == "packints" || imaging::IMAGE_CODECS.contains(&name) {
        let samples = SampleArray::from_bytes(SampleType::UInt8, &[input_bytes.len()], input_bytes)?;
        return if name == "packints" {
            packints::encode(&samples, 8)
        } else {
            encode_image(name, &samples)
        };
    }
    let op = resolve_operation(name, config)?;
    let mut output_buf = Vec::new();
    kernels::dispatch_encode(&op, input_bytes, &mut output_buf)?;
    Ok(output_buf)
}

/// Decodes a byte buffer with the codec called `name`.
///
/// Image codecs return the decoded pixels as native-endian bytes; use
/// [`decode_image`] to keep their shape and sample type.
pub fn decode(name: &str, input_bytes: &[u8], config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    if imaging::IMAGE_CODECS.contains(&name) {
        return Ok(imaging::decode(name, input_bytes)?.to_bytes());
    }
    let op = resolve_operation(name, config)?;
    let mut output_buf = Vec::new();
    kernels::dispatch_decode(&op, input_bytes, &mut output_buf)?;
    Ok(output_buf)
}

/// Decodes an image container into a typed sample array.
pub fn decode_image(name: &str, input_bytes: &[u8]) -> Result<SampleArray, CodecError> {
    imaging::decode(name, input_bytes)
}

/// Encodes a typed sample array into an image container.
pub fn encode_image(name: &str, data: &SampleArray) -> Result<Vec<u8>, CodecError> {
    imaging::encode(name, data)
}

/// Encodes a typed array with the codec called `name`.
pub fn encode_array(name: &str, data: &SampleArray, config: &CodecConfig) -> Result<SampleArray, CodecError> {
    let op = resolve_operation(name, config)?;
    kernels::dispatch_encode_array(&op, data)
}

/// Decodes a typed array with the codec called `name`.
pub fn decode_array(name: &str, data: &SampleArray, config: &CodecConfig) -> Result<SampleArray, CodecError> {
    let op = resolve_operation(name, config)?;
    kernels::dispatch_decode_array(&op, data)
}

/// Decodes a byte buffer with an operation given as JSON, e.g.
/// `{"op": "packints", "params": {"dtype": "UInt8", "numbits": 2}}`.
pub fn decode_with_operation(op_json: &str, input_bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let op: Operation = serde_json::from_str(op_json)?;
    let mut output_buf = Vec::new();
    kernels::dispatch_decode(&op, input_bytes, &mut output_buf)?;
    Ok(output_buf)
}

/// Encodes a byte buffer with an operation given as JSON.
pub fn encode_with_operation(op_json: &str, input_bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let op: Operation = serde_json::from_str(op_json)?;
    let mut output_buf = Vec::new();
    kernels::dispatch_encode(&op, input_bytes, &mut output_buf)?;
    Ok(output_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kernel_name_resolves() {
        let config = CodecConfig::default();
        for name in KERNEL_CODECS {
            let op = resolve_operation(name, &config).unwrap();
            assert_eq!(op.name(), name);
        }
    }

    #[test]
    fn test_config_supplies_parameters() {
        let config = CodecConfig::from_json_str(r#"{"levels": {"zstd": 19}, "predictor_axis": 0}"#).unwrap();
        assert_eq!(resolve_operation("zstd", &config).unwrap(), Operation::Zstd { level: 19 });
        assert_eq!(resolve_operation("delta", &config).unwrap(), Operation::Delta { axis: 0 });
    }

    #[test]
    fn test_unknown_and_parameterless_names() {
        let config = CodecConfig::default();
        assert!(resolve_operation("snappy", &config).unwrap_err().is_unsupported());
        assert!(matches!(resolve_operation("packints", &config), Err(CodecError::InvalidType(_))));
    }

    #[test]
    fn test_encoders_without_a_direction_report_unsupported() {
        let config = CodecConfig::default();
        assert!(encode("packints", b"\x12\x34", &config).unwrap_err().is_unsupported());
        assert!(encode("png", b"", &config).unwrap_err().is_unsupported());

        let pixels = SampleArray::from(ndarray::array![[0u8, 255], [255, 0]].into_dyn());
        assert!(encode_image("webp", &pixels).unwrap_err().is_unsupported());
    }

    #[test]
    fn test_json_operation_roundtrip() {
        let op_json = r#"{"op": "zlib", "params": {"level": 9}}"#;
        let encoded = encode_with_operation(op_json, b"aaaaaaaaaaaaaaaa").unwrap();
        assert_eq!(decode_with_operation(op_json, &encoded).unwrap(), b"aaaaaaaaaaaaaaaa");
        assert!(matches!(
            decode_with_operation("{\"op\": 1}", b""),
            Err(CodecError::SerdeJson(_))
        ));
    }
}
