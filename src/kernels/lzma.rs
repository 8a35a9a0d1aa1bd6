//! LZMA pass-through kernels built on `xz2` (liblzma).
//!
//! Encoding writes `.xz` containers. Decoding auto-detects `.xz` and legacy
//! `.lzma` streams and reads concatenated `.xz` streams back to back.

use std::io::{Read, Write};

use xz2::read::XzDecoder;
use xz2::stream::{Stream, CONCATENATED};
use xz2::write::XzEncoder;

use crate::error::CodecError;

/// Compresses `input_bytes` with preset `level` (0-9) into an `.xz` stream.
pub fn encode(input_bytes: &[u8], level: u32, output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    if level > 9 {
        return Err(CodecError::compression("lzma", format!("invalid level {}", level)));
    }
    output_buf.clear();
    let mut encoder = XzEncoder::new(output_buf, level);
    encoder
        .write_all(input_bytes)
        .map_err(|e| CodecError::compression("lzma", e))?;
    encoder.finish().map_err(|e| CodecError::compression("lzma", e))?;
    Ok(())
}

pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    let stream = Stream::new_auto_decoder(u64::MAX, CONCATENATED)
        .map_err(|e| CodecError::compression("lzma", e))?;
    output_buf.clear();
    XzDecoder::new_stream(input_bytes, stream)
        .read_to_end(output_buf)
        .map_err(|e| CodecError::compression("lzma", e))?;
    Ok(())
}
