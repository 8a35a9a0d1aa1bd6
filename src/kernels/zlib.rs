//! Zlib (DEFLATE with a zlib wrapper) pass-through kernels built on `flate2`.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CodecError;

/// Compresses `input_bytes` at `level` (0-9) into a zlib stream.
pub fn encode(input_bytes: &[u8], level: u32, output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    if level > 9 {
        return Err(CodecError::compression("zlib", format!("invalid level {}", level)));
    }
    output_buf.clear();
    let mut encoder = ZlibEncoder::new(output_buf, Compression::new(level));
    encoder
        .write_all(input_bytes)
        .map_err(|e| CodecError::compression("zlib", e))?;
    encoder.finish().map_err(|e| CodecError::compression("zlib", e))?;
    Ok(())
}

pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    ZlibDecoder::new(input_bytes)
        .read_to_end(output_buf)
        .map_err(|e| CodecError::compression("zlib", e))?;
    Ok(())
}
