//! BZ2 pass-through kernels built on the `bzip2` crate.

use std::io::{Read, Write};

use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use bzip2::Compression;

use crate::error::CodecError;

/// Compresses `input_bytes` at block-size `level` (1-9) into a bzip2 stream.
pub fn encode(input_bytes: &[u8], level: u32, output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    if !(1..=9).contains(&level) {
        return Err(CodecError::compression("bz2", format!("invalid level {}", level)));
    }
    output_buf.clear();
    let mut encoder = BzEncoder::new(output_buf, Compression::new(level));
    encoder
        .write_all(input_bytes)
        .map_err(|e| CodecError::compression("bz2", e))?;
    encoder.finish().map_err(|e| CodecError::compression("bz2", e))?;
    Ok(())
}

/// Decompresses one or more concatenated bzip2 streams.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    MultiBzDecoder::new(input_bytes)
        .read_to_end(output_buf)
        .map_err(|e| CodecError::compression("bz2", e))?;
    Ok(())
}
