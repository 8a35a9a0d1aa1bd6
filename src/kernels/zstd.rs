//! This module contains the Zstandard pass-through kernels.
//!
//! Frames are plain Zstandard frames with no extra header, so any conforming
//! decoder can read what `encode` writes. This module is a safe, panic-free
//! wrapper around the `zstd` crate.

use std::io::Write;
use zstd::stream::{Decoder, Encoder};

use crate::error::CodecError;

//==================================================================================
// 1. Core Logic
//==================================================================================

/// Compresses a byte slice, appending one complete frame to `output_buf`.
fn compress_slice(input_bytes: &[u8], output_buf: &mut Vec<u8>, level: i32) -> Result<(), CodecError> {
    let mut encoder = Encoder::new(output_buf, level).map_err(|e| CodecError::compression("zstd", e))?;
    encoder
        .write_all(input_bytes)
        .map_err(|e| CodecError::compression("zstd", e))?;

    // `finish` is essential to finalize the Zstd frame.
    encoder.finish().map_err(|e| CodecError::compression("zstd", e))?;
    Ok(())
}

/// Decompresses every frame in `input_bytes`, appending to `output_buf`.
fn decompress_slice(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    let mut decoder = Decoder::new(input_bytes).map_err(|e| CodecError::compression("zstd", e))?;

    // The buffer grows as needed; frames need not carry a content size.
    std::io::copy(&mut decoder, output_buf).map_err(|e| CodecError::compression("zstd", e))?;
    Ok(())
}

//==================================================================================
// 2. Public API
//==================================================================================

pub fn encode(input_bytes: &[u8], level: i32, output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    compress_slice(input_bytes, output_buf, level)
}

pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    decompress_slice(input_bytes, output_buf)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
