//! Decoder for the TIFF floating point predictor (predictor type 3).
//!
//! The producing encoder splits every sample of a row into byte planes, most
//! significant plane first, and then applies horizontal byte differencing
//! across the whole row with a stride of one pixel. For an array of shape
//! `(..., width, samples)` and element width `W`, the encoded row is laid out as
//!
//! ```text
//! plane 0: [px0 s0 .. px0 sN, px1 s0 .. ] ... plane W-1: [ ... ]
//! ```
//!
//! Decoding undoes the differencing and re-interleaves the planes into native
//! byte order. Only the decode direction exists.

use crate::error::CodecError;
use crate::types::{SampleArray, SampleType};

/// The only traversal axis the plane layout is defined for.
const PLANE_AXIS: isize = -2;

//==================================================================================
// 1. Core Logic
//==================================================================================

/// Undoes horizontal byte differencing **in-place**: `row[i] += row[i - stride]`.
fn undo_byte_differencing(row: &mut [u8], stride: usize) {
    for i in stride..row.len() {
        row[i] = row[i].wrapping_add(row[i - stride]);
    }
}

/// Re-interleaves one cumulated row of byte planes into native-endian samples,
/// appending them to `output_buf`.
fn interleave_planes(row: &[u8], pixels: usize, samples: usize, width: usize, output_buf: &mut Vec<u8>) {
    let plane_len = pixels * samples;
    let mut sample_bytes = [0u8; 8];
    for index in 0..plane_len {
        let be_bytes = &mut sample_bytes[..width];
        for (plane, byte) in be_bytes.iter_mut().enumerate() {
            *byte = row[plane * plane_len + index];
        }
        if cfg!(target_endian = "little") {
            be_bytes.reverse();
        }
        output_buf.extend_from_slice(be_bytes);
    }
}

/// Decodes a native-memory buffer of predictor-encoded floats with `shape`.
fn decode_planes(
    input_bytes: &[u8],
    dtype: SampleType,
    shape: &[usize],
    output_buf: &mut Vec<u8>,
) -> Result<(), CodecError> {
    if shape.len() < 3 {
        return Err(CodecError::InvalidShape(format!(
            "floatpred needs at least 3 dimensions, got shape {:?}",
            shape
        )));
    }
    if !dtype.is_float() {
        return Err(CodecError::InvalidType(format!(
            "floatpred needs a floating point dtype, got {}",
            dtype
        )));
    }

    let width = dtype.byte_width();
    let pixels = shape[shape.len() - 2];
    let samples = shape[shape.len() - 1];
    let row_len = pixels * samples * width;
    let expected = shape.iter().product::<usize>() * width;
    if input_bytes.len() != expected {
        return Err(CodecError::InvalidShape(format!(
            "{} bytes cannot hold a {} array of shape {:?}",
            input_bytes.len(),
            dtype,
            shape
        )));
    }

    output_buf.clear();
    if row_len == 0 {
        return Ok(());
    }
    output_buf.reserve(input_bytes.len());

    let mut row = Vec::with_capacity(row_len);
    for encoded_row in input_bytes.chunks_exact(row_len) {
        row.clear();
        row.extend_from_slice(encoded_row);
        undo_byte_differencing(&mut row, samples);
        interleave_planes(&row, pixels, samples, width, output_buf);
    }
    Ok(())
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Decodes predictor-encoded bytes of a `dtype` array with `shape` into
/// native-endian sample bytes.
pub fn decode(
    input_bytes: &[u8],
    dtype: SampleType,
    shape: &[usize],
    axis: isize,
    output_buf: &mut Vec<u8>,
) -> Result<(), CodecError> {
    if axis != PLANE_AXIS {
        return Err(CodecError::unsupported(format!("floatpred axis {} != -2", axis)));
    }
    decode_planes(input_bytes, dtype, shape, output_buf)
}

/// Decodes a float array whose memory still holds the predictor-encoded planes.
///
/// The rank is checked before the sample type.
pub fn decode_array(data: &SampleArray, axis: isize) -> Result<SampleArray, CodecError> {
    if axis != PLANE_AXIS {
        return Err(CodecError::unsupported(format!("floatpred axis {} != -2", axis)));
    }
    let mut decoded = Vec::new();
    decode_planes(&data.to_bytes(), data.sample_type(), data.shape(), &mut decoded)?;
    SampleArray::from_bytes(data.sample_type(), data.shape(), &decoded)
}

/// The floating point predictor has no encoder.
pub fn encode(_data: &SampleArray, _axis: isize) -> Result<SampleArray, CodecError> {
    Err(CodecError::unsupported("floatpred encode"))
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
