//! This module contains the decoder for unsigned integers bit-packed at widths
//! of 1, 2, 4, 8, 16 or 32 bits.
//!
//! Values are packed MSB-first. An optional `runlen` gives the number of values
//! after which the stream skips forward to the next byte boundary, as for the
//! rows of a bilevel or low bit depth TIFF image.

use bitvec::prelude::*;

use crate::error::CodecError;
use crate::types::{SampleArray, SampleType};

const SUPPORTED_NUMBITS: [u32; 6] = [1, 2, 4, 8, 16, 32];

//==================================================================================
// 1. Core Logic
//==================================================================================

/// Unpacks one value per bit, MSB-first. When `runlen` is not a multiple of 8,
/// each run is padded to a byte boundary and the padding bits are dropped.
fn unpack_bits(input_bytes: &[u8], runlen: usize) -> Result<Vec<u64>, CodecError> {
    let bits = input_bytes.view_bits::<Msb0>();
    if runlen % 8 == 0 {
        return Ok(bits.iter().by_vals().map(u64::from).collect());
    }

    let row_len = runlen
        .checked_add(8 - runlen % 8)
        .ok_or_else(|| run_too_long(runlen, 1))?;
    if bits.len() % row_len != 0 {
        return Err(CodecError::Format(format!(
            "{} bits do not divide into rows of {} bits",
            bits.len(),
            row_len
        )));
    }
    Ok(bits
        .chunks_exact(row_len)
        .flat_map(|row| row[..runlen].iter().by_vals().map(u64::from))
        .collect())
}

fn run_too_long(runlen: usize, numbits: u32) -> CodecError {
    CodecError::Format(format!("a run of {} {}-bit values overflows", runlen, numbits))
}

/// Unpacks `numbits`-wide values stored in `itembytes`-wide big-endian windows.
fn unpack_words(
    input_bytes: &[u8],
    numbits: u32,
    itembytes: usize,
    runlen: usize,
) -> Result<Vec<u64>, CodecError> {
    let numbits_usize = numbits as usize;
    let runlen = if runlen == 0 {
        8 * input_bytes.len() / numbits_usize
    } else {
        runlen
    };
    if runlen == 0 {
        return Ok(Vec::new());
    }

    let run_bits = runlen
        .checked_mul(numbits_usize)
        .ok_or_else(|| run_too_long(runlen, numbits))?;
    let skipbits = (8 - run_bits % 8) % 8;
    let padded_run_bits = run_bits
        .checked_add(skipbits)
        .ok_or_else(|| run_too_long(runlen, numbits))?;
    // runlen <= padded_run_bits, so size never exceeds the input bit count.
    let size = runlen * (input_bytes.len() * 8 / padded_run_bits);
    let item_bits = (itembytes * 8) as u32;
    let item_mask = if item_bits == 64 { u64::MAX } else { (1u64 << item_bits) - 1 };

    let mut values = Vec::with_capacity(size);
    let mut bitcount = 0usize;
    for i in 0..size {
        let start = bitcount / 8;
        let mut window = [0u8; 8];
        let end = (start + itembytes).min(input_bytes.len());
        if start < end {
            window[8 - itembytes..8 - itembytes + (end - start)].copy_from_slice(&input_bytes[start..end]);
        }
        let word = (u64::from_be_bytes(window) << (bitcount % 8)) & item_mask;
        values.push(word >> (item_bits - numbits));

        bitcount += numbits_usize;
        if (i + 1) % runlen == 0 {
            bitcount += skipbits;
        }
    }
    Ok(values)
}

/// Reinterprets a byte-aligned buffer as native-endian samples of `dtype`.
fn reinterpret(input_bytes: &[u8], dtype: SampleType, numbits: u32) -> Result<SampleArray, CodecError> {
    let width = dtype.byte_width();
    if width * 8 != numbits as usize {
        return Err(CodecError::Format(format!(
            "{} is not a {}-bit dtype",
            dtype, numbits
        )));
    }
    if input_bytes.len() % width != 0 {
        return Err(CodecError::BufferMismatch(input_bytes.len(), width));
    }
    SampleArray::from_bytes(dtype, &[input_bytes.len() / width], input_bytes)
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Decodes `numbits`-wide packed integers into a 1-D array of `dtype`.
///
/// `runlen == 0` means the values are packed back to back without padding.
///
/// # Errors
/// Returns `CodecError::Format` for an unsupported `numbits`, a dtype whose
/// width does not match the minimal width holding `numbits`, a floating point
/// dtype, or bilevel rows that do not fill the buffer.
pub fn decode(
    input_bytes: &[u8],
    dtype: SampleType,
    numbits: u32,
    runlen: usize,
) -> Result<SampleArray, CodecError> {
    if numbits == 1 {
        let values = unpack_bits(input_bytes, runlen)?;
        return SampleArray::from_u64_values(dtype, &[values.len()], &values);
    }
    if matches!(numbits, 8 | 16 | 32 | 64) {
        return reinterpret(input_bytes, dtype, numbits);
    }
    if !SUPPORTED_NUMBITS.contains(&numbits) {
        return Err(CodecError::Format(format!("numbits not supported: {}", numbits)));
    }
    if !dtype.is_integer() {
        return Err(CodecError::Format(format!("invalid dtype for packed integers: {}", dtype)));
    }

    let itembytes = [1usize, 2, 4, 8]
        .into_iter()
        .find(|&bytes| 8 * bytes >= numbits as usize)
        .unwrap_or(8);
    if itembytes != dtype.byte_width() {
        return Err(CodecError::Format(format!(
            "{} bits need a {}-byte dtype, got {}",
            numbits, itembytes, dtype
        )));
    }

    let values = unpack_words(input_bytes, numbits, itembytes, runlen)?;
    log_metric!("event" = "packints_decode", "numbits" = numbits, "values" = values.len());
    SampleArray::from_u64_values(dtype, &[values.len()], &values)
}

/// Packing integers is not supported.
pub fn encode(_data: &SampleArray, _numbits: u32) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::unsupported("packints encode"))
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
