//! This module contains the pure, stateless kernel for reversing the bit order
//! within every byte of a buffer.
//!
//! It normalizes data written with TIFF `FillOrder = 2` (lowest-numbered column
//! in the least significant bit). The transform is its own inverse, so `encode`
//! and `decode` are the same function. The lookup table is built at compile
//! time and is shared read-only by every caller.

use ndarray::{ArrayViewMut, Dimension};

use crate::error::CodecError;
use crate::types::{with_sample_array, SampleArray};

//==================================================================================
// 1. Lookup Table
//==================================================================================

const fn build_reverse_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).reverse_bits();
        i += 1;
    }
    table
}

/// Maps every byte value to its bit-reversed value (`0x01 -> 0x80`, `0x64 -> 0x26`).
pub static BIT_REVERSE_TABLE: [u8; 256] = build_reverse_table();

//==================================================================================
// 2. Core Logic
//==================================================================================

/// Reverses the bits of every byte **in-place**.
pub fn reverse_inplace(data: &mut [u8]) {
    for byte in data.iter_mut() {
        *byte = BIT_REVERSE_TABLE[*byte as usize];
    }
}

/// Reverses the bits of every byte of an array view **in-place**.
///
/// The view must cover a contiguous block of memory (any axis order). Sliced or
/// strided views are rejected with `Unsupported` because their bytes cannot be
/// translated as one buffer. Concurrent callers must each own a disjoint view.
pub fn reverse_view<T, D>(mut view: ArrayViewMut<'_, T, D>) -> Result<(), CodecError>
where
    T: bytemuck::Pod,
    D: Dimension,
{
    let elements = view
        .as_slice_memory_order_mut()
        .ok_or_else(|| CodecError::unsupported("bit order reversal of non-contiguous array views"))?;
    reverse_inplace(bytemuck::try_cast_slice_mut::<T, u8>(elements)?);
    Ok(())
}

//==================================================================================
// 3. Public API
//==================================================================================

/// Writes the bit-reversed copy of `input_bytes` into `output_buf`.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    output_buf.extend(input_bytes.iter().map(|&b| BIT_REVERSE_TABLE[b as usize]));
    Ok(())
}

/// Identical to [`decode`]; bit reversal is self-inverse.
pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    decode(input_bytes, output_buf)
}

/// Reverses the bits of every byte of a typed array **in-place**.
pub fn decode_array(array: &mut SampleArray) -> Result<(), CodecError> {
    with_sample_array!(array, a => reverse_view(a.view_mut()))
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, s};

    #[test]
    fn test_table_vector() {
        let mut out = Vec::new();
        decode(b"\x01\x64", &mut out).unwrap();
        assert_eq!(out, b"\x80&");
    }

    #[test]
    fn test_table_is_self_inverse() {
        for value in 0..=255u8 {
            let reversed = BIT_REVERSE_TABLE[value as usize];
            assert_eq!(BIT_REVERSE_TABLE[reversed as usize], value);
        }
        assert_eq!(BIT_REVERSE_TABLE[0x0F], 0xF0);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let original: Vec<u8> = (0..=255u8).chain(0..17).collect();
        let mut once = Vec::new();
        let mut twice = Vec::new();
        encode(&original, &mut once).unwrap();
        decode(&once, &mut twice).unwrap();
        assert_ne!(once, original);
        assert_eq!(twice, original);
    }

    #[test]
    fn test_output_buffer_is_reused() {
        let mut out = vec![9u8; 32];
        decode(b"\x80", &mut out).unwrap();
        assert_eq!(out, vec![0x01]);
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_array_is_reversed_in_place() {
        let mut data = SampleArray::from(array![1u16, 666].into_dyn());
        decode_array(&mut data).unwrap();
        assert_eq!(data, SampleArray::from(array![128u16, 16473].into_dyn()));
    }

    #[test]
    fn test_strided_view_is_unsupported() {
        let mut data = array![[1u8, 2, 3], [4, 5, 6]];
        let result = reverse_view(data.slice_mut(s![.., 1..]));
        assert!(matches!(result, Err(CodecError::Unsupported(_))));
        // The untouched source is still intact.
        assert_eq!(data[[0, 1]], 2);
    }

    #[test]
    fn test_transposed_view_is_accepted() {
        let mut data = array![[0x01u8, 0x02], [0x04, 0x08]];
        reverse_view(data.view_mut().reversed_axes()).unwrap();
        assert_eq!(data, array![[0x80u8, 0x40], [0x20, 0x10]]);
    }
}
