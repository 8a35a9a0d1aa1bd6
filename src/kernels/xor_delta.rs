//! This module contains the pure, stateless, and performant kernels for performing
//! XOR delta encoding and decoding.
//!
//! Each sample after the first is replaced by its XOR with the previous sample.
//! It is particularly effective for slowly changing float data, where it
//! isolates the few bits that flip between neighbours. Floats are XORed through
//! their IEEE 754 bit pattern.
//!
//! Decoding of typed arrays is intentionally not provided; only byte buffers
//! can be reconstructed.

use ndarray::{ArrayViewMut, ArrayViewMut1, Axis, Dimension};

use crate::error::CodecError;
use crate::traits::Sample;
use crate::types::{with_sample_array, SampleArray};
use crate::utils::normalize_axis;

/// Performs XOR delta encoding **in-place** on one lane.
fn xor_delta_lane_inplace<T: Sample>(mut lane: ArrayViewMut1<'_, T>) {
    // Iterate backwards for encoding to use original values for calculation.
    for i in (1..lane.len()).rev() {
        lane[i] = T::from_bits(lane[i].to_bits() ^ lane[i - 1].to_bits());
    }
}

/// Reconstructs one lane from its XOR delta stream **in-place**.
fn xor_undelta_lane_inplace<T: Sample>(mut lane: ArrayViewMut1<'_, T>) {
    // Iterate forwards to use the newly-decoded values for subsequent XORs.
    for i in 1..lane.len() {
        lane[i] = T::from_bits(lane[i].to_bits() ^ lane[i - 1].to_bits());
    }
}

/// XOR-encodes every lane of `data` along `axis` **in-place**.
pub fn encode_inplace<T, D>(mut data: ArrayViewMut<'_, T, D>, axis: isize) -> Result<(), CodecError>
where
    T: Sample,
    D: Dimension,
{
    let axis = normalize_axis(axis, data.ndim())?;
    for lane in data.lanes_mut(Axis(axis)) {
        xor_delta_lane_inplace(lane);
    }
    Ok(())
}

/// The public-facing encode function for byte buffers.
pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    output_buf.extend_from_slice(input_bytes);
    xor_delta_lane_inplace(ArrayViewMut1::from(output_buf.as_mut_slice()));
    Ok(())
}

/// The public-facing decode function for byte buffers.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    output_buf.extend_from_slice(input_bytes);
    xor_undelta_lane_inplace(ArrayViewMut1::from(output_buf.as_mut_slice()));
    Ok(())
}

/// Returns the XOR delta encoding of a typed array along `axis`.
pub fn encode_array(data: &SampleArray, axis: isize) -> Result<SampleArray, CodecError> {
    let mut encoded = data.clone();
    let status = with_sample_array!(&mut encoded, a => encode_inplace(a.view_mut(), axis));
    status.map(|()| encoded)
}

/// XOR decoding of typed arrays is not available.
pub fn decode_array(_data: &SampleArray, _axis: isize) -> Result<SampleArray, CodecError> {
    Err(CodecError::unsupported("xor decode of typed arrays"))
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_xor_delta_roundtrip_u32_array() {
        let original = SampleArray::from(array![0b1100u32, 0b1101, 0b1001, 0b1011].into_dyn());
        let expected = SampleArray::from(array![0b1100u32, 0b0001, 0b0100, 0b0010].into_dyn());

        let encoded = encode_array(&original, -1).unwrap();
        assert_eq!(encoded, expected);

        let mut undone = Vec::new();
        let mut redone = Vec::new();
        decode(&original.to_bytes(), &mut undone).unwrap();
        encode(&undone, &mut redone).unwrap();
        assert_eq!(redone, original.to_bytes());
    }

    #[test]
    fn test_xor_bytes_roundtrip() {
        let original = b"\x00\x01\x03\x07\xff\xfe".to_vec();
        let mut encoded = Vec::new();
        encode(&original, &mut encoded).unwrap();
        assert_eq!(encoded, vec![0x00, 0x01, 0x02, 0x04, 0xf8, 0x01]);

        let mut decoded = Vec::new();
        decode(&encoded, &mut decoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_xor_empty_and_single() {
        let mut out = vec![9u8];
        encode(&[], &mut out).unwrap();
        assert!(out.is_empty());

        decode(&[42], &mut out).unwrap();
        assert_eq!(out, vec![42]);
    }

    #[test]
    fn test_float_array_xor_uses_bit_pattern() {
        let original = SampleArray::from(array![[1.0f64, 1.0, 2.0]].into_dyn());
        let encoded = encode_array(&original, 1).unwrap();

        let SampleArray::Float(crate::types::FloatArray::Float64(values)) = &encoded else {
            panic!("encoding must preserve the float dtype");
        };
        assert_eq!(values[[0, 0]], 1.0);
        assert_eq!(values[[0, 1]].to_bits(), 0);
        assert_eq!(values[[0, 2]].to_bits(), 1.0f64.to_bits() ^ 2.0f64.to_bits());
    }

    #[test]
    fn test_array_axis_zero() {
        let original = SampleArray::from(array![[1i16, 2], [3, 2]].into_dyn());
        let encoded = encode_array(&original, 0).unwrap();
        assert_eq!(encoded, SampleArray::from(array![[1i16, 2], [2, 0]].into_dyn()));
    }

    #[test]
    fn test_array_decode_is_unsupported() {
        let data = SampleArray::from(array![1u8, 2, 3].into_dyn());
        let result = decode_array(&data, -1);
        assert!(matches!(result, Err(CodecError::Unsupported(_))));
    }
}
