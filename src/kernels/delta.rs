//! This module contains the pure, stateless, and performant kernels for performing
//! horizontal delta encoding and decoding.
//!
//! Encoding keeps the first sample of every lane and replaces each later sample
//! with its difference from the previous one; decoding is the running sum.
//! Arithmetic is two's-complement wraparound on the sample's bit pattern, so
//! floating point arrays are differenced as same-width unsigned integers and
//! never overflow. The core algorithms run **in-place** on a lane; the public
//! API wraps them for byte buffers and typed arrays.

use ndarray::{ArrayViewMut, ArrayViewMut1, Axis, Dimension};
use num_traits::{WrappingAdd, WrappingSub};

use crate::error::CodecError;
use crate::traits::Sample;
use crate::types::{with_sample_array, SampleArray};
use crate::utils::normalize_axis;

//==================================================================================
// 1. Generic Core Logic (In-Place)
//==================================================================================

/// Performs delta encoding **in-place** on one lane.
///
/// It calculates `data[i] = data[i] - data[i - 1]` on the bit patterns.
fn encode_lane<T: Sample>(mut lane: ArrayViewMut1<'_, T>) {
    // Iterate backwards so every subtraction still sees the original predecessor.
    for i in (1..lane.len()).rev() {
        let delta = lane[i].to_bits().wrapping_sub(&lane[i - 1].to_bits());
        lane[i] = T::from_bits(delta);
    }
}

/// Performs delta decoding (cumulative sum) **in-place** on one lane.
fn decode_lane<T: Sample>(mut lane: ArrayViewMut1<'_, T>) {
    // Iterate forwards so every addition sees the already-decoded predecessor.
    for i in 1..lane.len() {
        let sum = lane[i].to_bits().wrapping_add(&lane[i - 1].to_bits());
        lane[i] = T::from_bits(sum);
    }
}

/// Delta-encodes every lane of `data` along `axis` **in-place**.
///
/// `axis` may be negative. A zero-length axis leaves the data untouched.
pub fn encode_inplace<T, D>(mut data: ArrayViewMut<'_, T, D>, axis: isize) -> Result<(), CodecError>
where
    T: Sample,
    D: Dimension,
{
    let axis = normalize_axis(axis, data.ndim())?;
    for lane in data.lanes_mut(Axis(axis)) {
        encode_lane(lane);
    }
    Ok(())
}

/// Delta-decodes every lane of `data` along `axis` **in-place**.
pub fn decode_inplace<T, D>(mut data: ArrayViewMut<'_, T, D>, axis: isize) -> Result<(), CodecError>
where
    T: Sample,
    D: Dimension,
{
    let axis = normalize_axis(axis, data.ndim())?;
    for lane in data.lanes_mut(Axis(axis)) {
        decode_lane(lane);
    }
    Ok(())
}

//==================================================================================
// 2. Public API (Byte Buffers)
//==================================================================================

/// Delta-encodes a raw byte buffer treated as a 1-D sequence of `u8`.
pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    output_buf.extend_from_slice(input_bytes);
    encode_inplace(ArrayViewMut::from(output_buf.as_mut_slice()), 0)
}

/// Reconstructs a raw byte buffer from its delta encoding.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    output_buf.extend_from_slice(input_bytes);
    decode_inplace(ArrayViewMut::from(output_buf.as_mut_slice()), 0)
}

//==================================================================================
// 3. Public API (Typed Arrays)
//==================================================================================

/// Delta-encodes a typed array along `axis` **in-place**.
pub fn encode_array_inplace(data: &mut SampleArray, axis: isize) -> Result<(), CodecError> {
    with_sample_array!(data, a => encode_inplace(a.view_mut(), axis))
}

/// Delta-decodes a typed array along `axis` **in-place**.
pub fn decode_array_inplace(data: &mut SampleArray, axis: isize) -> Result<(), CodecError> {
    with_sample_array!(data, a => decode_inplace(a.view_mut(), axis))
}

/// Returns the delta encoding of `data` along `axis`, leaving the input untouched.
pub fn encode_array(data: &SampleArray, axis: isize) -> Result<SampleArray, CodecError> {
    let mut encoded = data.clone();
    encode_array_inplace(&mut encoded, axis)?;
    Ok(encoded)
}

/// Returns the decoded array for a delta-encoded `data` along `axis`.
pub fn decode_array(data: &SampleArray, axis: isize) -> Result<SampleArray, CodecError> {
    let mut decoded = data.clone();
    decode_array_inplace(&mut decoded, axis)?;
    Ok(decoded)
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_bytes_encode_wraps() {
        let mut encoded = Vec::new();
        encode(&[10, 5, 250, 3], &mut encoded).unwrap();
        assert_eq!(encoded, vec![10, 251, 245, 9]);

        let mut decoded = Vec::new();
        decode(&encoded, &mut decoded).unwrap();
        assert_eq!(decoded, vec![10, 5, 250, 3]);
    }

    #[test]
    fn test_bytes_empty_and_single() {
        let mut out = Vec::new();
        encode(&[], &mut out).unwrap();
        assert!(out.is_empty());

        encode(&[42], &mut out).unwrap();
        assert_eq!(out, vec![42]);
    }

    #[test]
    fn test_random_bytes_roundtrip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in [1usize, 2, 17, 1000] {
            let original: Vec<u8> = (0..len).map(|_| rng.random()).collect();
            let mut encoded = Vec::new();
            let mut decoded = Vec::new();
            encode(&original, &mut encoded).unwrap();
            decode(&encoded, &mut decoded).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_core_inplace_logic_along_rows() {
        let original = array![[100i64, 110, 115, 112], [1, 2, 4, 8]];
        let mut buffer = original.clone();

        encode_inplace(buffer.view_mut(), -1).unwrap();
        assert_eq!(buffer, array![[100i64, 10, 5, -3], [1, 1, 2, 4]]);

        decode_inplace(buffer.view_mut(), -1).unwrap();
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_axis_zero_on_2d() {
        let original = SampleArray::from(array![[1u16, 2], [4, 0], [6, 9]].into_dyn());
        let encoded = encode_array(&original, 0).unwrap();
        assert_eq!(
            encoded,
            SampleArray::from(array![[1u16, 2], [3, 65534], [2, 9]].into_dyn())
        );
        assert_eq!(decode_array(&encoded, 0).unwrap(), original);
    }

    #[test]
    fn test_float_encode_keeps_integer_bit_pattern() {
        let original = SampleArray::from(array![1.0f32, 2.0].into_dyn());
        let encoded = encode_array(&original, -1).unwrap();

        let SampleArray::Float(crate::types::FloatArray::Float32(values)) = &encoded else {
            panic!("encoding must preserve the float dtype");
        };
        assert_eq!(values[0].to_bits(), 1.0f32.to_bits());
        assert_eq!(values[1].to_bits(), 0x4000_0000 - 0x3f80_0000);

        let decoded = decode_array(&encoded, -1).unwrap();
        assert_eq!(decoded.to_bytes(), original.to_bytes());
    }

    #[test]
    fn test_random_3d_roundtrip_every_axis() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = Array3::<i32>::from_shape_fn((3, 4, 5), |_| rng.random());
        let original = SampleArray::from(original.into_dyn());

        for axis in [-3isize, -2, -1, 0, 1, 2] {
            let encoded = encode_array(&original, axis).unwrap();
            assert_eq!(decode_array(&encoded, axis).unwrap(), original, "axis {}", axis);
        }
    }

    #[test]
    fn test_zero_length_axis_is_noop() {
        let original = SampleArray::from(Array3::<u8>::zeros((2, 0, 3)).into_dyn());
        assert_eq!(encode_array(&original, 1).unwrap(), original);
    }

    #[test]
    fn test_invalid_axis() {
        let data = SampleArray::from(array![[1u8, 2]].into_dyn());
        assert!(matches!(encode_array(&data, 2), Err(CodecError::InvalidShape(_))));
        assert!(matches!(decode_array(&data, -3), Err(CodecError::InvalidShape(_))));
    }
}
