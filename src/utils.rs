//! This module provides a set of shared, low-level utility functions used
//! throughout the stripcodec kernels.
//!
//! Its primary responsibilities include:
//! 1.  Converting typed slices into native-endian byte buffers.
//! 2.  Resolving (possibly negative) axis indices against an array's rank.

use crate::error::CodecError;

//==================================================================================
// 1. Typed Slice Conversions
//==================================================================================

/// Converts a typed slice into an owned, native-endian byte vector.
pub fn typed_slice_to_bytes<T: bytemuck::Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

//==================================================================================
// 2. Axis Resolution
//==================================================================================

/// Resolves `axis` against an array of `ndim` dimensions.
///
/// Negative values count from the last dimension, so `-1` is the innermost axis.
///
/// # Errors
/// Returns `CodecError::InvalidShape` when the axis does not name a dimension.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize, CodecError> {
    let resolved = if axis < 0 {
        ndim as isize + axis
    } else {
        axis
    };
    if resolved < 0 || resolved as usize >= ndim {
        return Err(CodecError::InvalidShape(format!(
            "axis {} is out of bounds for an array of dimension {}",
            axis, ndim
        )));
    }
    Ok(resolved as usize)
}
