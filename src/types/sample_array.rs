//! The typed, n-dimensional sample containers consumed by the array-aware kernels.
//!
//! `SampleArray` is resolved exactly once, when it is constructed: it is either
//! an `IntArray` or a `FloatArray`, each a closed set of `ndarray::ArrayD<T>`
//! variants. Kernels match on the outer variant when the distinction matters
//! (the float predictor, XOR decode) and otherwise hand the inner array to a
//! generic function bounded by [`Sample`](crate::traits::Sample).

use ndarray::{ArrayD, IxDyn};
use num_traits::NumCast;

use crate::error::CodecError;
use crate::traits::Sample;
use crate::types::SampleType;
use crate::utils::typed_slice_to_bytes;

//==================================================================================
// 1. Array Variants
//==================================================================================

/// An n-dimensional array of integer samples.
#[derive(Debug, Clone, PartialEq)]
pub enum IntArray {
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
}

/// An n-dimensional array of IEEE 754 floating point samples.
#[derive(Debug, Clone, PartialEq)]
pub enum FloatArray {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

/// A typed sample array: the union of integer and floating point arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleArray {
    Integer(IntArray),
    Float(FloatArray),
}

//==================================================================================
// 2. Dispatch Macros
//==================================================================================

/// Evaluates `$body` with `$arr` bound to the inner `ArrayD<T>` of any variant.
/// Every arm must produce the same type.
macro_rules! with_sample_array {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            $crate::types::SampleArray::Integer($crate::types::IntArray::Int8($arr)) => $body,
            $crate::types::SampleArray::Integer($crate::types::IntArray::Int16($arr)) => $body,
            $crate::types::SampleArray::Integer($crate::types::IntArray::Int32($arr)) => $body,
            $crate::types::SampleArray::Integer($crate::types::IntArray::Int64($arr)) => $body,
            $crate::types::SampleArray::Integer($crate::types::IntArray::UInt8($arr)) => $body,
            $crate::types::SampleArray::Integer($crate::types::IntArray::UInt16($arr)) => $body,
            $crate::types::SampleArray::Integer($crate::types::IntArray::UInt32($arr)) => $body,
            $crate::types::SampleArray::Integer($crate::types::IntArray::UInt64($arr)) => $body,
            $crate::types::SampleArray::Float($crate::types::FloatArray::Float32($arr)) => $body,
            $crate::types::SampleArray::Float($crate::types::FloatArray::Float64($arr)) => $body,
        }
    };
}

/// Evaluates `$body` with the type alias `$T` bound to the Rust element type of `$dtype`.
macro_rules! with_sample_type {
    ($dtype:expr, $T:ident => $body:expr) => {
        match $dtype {
            $crate::types::SampleType::Int8 => {
                type $T = i8;
                $body
            }
            $crate::types::SampleType::Int16 => {
                type $T = i16;
                $body
            }
            $crate::types::SampleType::Int32 => {
                type $T = i32;
                $body
            }
            $crate::types::SampleType::Int64 => {
                type $T = i64;
                $body
            }
            $crate::types::SampleType::UInt8 => {
                type $T = u8;
                $body
            }
            $crate::types::SampleType::UInt16 => {
                type $T = u16;
                $body
            }
            $crate::types::SampleType::UInt32 => {
                type $T = u32;
                $body
            }
            $crate::types::SampleType::UInt64 => {
                type $T = u64;
                $body
            }
            $crate::types::SampleType::Float32 => {
                type $T = f32;
                $body
            }
            $crate::types::SampleType::Float64 => {
                type $T = f64;
                $body
            }
        }
    };
}

pub(crate) use with_sample_array;

//==================================================================================
// 3. Construction & Inspection
//==================================================================================

/// Builds a typed array of `shape` from an owned element vector.
fn build_array<T: Sample>(shape: &[usize], values: Vec<T>) -> Result<ArrayD<T>, CodecError> {
    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|e| {
        CodecError::InvalidShape(format!("cannot build array of shape {:?}: {}", shape, e))
    })
}

impl SampleArray {
    /// The dtype tag of the elements.
    pub fn sample_type(&self) -> SampleType {
        fn tag_of<T: Sample>(_: &ArrayD<T>) -> SampleType {
            T::SAMPLE_TYPE
        }
        with_sample_array!(self, a => tag_of(a))
    }

    pub fn shape(&self) -> &[usize] {
        with_sample_array!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        with_sample_array!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_float(&self) -> bool {
        matches!(self, SampleArray::Float(_))
    }

    /// Reinterprets a native-endian byte buffer as an array of `dtype` with `shape`.
    ///
    /// The bytes are copied, so the input does not need any particular alignment.
    pub fn from_bytes(dtype: SampleType, shape: &[usize], bytes: &[u8]) -> Result<Self, CodecError> {
        let width = dtype.byte_width();
        let expected = shape.iter().product::<usize>() * width;
        if bytes.len() != expected {
            return Err(CodecError::InvalidShape(format!(
                "{} bytes cannot fill a {} array of shape {:?} ({} bytes)",
                bytes.len(),
                dtype,
                shape,
                expected
            )));
        }
        with_sample_type!(dtype, T => {
            let values: Vec<T> = bytes
                .chunks_exact(width)
                .map(bytemuck::pod_read_unaligned::<T>)
                .collect();
            Ok(T::wrap_array(build_array(shape, values)?))
        })
    }

    /// Builds an array of `dtype` from unsigned integer values, failing if any
    /// value is not representable in the destination type.
    pub fn from_u64_values(dtype: SampleType, shape: &[usize], values: &[u64]) -> Result<Self, CodecError> {
        with_sample_type!(dtype, T => {
            let converted = values
                .iter()
                .map(|&v| {
                    <T as NumCast>::from(v).ok_or_else(|| {
                        CodecError::InvalidType(format!("value {} does not fit in {}", v, dtype))
                    })
                })
                .collect::<Result<Vec<T>, CodecError>>()?;
            Ok(T::wrap_array(build_array(shape, converted)?))
        })
    }

    /// Serializes the elements in logical (row-major) order as native-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        fn bytes_of<T: Sample>(a: &ArrayD<T>) -> Vec<u8> {
            let values: Vec<T> = a.iter().copied().collect();
            typed_slice_to_bytes(&values)
        }
        with_sample_array!(self, a => bytes_of(a))
    }
}

macro_rules! impl_from_array {
    ($T:ty) => {
        impl From<ArrayD<$T>> for SampleArray {
            fn from(array: ArrayD<$T>) -> Self {
                <$T as Sample>::wrap_array(array)
            }
        }
    };
}

impl_from_array!(i8);
impl_from_array!(i16);
impl_from_array!(i32);
impl_from_array!(i64);
impl_from_array!(u8);
impl_from_array!(u16);
impl_from_array!(u32);
impl_from_array!(u64);
impl_from_array!(f32);
impl_from_array!(f64);

//==================================================================================
// 4. Unit Tests
//==================================================================================
