//! This module defines shared traits used across different kernels.

use ndarray::ArrayD;
use num_traits::{NumCast, PrimInt, WrappingAdd, WrappingSub};
use std::fmt::Debug;

use crate::types::{FloatArray, IntArray, SampleArray, SampleType};

/// A fixed-width numeric element that the predictor kernels can operate on.
///
/// Every sample exposes a same-width integer *bit pattern*. Integer samples
/// are their own bit pattern; floating point samples map to their IEEE 754
/// bits. Differencing and XOR always run on `Bits`, which is how float data
/// gets integer wraparound semantics without any runtime type inspection.
pub trait Sample: Copy + Debug + Default + PartialEq + NumCast + bytemuck::Pod + 'static {
    /// The integer type carrying this sample's bit pattern.
    type Bits: PrimInt + WrappingAdd + WrappingSub + bytemuck::Pod + Debug;

    /// The dtype tag for this element type.
    const SAMPLE_TYPE: SampleType;

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;

    /// Wraps a typed array in the matching `SampleArray` variant.
    fn wrap_array(array: ArrayD<Self>) -> SampleArray;
}

// Integer samples are their own bit pattern.
macro_rules! impl_integer_sample {
    ($T:ty, $tag:ident) => {
        impl Sample for $T {
            type Bits = $T;
            const SAMPLE_TYPE: SampleType = SampleType::$tag;

            #[inline]
            fn to_bits(self) -> Self::Bits {
                self
            }

            #[inline]
            fn from_bits(bits: Self::Bits) -> Self {
                bits
            }

            fn wrap_array(array: ArrayD<Self>) -> SampleArray {
                SampleArray::Integer(IntArray::$tag(array))
            }
        }
    };
}

// Float samples are reinterpreted as the unsigned integer of the same width.
macro_rules! impl_float_sample {
    ($T:ty, $U:ty, $tag:ident) => {
        impl Sample for $T {
            type Bits = $U;
            const SAMPLE_TYPE: SampleType = SampleType::$tag;

            #[inline]
            fn to_bits(self) -> Self::Bits {
                <$T>::to_bits(self)
            }

            #[inline]
            fn from_bits(bits: Self::Bits) -> Self {
                <$T>::from_bits(bits)
            }

            fn wrap_array(array: ArrayD<Self>) -> SampleArray {
                SampleArray::Float(FloatArray::$tag(array))
            }
        }
    };
}

impl_integer_sample!(i8, Int8);
impl_integer_sample!(i16, Int16);
impl_integer_sample!(i32, Int32);
impl_integer_sample!(i64, Int64);
impl_integer_sample!(u8, UInt8);
impl_integer_sample!(u16, UInt16);
impl_integer_sample!(u32, UInt32);
impl_integer_sample!(u64, UInt64);
impl_float_sample!(f32, u32, Float32);
impl_float_sample!(f64, u64, Float64);
