//! This module defines the core, strongly-typed data representations used
//! throughout the stripcodec kernels.
//!
//! It includes the canonical `SampleType` enum, which replaces string-based
//! dtype descriptions, and the `SampleArray` tagged union over integer and
//! floating point n-dimensional arrays.

pub mod sample_array;
pub mod sample_type;

// Re-export the main type(s) for easier access.
pub use sample_array::{FloatArray, IntArray, SampleArray};
pub use sample_type::SampleType;
pub(crate) use sample_array::with_sample_array;
