// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the name-based, public-facing API of the stripcodec library. An
// external pipeline picks a transform by name and chains it with an entropy or
// image codec; the bridge turns that name into a concrete kernel call.
//
// Data Flow (Decode by name):
//
//   1. [Stateless API (decode / decode_array)]   -> Receives a name, input and `CodecConfig`
//         |
//         `-> a. `resolve_operation` builds a `kernels::Operation` with config defaults
//         |
//         `-> b. Image names go to `imaging` instead
//
//   2. [Kernel Dispatch (kernels::dispatch_*)]   -> Runs exactly one kernel
//         |
//         `-> Returns `Result<Vec<u8>>` or `Result<SampleArray>`
//
// Nothing is cached between calls; the only process-wide state is the
// constant bit-reversal table.
// ====================================================================================
pub(crate) mod imaging;
pub mod stateless_api;

pub use imaging::IMAGE_CODECS;
pub use stateless_api::{
    decode, decode_array, decode_image, decode_with_operation, encode, encode_array, encode_image, encode_with_operation,
    resolve_operation, KERNEL_CODECS,
};
