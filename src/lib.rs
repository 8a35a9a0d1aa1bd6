//! This file is the root of the `stripcodec` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`kernels`, `bridge`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the types that make up the public surface.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod traits;
pub mod types;
pub mod utils;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use config::CodecConfig;
pub use error::CodecError;
pub use kernels::lzw::DecodeStatus;
pub use kernels::Operation;
pub use observability::init_logging;
pub use types::{FloatArray, IntArray, SampleArray, SampleType};
