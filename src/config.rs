// In: src/config.rs

//! The single source of truth for stripcodec's tunable defaults.
//!
//! `CodecConfig` is created once at the application boundary (from a JSON
//! document or `Default`) and then passed down by reference, or shared through
//! an `Arc<CodecConfig>`, to the named dispatch layer. Kernels themselves are
//! parameterized explicitly and never read configuration.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

//==================================================================================
// I. Per-Codec Settings
//==================================================================================

/// Default compression levels for the pass-through entropy coders.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LevelConfig {
    #[serde(default = "default_zlib_level")]
    pub zlib: u32,
    #[serde(default = "default_zstd_level")]
    pub zstd: i32,
    #[serde(default = "default_bz2_level")]
    pub bz2: u32,
    #[serde(default = "default_lzma_level")]
    pub lzma: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            zlib: default_zlib_level(),
            zstd: default_zstd_level(),
            bz2: default_bz2_level(),
            lzma: default_lzma_level(),
        }
    }
}

//==================================================================================
// II. The Unified CodecConfig
//==================================================================================

/// The single, unified configuration for named codec dispatch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Compression levels used when a caller does not pass one.
    #[serde(default)]
    pub levels: LevelConfig,

    /// Axis for delta and XOR differencing of typed arrays.
    #[serde(default = "default_predictor_axis")]
    pub predictor_axis: isize,

    /// Axis for the floating point predictor. Only `-2` is implemented.
    #[serde(default = "default_floatpred_axis")]
    pub floatpred_axis: isize,

    /// If true, LZ4 blocks carry a little-endian size prefix.
    #[serde(default)]
    pub lz4_header: bool,

    /// If true, an LZW strip that ends without an EOI code is rejected
    /// instead of returning its best-effort output.
    #[serde(default)]
    pub lzw_strict_eoi: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            levels: LevelConfig::default(),
            predictor_axis: default_predictor_axis(),
            floatpred_axis: default_floatpred_axis(),
            lz4_header: false,
            lzw_strict_eoi: false,
        }
    }
}

impl CodecConfig {
    /// Parses a configuration from JSON. Absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_zlib_level() -> u32 {
    6
}

fn default_zstd_level() -> i32 {
    5
}

fn default_bz2_level() -> u32 {
    9
}

fn default_lzma_level() -> u32 {
    5
}

fn default_predictor_axis() -> isize {
    -1
}

fn default_floatpred_axis() -> isize {
    -2
}
