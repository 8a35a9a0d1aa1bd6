// In: src/error.rs

//! This module defines the single, unified error type for the entire stripcodec library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Errors fall into two families that callers are expected to treat differently:
//! `Format` (and its shape/type/length relatives) means the input is corrupt or
//! malformed for the requested transform, while `Unsupported` means the
//! transform or option is not available and the caller should fall back.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    // =========================================================================
    // === Data Errors (the input cannot be decoded as given)
    // =========================================================================
    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid array shape: {0}")]
    InvalidShape(String),

    #[error("Invalid sample type: {0}")]
    InvalidType(String),

    #[error("Buffer length mismatch: expected a multiple of {1}, got {0}")]
    BufferMismatch(usize, usize),

    // =========================================================================
    // === Capability Errors (the operation itself is not available)
    // =========================================================================
    #[error("Operation not implemented: {0}")]
    Unsupported(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An error reported by one of the pass-through entropy coders.
    #[error("{codec} operation failed: {message}")]
    Compression { codec: &'static str, message: String },

    /// An error originating from the `image` crate while decoding a container.
    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),

    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config or operation.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

impl CodecError {
    /// Shorthand for an `Unsupported` error naming the missing capability.
    pub fn unsupported(what: impl Into<String>) -> Self {
        CodecError::Unsupported(what.into())
    }

    /// Wraps a backend error for the named pass-through codec.
    pub fn compression(codec: &'static str, err: impl std::fmt::Display) -> Self {
        CodecError::Compression {
            codec,
            message: err.to_string(),
        }
    }

    /// `true` when the error describes malformed or mismatched input data.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            CodecError::Format(_)
                | CodecError::InvalidShape(_)
                | CodecError::InvalidType(_)
                | CodecError::BufferMismatch(..)
                | CodecError::Compression { .. }
                | CodecError::Image(_)
        )
    }

    /// `true` when the error is a capability gap rather than bad data.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CodecError::Unsupported(_))
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for CodecError {
    fn from(err: bytemuck::PodCastError) -> Self {
        CodecError::PodCast(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families_are_disjoint() {
        let format = CodecError::Format("strip must begin with CLEAR code".to_string());
        let unsupported = CodecError::unsupported("packbits encode");

        assert!(format.is_format());
        assert!(!format.is_unsupported());
        assert!(unsupported.is_unsupported());
        assert!(!unsupported.is_format());
    }

    #[test]
    fn test_compression_error_names_codec() {
        let err = CodecError::compression("Zstd", "bad magic");
        assert_eq!(err.to_string(), "Zstd operation failed: bad magic");
    }
}
