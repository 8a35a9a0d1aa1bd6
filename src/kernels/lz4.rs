//! LZ4 block-format pass-through kernels built on `lz4_flex`.
//!
//! With `header` set, a block carries its decompressed length as a 4-byte
//! little-endian prefix. Without it the caller should pass the decompressed
//! size; otherwise a worst-case bound derived from the input length is used.

use crate::error::CodecError;

/// Upper bound on the decompressed size of a headerless block of `len` bytes.
fn headerless_size_bound(len: usize) -> usize {
    24 + 255 * len.saturating_sub(10)
}

pub fn encode(input_bytes: &[u8], header: bool, output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    let compressed = if header {
        lz4_flex::block::compress_prepend_size(input_bytes)
    } else {
        lz4_flex::block::compress(input_bytes)
    };
    output_buf.extend_from_slice(&compressed);
    Ok(())
}

/// Decompresses one block. `size` is the exact decompressed length, if known.
pub fn decode(
    input_bytes: &[u8],
    header: bool,
    size: Option<usize>,
    output_buf: &mut Vec<u8>,
) -> Result<(), CodecError> {
    output_buf.clear();
    let decompressed = if header {
        lz4_flex::block::decompress_size_prepended(input_bytes)
    } else {
        let capacity = size.unwrap_or_else(|| headerless_size_bound(input_bytes.len()));
        lz4_flex::block::decompress(input_bytes, capacity)
    }
    .map_err(|e| CodecError::compression("lz4", e))?;
    output_buf.extend_from_slice(&decompressed);
    Ok(())
}
