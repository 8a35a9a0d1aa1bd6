//! This module contains the decoder for Apple PackBits run-length encoding.
//!
//! The stream is a sequence of control bytes. With `count = control + 1`:
//! a count below 129 copies the next `count` bytes verbatim, a count above 129
//! repeats the next byte `258 - count` times, and exactly 129 is a no-op.
//! Running out of input anywhere ends the stream normally.

use crate::error::CodecError;

const NOOP_COUNT: usize = 129;

/// Decodes a PackBits stream, appending nothing but the decoded runs to `output_buf`.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    output_buf.clear();
    let mut pos = 0;
    while let Some(&control) = input_bytes.get(pos) {
        pos += 1;
        let count = control as usize + 1;
        if count > NOOP_COUNT {
            let Some(&value) = input_bytes.get(pos) else {
                break;
            };
            pos += 1;
            output_buf.resize(output_buf.len() + (258 - count), value);
        } else if count < NOOP_COUNT {
            let end = (pos + count).min(input_bytes.len());
            output_buf.extend_from_slice(&input_bytes[pos..end]);
            pos = end;
        }
    }
    Ok(())
}

/// PackBits is decode-only.
pub fn encode(_input_bytes: &[u8], _output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    Err(CodecError::unsupported("packbits encode"))
}
