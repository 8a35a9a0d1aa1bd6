//! This module contains the decoder for variable-width LZW as used in TIFF strips.
//!
//! Codes are packed MSB-first. The code width starts at 9 bits and grows to
//! 10, 11 and 12 bits as the table reaches 511, 1023 and 2047 entries (the
//! "early change" convention). Code 256 clears the table and code 257 ends the
//! strip.
//!
//! The decoder never materializes table strings. Every entry after the 256
//! literals is a `(start, len)` range into the output produced so far: a new
//! entry is always the previous emission extended by one byte, and that byte
//! is the first byte of the emission that follows it in the output.

use crate::error::CodecError;

const CLEAR_CODE: u16 = 256;
const EOI_CODE: u16 = 257;
const FIRST_TABLE_CODE: usize = 258;
const MAX_TABLE_LEN: usize = 4096;
const MIN_STRIP_LEN: usize = 4;

/// How a successful decode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The strip ended with an EOI code.
    Complete,
    /// The bit stream ran out before an EOI code. The output is best effort.
    MissingEoi { last_code: u16 },
}

impl DecodeStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, DecodeStatus::Complete)
    }
}

//==================================================================================
// 1. Bit Reader
//==================================================================================

/// Reads MSB-first codes of a given width from a byte slice.
struct BitReader<'a> {
    data: &'a [u8],
    bitcount: usize,
    bitcount_max: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bitcount: 0,
            bitcount_max: data.len() * 8,
        }
    }

    /// Returns the next `width`-bit code without consuming it.
    /// Bytes past the end of the input read as zero.
    fn peek(&self, width: u32) -> u16 {
        let start = self.bitcount / 8;
        let mut window = [0u8; 4];
        if start < self.data.len() {
            let end = (start + 4).min(self.data.len());
            window[..end - start].copy_from_slice(&self.data[start..end]);
        }
        let bits = u32::from_be_bytes(window) << (self.bitcount % 8);
        (bits >> (32 - width)) as u16
    }

    /// Consumes the next code. Returns `None` once the code would extend past
    /// the end of the input.
    fn read(&mut self, width: u32) -> Option<u16> {
        let code = self.peek(width);
        self.bitcount += width as usize;
        if self.bitcount > self.bitcount_max {
            None
        } else {
            Some(code)
        }
    }
}

//==================================================================================
// 2. Decoder State
//==================================================================================

/// The per-strip dictionary and code width.
struct LzwState {
    width: u32,
    /// Output ranges for codes 258 and up.
    table: Vec<(usize, usize)>,
    /// The output range emitted for the previous code.
    previous: (usize, usize),
}

impl LzwState {
    fn new() -> Self {
        Self {
            width: 9,
            table: Vec::with_capacity(MAX_TABLE_LEN - FIRST_TABLE_CODE),
            previous: (0, 0),
        }
    }

    fn table_len(&self) -> usize {
        FIRST_TABLE_CODE + self.table.len()
    }

    fn clear(&mut self) {
        self.table.clear();
        self.width = 9;
    }

    /// Emits a literal code right after a CLEAR. No table entry is added.
    fn emit_first(&mut self, code: u16, output: &mut Vec<u8>) -> Result<(), CodecError> {
        if code >= CLEAR_CODE {
            return Err(CodecError::Format(format!(
                "code {} cannot follow a CLEAR code",
                code
            )));
        }
        self.previous = (output.len(), 1);
        output.push(code as u8);
        Ok(())
    }

    /// Emits an ordinary code and grows the table by one entry.
    fn emit(&mut self, code: u16, output: &mut Vec<u8>) -> Result<(), CodecError> {
        let code_index = code as usize;
        let start = output.len();
        let (prev_start, prev_len) = self.previous;

        if code_index < 256 {
            output.push(code as u8);
        } else if code_index < self.table_len() {
            let (entry_start, entry_len) = self.table[code_index - FIRST_TABLE_CODE];
            output.extend_from_within(entry_start..entry_start + entry_len);
        } else if code_index == self.table_len() {
            // The code names the entry being defined: previous string plus its own first byte.
            output.extend_from_within(prev_start..prev_start + prev_len);
            output.push(output[prev_start]);
        } else {
            return Err(CodecError::Format(format!(
                "code {} is beyond the table of {} entries",
                code,
                self.table_len()
            )));
        }

        if self.table_len() < MAX_TABLE_LEN {
            self.table.push((prev_start, prev_len + 1));
        }
        self.previous = (start, output.len() - start);
        Ok(())
    }

    /// Widens codes once the table reaches a size threshold.
    fn update_width(&mut self) {
        self.width = match self.table_len() {
            511 => 10,
            1023 => 11,
            2047 => 12,
            _ => self.width,
        };
    }
}

//==================================================================================
// 3. Public API
//==================================================================================

/// Decodes an LZW strip into `output_buf` and reports how the strip ended.
///
/// `size_hint` pre-sizes the output buffer when the decoded length is known.
///
/// # Errors
/// Returns `CodecError::Format` if the strip is shorter than 4 bytes, does not
/// begin with a CLEAR code, or contains a code the table cannot resolve.
pub fn decode_with_status(
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
    size_hint: Option<usize>,
) -> Result<DecodeStatus, CodecError> {
    if input_bytes.len() < MIN_STRIP_LEN {
        return Err(CodecError::Format(format!(
            "strip must be at least {} bytes long",
            MIN_STRIP_LEN
        )));
    }

    let mut reader = BitReader::new(input_bytes);
    let mut state = LzwState::new();
    if reader.peek(state.width) != CLEAR_CODE {
        return Err(CodecError::Format(
            "strip must begin with CLEAR code".to_string(),
        ));
    }

    output_buf.clear();
    if let Some(hint) = size_hint {
        output_buf.reserve(hint);
    }

    let mut last_code = 0;
    loop {
        let Some(code) = reader.read(state.width) else {
            break;
        };
        last_code = code;
        if code == EOI_CODE {
            log_metric!("event" = "lzw_decode", "bytes" = output_buf.len());
            return Ok(DecodeStatus::Complete);
        }

        if code == CLEAR_CODE {
            state.clear();
            let Some(code) = reader.read(state.width) else {
                break;
            };
            last_code = code;
            if code == EOI_CODE {
                log_metric!("event" = "lzw_decode", "bytes" = output_buf.len());
                return Ok(DecodeStatus::Complete);
            }
            state.emit_first(code, output_buf)?;
        } else {
            state.emit(code, output_buf)?;
        }
        state.update_width();
    }

    log::warn!("unexpected end of LZW stream (code {})", last_code);
    Ok(DecodeStatus::MissingEoi { last_code })
}

/// Decodes an LZW strip. A strip without EOI yields its best-effort output.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    decode_with_status(input_bytes, output_buf, None).map(|_| ())
}

/// LZW is decode-only.
pub fn encode(_input_bytes: &[u8], _output_buf: &mut Vec<u8>) -> Result<(), CodecError> {
    Err(CodecError::unsupported("lzw encode"))
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    const HAMMER_STRIP: &[u8] = b"\x80\x1c\xcc'\x91\x01\xa0\xc2m6\x99NB\x03\xc9\xbe\x0b\x07\x84\xc2\xcd\xa68|\"\x14 3\xc3\xa0\xd1c\x94\x02\x02";

    #[derive(Default)]
    struct BitWriter {
        out: Vec<u8>,
        acc: u64,
        nbits: u32,
    }

    impl BitWriter {
        fn write(&mut self, code: u16, width: u32) {
            self.acc = (self.acc << width) | code as u64;
            self.nbits += width;
            while self.nbits >= 8 {
                self.out.push((self.acc >> (self.nbits - 8)) as u8);
                self.nbits -= 8;
            }
            self.acc &= (1 << self.nbits) - 1;
        }

        fn finish(mut self) -> Vec<u8> {
            if self.nbits > 0 {
                self.out.push((self.acc << (8 - self.nbits)) as u8);
            }
            self.out
        }
    }

    /// Early-change widths as seen from the encoder, whose counter runs one ahead.
    fn encoder_width(next: usize, width: u32) -> u32 {
        match next {
            512 => 10,
            1024 => 11,
            2048 => 12,
            _ => width,
        }
    }

    /// Test-only TIFF LZW encoder, clearing the table before it fills.
    fn reference_encode(data: &[u8]) -> Vec<u8> {
        let mut writer = BitWriter::default();
        let mut table: HashMap<(u16, u8), u16> = HashMap::new();
        let mut width = 9;
        let mut next = FIRST_TABLE_CODE;
        writer.write(CLEAR_CODE, width);

        let Some((&first, rest)) = data.split_first() else {
            writer.write(EOI_CODE, width);
            return writer.finish();
        };
        let mut current = first as u16;
        for &byte in rest {
            if let Some(&code) = table.get(&(current, byte)) {
                current = code;
                continue;
            }
            writer.write(current, width);
            table.insert((current, byte), next as u16);
            next += 1;
            width = encoder_width(next, width);
            if next == 4093 {
                writer.write(CLEAR_CODE, width);
                table.clear();
                next = FIRST_TABLE_CODE;
                width = 9;
            }
            current = byte as u16;
        }
        writer.write(current, width);
        width = encoder_width(next + 1, width);
        writer.write(EOI_CODE, width);
        writer.finish()
    }

    #[test]
    fn test_decode_hammer_strip() {
        let mut out = Vec::new();
        let status = decode_with_status(HAMMER_STRIP, &mut out, Some(40)).unwrap();
        assert_eq!(status, DecodeStatus::Complete);
        assert_eq!(out, b"say hammer yo hammer mc hammer go hammer");
    }

    #[test]
    fn test_first_code_must_be_clear() {
        let mut out = Vec::new();
        let result = decode(b"\x00\x00\x00\x00", &mut out);
        assert!(matches!(result, Err(CodecError::Format(_))));
    }

    #[test]
    fn test_short_strip_is_format_error() {
        let mut out = Vec::new();
        assert!(matches!(decode(b"\x80\x00", &mut out), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_truncated_strip_returns_prefix() {
        let mut full = Vec::new();
        decode(HAMMER_STRIP, &mut full).unwrap();

        let mut partial = Vec::new();
        let status = decode_with_status(&HAMMER_STRIP[..20], &mut partial, None).unwrap();
        assert!(matches!(status, DecodeStatus::MissingEoi { .. }));
        assert!(!status.is_complete());
        assert!(!partial.is_empty());
        assert!(full.starts_with(&partial));
    }

    #[test]
    fn test_final_code_ending_on_last_bit_is_decoded() {
        // Eight 9-bit codes fill exactly 9 bytes, with no EOI.
        let mut writer = BitWriter::default();
        writer.write(CLEAR_CODE, 9);
        for &byte in b"abcdefg" {
            writer.write(byte as u16, 9);
        }
        let strip = writer.finish();
        assert_eq!(strip.len(), 9);

        let mut out = Vec::new();
        let status = decode_with_status(&strip, &mut out, None).unwrap();
        assert_eq!(status, DecodeStatus::MissingEoi { last_code: b'g' as u16 });
        assert_eq!(out, b"abcdefg");

        // One byte short, the final code no longer fits and is dropped.
        let mut shorter = strip.clone();
        shorter.truncate(8);
        decode(&shorter, &mut out).unwrap();
        assert_eq!(out, b"abcdef");
    }

    #[test]
    fn test_code_beyond_table_is_format_error() {
        let mut writer = BitWriter::default();
        for code in [CLEAR_CODE, b'a' as u16, 300, EOI_CODE] {
            writer.write(code, 9);
        }
        let mut out = Vec::new();
        let result = decode(&writer.finish(), &mut out);
        assert!(matches!(result, Err(CodecError::Format(_))));
    }

    #[test]
    fn test_control_code_after_clear_is_format_error() {
        let mut writer = BitWriter::default();
        for code in [CLEAR_CODE, 258, EOI_CODE] {
            writer.write(code, 9);
        }
        let mut out = Vec::new();
        assert!(matches!(decode(&writer.finish(), &mut out), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_self_referential_code() {
        // The second code is 258, which the decoder must define from its own first byte.
        let encoded = reference_encode(b"aaaaaaa");
        let mut out = Vec::new();
        decode(&encoded, &mut out).unwrap();
        assert_eq!(out, b"aaaaaaa");
    }

    #[test]
    fn test_reference_roundtrip_crosses_all_widths() {
        let mut rng = StdRng::seed_from_u64(0x12a7);
        // A small alphabet keeps runs repetitive so the table grows through every width.
        let original: Vec<u8> = (0..20_000).map(|_| b"abcdefgh"[rng.random_range(0..8)]).collect();
        let encoded = reference_encode(&original);

        let mut out = Vec::new();
        let status = decode_with_status(&encoded, &mut out, Some(original.len())).unwrap();
        assert!(status.is_complete());
        assert_eq!(out, original);
    }

    #[test]
    fn test_reference_roundtrip_random_bytes() {
        let mut rng = StdRng::seed_from_u64(99);
        let original: Vec<u8> = (0..20_000).map(|_| rng.random()).collect();
        let mut out = Vec::new();
        decode(&reference_encode(&original), &mut out).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_encode_is_unsupported() {
        let mut out = Vec::new();
        assert!(encode(b"abc", &mut out).unwrap_err().is_unsupported());
    }
}
