//! BER writer and primitive encoders
//!
//! # Usage Example
//!
//! ```rust
//! use ber_writer::BerWriter;
//!
//! # fn main() -> ber_writer::BerResult<()> {
//! let mut writer = BerWriter::new();
//! writer.write_boolean(true)?;
//! writer.write_boolean(false)?;
//! assert_eq!(&writer.snapshot()?[..], &[0x01, 0x01, 0xFF, 0x01, 0x01, 0x00]);
//! # Ok(())
//! # }
//! ```

use ber_core::{BerError, BerResult};
use bytes::Bytes;
use std::fmt;

use crate::buffer::GrowableBuffer;
use crate::config::WriterOptions;
use crate::sequence::SequenceMarker;
use crate::types::{tag, BerLength};

/// BER writer for ASN.1 structures
///
/// Values are appended in call order to a single growable buffer. Each
/// primitive is encoded as a TLV (Tag-Length-Value) triplet following
/// ITU-T X.690. Constructed values are opened with
/// [`start_sequence`](Self::start_sequence) and closed with
/// [`end_sequence`](Self::end_sequence); they may nest to any depth.
///
/// # Error Handling
///
/// A failed write leaves the buffer exactly as it was before the call:
/// every primitive builds its full TLV first and only then reserves
/// capacity and appends it.
#[derive(Debug, Clone)]
pub struct BerWriter {
    pub(crate) buffer: GrowableBuffer,
    pub(crate) sequences: Vec<SequenceMarker>,
}

impl BerWriter {
    /// Create a new writer with default options
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    /// Create a new writer with initial capacity
    ///
    /// # Arguments
    /// * `capacity` - Initial buffer capacity in bytes
    ///
    /// Writes past the capacity grow the buffer, so this is only a hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(WriterOptions::new().initial_size(capacity))
    }

    /// Create a new writer from options
    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            buffer: GrowableBuffer::new(options.initial_size, options.growth_strategy),
            sequences: Vec::new(),
        }
    }

    /// Append a raw byte, without TLV framing
    ///
    /// Used for protocol bytes under direct caller control, such as
    /// context-specific tags framed by hand.
    pub fn write_byte(&mut self, byte: u8) -> BerResult<()> {
        self.buffer.append_byte(byte)
    }

    /// Write a length using the general length-writing rule, without a tag
    ///
    /// # Arguments
    /// * `length` - Content length in bytes; short form up to 127, long form above
    pub fn write_length(&mut self, length: usize) -> BerResult<()> {
        self.buffer.append_bytes(&BerLength::new(length).encode())
    }

    /// Encode a BOOLEAN: `01 01 FF` or `01 01 00`
    pub fn write_boolean(&mut self, value: bool) -> BerResult<()> {
        self.write_boolean_with_tag(value, tag::BOOLEAN)
    }

    /// Encode a BOOLEAN under an explicit tag
    ///
    /// # Arguments
    /// * `value` - Boolean value (`FF` for true, `00` for false)
    /// * `tag` - Identifier octet to use instead of `0x01`
    pub fn write_boolean_with_tag(&mut self, value: bool, tag: u8) -> BerResult<()> {
        self.write_tlv(tag, &[if value { 0xFF } else { 0x00 }])
    }

    /// Encode an INTEGER
    ///
    /// # Arguments
    /// * `value` - Any integer type convertible to `i64`
    ///
    /// # Encoding Format
    /// - Tag: `0x02`
    /// - Length: Number of bytes in value
    /// - Value: Two's complement representation (big-endian, minimal encoding)
    ///
    /// # Minimal Encoding
    /// 127 is encoded as 1 byte (`7F`), not 2 bytes (`00 7F`); -128 is
    /// `80`, not `FF 80`.
    ///
    /// # Error Handling
    /// Returns `BerError::Encoding` if the value does not fit an `i64`.
    pub fn write_int<I>(&mut self, value: I) -> BerResult<()>
    where
        I: TryInto<i64> + fmt::Display + Copy,
    {
        self.write_int_with_tag(value, tag::INTEGER)
    }

    /// Encode an INTEGER under an explicit tag
    ///
    /// # Arguments
    /// * `value` - Any integer type convertible to `i64`
    /// * `tag` - Identifier octet to use instead of `0x02`
    pub fn write_int_with_tag<I>(&mut self, value: I, tag: u8) -> BerResult<()>
    where
        I: TryInto<i64> + fmt::Display + Copy,
    {
        let value: i64 = value.try_into().map_err(|_| {
            BerError::Encoding(format!("Integer {} is out of range", value))
        })?;
        self.write_tlv(tag, &encode_integer_value(value))
    }

    /// Encode an ENUMERATED (tag `0x0A`, integer content)
    pub fn write_enumeration<I>(&mut self, value: I) -> BerResult<()>
    where
        I: TryInto<i64> + fmt::Display + Copy,
    {
        self.write_int_with_tag(value, tag::ENUMERATED)
    }

    /// Encode a NULL: `05 00`
    pub fn write_null(&mut self) -> BerResult<()> {
        self.write_tlv(tag::NULL, &[])
    }

    /// Encode a string as an OCTET STRING of its UTF-8 bytes
    pub fn write_string(&mut self, value: &str) -> BerResult<()> {
        self.write_string_with_tag(value, tag::OCTET_STRING)
    }

    /// Encode a string under an explicit tag
    ///
    /// # Arguments
    /// * `value` - Text, written as its UTF-8 bytes
    /// * `tag` - Identifier octet, e.g. `0x80` for an IMPLICIT `[0]` field
    pub fn write_string_with_tag(&mut self, value: &str, tag: u8) -> BerResult<()> {
        self.write_tlv(tag, value.as_bytes())
    }

    /// Encode UTF-8 text given as bytes, as an OCTET STRING
    ///
    /// # Error Handling
    /// Returns `BerError::Encoding` if `bytes` is not valid UTF-8.
    pub fn write_string_utf8(&mut self, bytes: &[u8]) -> BerResult<()> {
        let value = std::str::from_utf8(bytes)
            .map_err(|e| BerError::Encoding(format!("String is not valid UTF-8: {}", e)))?;
        self.write_string(value)
    }

    /// Encode each string as its own OCTET STRING, with no wrapping tag
    ///
    /// # Arguments
    /// * `values` - Strings in output order
    ///
    /// All elements are encoded before anything is appended, so a failure
    /// writes none of them.
    pub fn write_string_array<S: AsRef<str>>(&mut self, values: &[S]) -> BerResult<()> {
        let mut encoded = Vec::new();
        for value in values {
            encode_tlv_into(&mut encoded, tag::OCTET_STRING, value.as_ref().as_bytes());
        }
        self.buffer.append_bytes(&encoded)
    }

    /// Write `bytes` verbatim under the given tag
    ///
    /// # Arguments
    /// * `bytes` - Value bytes, copied as is
    /// * `tag` - Identifier octet
    ///
    /// # Encoding Format
    /// - Tag: `tag`
    /// - Length: `bytes.len()`, long form when above 127
    /// - Value: `bytes`
    ///
    /// The escape hatch for embedding pre-encoded or opaque payloads,
    /// including complete TLV structures built elsewhere.
    pub fn write_buffer(&mut self, bytes: &[u8], tag: u8) -> BerResult<()> {
        self.write_tlv(tag, bytes)
    }

    /// Encode a TLV triplet and append it in one step
    fn write_tlv(&mut self, tag: u8, value: &[u8]) -> BerResult<()> {
        let mut encoded = Vec::with_capacity(value.len() + 6);
        encode_tlv_into(&mut encoded, tag, value);
        self.buffer.append_bytes(&encoded)
    }

    /// Get the finalized output as an owned copy
    ///
    /// Later writes do not affect a returned snapshot.
    ///
    /// # Error Handling
    /// Returns `BerError::UnbalancedSequence` if any sequence is still open.
    pub fn snapshot(&self) -> BerResult<Bytes> {
        self.check_balanced()?;
        log::debug!("BER snapshot of {} bytes", self.buffer.offset());
        Ok(Bytes::copy_from_slice(self.buffer.as_slice()))
    }

    /// Consume the writer and return the finalized output
    pub fn into_bytes(self) -> BerResult<Vec<u8>> {
        self.check_balanced()?;
        log::debug!("BER output of {} bytes", self.buffer.offset());
        Ok(self.buffer.into_vec())
    }

    /// Get the bytes written so far, whether or not sequences are open
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.buffer.offset()
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buffer.offset() == 0
    }

    /// Current buffer capacity
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Discard all output and open sequences, keeping the allocation
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.sequences.clear();
    }

    fn check_balanced(&self) -> BerResult<()> {
        if self.sequences.is_empty() {
            Ok(())
        } else {
            Err(BerError::UnbalancedSequence(format!(
                "{} sequence(s) still open at finalization",
                self.sequences.len()
            )))
        }
    }
}

impl Default for BerWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_tlv_into(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    out.push(tag);
    out.extend_from_slice(&BerLength::new(value.len()).encode());
    out.extend_from_slice(value);
}

/// Minimal big-endian two's complement representation of `value`
///
/// A leading `00` is dropped when the next byte's high bit is clear, and a
/// leading `FF` when it is set; either would be a redundant sign byte.
fn encode_integer_value(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = match bytes[start] {
            0x00 => bytes[start + 1] & 0x80 == 0,
            0xFF => bytes[start + 1] & 0x80 != 0,
            _ => false,
        };
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}
