//! Constructed types with lengths resolved at close time
//!
//! `start_sequence` writes the tag and a one-byte length placeholder and
//! pushes a [`SequenceMarker`]. `end_sequence` pops the innermost marker and
//! measures the content written since from the live write offset:
//!
//! - content of 0-127 bytes: the placeholder is overwritten in place
//! - longer content: the field is widened to the long form by inserting the
//!   extra length bytes in front of the content, shifting it right
//!
//! Markers hold offsets, not references. An insertion happens strictly after
//! every open ancestor's length field, so ancestors never need adjusting, and
//! their own lengths pick up the inserted bytes when they are closed.

use ber_core::{BerError, BerResult};

use crate::types::{tag, BerLength};
use crate::writer::BerWriter;

/// One open constructed TLV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SequenceMarker {
    /// Position of the tag byte
    pub(crate) tag_offset: usize,
    /// Position where the length field begins
    pub(crate) length_offset: usize,
    /// Bytes reserved for the length field at open time
    pub(crate) reserved_width: usize,
}

impl SequenceMarker {
    fn content_offset(&self) -> usize {
        self.length_offset + self.reserved_width
    }
}

impl BerWriter {
    /// Open a constructed value with the given tag
    ///
    /// # Arguments
    /// * `tag` - Identifier octet, e.g. `0x30` for SEQUENCE or `0x60` for
    ///   an LDAP BindRequest
    ///
    /// Writes the tag and a one-byte length placeholder. Must be matched by
    /// a later [`end_sequence`](Self::end_sequence).
    pub fn start_sequence(&mut self, tag: u8) -> BerResult<()> {
        self.sequences.try_reserve(1).map_err(|e| {
            BerError::AllocationFailure(format!("Cannot open sequence: {}", e))
        })?;

        let tag_offset = self.buffer.offset();
        self.buffer.append_bytes(&[tag, 0x00])?;
        self.sequences.push(SequenceMarker {
            tag_offset,
            length_offset: tag_offset + 1,
            reserved_width: 1,
        });
        Ok(())
    }

    /// Open a SEQUENCE (`0x30`)
    pub fn start_sequence_default(&mut self) -> BerResult<()> {
        self.start_sequence(tag::SEQUENCE)
    }

    /// Close the innermost open constructed value and write its length
    ///
    /// # Error Handling
    /// Returns `BerError::UnbalancedSequence` if no sequence is open. If
    /// widening the length field fails to allocate, the sequence stays open
    /// and the buffer is unchanged.
    pub fn end_sequence(&mut self) -> BerResult<()> {
        let marker = *self.sequences.last().ok_or_else(|| {
            BerError::UnbalancedSequence("end_sequence called with no open sequence".to_string())
        })?;

        let content_offset = marker.content_offset();
        let content_len = self.buffer.offset() - content_offset;
        let encoded = BerLength::new(content_len).encode();

        if encoded.len() > marker.reserved_width {
            debug_assert!(
                self.sequences.iter().all(|m| m.length_offset < content_offset),
                "open ancestor length field after insertion point"
            );

            let extra = &encoded[marker.reserved_width..];
            self.buffer.insert_bytes(content_offset, extra)?;
            log::trace!(
                "Widened length field at {} for {} content bytes, shifted by {}",
                marker.length_offset,
                content_len,
                extra.len()
            );
        }

        for (i, &byte) in encoded.iter().take(marker.reserved_width).enumerate() {
            self.buffer.overwrite_byte(marker.length_offset + i, byte)?;
        }

        self.sequences.pop();
        Ok(())
    }

    /// Number of currently open sequences
    pub fn depth(&self) -> usize {
        self.sequences.len()
    }
}
