//! BER writer for ASN.1, the wire format underneath LDAP and X.509
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `ber-core`: Error handling and the object identifier type
//! - `ber-writer`: Growable buffer, primitive encoders, nested sequences
//!
//! # Usage
//!
//! ```rust
//! use ber::BerWriter;
//!
//! # fn main() -> ber::BerResult<()> {
//! // An anonymous LDAP v3 bind request
//! let mut writer = BerWriter::new();
//! writer.start_sequence_default()?;
//! writer.write_int(1)?;
//! writer.start_sequence(0x60)?;
//! writer.write_int(3)?;
//! writer.write_string("")?;
//! writer.write_string_with_tag("", 0x80)?;
//! writer.end_sequence()?;
//! writer.end_sequence()?;
//!
//! let message = writer.snapshot()?;
//! assert_eq!(&message[..], &[0x30, 0x0c, 0x02, 0x01, 0x01, 0x60, 0x07,
//!                            0x02, 0x01, 0x03, 0x04, 0x00, 0x80, 0x00]);
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use ber_core::{BerError, BerResult, ObjectIdentifier};

// Re-export writer API
pub use ber_writer::{
    BerLength, BerTag, BerTagClass, BerWriter, GrowableBuffer, GrowthStrategy, WriterOptions,
};

pub mod tag {
    pub use ber_writer::types::tag::*;
}
