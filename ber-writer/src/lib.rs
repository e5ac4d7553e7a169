//! BER writer for ASN.1 structures
//!
//! This crate serializes primitive values and arbitrarily nested
//! constructed types into a single contiguous buffer using BER
//! Tag-Length-Value framing (ITU-T X.690), the wire format underneath
//! protocols such as LDAP.
//!
//! # Usage Example
//!
//! ```rust
//! use ber_writer::BerWriter;
//!
//! # fn main() -> ber_writer::BerResult<()> {
//! let mut writer = BerWriter::new();
//! writer.start_sequence_default()?;
//! writer.write_int(3)?;
//! writer.write_string("cn=foo,ou=unit,o=test")?;
//! writer.end_sequence()?;
//! let bytes = writer.snapshot()?;
//! assert_eq!(bytes[0], 0x30);
//! # Ok(())
//! # }
//! ```
//!
//! # Unknown Lengths
//!
//! A constructed value's length precedes its content but is only known
//! once the content is complete. `start_sequence` reserves a single
//! placeholder byte; `end_sequence` backpatches it in place when the
//! content fits the short form, and otherwise widens the field by
//! shifting the content right.

pub mod buffer;
pub mod config;
pub mod oid;
pub mod sequence;
pub mod types;
pub mod writer;

pub use ber_core::{BerError, BerResult, ObjectIdentifier};
pub use buffer::GrowableBuffer;
pub use config::{GrowthStrategy, WriterOptions};
pub use types::{BerLength, BerTag, BerTagClass};
pub use writer::BerWriter;
