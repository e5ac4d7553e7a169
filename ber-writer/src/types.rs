//! BER encoding types (Tag, Length, etc.)

use ber_core::{BerError, BerResult};

/// Universal tag numbers used by the writer, as identifier octets
pub mod tag {
    pub const BOOLEAN: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const ENUMERATED: u8 = 0x0A;
    /// SEQUENCE / SEQUENCE OF (constructed)
    pub const SEQUENCE: u8 = 0x30;
    /// SET / SET OF (constructed)
    pub const SET: u8 = 0x31;
}

/// BER Tag Class
///
/// ASN.1 defines four tag classes:
/// - **Universal**: Standard ASN.1 types (INTEGER, OCTET STRING, etc.)
/// - **Application**: Application-specific types
/// - **Context-specific**: Context-dependent types (used in SEQUENCE/SET)
/// - **Private**: Private/implementation-specific types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerTagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl BerTagClass {
    /// Convert tag class to bits (for encoding)
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }
}

/// BER Tag
///
/// Builds the single identifier octet the writer takes as a tag:
///
/// ```text
/// Bits: 8 7 6 5 4 3 2 1
///       C C P T T T T T
/// ```
///
/// Only low tag numbers (0-30) fit a single octet. The writer does not
/// emit the multi-octet high tag number form.
///
/// # Usage Example
///
/// ```rust
/// use ber_writer::BerTag;
///
/// // LDAP BindRequest: [APPLICATION 0] constructed
/// assert_eq!(BerTag::application(true, 0).to_u8().unwrap(), 0x60);
/// // LDAP simple authentication: [0] primitive
/// assert_eq!(BerTag::context_specific(false, 0).to_u8().unwrap(), 0x80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BerTag {
    class: BerTagClass,
    constructed: bool,
    number: u32,
}

impl BerTag {
    /// Create a new BER tag
    pub fn new(class: BerTagClass, constructed: bool, number: u32) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Create a Universal class tag
    pub fn universal(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Universal, constructed, number)
    }

    /// Create an Application class tag
    pub fn application(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Application, constructed, number)
    }

    /// Create a Context-specific class tag
    pub fn context_specific(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::ContextSpecific, constructed, number)
    }

    /// Create a Private class tag
    pub fn private(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Private, constructed, number)
    }

    /// Get tag class
    pub fn class(&self) -> BerTagClass {
        self.class
    }

    /// Check if tag is constructed
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get tag number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Encode the tag as a single identifier octet
    ///
    /// # Error Handling
    /// Returns `BerError::Encoding` for tag numbers above 30, which need
    /// the high tag number form.
    pub fn to_u8(&self) -> BerResult<u8> {
        if self.number > 30 {
            return Err(BerError::Encoding(format!(
                "Tag number {} does not fit a single identifier octet",
                self.number
            )));
        }

        let constructed_bit = if self.constructed { 0x20 } else { 0x00 };
        Ok(self.class.to_bits() | constructed_bit | self.number as u8)
    }
}

impl TryFrom<BerTag> for u8 {
    type Error = BerError;

    fn try_from(tag: BerTag) -> Result<Self, Self::Error> {
        tag.to_u8()
    }
}

/// BER Length encoding
///
/// BER length can be encoded in two forms:
/// - **Short form**: For lengths 0-127 (1 byte)
/// - **Long form**: For lengths > 127 (2-127 bytes)
///
/// Short form:
/// ```text
/// Byte: 0 L L L L L L L
/// ```
///
/// Long form:
/// ```text
/// First byte:  1 N N N N N N N  (N = number of length bytes)
/// Following bytes: L L L L L L L L  (big-endian length value)
/// ```
///
/// The indefinite form (`0x80` alone) is never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerLength {
    /// Short form: length 0-127
    Short(u8),
    /// Long form: length > 127, encoded with length-of-length
    Long(usize),
}

impl BerLength {
    /// Create a new BER length
    ///
    /// Automatically chooses short or long form based on the length value.
    pub fn new(length: usize) -> Self {
        if length < 128 {
            BerLength::Short(length as u8)
        } else {
            BerLength::Long(length)
        }
    }

    /// Get the length value
    pub fn value(&self) -> usize {
        match self {
            BerLength::Short(l) => *l as usize,
            BerLength::Long(l) => *l,
        }
    }

    /// Number of bytes `encode` produces
    pub fn encoded_len(&self) -> usize {
        match self {
            BerLength::Short(_) => 1,
            BerLength::Long(length) => 1 + Self::significant_bytes(*length),
        }
    }

    fn significant_bytes(length: usize) -> usize {
        let bits = usize::BITS - length.leading_zeros();
        (bits as usize).div_ceil(8).max(1)
    }

    /// Encode length to bytes
    ///
    /// # Returns
    /// Encoded length bytes (1 byte for short form, 2-127 bytes for long form)
    pub fn encode(&self) -> Vec<u8> {
        match self {
            BerLength::Short(length) => vec![*length],
            BerLength::Long(length) => {
                let num_bytes = Self::significant_bytes(*length);

                // First byte: bit 7 = 1, bits 6-0 = number of length bytes
                let mut result = Vec::with_capacity(1 + num_bytes);
                result.push(0x80 | num_bytes as u8);

                // Big-endian, no leading zero byte
                let be = length.to_be_bytes();
                result.extend_from_slice(&be[be.len() - num_bytes..]);
                result
            }
        }
    }
}
