//! OBJECT IDENTIFIER write path

use ber_core::{BerResult, ObjectIdentifier};

use crate::types::tag;
use crate::writer::BerWriter;

impl BerWriter {
    /// Parse a dotted-decimal OID and encode it as an OBJECT IDENTIFIER
    ///
    /// # Arguments
    /// * `dotted` - OID string, e.g. `"1.2.840.113549.1.1.1"`
    ///
    /// `"1.2.840.113549.1.1.1"` is written as `06 09 2a 86 48 86 f7 0d 01 01 01`.
    ///
    /// # Error Handling
    /// Returns `BerError::InvalidOid` for a malformed string; nothing is
    /// written in that case.
    pub fn write_oid(&mut self, dotted: &str) -> BerResult<()> {
        self.write_oid_with_tag(dotted, tag::OBJECT_IDENTIFIER)
    }

    /// Parse a dotted-decimal OID and encode it under an explicit tag
    ///
    /// # Arguments
    /// * `dotted` - OID string
    /// * `tag` - Identifier octet to use instead of `0x06`
    pub fn write_oid_with_tag(&mut self, dotted: &str, tag: u8) -> BerResult<()> {
        let oid: ObjectIdentifier = dotted.parse()?;
        self.write_buffer(&oid.encode_content(), tag)
    }

    /// Encode an already parsed OID
    pub fn write_object_identifier(&mut self, oid: &ObjectIdentifier) -> BerResult<()> {
        self.write_buffer(&oid.encode_content(), tag::OBJECT_IDENTIFIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ber_core::BerError;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_write_oid_rsa_encryption() {
        let mut writer = BerWriter::new();
        writer.write_oid("1.2.840.113549.1.1.1").unwrap();
        assert_eq!(hex(&writer.snapshot().unwrap()), "06092a864886f70d010101");
    }

    #[test]
    fn test_write_object_identifier_matches_string_path() {
        let oid: ObjectIdentifier = "2.5.4.3".parse().unwrap();

        let mut parsed = BerWriter::new();
        parsed.write_object_identifier(&oid).unwrap();

        let mut dotted = BerWriter::new();
        dotted.write_oid("2.5.4.3").unwrap();

        assert_eq!(parsed.as_bytes(), dotted.as_bytes());
        assert_eq!(parsed.as_bytes(), &[0x06, 0x03, 0x55, 0x04, 0x03]);
    }

    #[test]
    fn test_write_oid_with_tag() {
        let mut writer = BerWriter::new();
        writer.write_oid_with_tag("1.3.6.1", 0x80).unwrap();
        assert_eq!(writer.as_bytes(), &[0x80, 0x03, 0x2b, 0x06, 0x01]);
    }

    #[test]
    fn test_write_oid_inside_sequence() {
        // AlgorithmIdentifier { rsaEncryption, NULL }
        let mut writer = BerWriter::new();
        writer.start_sequence_default().unwrap();
        writer.write_oid("1.2.840.113549.1.1.1").unwrap();
        writer.write_null().unwrap();
        writer.end_sequence().unwrap();
        assert_eq!(hex(&writer.snapshot().unwrap()), "300d06092a864886f70d0101010500");
    }

    #[test]
    fn test_write_oid_any_first_arcs() {
        let mut writer = BerWriter::new();
        writer.write_oid("1.40").unwrap();
        writer.write_oid("3.1").unwrap();
        writer.write_oid("0.50").unwrap();
        assert_eq!(hex(writer.as_bytes()), "060150060179060132");
    }

    #[test]
    fn test_write_invalid_oid_writes_nothing() {
        let mut writer = BerWriter::new();
        writer.write_int(1).unwrap();

        for input in ["1", "1.2.x", "1.-2.3", "", "1.2."] {
            let result = writer.write_oid(input);
            assert!(matches!(result, Err(BerError::InvalidOid(_))), "accepted {:?}", input);
        }
        assert_eq!(writer.as_bytes(), &[0x02, 0x01, 0x01]);
    }
}
