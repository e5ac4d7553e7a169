use crate::error::{BerError, BerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Object identifier (OID)
///
/// An OID is a hierarchical name written in dotted-decimal form, such as
/// `1.2.840.113549.1.1.1` (rsaEncryption). It serializes as that string.
///
/// # Validation
///
/// Only the shape is checked: at least two non-negative decimal components,
/// with `40 * X + Y` of the first two representable. Arc values themselves
/// are not restricted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectIdentifier {
    components: Vec<u64>,
}

impl ObjectIdentifier {
    /// Create an OID from its components
    ///
    /// # Arguments
    /// * `components` - Arcs in order, e.g. `[1, 2, 840, 113549]`
    ///
    /// # Returns
    ///
    /// Returns `Err(BerError::InvalidOid)` if there are fewer than two
    /// components or `40 * X + Y` of the first two does not fit a `u64`
    pub fn new(components: Vec<u64>) -> BerResult<Self> {
        if components.len() < 2 {
            return Err(BerError::InvalidOid(format!(
                "Expected at least 2 components, got {}",
                components.len()
            )));
        }

        Self::first_subidentifier(components[0], components[1]).ok_or_else(|| {
            BerError::InvalidOid(format!(
                "First two arcs too large: {}.{}",
                components[0], components[1]
            ))
        })?;

        Ok(Self { components })
    }

    fn first_subidentifier(first: u64, second: u64) -> Option<u64> {
        first.checked_mul(40)?.checked_add(second)
    }

    /// Parse an OID from dotted-decimal form, e.g. "1.2.840.113549"
    ///
    /// # Arguments
    /// * `s` - Dotted-decimal string
    ///
    /// # Returns
    ///
    /// Returns `Ok(ObjectIdentifier)` if parsing succeeds, `Err(BerError::InvalidOid)` otherwise
    ///
    /// Every component must be a non-empty run of ASCII digits; signs,
    /// whitespace and empty components are rejected.
    pub fn from_string(s: &str) -> BerResult<Self> {
        let mut components = Vec::new();
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(BerError::InvalidOid(format!(
                    "Invalid component {:?} in {:?}",
                    part, s
                )));
            }
            let value = part.parse::<u64>().map_err(|_| {
                BerError::InvalidOid(format!("Component out of range: {}", part))
            })?;
            components.push(value);
        }

        Self::new(components)
    }

    /// Get the OID components
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Encode the OID content octets (without tag and length)
    ///
    /// The first two arcs are combined as `40 * X + Y`; that value and every
    /// remaining arc are written base-128, most significant group first,
    /// with bit 7 set on every byte except the last of each group.
    pub fn encode_content(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.components.len() + 4);

        // checked in `new`
        let first = 40 * self.components[0] + self.components[1];
        push_base128(&mut bytes, first);

        for &component in &self.components[2..] {
            push_base128(&mut bytes, component);
        }

        bytes
    }
}

fn push_base128(out: &mut Vec<u8>, value: u64) {
    let mut groups = [0u8; 10];
    let mut count = 0;
    let mut remaining = value;

    // LSB first
    loop {
        groups[count] = (remaining & 0x7F) as u8;
        count += 1;
        remaining >>= 7;
        if remaining == 0 {
            break;
        }
    }

    for i in (0..count).rev() {
        if i > 0 {
            out.push(groups[i] | 0x80);
        } else {
            out.push(groups[i]);
        }
    }
}

impl FromStr for ObjectIdentifier {
    type Err = BerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for ObjectIdentifier {
    type Error = BerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl From<ObjectIdentifier> for String {
    fn from(oid: ObjectIdentifier) -> Self {
        oid.to_string()
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oid_from_string() {
        let oid = ObjectIdentifier::from_string("1.2.840.113549.1.1.1").unwrap();
        assert_eq!(oid.components(), &[1, 2, 840, 113549, 1, 1, 1]);
    }

    #[test]
    fn test_oid_encode_content_rsa() {
        let oid: ObjectIdentifier = "1.2.840.113549.1.1.1".parse().unwrap();
        assert_eq!(
            oid.encode_content(),
            vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]
        );
    }

    #[test]
    fn test_oid_small_components_single_byte() {
        let oid: ObjectIdentifier = "2.5.4.3".parse().unwrap();
        assert_eq!(oid.encode_content(), vec![0x55, 0x04, 0x03]);
    }

    #[test]
    fn test_oid_component_boundary() {
        let oid: ObjectIdentifier = "1.3.127.128".parse().unwrap();
        assert_eq!(oid.encode_content(), vec![0x2b, 0x7f, 0x81, 0x00]);
    }

    #[test]
    fn test_oid_large_combined_first_arc() {
        // 40 * 2 + 100 = 180 needs two base-128 groups
        let oid: ObjectIdentifier = "2.100.3".parse().unwrap();
        assert_eq!(oid.encode_content(), vec![0x81, 0x34, 0x03]);
    }

    #[test]
    fn test_oid_max_component() {
        let oid = ObjectIdentifier::new(vec![1, 2, u64::MAX]).unwrap();
        let bytes = oid.encode_content();
        assert_eq!(bytes.len(), 1 + 10);
        assert_eq!(bytes[1], 0x81);
        assert_eq!(*bytes.last().unwrap(), 0x7f);
    }

    #[test]
    fn test_oid_rejects_malformed() {
        for input in ["", "1", "1.", ".1.2", "1..2", "1.-2", "1.+2", "1.a.3", " 1.2", "1.2 "] {
            let result = ObjectIdentifier::from_string(input);
            assert!(
                matches!(result, Err(BerError::InvalidOid(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_oid_first_byte_is_40x_plus_y() {
        let cases: [(&str, &[u8]); 4] = [
            ("1.40", &[0x50]),
            ("3.1", &[0x79]),
            ("0.50", &[0x32]),
            ("1.40.5", &[0x50, 0x05]),
        ];
        for (input, expected) in cases {
            let oid: ObjectIdentifier = input.parse().unwrap();
            assert_eq!(oid.encode_content(), expected.to_vec(), "oid {}", input);
        }
    }

    #[test]
    fn test_oid_rejects_oversized_arcs() {
        assert!(matches!(
            ObjectIdentifier::from_string("1.2.99999999999999999999999"),
            Err(BerError::InvalidOid(_))
        ));
        assert!(matches!(
            ObjectIdentifier::new(vec![u64::MAX / 40 + 1, 0]),
            Err(BerError::InvalidOid(_))
        ));
        assert!(matches!(
            ObjectIdentifier::new(vec![2, u64::MAX]),
            Err(BerError::InvalidOid(_))
        ));
        assert!(ObjectIdentifier::new(vec![0, u64::MAX]).is_ok());
    }

    #[test]
    fn test_oid_display() {
        let oid = ObjectIdentifier::new(vec![1, 3, 6, 1, 4, 1]).unwrap();
        assert_eq!(format!("{}", oid), "1.3.6.1.4.1");
    }

    #[test]
    fn test_oid_serde_string_form() {
        let oid: ObjectIdentifier = "2.5.4.3".parse().unwrap();
        let json = serde_json::to_string(&oid).unwrap();
        assert_eq!(json, "\"2.5.4.3\"");

        let back: ObjectIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, oid);

        assert!(serde_json::from_str::<ObjectIdentifier>("\"9\"").is_err());
    }
}
