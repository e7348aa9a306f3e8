//! 20-byte ledger account address, rendered as `0x`-prefixed hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An opaque ledger account identifier.
///
/// No validation is performed against what the address points at: the zero
/// address, externally owned accounts, and contracts are all just addresses.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address whose low eight bytes hold `n` (big-endian).
    ///
    /// Handy for deterministic fixtures; not a derivation scheme.
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != Self::LEN * 2 {
            return Err(TypesError::InvalidAddress(s.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| TypesError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_case_checksummed_address() {
        let addr: Address = "0x9F3f11d72d96910df008Cfe3aBA40F361D2EED03".parse().unwrap();
        assert_eq!(addr.to_string(), "0x9f3f11d72d96910df008cfe3aba40f361d2eed03");
    }

    #[test]
    fn accepts_missing_prefix() {
        let addr: Address = "3854ca47abc62a3771fe06ab45622a42c4a438cf".parse().unwrap();
        assert_eq!(addr.as_bytes()[0], 0x38);
    }

    #[test]
    fn rejects_wrong_length_and_bad_digits() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz3f11d72d96910df008cfe3aba40f361d2eed03".parse::<Address>().is_err());
    }

    #[test]
    fn low_u64_fixture_addresses_are_distinct() {
        assert_ne!(Address::from_low_u64(1), Address::from_low_u64(2));
        assert!(Address::from_low_u64(0).is_zero());
    }

    #[test]
    fn serde_uses_hex_string() {
        let addr = Address::from_low_u64(0xbeef);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x000000000000000000000000000000000000beef\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
