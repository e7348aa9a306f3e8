//! 256-bit unsigned amounts.
//!
//! Amounts are raw integer units, exactly as the host ledger stores them. Only
//! checked arithmetic is exposed: sums that leave the 256-bit range must abort
//! the caller, never wrap.

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Number of decimals used by the native currency (1 unit = 10^18 raw).
pub const NATIVE_DECIMALS: u8 = 18;

/// A native-currency or token amount in raw units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Self = Self(U256::zero());
    pub const MAX: Self = Self(U256::MAX);

    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    pub fn from_raw(raw: u128) -> Self {
        Self(U256::from(raw))
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Parse a decimal string in whole units, scaling by `decimals`.
    ///
    /// `parse_units("2.040194018", 18)` yields `2040194018000000000`. Signs,
    /// exponents, empty input, more fractional digits than `decimals`, and
    /// values beyond 256 bits are rejected.
    pub fn parse_units(text: &str, decimals: u8) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidAmount(text.to_string());
        let text = text.trim();
        let (whole, fraction) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        let decimals = usize::from(decimals);
        if fraction.len() > decimals {
            return Err(invalid());
        }

        let mut digits = String::with_capacity(whole.len() + decimals);
        digits.push_str(whole);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(decimals - fraction.len()));
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::ZERO);
        }
        U256::from_dec_str(digits)
            .map(Self)
            .map_err(|_| TypesError::OutOfRange(text.to_string()))
    }

    /// Parse whole native-currency units (18 decimals).
    pub fn parse_native(text: &str) -> Result<Self, TypesError> {
        Self::parse_units(text, NATIVE_DECIMALS)
    }

    /// Render as a decimal string in whole units, keeping at least one
    /// fractional digit (`5000000000000000000` at 18 decimals is `"5.0"`).
    pub fn format_units(&self, decimals: u8) -> String {
        let raw = self.0.to_string();
        let decimals = usize::from(decimals);
        if decimals == 0 {
            return raw;
        }
        let padded = format!("{raw:0>width$}", width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            format!("{whole}.0")
        } else {
            format!("{whole}.{fraction}")
        }
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

impl From<U256> for Amount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = TypesError;

    /// Parse raw units (no decimal scaling).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_units(s, 0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Number(n) => Ok(Self::from_raw(u128::from(n))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_native_scales_by_eighteen_decimals() {
        let amount = Amount::parse_native("2.040194018").unwrap();
        assert_eq!(amount, Amount::from_raw(2_040_194_018_000_000_000));
        assert_eq!(Amount::parse_native("0.000000000000000001").unwrap(), Amount::from_raw(1));
        assert_eq!(Amount::parse_native("5").unwrap(), Amount::from_raw(5_000_000_000_000_000_000));
    }

    #[test]
    fn parse_rejects_negative_and_malformed_input() {
        assert!(matches!(Amount::parse_units("-3000", 0), Err(TypesError::InvalidAmount(_))));
        assert!(Amount::parse_units("", 18).is_err());
        assert!(Amount::parse_units(".", 18).is_err());
        assert!(Amount::parse_units("1e18", 0).is_err());
        assert!(Amount::parse_units("0.0000000000000000001", 18).is_err());
    }

    #[test]
    fn parse_rejects_values_beyond_256_bits() {
        let max = U256::MAX.to_string();
        assert_eq!(max.parse::<Amount>().unwrap(), Amount::MAX);
        let too_big = format!("{max}0");
        assert!(matches!(too_big.parse::<Amount>(), Err(TypesError::OutOfRange(_))));
    }

    #[test]
    fn format_units_keeps_one_fractional_digit() {
        assert_eq!(Amount::parse_native("5.0").unwrap().format_units(18), "5.0");
        assert_eq!(Amount::parse_native("2.744705982").unwrap().format_units(18), "2.744705982");
        assert_eq!(Amount::from_raw(1).format_units(18), "0.000000000000000001");
        assert_eq!(Amount::from_raw(4000).format_units(0), "4000");
    }

    #[test]
    fn checked_add_refuses_to_wrap() {
        assert_eq!(Amount::MAX.checked_add(Amount::from_raw(1)), None);
        assert_eq!(Amount::ZERO.checked_sub(Amount::from_raw(1)), None);
    }

    #[test]
    fn deserializes_from_string_or_small_number() {
        let a: Amount = serde_json::from_str("\"1000\"").unwrap();
        let b: Amount = serde_json::from_str("1000").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"1000\"");
    }
}
