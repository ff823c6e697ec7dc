//! Value objects: equality by value, not identity.
//!
//! Both value objects here are only obtainable through validating
//! constructors, so holding one proves the input was acceptable.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Name of a stock item.
///
/// Always trimmed and never empty. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_input("item name cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ItemName {}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A strictly positive unit count requested by a caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    /// Accepts a signed request so zero and negative values can be rejected
    /// rather than being unrepresentable at the call site.
    pub fn positive(raw: i64) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Err(DomainError::invalid_input(format!(
                "quantity must be greater than zero (got {raw})"
            )));
        }
        Ok(Self(raw.unsigned_abs()))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl ValueObject for Quantity {}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::positive(value)
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn name_is_trimmed() {
        let name = ItemName::parse("  Monitor LG \t").unwrap();
        assert_eq!(name.as_str(), "Monitor LG");
    }

    #[test]
    fn blank_name_is_invalid_input() {
        for raw in ["", "   ", "\n\t"] {
            let err = ItemName::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        let a = ItemName::parse("laptop").unwrap();
        let b = ItemName::parse("Laptop").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        assert_eq!(Quantity::positive(0).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(Quantity::positive(-3).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(Quantity::positive(i64::MIN).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(Quantity::positive(7).unwrap().get(), 7);
    }

    #[test]
    fn deserializing_a_blank_name_fails() {
        let res: Result<ItemName, _> = serde_json::from_str("\"   \"");
        assert!(res.is_err());

        let name: ItemName = serde_json::from_str("\" Laptop Dell \"").unwrap();
        assert_eq!(name.as_str(), "Laptop Dell");
    }

    #[test]
    fn deserializing_a_zero_quantity_fails() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("12").unwrap().get(), 12);
        assert_eq!(serde_json::to_string(&Quantity::positive(5).unwrap()).unwrap(), "5");
    }

    proptest! {
        /// Property: any name with visible content parses to its trimmed form.
        #[test]
        fn parse_yields_trimmed_text(
            body in "[A-Za-z0-9][A-Za-z0-9 ]{0,30}[A-Za-z0-9]",
            pad in " {0,4}"
        ) {
            let raw = format!("{pad}{body}{pad}");
            let name = ItemName::parse(&raw).unwrap();
            prop_assert_eq!(name.as_str(), body.as_str());
        }
    }
}
