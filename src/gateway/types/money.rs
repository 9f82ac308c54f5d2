//! Money input type for API boundary enforcement

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Decimal amount accepted from request bodies.
///
/// Format validation happens at the Serde layer:
/// - JSON strings are parsed exactly: `"10"`, `"0.5"`, `"-10"`
/// - JSON integers are accepted: `10`, `-10`
/// - JSON floats are rejected (`10.5` must be sent as `"10.5"`)
/// - Rejects `.5`, `5.`, empty strings, `+` prefix, scientific notation
///
/// Sign is NOT checked here. Range rules (positive amount, non-negative
/// balance) are business validation done by the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountInput(Decimal);

impl AmountInput {
    pub fn inner(self) -> Decimal {
        self.0
    }
}

impl std::ops::Deref for AmountInput {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn parse_strict(s: &str) -> Result<Decimal, String> {
    if s.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.starts_with('.') {
        return Err("Invalid format: use 0.5 not .5".to_string());
    }
    if digits.ends_with('.') {
        return Err("Invalid format: use 5.0 not 5.".to_string());
    }
    if s.contains('e') || s.contains('E') {
        return Err("Invalid format: scientific notation not allowed".to_string());
    }
    if s.starts_with('+') {
        return Err("Invalid format: + prefix not allowed".to_string());
    }
    Decimal::from_str(s).map_err(|e| format!("Invalid decimal: {}", e))
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = AmountInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_strict(v).map(AmountInput).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AmountInput(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AmountInput(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Err(E::custom(
            "Invalid format: send fractional amounts as strings, e.g. \"10.5\"",
        ))
    }
}

impl<'de> Deserialize<'de> for AmountInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}
