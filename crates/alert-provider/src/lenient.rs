//! Lenient numeric decoding for inline overrides
//!
//! Inline overrides are loaded without knowing the provider's schema, so an
//! integer may arrive as an integer, an integral float, or a numeric string.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Number {
    fn to_i64(&self) -> Result<i64, String> {
        match self {
            Number::Integer(value) => Ok(*value),
            Number::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                Ok(*value as i64)
            }
            Number::Float(value) => Err(format!("{} is not an integer", value)),
            Number::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("'{}' is not an integer", text)),
        }
    }
}

/// Decode an optional integer from any numeric representation
pub(crate) fn option_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let value = number.to_i64().map_err(de::Error::custom)?;
    T::try_from(value)
        .map(Some)
        .map_err(|_| de::Error::custom(format!("{} is out of range", value)))
}
