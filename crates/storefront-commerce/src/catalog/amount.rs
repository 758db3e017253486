//! Serde adapters for amounts on the wire.
//!
//! The API is inconsistent about amounts: `20`, `20.5`, `"20.50"`, `""` and
//! `null` all occur. These adapters read any of them into [`Money`] and
//! always write a plain JSON number, so a record survives a trip through the
//! store unchanged.

use serde::{Deserialize, Deserializer, Serializer};

use crate::money::Money;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn parse<E: serde::de::Error>(raw: Option<RawAmount>) -> Result<Option<Money>, E> {
    match raw {
        None => Ok(None),
        Some(RawAmount::Number(n)) if n.is_finite() => Ok(Some(Money::from_decimal(n))),
        Some(RawAmount::Number(n)) => Err(E::custom(format!("non-finite amount {n}"))),
        Some(RawAmount::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawAmount::Text(s)) => s.parse::<Money>().map(Some).map_err(E::custom),
    }
}

/// `#[serde(with = "amount::decimal")]` for `Option<f64>` fields that take
/// the same loose input as amounts but keep every digit, such as rates.
pub mod decimal {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_f64(*n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<RawAmount>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawAmount::Number(n)) if n.is_finite() => Ok(Some(n)),
            Some(RawAmount::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(RawAmount::Text(s)) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(serde::de::Error::custom(format!("invalid number {s:?}"))),
            },
            Some(RawAmount::Number(n)) => Err(serde::de::Error::custom(format!("non-finite number {n}"))),
        }
    }
}

/// `#[serde(with = "amount::option")]` for `Option<Money>` fields.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(money) => serializer.serialize_f64(money.to_decimal()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
        parse(Option::<RawAmount>::deserialize(deserializer)?)
    }
}

/// `#[serde(with = "amount::required")]` for `Money` fields; a missing or
/// empty amount reads as zero.
pub mod required {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        Ok(parse(Option::<RawAmount>::deserialize(deserializer)?)?.unwrap_or_default())
    }
}
