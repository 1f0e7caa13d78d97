//! `MM/DD/YYYY` (de)serialization for optional calendar dates.
//!
//! `null`, a missing field and the empty string all decode to `None`.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%m/%d/%Y";

pub fn format(date: &NaiveDate) -> String {
    date.format(FORMAT).to_string()
}

pub fn parse(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), FORMAT)
}

pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&format(date)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse(text)
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", text, e))),
    }
}
