//! Lenient timestamp decoding for backend payloads.
//!
//! The backend serialises `java.util.Date` either as epoch milliseconds or
//! as an ISO-8601 string, depending on its Jackson settings. Both are read
//! here; output is always RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Millis(i64),
    Text(String),
}

/// `deserialize_with` target for `Option<DateTime<Utc>>` fields.
pub fn deserialize_optional<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDate::Millis(millis)) => {
            match DateTime::from_timestamp_millis(millis) {
                Some(date) => Ok(Some(date)),
                None => Err(D::Error::custom(format!(
                    "{millis} is out of range"
                ))),
            }
        }
        Some(RawDate::Text(text)) => {
            parse_text(&text).map_err(D::Error::custom)
        }
    }
}

fn parse_text(text: &str) -> Result<Option<DateTime<Utc>>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    DateTime::parse_from_rfc3339(text)
        .or_else(|_| {
            DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z")
        })
        .map(|date| Some(date.with_timezone(&Utc)))
        .map_err(|e| format!("unrecognised date {text:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_offset_without_colon_is_accepted() {
        let date = parse_text("2021-06-12T00:13:09.000+0000").unwrap();
        assert_eq!(date.map(|d| d.timestamp()), Some(1_623_456_789));
        assert_eq!(parse_text("  ").unwrap(), None);
        assert!(parse_text("yesterday").is_err());
    }
}
