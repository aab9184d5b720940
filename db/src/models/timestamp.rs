//! Serde adapter for optional, store-managed timestamps.
//!
//! Writes a BSON datetime. Reads a BSON datetime or an RFC 3339 string; any
//! other value (or a missing key, with `#[serde(default)]`) reads as `None`
//! instead of failing the whole document.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S: Serializer>(at: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => bson::DateTime::from_millis(at.timestamp_millis()).serialize(s),
        None => s.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match Bson::deserialize(d)? {
        Bson::DateTime(at) => DateTime::from_timestamp_millis(at.timestamp_millis()),
        Bson::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|at| at.with_timezone(&Utc)),
        _ => None,
    })
}
