//! Clock helpers for message timestamps.

use time::OffsetDateTime;
use time::macros::format_description;

/// The current instant in the local offset, or UTC when the offset is unknown.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Formats `instant` as `HH:MM`.
pub fn clock_label(instant: &OffsetDateTime) -> String {
    instant
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| format!("{:02}:{:02}", instant.hour(), instant.minute()))
}

/// Milliseconds since the Unix epoch for `instant`.
pub fn unix_millis(instant: &OffsetDateTime) -> i128 {
    instant.unix_timestamp_nanos() / 1_000_000
}

/// Serde adapter storing an `OffsetDateTime` as an RFC 3339 string.
pub mod rfc3339 {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    /// Deserialize an RFC 3339 formatted string into an OffsetDateTime
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&s, &Rfc3339).map_err(serde::de::Error::custom)
    }

    /// Serialize an OffsetDateTime into an RFC 3339 formatted string
    pub fn serialize<S>(datetime: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = datetime
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}
