use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ProtocolError;

const ISO_FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Content timestamp as Unix seconds plus a sub-second part.
///
/// The server may report either an integer or a naive ISO-8601 string
/// (`2011-12-31T23:55:20`, read as UTC, fraction allowed). Fractions are kept,
/// so `23:55:20.500` orders after `23:55:20`. Whole seconds serialize as an
/// integer, anything finer as the ISO string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    // Field order gives chronological `Ord`.
    secs: i64,
    nanos: u32,
}

impl Timestamp {
    /// Baseline used when a list has no messages yet: `2000-01-01T00:00:00`.
    pub const EPOCH_FALLBACK: Timestamp = Timestamp::from_secs(946_684_800);

    pub const fn from_secs(secs: i64) -> Self {
        Self { secs, nanos: 0 }
    }

    /// Whole seconds, fraction truncated.
    pub const fn as_secs(&self) -> i64 {
        self.secs
    }

    pub const fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    fn from_datetime<Tz: chrono::TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            secs: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
        }
    }

    fn parse_iso(value: &str) -> Option<Self> {
        const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", ISO_FRACTION_FORMAT];
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Some(Self::from_datetime(&naive.and_utc()));
            }
        }
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Self::from_datetime(&dt))
    }

    fn fractional_iso(&self) -> Option<String> {
        if self.nanos == 0 {
            return None;
        }
        DateTime::from_timestamp(self.secs, self.nanos)
            .map(|dt| dt.naive_utc().format(ISO_FRACTION_FORMAT).to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fractional_iso() {
            Some(iso) => f.write_str(&iso),
            None => write!(f, "{}", self.secs),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Self::from_secs(secs)
    }
}

impl FromStr for Timestamp {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(secs) = trimmed.parse::<i64>() {
            return Ok(Self::from_secs(secs));
        }
        Self::parse_iso(trimmed).ok_or_else(|| ProtocolError::InvalidTimestamp {
            value: s.to_string(),
        })
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.fractional_iso() {
            Some(iso) => serializer.serialize_str(&iso),
            None => serializer.serialize_i64(self.secs),
        }
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer timestamp or a YYYY-MM-DDTHH:MM:SS string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Ok(Timestamp::from_secs(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        i64::try_from(v)
            .map(Timestamp::from_secs)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_iso_forms_agree() {
        let from_int: Timestamp = serde_json::from_str("946684800").unwrap();
        let from_iso: Timestamp = serde_json::from_str(r#""2000-01-01T00:00:00""#).unwrap();
        assert_eq!(from_int, from_iso);
        assert_eq!(from_iso, Timestamp::EPOCH_FALLBACK);
    }

    #[test]
    fn test_iso_ordering_matches_chronology() {
        let earlier: Timestamp = "2011-12-31T23:55:20".parse().unwrap();
        let later: Timestamp = "2012-01-01T00:00:01".parse().unwrap();
        assert!(later > earlier);
        assert_eq!(later.as_secs() - earlier.as_secs(), 281);
    }

    #[test]
    fn test_fractional_and_rfc3339_accepted() {
        let frac: Timestamp = "2011-12-31T23:55:20.250".parse().unwrap();
        let rfc: Timestamp = "2011-12-31T23:55:20.250+00:00".parse().unwrap();
        assert_eq!(frac, rfc);
        assert_eq!(frac.subsec_nanos(), 250_000_000);
    }

    #[test]
    fn test_fraction_orders_after_whole_second() {
        let whole: Timestamp = "2011-12-31T23:55:20".parse().unwrap();
        let half: Timestamp = serde_json::from_str(r#""2011-12-31T23:55:20.500""#).unwrap();
        let next: Timestamp = "2011-12-31T23:55:21".parse().unwrap();
        assert!(half > whole);
        assert!(half < next);
        assert_eq!(half.as_secs(), whole.as_secs());
    }

    #[test]
    fn test_fractional_display_and_serialize_keep_precision() {
        let half: Timestamp = "2011-12-31T23:55:20.500".parse().unwrap();
        assert_eq!(half.to_string(), "2011-12-31T23:55:20.500");
        assert_eq!(half.to_string().parse::<Timestamp>().unwrap(), half);

        let json = serde_json::to_string(&half).unwrap();
        assert_eq!(json, r#""2011-12-31T23:55:20.500""#);
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), half);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Timestamp::from_secs(101)).unwrap();
        assert_eq!(json, "101");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = "yesterday".parse::<Timestamp>().unwrap_err();
        assert_eq!(err.error_code(), "invalid_timestamp");
        assert!(serde_json::from_str::<Timestamp>("true").is_err());
        assert!(serde_json::from_str::<Timestamp>(r#""soon""#).is_err());
    }

    #[test]
    fn test_negative_and_padded_integers() {
        assert_eq!(" -5 ".parse::<Timestamp>().unwrap().as_secs(), -5);
        let t: Timestamp = serde_json::from_str("-5").unwrap();
        assert_eq!(t.as_secs(), -5);
    }
}
