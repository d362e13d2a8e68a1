//! Calendar handling types
//!
//! Coverage windows and claim dates are plain calendar dates. "Today" is
//! always resolved in the agency's configured timezone so that expiry
//! countdowns flip at local midnight rather than UTC midnight.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;

/// Calendar date wire format (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timezone wrapper for the agency's local calendar
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Timezone>().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the IANA name of the timezone
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Converts a UTC instant to the local calendar date
    pub fn date_of(&self, utc: DateTime<Utc>) -> NaiveDate {
        utc.with_timezone(&self.0).date_naive()
    }

    /// Today's calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Whole days from `from` to `to`; negative when `to` is in the past
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parses an optional calendar date, treating blank input as absent
///
/// Forms submit an empty string for an untouched date field, so blank and
/// missing are equivalent here.
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, TemporalError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| TemporalError::InvalidDate(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_signs() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 31)), 30);
        assert_eq!(days_between(date(2024, 1, 2), date(2024, 1, 1)), -1);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn test_parse_optional_date_blank_is_none() {
        assert_eq!(parse_optional_date(None), Ok(None));
        assert_eq!(parse_optional_date(Some("")), Ok(None));
        assert_eq!(parse_optional_date(Some("   ")), Ok(None));
    }

    #[test]
    fn test_parse_optional_date_valid_and_invalid() {
        assert_eq!(parse_optional_date(Some("2025-06-30")), Ok(Some(date(2025, 6, 30))));
        assert!(matches!(
            parse_optional_date(Some("30/06/2025")),
            Err(TemporalError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_timezone_parse_and_serde() {
        let tz: Timezone = "Africa/Nairobi".parse().unwrap();
        assert_eq!(tz.name(), "Africa/Nairobi");
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Africa/Nairobi\"");
        assert!("Mars/Olympus".parse::<Timezone>().is_err());
    }

    #[test]
    fn test_date_of_crosses_midnight() {
        let tz: Timezone = "Africa/Nairobi".parse().unwrap();
        let late_utc = date(2024, 5, 1).and_hms_opt(22, 30, 0).unwrap().and_utc();
        assert_eq!(tz.date_of(late_utc), date(2024, 5, 2));
        assert_eq!(Timezone::default().date_of(late_utc), date(2024, 5, 1));
    }
}
