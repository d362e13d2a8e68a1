//! Tests for calendar helpers

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;

use core_kernel::temporal::{days_between, parse_optional_date, Timezone};

#[test]
fn test_default_timezone_is_utc() {
    assert_eq!(Timezone::default().name(), "UTC");
}

#[test]
fn test_today_is_a_real_date() {
    let tz: Timezone = "America/New_York".parse().unwrap();
    let today = tz.today();
    assert!(today.year() >= 2024);
}

#[test]
fn test_leap_year_span() {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert_eq!(days_between(start, end), 29);
}

#[test]
fn test_parse_rejects_partial_dates() {
    assert!(parse_optional_date(Some("2025-13-01")).is_err());
    assert!(parse_optional_date(Some("2025-02")).is_err());
}

proptest! {
    #[test]
    fn days_between_matches_offset(offset in 0u64..5000) {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let later = base.checked_add_days(Days::new(offset)).unwrap();
        prop_assert_eq!(days_between(base, later), offset as i64);
        prop_assert_eq!(days_between(later, base), -(offset as i64));
    }

    #[test]
    fn formatted_dates_parse_back(offset in 0u64..20000) {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
            .checked_add_days(Days::new(offset)).unwrap();
        let text = date.format("%Y-%m-%d").to_string();
        prop_assert_eq!(parse_optional_date(Some(&text)), Ok(Some(date)));
    }
}
