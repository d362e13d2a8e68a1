//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for clients and claims. These fixtures are
//! designed to be consistent and predictable for unit tests.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The fixed "today" used by report tests (Jun 15, 2025)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    /// A date `days` after `today()`
    pub fn days_from_today(days: u64) -> NaiveDate {
        Self::today().checked_add_days(Days::new(days)).unwrap()
    }

    /// A date `days` before `today()`
    pub fn days_before_today(days: u64) -> NaiveDate {
        Self::today().checked_sub_days(Days::new(days)).unwrap()
    }

    /// Standard policy start date (Jan 1, 2025)
    pub fn policy_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    /// Standard policy expiry date (Dec 31, 2025)
    pub fn policy_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    /// A fixed instant for timestamps
    pub fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap()
    }
}

/// Fixture for commonly used strings
pub struct StringFixtures;

impl StringFixtures {
    /// A standard client name
    pub fn client_name() -> &'static str {
        "Jane Doe"
    }

    /// A normalized ten-digit phone number
    pub fn phone() -> &'static str {
        "1234567890"
    }

    /// The same number as `phone()` with punctuation
    pub fn formatted_phone() -> &'static str {
        "123-456-7890"
    }

    /// A phone number with too few digits
    pub fn short_phone() -> &'static str {
        "12345"
    }

    /// A standard email address
    pub fn email() -> &'static str {
        "jane@example.com"
    }

    /// A standard vehicle plate
    pub fn vehicle_plate() -> &'static str {
        "KAA 123A"
    }

    /// A standard insurer name
    pub fn company() -> &'static str {
        "Acme Insurance"
    }

    /// A standard claim number
    pub fn claim_number() -> &'static str {
        "CLM-0001"
    }
}

/// Fixture for monetary amounts
pub struct AmountFixtures;

impl AmountFixtures {
    /// A typical annual premium
    pub fn premium() -> Decimal {
        dec!(1500.00)
    }

    /// A partial payment against `premium()`
    pub fn premium_paid() -> Decimal {
        dec!(500.00)
    }

    /// A typical claim amount
    pub fn claim_amount() -> Decimal {
        dec!(2500.50)
    }
}
