//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for ten bare digits
pub fn phone_digits_strategy() -> impl Strategy<Value = String> {
    "[0-9]{10}"
}

/// Strategy for ten digits interleaved with common punctuation
///
/// Yields the formatted text and the digits it should normalize to.
pub fn formatted_phone_strategy() -> impl Strategy<Value = (String, String)> {
    let separator = prop_oneof![Just(""), Just("-"), Just(" "), Just("."), Just("("), Just(")")];
    (phone_digits_strategy(), prop::collection::vec(separator, 10))
        .prop_map(|(digits, separators)| {
            let formatted: String = digits
                .chars()
                .zip(separators)
                .map(|(d, sep)| format!("{}{}", sep, d))
                .collect();
            (formatted, digits)
        })
}

/// Strategy for digit strings that can never be a valid phone number
pub fn invalid_phone_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{0,9}", "[0-9]{11,15}"]
}

/// Strategy for non-blank client names
pub fn client_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,12})?"
}

/// Strategy for non-negative money amounts with two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for dates within two years either side of `anchor`
pub fn date_near_strategy(anchor: NaiveDate) -> impl Strategy<Value = NaiveDate> {
    (-730i64..730i64).prop_map(move |offset| {
        if offset >= 0 {
            anchor.checked_add_days(Days::new(offset as u64)).unwrap_or(anchor)
        } else {
            anchor.checked_sub_days(Days::new(offset.unsigned_abs())).unwrap_or(anchor)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_client::normalize_phone;

    proptest! {
        #[test]
        fn prop_formatted_phones_normalize(pair in formatted_phone_strategy()) {
            let (formatted, digits) = pair;
            prop_assert_eq!(normalize_phone(&formatted), Some(digits));
        }

        #[test]
        fn prop_wrong_length_rejected(raw in invalid_phone_strategy()) {
            prop_assert_eq!(normalize_phone(&raw), None);
        }
    }
}
