//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_claims::ClaimRecord;
use domain_client::{Client, ExpiringClient};

/// Asserts that the clients appear with exactly these names, in order
pub fn assert_client_names(clients: &[Client], expected: &[&str]) {
    let actual: Vec<&str> = clients.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        actual, expected,
        "Client order mismatch: actual={:?}, expected={:?}",
        actual, expected
    );
}

/// Asserts that the records appear with exactly these claim numbers, in order
pub fn assert_claim_numbers(records: &[ClaimRecord], expected: &[&str]) {
    let actual: Vec<&str> = records.iter().map(|r| r.claim_number.as_str()).collect();
    assert_eq!(
        actual, expected,
        "Claim order mismatch: actual={:?}, expected={:?}",
        actual, expected
    );
}

/// Asserts that records are ordered by claim date, oldest first
pub fn assert_claims_chronological(records: &[ClaimRecord]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].claim_date <= pair[1].claim_date,
            "Claims out of order: {} ({}) before {} ({})",
            pair[0].claim_number,
            pair[0].claim_date,
            pair[1].claim_number,
            pair[1].claim_date
        );
    }
}

/// Asserts that an expiry report is sorted by days remaining
pub fn assert_report_sorted(report: &[ExpiringClient]) {
    for pair in report.windows(2) {
        assert!(
            pair[0].status.days_remaining <= pair[1].status.days_remaining,
            "Report out of order: {} ({} days) before {} ({} days)",
            pair[0].client.name,
            pair[0].status.days_remaining,
            pair[1].client.name,
            pair[1].status.days_remaining
        );
    }
}

/// Asserts that a phone number is stored in normalized form
pub fn assert_normalized_phone(phone: &str) {
    assert!(
        phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()),
        "Expected ten bare digits, got {:?}",
        phone
    );
}
