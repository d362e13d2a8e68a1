//! Tests for domain_client

use chrono::{Days, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::ClientId;

use domain_client::client::{Client, ClientDraft};
use domain_client::expiry::{expiry_report, ExpiryStatus, EXPIRING_SOON_WINDOW_DAYS};
use domain_client::search::rank_clients;

fn draft(name: &str, phone: &str) -> ClientDraft {
    ClientDraft {
        name: name.to_string(),
        email: None,
        phone: phone.to_string(),
        customer_id: None,
        vehicle_plate: None,
        company: None,
        insurance_category: None,
        insurance_type: None,
        business_type: None,
        premium: dec!(0),
        premium_paid: dec!(0),
        start_date: None,
        expiry_date: None,
    }
}

fn client(name: &str, phone: &str) -> Client {
    Client::from_draft(ClientId::new(), draft(name, phone), Utc::now())
}

fn names(ranked: &[&Client]) -> Vec<String> {
    ranked.iter().map(|c| c.name.clone()).collect()
}

// ============================================================================
// Client entity
// ============================================================================

mod entity_tests {
    use super::*;

    #[test]
    fn test_balance_is_premium_minus_paid() {
        let mut d = draft("Jane", "1234567890");
        d.premium = dec!(1200.00);
        d.premium_paid = dec!(450.50);
        let c = Client::from_draft(ClientId::new(), d, Utc::now());
        assert_eq!(c.balance(), dec!(749.50));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut d = draft("Jane", "1234567890");
        d.vehicle_plate = Some("ABC-123".to_string());
        let c = Client::from_draft(ClientId::new(), d, Utc::now());
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["vehiclePlate"], "ABC-123");
        assert_eq!(json["premiumPaid"], "0");
        assert!(json.get("expiryDate").is_some());
    }
}

// ============================================================================
// Search ranking
// ============================================================================

mod search_tests {
    use super::*;

    #[test]
    fn test_prefix_matches_rank_above_substring_matches() {
        let clients = vec![
            client("Bojo", "1000000001"),
            client("John", "1000000002"),
            client("Joan", "1000000003"),
            client("Mary", "1000000004"),
        ];
        let ranked = rank_clients("jo", &clients);
        assert_eq!(names(&ranked), vec!["Joan", "John", "Bojo"]);
    }

    #[test]
    fn test_phone_only_matches_rank_last() {
        let clients = vec![
            client("Zed", "5550001234"),
            client("Al 555", "1000000002"),
        ];
        let ranked = rank_clients("555", &clients);
        assert_eq!(names(&ranked), vec!["Al 555", "Zed"]);
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let clients = vec![client("Jane Doe", "1000000001"), client("Bob", "1000000002")];
        let ranked = rank_clients("  DOE ", &clients);
        assert_eq!(names(&ranked), vec!["Jane Doe"]);
    }

    #[test]
    fn test_empty_query_returns_everyone_alphabetically() {
        let clients = vec![
            client("carl", "1000000001"),
            client("Bea", "1000000002"),
            client("adam", "1000000003"),
        ];
        let ranked = rank_clients("", &clients);
        assert_eq!(names(&ranked), vec!["adam", "Bea", "carl"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let clients = vec![client("Jane", "1000000001")];
        assert!(rank_clients("xyz", &clients).is_empty());
    }
}

// ============================================================================
// Expiry report
// ============================================================================

mod expiry_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 20).unwrap()
    }

    #[test]
    fn test_report_orders_by_days_remaining() {
        let mut soon = draft("Soon", "1000000001");
        soon.expiry_date = today().checked_add_days(Days::new(5));
        let mut gone = draft("Gone", "1000000002");
        gone.expiry_date = today().checked_sub_days(Days::new(10));
        let mut far = draft("Far", "1000000003");
        far.expiry_date = today().checked_add_days(Days::new(200));

        let clients = [far, soon, gone]
            .into_iter()
            .map(|d| Client::from_draft(ClientId::new(), d, Utc::now()))
            .collect();

        let report = expiry_report(clients, today());
        let order: Vec<_> = report.iter().map(|e| e.client.name.as_str()).collect();
        assert_eq!(order, vec!["Gone", "Soon", "Far"]);
        assert_eq!(report[1].status.days_remaining, 5);
    }

    #[test]
    fn test_report_entry_serializes_flat() {
        let mut d = draft("Soon", "1000000001");
        d.expiry_date = today().checked_add_days(Days::new(3));
        let report = expiry_report(vec![Client::from_draft(ClientId::new(), d, Utc::now())], today());
        let json = serde_json::to_value(&report[0]).unwrap();
        assert_eq!(json["name"], "Soon");
        assert_eq!(json["daysRemaining"], 3);
        assert_eq!(json["isExpiringSoon"], true);
        assert_eq!(json["isExpired"], false);
    }

    #[test]
    fn test_year_boundary() {
        let expiry = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let status = ExpiryStatus::compute(Some(expiry), today());
        assert_eq!(status.days_remaining, 13);
        assert!(status.is_expiring_soon);
    }

    proptest! {
        #[test]
        fn prop_flags_follow_days_remaining(offset in -400i64..400) {
            let expiry = if offset >= 0 {
                today().checked_add_days(Days::new(offset as u64)).unwrap()
            } else {
                today().checked_sub_days(Days::new((-offset) as u64)).unwrap()
            };
            let status = ExpiryStatus::compute(Some(expiry), today());
            prop_assert_eq!(status.days_remaining, offset);
            prop_assert_eq!(status.is_expired, offset < 0);
            prop_assert_eq!(
                status.is_expiring_soon,
                (0..=EXPIRING_SOON_WINDOW_DAYS).contains(&offset)
            );
            prop_assert!(!(status.is_expired && status.is_expiring_soon));
        }
    }
}
