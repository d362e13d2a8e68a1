//! Integration tests for the SQLite client adapter
//!
//! Each test runs against its own private in-memory database.

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{AdapterHealth, ClientId, HealthCheckable, RecordId};
use domain_client::{ClientPort, ClientService};
use infra_db::{create_memory_pool, SqliteClientAdapter};
use test_utils::{
    assert_claim_numbers, assert_claims_chronological, assert_client_names, assert_normalized_phone,
    assert_report_sorted, StringFixtures, TemporalFixtures, TestClaimInputBuilder,
    TestClientInputBuilder,
};

async fn adapter() -> SqliteClientAdapter {
    let pool = create_memory_pool().await.expect("in-memory pool");
    SqliteClientAdapter::new(pool)
}

async fn service() -> ClientService {
    ClientService::new(Arc::new(adapter().await))
}

mod client_crud {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_round_trips_every_field() {
        let port = adapter().await;
        let draft = TestClientInputBuilder::complete()
            .with_phone(StringFixtures::formatted_phone())
            .build_draft();

        let created = port.create_client(draft).await.unwrap();
        let fetched = port.get_client(created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, created.name);
        assert_normalized_phone(&fetched.phone);
        assert_eq!(fetched.premium, dec!(1500.00));
        assert_eq!(fetched.premium_paid, dec!(500.00));
        assert_eq!(fetched.balance(), dec!(1000.00));
        assert_eq!(fetched.expiry_date, Some(TemporalFixtures::policy_end()));
        assert_eq!(fetched.company.as_deref(), Some(StringFixtures::company()));
    }

    #[tokio::test]
    async fn test_list_is_case_insensitive_alphabetical() {
        let port = adapter().await;
        for name in ["charlie", "Alice", "bob"] {
            port.create_client(TestClientInputBuilder::new().with_name(name).build_draft())
                .await
                .unwrap();
        }
        let clients = port.list_clients().await.unwrap();
        assert_client_names(&clients, &["Alice", "bob", "charlie"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_created_at() {
        let port = adapter().await;
        let created = port
            .create_client(TestClientInputBuilder::new().build_draft())
            .await
            .unwrap();

        let updated = port
            .update_client(
                created.id,
                TestClientInputBuilder::new()
                    .with_name("Jane Smith")
                    .with_premium(dec!(99.99))
                    .build_draft(),
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Jane Smith");
        assert_eq!(updated.created_at, created.created_at);
        let fetched = port.get_client(created.id).await.unwrap();
        assert_eq!(fetched.premium, dec!(99.99));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let port = adapter().await;
        let missing = ClientId::new();

        assert!(port.get_client(missing).await.unwrap_err().is_not_found());
        assert!(port
            .update_client(missing, TestClientInputBuilder::new().build_draft())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(port.delete_client(missing).await.unwrap_err().is_not_found());
        assert!(port.delete_record(RecordId::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_health_check_is_healthy() {
        let port = adapter().await;
        let health = port.health_check().await;
        assert_eq!(health.status, AdapterHealth::Healthy);
    }
}

mod records {
    use super::*;

    #[tokio::test]
    async fn test_records_ordered_by_claim_date() {
        let service = service().await;
        let client = service
            .create_client(TestClientInputBuilder::new().build())
            .await
            .unwrap();

        for (number, days) in [("late", 1), ("early", 30), ("middle", 10)] {
            service
                .add_record(
                    client.id,
                    TestClaimInputBuilder::new()
                        .with_claim_number(number)
                        .with_claim_date(TemporalFixtures::days_before_today(days))
                        .build(),
                    TemporalFixtures::today(),
                )
                .await
                .unwrap();
        }

        let detail = service.client_detail(client.id, false).await.unwrap();
        assert_claim_numbers(&detail.records, &["early", "middle", "late"]);
        assert_claims_chronological(&detail.records);
    }

    #[tokio::test]
    async fn test_record_defaults_persist() {
        let service = service().await;
        let client = service
            .create_client(TestClientInputBuilder::new().build())
            .await
            .unwrap();

        let record = service
            .add_record(
                client.id,
                TestClaimInputBuilder::new().with_status("in review").build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();

        let detail = service.client_detail(client.id, false).await.unwrap();
        assert_eq!(detail.records.len(), 1);
        assert_eq!(detail.records[0], record);
        assert_eq!(detail.records[0].claim_date, TemporalFixtures::today());
    }

    #[tokio::test]
    async fn test_record_for_unknown_client_is_not_found() {
        let service = service().await;
        let err = service
            .add_record(ClientId::new(), TestClaimInputBuilder::new().build(), TemporalFixtures::today())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_record() {
        let service = service().await;
        let client = service
            .create_client(TestClientInputBuilder::new().build())
            .await
            .unwrap();
        let record = service
            .add_record(client.id, TestClaimInputBuilder::new().build(), TemporalFixtures::today())
            .await
            .unwrap();

        service.delete_record(record.id).await.unwrap();
        assert!(service.delete_record(record.id).await.unwrap_err().is_not_found());
        assert!(service.client_detail(client.id, false).await.unwrap().records.is_empty());
    }
}

mod cascade_and_aggregate {
    use super::*;

    #[tokio::test]
    async fn test_delete_client_removes_every_record() {
        let service = service().await;
        let client = service
            .create_client(TestClientInputBuilder::new().build())
            .await
            .unwrap();
        let other = service
            .create_client(TestClientInputBuilder::new().with_name("Other").build())
            .await
            .unwrap();

        for n in 0..4 {
            service
                .add_record(
                    client.id,
                    TestClaimInputBuilder::new().with_claim_number(format!("C{}", n)).build(),
                    TemporalFixtures::today(),
                )
                .await
                .unwrap();
        }
        service
            .add_record(other.id, TestClaimInputBuilder::new().build(), TemporalFixtures::today())
            .await
            .unwrap();

        assert_eq!(service.delete_client(client.id).await.unwrap(), 4);
        assert!(service.client_detail(client.id, false).await.unwrap_err().is_not_found());

        let remaining = service
            .port()
            .records_for_clients(&[client.id, other.id])
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].client_id, other.id);
    }

    #[tokio::test]
    async fn test_aggregate_merges_rows_with_same_identity() {
        let service = service().await;
        let first = service
            .create_client(TestClientInputBuilder::new().with_name("Jane Doe").build())
            .await
            .unwrap();
        let second = service
            .create_client(
                TestClientInputBuilder::new()
                    .with_name("JANE DOE")
                    .with_phone(StringFixtures::formatted_phone())
                    .build(),
            )
            .await
            .unwrap();
        service
            .create_client(TestClientInputBuilder::new().with_phone("0000000000").build())
            .await
            .unwrap();

        service
            .add_record(
                second.id,
                TestClaimInputBuilder::new()
                    .with_claim_number("B")
                    .with_claim_date(TemporalFixtures::days_before_today(1))
                    .build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();
        service
            .add_record(
                first.id,
                TestClaimInputBuilder::new()
                    .with_claim_number("A")
                    .with_claim_date(TemporalFixtures::days_before_today(20))
                    .build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();

        let merged = service.client_detail(second.id, true).await.unwrap();
        assert_eq!(merged.client.id, first.id);
        assert_claim_numbers(&merged.records, &["A", "B"]);

        let single = service.client_detail(second.id, false).await.unwrap();
        assert_claim_numbers(&single.records, &["B"]);
    }
}

mod expiry {
    use super::*;

    #[tokio::test]
    async fn test_expiry_report_from_store() {
        let service = service().await;
        let today = TemporalFixtures::today();

        service
            .create_client(
                TestClientInputBuilder::new()
                    .with_name("Far")
                    .with_expiry_date(TemporalFixtures::days_from_today(90))
                    .build(),
            )
            .await
            .unwrap();
        service
            .create_client(TestClientInputBuilder::new().with_name("Undated").build())
            .await
            .unwrap();
        service
            .create_client(
                TestClientInputBuilder::new()
                    .with_name("Lapsed")
                    .with_expiry_date(TemporalFixtures::days_before_today(1))
                    .build(),
            )
            .await
            .unwrap();
        service
            .create_client(
                TestClientInputBuilder::new()
                    .with_name("Soon")
                    .with_expiry_date(TemporalFixtures::days_from_today(30))
                    .build(),
            )
            .await
            .unwrap();

        let report = service.list_expiring(today).await.unwrap();
        assert_report_sorted(&report);

        let names: Vec<_> = report.iter().map(|e| e.client.name.as_str()).collect();
        assert_eq!(names, vec!["Lapsed", "Undated", "Soon", "Far"]);

        assert!(report[0].status.is_expired);
        assert_eq!(report[0].status.days_remaining, -1);
        assert!(!report[1].status.is_expired && !report[1].status.is_expiring_soon);
        assert!(report[2].status.is_expiring_soon);
        assert!(!report[3].status.is_expiring_soon);
    }
}
