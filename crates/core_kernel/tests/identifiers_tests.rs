//! Tests for strongly-typed identifiers

use std::collections::HashSet;

use core_kernel::{ClientId, RecordId};
use uuid::Uuid;

#[test]
fn test_client_and_record_prefixes_differ() {
    assert_eq!(ClientId::prefix(), "CLI");
    assert_eq!(RecordId::prefix(), "REC");
}

#[test]
fn test_new_ids_are_unique() {
    let ids: HashSet<ClientId> = (0..1000).map(|_| ClientId::new()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn test_v7_ids_are_time_ordered() {
    let first = RecordId::new_v7();
    let second = RecordId::new_v7();
    assert!(first.as_uuid() <= second.as_uuid());
}

#[test]
fn test_record_id_rejects_client_prefix() {
    let client = ClientId::new();
    assert!(client.to_string().parse::<RecordId>().is_err());
}

#[test]
fn test_round_trip_through_uuid() {
    let uuid = Uuid::new_v4();
    let id = ClientId::from_uuid(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
}

#[test]
fn test_deserializes_from_bare_uuid_string() {
    let uuid = Uuid::new_v4();
    let id: ClientId = serde_json::from_str(&format!("\"{}\"", uuid)).unwrap();
    assert_eq!(id.as_uuid(), &uuid);
}
