//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::temporal::TemporalError;
use core_kernel::PortError;

#[test]
fn test_core_error_from_temporal_error() {
    let temporal = TemporalError::UnknownTimezone("Nowhere/Land".to_string());
    let core_error: CoreError = temporal.into();

    assert!(matches!(core_error, CoreError::Temporal(_)));
    assert!(core_error.to_string().contains("Nowhere/Land"));
}

#[test]
fn test_port_error_not_found_names_entity() {
    let error = PortError::not_found("Record", "REC-1");

    match &error {
        PortError::NotFound { entity_type, id } => {
            assert_eq!(entity_type, "Record");
            assert_eq!(id, "REC-1");
        }
        _ => panic!("Expected NotFound error"),
    }
    assert!(error.is_not_found());
}
