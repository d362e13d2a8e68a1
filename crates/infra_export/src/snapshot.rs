//! Export payload

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::UploadError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a, T> {
    exported_at: String,
    clients: &'a [T],
}

/// Serializes `{ exportedAt, clients }` as pretty-printed JSON
pub fn snapshot_bytes<T: Serialize>(clients: &[T], exported_at: DateTime<Utc>) -> Result<Vec<u8>, UploadError> {
    let snapshot = Snapshot {
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        clients,
    };
    Ok(serde_json::to_vec_pretty(&snapshot)?)
}

/// Remote file name for an export taken at `at`
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("clients-export-{}.json", at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[test]
    fn test_snapshot_shape() {
        let at = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let bytes = snapshot_bytes(&[json!({"name": "Jane"})], at).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["exportedAt"], "2025-06-15T12:00:00.000Z");
        assert_eq!(value["clients"][0]["name"], "Jane");
        assert!(String::from_utf8(bytes).unwrap().contains('\n'));
    }

    #[test]
    fn test_file_name_uses_epoch_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(export_file_name(at), "clients-export-1700000000123.json");
    }
}
