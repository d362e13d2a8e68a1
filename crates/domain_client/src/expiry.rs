//! Insurance expiry report
//!
//! The countdown is derived at read time from a client's expiry date and the
//! agency's "today"; nothing here is persisted.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::days_between;
use crate::client::Client;

/// Clients whose cover ends within this many days are "expiring soon"
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 30;

/// Expiry countdown for one client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryStatus {
    pub days_remaining: i64,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
}

impl ExpiryStatus {
    /// Computes the countdown; an absent expiry date yields zero days and no flags
    pub fn compute(expiry_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(expiry) = expiry_date else {
            return Self {
                days_remaining: 0,
                is_expired: false,
                is_expiring_soon: false,
            };
        };

        let days_remaining = days_between(today, expiry);
        Self {
            days_remaining,
            is_expired: days_remaining < 0,
            is_expiring_soon: (0..=EXPIRING_SOON_WINDOW_DAYS).contains(&days_remaining),
        }
    }
}

/// A client paired with its expiry countdown
#[derive(Debug, Clone, Serialize)]
pub struct ExpiringClient {
    #[serde(flatten)]
    pub client: Client,
    #[serde(flatten)]
    pub status: ExpiryStatus,
}

/// Builds the expiry report sorted by days remaining, soonest first
///
/// The sort is stable, so clients with equal countdowns keep the order they
/// were supplied in.
pub fn expiry_report(clients: Vec<Client>, today: NaiveDate) -> Vec<ExpiringClient> {
    let mut report: Vec<ExpiringClient> = clients
        .into_iter()
        .map(|client| {
            let status = ExpiryStatus::compute(client.expiry_date, today);
            ExpiringClient { client, status }
        })
        .collect();
    report.sort_by_key(|entry| entry.status.days_remaining);
    report
}
