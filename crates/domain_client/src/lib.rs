//! Client Domain
//!
//! This crate implements the agency's client book: the client entity and its
//! validation rules, the derived expiry report, the duplicate-merging client
//! detail query, and the search ranking used by the dashboard.
//!
//! # Duplicate clients
//!
//! Nothing prevents two client rows with the same name and phone from being
//! created. Instead, the aggregate detail view treats rows sharing a
//! case-insensitive name and an exact phone as one identity and unions their
//! claim records at read time.

pub mod client;
pub mod validation;
pub mod expiry;
pub mod search;
pub mod ports;
pub mod services;
pub mod error;

pub use client::{Client, ClientDraft};
pub use validation::{ClientInput, ClientValidator, ValidationResult, normalize_phone};
pub use expiry::{ExpiryStatus, ExpiringClient, expiry_report, EXPIRING_SOON_WINDOW_DAYS};
pub use search::rank_clients;
pub use ports::ClientPort;
pub use services::{ClientService, ClientDetail};
pub use error::ClientError;
