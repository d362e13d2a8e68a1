//! Repository implementations for the agency's tables
//!
//! Repositories encapsulate SQL queries and return row types; they know
//! nothing about domain validation. Queries are checked at runtime so the
//! crate builds without a live database.

pub mod clients;
pub mod records;

pub use clients::{ClientRepository, ClientRow};
pub use records::{RecordRepository, RecordRow};
