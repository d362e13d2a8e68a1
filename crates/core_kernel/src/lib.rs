//! Core Kernel - Foundational types shared by the agency books crates
//!
//! This crate provides the building blocks used across all modules:
//! - Strongly-typed identifiers for clients and claim records
//! - Calendar helpers for timezone-aware "today" computations
//! - Port error types and health check abstractions

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{Timezone, TemporalError, days_between};
pub use identifiers::{ClientId, RecordId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
