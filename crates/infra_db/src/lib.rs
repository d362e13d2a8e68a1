//! Infrastructure Database Layer
//!
//! This crate provides the SQLite persistence for the agency's client book
//! using SQLx: connection pooling, the embedded schema, row-level
//! repositories, and the `ClientPort` adapter used by the services.
//!
//! # Cascade delete
//!
//! Deleting a client removes its claim records and the client row inside a
//! single transaction; the `records.client_id` foreign key also cascades.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, SqliteClientAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("sqlite://agency.db?mode=rwc")).await?;
//! let adapter = SqliteClientAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, create_memory_pool, run_migrations};
pub use error::DatabaseError;
pub use adapters::SqliteClientAdapter;
