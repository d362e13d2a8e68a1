//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the SQLite database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::SqliteClientAdapter;
//! use domain_client::ClientPort;
//!
//! let adapter = SqliteClientAdapter::new(pool);
//! let client = adapter.get_client(client_id).await?;
//! ```

pub mod client_store;

pub use client_store::SqliteClientAdapter;
