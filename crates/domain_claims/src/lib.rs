//! Claims Domain
//!
//! A claim record is an event tied to exactly one client: a claim number,
//! an amount, a date, a status and the kind of policy period it belongs to.
//! Records are created and deleted; they are never edited in place.

pub mod record;
pub mod error;

pub use record::{ClaimRecord, ClaimRecordInput, ClaimStatus, NewClaimRecord, RecordType};
pub use error::ClaimError;
