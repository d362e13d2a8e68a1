//! Request handlers

pub mod health;
pub mod session;
pub mod clients;
pub mod records;
pub mod expiry;
pub mod drive;
