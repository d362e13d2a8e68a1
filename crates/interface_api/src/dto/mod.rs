//! Request and response bodies

pub mod clients;
pub mod records;

use std::str::FromStr;

use axum::extract::FromRequest;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as `ApiError` bodies
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `{ message }` acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Reads a text field that may have been sent as a number
pub(crate) fn lenient_text(value: Option<Value>, field: &str) -> Result<Option<String>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(ApiError::Validation(format!("{} must be text", field))),
    }
}

/// Reads an amount sent as a number or numeric string; blank reads as absent
pub(crate) fn lenient_decimal(value: Option<Value>, field: &str) -> Result<Option<Decimal>, ApiError> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(ApiError::Validation(format!("{} must be a number", field))),
    };

    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map(Some)
        .map_err(|_| ApiError::Validation(format!("{} must be a number", field)))
}
