//! Client validation rules
//!
//! # Rules
//!
//! - Name is required and must not be blank
//! - Phone is required and must contain exactly 10 digits once every
//!   non-digit character is stripped; the stored form is the bare digits
//! - Premium and premium paid default to zero and must not be negative
//! - Start and expiry dates must be `YYYY-MM-DD`; blank means absent
//!
//! A malformed email address only produces a warning.

use rust_decimal::Decimal;

use core_kernel::temporal::parse_optional_date;
use crate::client::ClientDraft;
use crate::error::ClientError;

/// Number of digits in a valid phone number
pub const PHONE_DIGITS: usize = 10;

/// Result of client validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the input is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Unvalidated client fields as submitted by a caller
#[derive(Debug, Clone, Default)]
pub struct ClientInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer_id: Option<String>,
    pub vehicle_plate: Option<String>,
    pub company: Option<String>,
    pub insurance_category: Option<String>,
    pub insurance_type: Option<String>,
    pub business_type: Option<String>,
    pub premium: Option<Decimal>,
    pub premium_paid: Option<Decimal>,
    pub start_date: Option<String>,
    pub expiry_date: Option<String>,
}

/// Strips every non-digit character and checks the remaining length
///
/// # Examples
///
/// ```rust
/// use domain_client::normalize_phone;
///
/// assert_eq!(normalize_phone("123-456-7890").as_deref(), Some("1234567890"));
/// assert_eq!(normalize_phone("12345"), None);
/// ```
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == PHONE_DIGITS).then_some(digits)
}

/// Validator for client input
pub struct ClientValidator;

impl ClientValidator {
    /// Checks the input without consuming it
    pub fn check(input: &ClientInput) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if input.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            result.add_error("Name is required");
        }

        match input.phone.as_deref() {
            Some(phone) if normalize_phone(phone).is_some() => {}
            _ => result.add_error("Phone number is required and must be 10 digits"),
        }

        if let Some(email) = input.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !email.contains('@') || !email.contains('.') {
                result.add_warning(format!("Email looks malformed: {}", email));
            }
        }

        for (label, amount) in [("Premium", input.premium), ("Premium paid", input.premium_paid)] {
            if amount.is_some_and(|a| a.is_sign_negative() && !a.is_zero()) {
                result.add_error(format!("{} cannot be negative", label));
            }
        }

        for (label, raw) in [("Start date", &input.start_date), ("Expiry date", &input.expiry_date)] {
            if let Err(e) = parse_optional_date(raw.as_deref()) {
                result.add_error(format!("{}: {}", label, e));
            }
        }

        result
    }

    /// Validates the input and converts it into a persistable draft
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` listing every failed rule.
    pub fn validate(input: ClientInput) -> Result<ClientDraft, ClientError> {
        let result = Self::check(&input);
        if !result.is_valid {
            return Err(ClientError::Validation(result.errors));
        }
        for warning in &result.warnings {
            tracing::warn!(%warning, "client input warning");
        }

        let name = input.name.unwrap_or_default().trim().to_string();
        let phone = input
            .phone
            .as_deref()
            .and_then(normalize_phone)
            .ok_or_else(|| ClientError::validation("Phone number is required and must be 10 digits"))?;
        let start_date = parse_optional_date(input.start_date.as_deref())
            .map_err(|e| ClientError::validation(e.to_string()))?;
        let expiry_date = parse_optional_date(input.expiry_date.as_deref())
            .map_err(|e| ClientError::validation(e.to_string()))?;

        Ok(ClientDraft {
            name,
            email: non_blank(input.email),
            phone,
            customer_id: non_blank(input.customer_id),
            vehicle_plate: non_blank(input.vehicle_plate),
            company: non_blank(input.company),
            insurance_category: non_blank(input.insurance_category),
            insurance_type: non_blank(input.insurance_type),
            business_type: non_blank(input.business_type),
            premium: input.premium.unwrap_or(Decimal::ZERO),
            premium_paid: input.premium_paid.unwrap_or(Decimal::ZERO),
            start_date,
            expiry_date,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
