//! Request-body validation for payment operations.
//!
//! Bodies arrive as loosely typed JSON. Each rule here turns one raw field
//! into a domain value or a [`FieldError`]; all failures are collected so the
//! client sees every problem at once.

use serde_json::Value;

use super::{AmountError, Currency, MinorAmount, PaymentIntentId};
use crate::domain::foundation::FieldError;

/// Description used when the client does not send one.
pub const DEFAULT_DESCRIPTION: &str = "AutoCare Pro Service Payment";

/// A create-intent body that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedIntentRequest {
    /// Amount as the client sent it, in major units.
    pub major_amount: f64,
    pub amount: MinorAmount,
    pub currency: Currency,
    pub description: String,
}

/// Validates the fields of a create-intent body.
///
/// `None` means the field was absent. An explicit `null` is a present value
/// and is rejected where a string or number is required.
pub fn validate_create_intent(
    amount: Option<&Value>,
    currency: Option<&Value>,
    description: Option<&Value>,
) -> Result<ValidatedIntentRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let amount = match parse_amount(amount) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let currency = match currency {
        None => Some(Currency::default()),
        Some(Value::String(code)) => match Currency::parse(code) {
            Ok(c) => Some(c),
            Err(_) => {
                errors.push(currency_error(Value::String(code.clone())));
                None
            }
        },
        Some(other) => {
            errors.push(currency_error(other.clone()));
            None
        }
    };

    let description = match description {
        None => Some(DEFAULT_DESCRIPTION.to_string()),
        Some(Value::String(d)) => Some(d.clone()),
        Some(other) => {
            errors.push(
                FieldError::new("description", "Description must be a string")
                    .with_value(other.clone()),
            );
            None
        }
    };

    match (amount, currency, description) {
        (Some((major_amount, amount)), Some(currency), Some(description)) if errors.is_empty() => {
            Ok(ValidatedIntentRequest {
                major_amount,
                amount,
                currency,
                description,
            })
        }
        _ => Err(errors),
    }
}

/// Validates the `paymentIntentId` of a confirm body.
pub fn validate_payment_intent_id(value: Option<&Value>) -> Result<PaymentIntentId, Vec<FieldError>> {
    let required = || FieldError::new("paymentIntentId", "Payment intent ID is required");

    match value {
        Some(Value::String(id)) => PaymentIntentId::new(id.clone())
            .map_err(|_| vec![required().with_value(Value::String(id.clone()))]),
        Some(Value::Null) | None => Err(vec![required()]),
        Some(other) => Err(vec![required().with_value(other.clone())]),
    }
}

fn currency_error(value: Value) -> FieldError {
    FieldError::new("currency", "Currency must be 3 characters").with_value(value)
}

fn parse_amount(value: Option<&Value>) -> Result<(f64, MinorAmount), FieldError> {
    let not_a_number = || FieldError::new("amount", AmountError::NotFinite.to_string());

    let major = match value {
        None => return Err(not_a_number()),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| not_a_number().with_value(Value::Number(n.clone())))?,
        Some(Value::String(s)) if is_numeric_string(s) => s
            .parse::<f64>()
            .map_err(|_| not_a_number().with_value(Value::String(s.clone())))?,
        Some(other) => return Err(not_a_number().with_value(other.clone())),
    };

    MinorAmount::from_major(major)
        .map(|minor| (major, minor))
        .map_err(|e| {
            let value = value.cloned().unwrap_or(Value::Null);
            FieldError::new("amount", e.to_string()).with_value(value)
        })
}

/// Plain decimal notation: optional sign, digits, at most one dot, and at
/// least one digit after it. Exponents and surrounding whitespace are not
/// numeric.
fn is_numeric_string(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => ("", unsigned),
    };
    !frac_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.chars().all(|c| c.is_ascii_digit())
}
