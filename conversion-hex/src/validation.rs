//! Request validation.
//!
//! All fields are checked and every failure is reported together. A request
//! that fails validation never reaches the resolution engine.

use chrono::{DateTime, Utc};

use conversion_types::{ConvertQuery, CurrencyCode, ValidationErrors};

pub const SOURCE_FIELD: &str = "sourceCurrency";
pub const TARGET_FIELD: &str = "targetCurrency";
pub const DATE_FIELD: &str = "date";

const REQUIRED: &str = "This field is required";
const INVALID_SOURCE: &str = "Source currency is not valid";
const INVALID_TARGET: &str = "Target currency is not valid";
const FUTURE_DATE: &str = "The date cannot be later than the current date";
const MALFORMED_DATE: &str = "The date must be an ISO-8601 instant";

/// A conversion request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    /// `None` means "now", resolved by the engine at call time.
    pub as_of: Option<DateTime<Utc>>,
}

/// Validates raw query parameters against the known currency set and `now`.
pub fn validate(
    query: &ConvertQuery,
    now: DateTime<Utc>,
) -> Result<ConversionRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let source = check_currency(
        query.source_currency.as_deref(),
        SOURCE_FIELD,
        INVALID_SOURCE,
        &mut errors,
    );
    let target = check_currency(
        query.target_currency.as_deref(),
        TARGET_FIELD,
        INVALID_TARGET,
        &mut errors,
    );
    let as_of = check_date(query.date.as_deref(), now, &mut errors);

    match (source, target) {
        (Some(source), Some(target)) if errors.is_empty() => Ok(ConversionRequest {
            source,
            target,
            as_of,
        }),
        _ => Err(errors),
    }
}

fn check_currency(
    value: Option<&str>,
    field: &str,
    invalid_message: &str,
    errors: &mut ValidationErrors,
) -> Option<CurrencyCode> {
    match value {
        None | Some("") => {
            errors.add(field, REQUIRED);
            None
        }
        Some(code) => match code.parse::<CurrencyCode>() {
            Ok(currency) => Some(currency),
            Err(_) => {
                errors.add(field, invalid_message);
                None
            }
        },
    }
}

fn check_date(
    value: Option<&str>,
    now: DateTime<Utc>,
    errors: &mut ValidationErrors,
) -> Option<DateTime<Utc>> {
    let raw = value.filter(|v| !v.is_empty())?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => {
            let as_of = parsed.with_timezone(&Utc);
            if as_of > now {
                errors.add(DATE_FIELD, FUTURE_DATE);
            }
            Some(as_of)
        }
        Err(_) => {
            errors.add(DATE_FIELD, MALFORMED_DATE);
            None
        }
    }
}
