//! Metric Validator: narrows an untrusted provider payload to a
//! [`FinancialRecord`].
//!
//! The provider is an LLM-backed search, so the payload shape is best-effort.
//! Presence is checked for all four fields before anything else so one failure
//! message names every absent field, not just the first.

use serde_json::Value;

use crate::{FinancialRecord, ValidationError};

/// Fields a provider payload must carry, in diagnostic order.
pub const REQUIRED_FIELDS: [&str; 4] = ["stockPrice", "fcfPerShare", "wacc", "currency"];

/// Validate a raw provider payload.
///
/// Checks, in order: all four fields present and non-null (every offender
/// enumerated in one error); `currency` is a non-empty string; the three
/// metric fields are JSON numbers. Numeric values are taken as-is, with no
/// coercion and no sign or magnitude constraints.
pub fn validate(raw: &Value) -> Result<FinancialRecord, ValidationError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| raw.get(**field).map_or(true, Value::is_null))
        .map(|field| (*field).to_owned())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    let currency = match raw.get("currency") {
        Some(Value::String(code)) if !code.is_empty() => code.clone(),
        Some(other) => {
            return Err(ValidationError::MalformedCurrency {
                value: other.to_string(),
            })
        }
        // Unreachable: absence was reported above.
        None => {
            return Err(ValidationError::MissingFields {
                fields: vec![String::from("currency")],
            })
        }
    };

    Ok(FinancialRecord {
        stock_price: numeric_field(raw, "stockPrice")?,
        fcf_per_share: numeric_field(raw, "fcfPerShare")?,
        wacc: numeric_field(raw, "wacc")?,
        currency,
    })
}

fn numeric_field(raw: &Value, field: &'static str) -> Result<f64, ValidationError> {
    raw.get(field)
        .and_then(Value::as_f64)
        .ok_or(ValidationError::NonNumericField { field })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_complete_payload() {
        let raw = json!({
            "stockPrice": 150.75,
            "fcfPerShare": 5.20,
            "wacc": 8.5,
            "currency": "USD",
        });

        let record = validate(&raw).expect("payload should validate");
        assert_eq!(record.stock_price, 150.75);
        assert_eq!(record.currency, "USD");
    }

    #[test]
    fn enumerates_every_missing_field() {
        let raw = json!({ "stockPrice": 100.0, "wacc": null });

        let err = validate(&raw).expect_err("must fail");
        let ValidationError::MissingFields { fields } = &err else {
            panic!("expected MissingFields, got {err:?}");
        };
        assert_eq!(fields, &["fcfPerShare", "wacc", "currency"]);
        assert!(err.to_string().contains("fcfPerShare"));
        assert!(err.to_string().contains("wacc"));
    }

    #[test]
    fn rejects_empty_currency() {
        let raw = json!({
            "stockPrice": 100.0,
            "fcfPerShare": 3.0,
            "wacc": 8.0,
            "currency": "",
        });

        let err = validate(&raw).expect_err("must fail");
        assert!(matches!(err, ValidationError::MalformedCurrency { .. }));
    }

    #[test]
    fn rejects_numeric_currency() {
        let raw = json!({
            "stockPrice": 100.0,
            "fcfPerShare": 3.0,
            "wacc": 8.0,
            "currency": 840,
        });

        let err = validate(&raw).expect_err("must fail");
        assert!(matches!(err, ValidationError::MalformedCurrency { .. }));
    }

    #[test]
    fn accepts_any_non_empty_currency_string() {
        let raw = json!({
            "stockPrice": 100.0,
            "fcfPerShare": 3.0,
            "wacc": 8.0,
            "currency": "pesos",
        });

        let record = validate(&raw).expect("payload should validate");
        assert_eq!(record.currency, "pesos");
    }

    #[test]
    fn rejects_stringly_typed_number() {
        let raw = json!({
            "stockPrice": "150.75",
            "fcfPerShare": 5.20,
            "wacc": 8.5,
            "currency": "USD",
        });

        let err = validate(&raw).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonNumericField {
                field: "stockPrice"
            }
        ));
    }

    #[test]
    fn integer_payload_values_are_accepted() {
        let raw = json!({
            "stockPrice": 100,
            "fcfPerShare": 5,
            "wacc": 8,
            "currency": "EUR",
        });

        let record = validate(&raw).expect("payload should validate");
        assert_eq!(record.wacc, 8.0);
    }
}
