use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Validated financial snapshot for one company.
///
/// Serialized with the provider's camelCase key names so a validated record and
/// a raw provider payload share one wire shape. Sign and magnitude of the
/// numeric fields are deliberately unconstrained here; only derivation treats
/// a non-positive stock price specially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    /// Current stock price in native currency units.
    pub stock_price: f64,
    /// Free cash flow per share, trailing twelve months, same currency.
    pub fcf_per_share: f64,
    /// Weighted average cost of capital, in percentage units (8.5 = 8.5%).
    pub wacc: f64,
    /// ISO 4217 currency code as reported by the provider.
    pub currency: String,
}

impl FinancialRecord {
    pub fn new(
        stock_price: f64,
        fcf_per_share: f64,
        wacc: f64,
        currency: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        validate_finite("stockPrice", stock_price)?;
        validate_finite("fcfPerShare", fcf_per_share)?;
        validate_finite("wacc", wacc)?;

        let currency = currency.into();
        if currency.is_empty() {
            return Err(ValidationError::MalformedCurrency {
                value: String::from("\"\""),
            });
        }

        Ok(Self {
            stock_price,
            fcf_per_share,
            wacc,
            currency,
        })
    }

    /// Overwrite a single numeric field. Rejects non-finite edits so a bad
    /// input can never poison later derivations.
    pub fn set(&mut self, field: Field, value: f64) -> Result<(), ValidationError> {
        validate_finite(field.as_str(), value)?;
        match field {
            Field::StockPrice => self.stock_price = value,
            Field::FcfPerShare => self.fcf_per_share = value,
            Field::Wacc => self.wacc = value,
        }
        Ok(())
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

/// Edit-addressable numeric fields of a [`FinancialRecord`].
///
/// Currency is display-only and not addressable; edits never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    StockPrice,
    FcfPerShare,
    Wacc,
}

impl Field {
    /// Wire name, matching the provider payload keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StockPrice => "stockPrice",
            Self::FcfPerShare => "fcfPerShare",
            Self::Wacc => "wacc",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "stockprice" | "price" => Ok(Self::StockPrice),
            "fcfpershare" | "fcf" => Ok(Self::FcfPerShare),
            "wacc" => Ok(Self::Wacc),
            _ => Err(ValidationError::InvalidField {
                value: value.to_owned(),
            }),
        }
    }
}

/// Provenance metadata attached to a fetch; carried through unchanged and never
/// used in computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

impl GroundingSource {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_negative_fcf() {
        let record = FinancialRecord::new(10.0, -1.25, 7.0, "USD").expect("must be valid");
        assert_eq!(record.fcf_per_share, -1.25);
    }

    #[test]
    fn rejects_empty_currency() {
        let err = FinancialRecord::new(10.0, 1.0, 7.0, "").expect_err("must fail");
        assert!(matches!(err, ValidationError::MalformedCurrency { .. }));
    }

    #[test]
    fn rejects_non_finite_edit() {
        let mut record = FinancialRecord::new(10.0, 1.0, 7.0, "USD").expect("must be valid");
        let err = record.set(Field::Wacc, f64::NAN).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue { field: "wacc" }
        ));
        assert_eq!(record.wacc, 7.0);
    }

    #[test]
    fn parses_field_aliases() {
        assert_eq!("stock-price".parse::<Field>().expect("valid"), Field::StockPrice);
        assert_eq!("fcf_per_share".parse::<Field>().expect("valid"), Field::FcfPerShare);
        assert_eq!("WACC".parse::<Field>().expect("valid"), Field::Wacc);
        assert!(matches!(
            "currency".parse::<Field>(),
            Err(ValidationError::InvalidField { .. })
        ));
    }

    #[test]
    fn serializes_with_provider_key_names() {
        let record = FinancialRecord::new(150.75, 5.20, 8.5, "USD").expect("must be valid");
        let value = serde_json::to_value(&record).expect("must serialize");
        assert_eq!(value["stockPrice"], 150.75);
        assert_eq!(value["fcfPerShare"], 5.20);
        assert_eq!(value["wacc"], 8.5);
        assert_eq!(value["currency"], "USD");
    }
}
