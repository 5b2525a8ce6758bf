//! Growth Derivation Engine.
//!
//! Derives the market-implied long-term growth rate from a validated record:
//! `rate = wacc / 100 - fcf_per_share / stock_price`. Cheap enough that every
//! edit re-runs the full derivation; there is no incremental path.

use serde::{Deserialize, Serialize};

use crate::FinancialRecord;

/// Derived growth metric, recomputed on every input change.
///
/// `rate` is `None` exactly when the stock price is non-positive, meaning
/// "cannot display a rate" rather than zero growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    pub rate: Option<f64>,
}

impl GrowthResult {
    pub const fn undefined() -> Self {
        Self { rate: None }
    }

    /// Rate scaled to percentage units for display.
    pub fn as_percent(&self) -> Option<f64> {
        self.rate.map(|rate| rate * 100.0)
    }
}

/// Derive the implicit growth rate for a validated record.
///
/// Pure and deterministic. A non-positive stock price makes the formula
/// undefined, so the result is `None` instead of an infinity or NaN.
pub fn derive(record: &FinancialRecord) -> GrowthResult {
    if record.stock_price <= 0.0 {
        return GrowthResult::undefined();
    }

    GrowthResult {
        rate: Some(record.wacc / 100.0 - record.fcf_per_share / record.stock_price),
    }
}
