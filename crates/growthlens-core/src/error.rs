use thiserror::Error;

/// Validation and contract errors exposed by `growthlens-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("provider response is missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },
    #[error("field '{field}' must be a number")]
    NonNumericField { field: &'static str },
    #[error("currency must be a non-empty string, got {value}")]
    MalformedCurrency { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("query cannot be empty")]
    EmptyQuery,
    #[error("query length {len} exceeds max {max}")]
    QueryTooLong { len: usize, max: usize },

    #[error("invalid provider '{value}', expected one of gemini, fixture")]
    InvalidProvider { value: String },
    #[error("invalid field '{value}', expected one of stock-price, fcf-per-share, wacc")]
    InvalidField { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

impl ValidationError {
    /// Stable machine code used in envelope error payloads.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } => "validate.missing_fields",
            Self::NonNumericField { .. } => "validate.non_numeric_field",
            Self::MalformedCurrency { .. } => "validate.malformed_currency",
            Self::NonFiniteValue { .. } => "validate.non_finite_value",
            Self::EmptyQuery | Self::QueryTooLong { .. } => "validate.invalid_query",
            Self::InvalidProvider { .. } => "validate.invalid_provider",
            Self::InvalidField { .. } => "validate.invalid_field",
            Self::TimestampNotUtc { .. } => "validate.timestamp_not_utc",
            Self::InvalidRequestId
            | Self::InvalidSchemaVersion { .. }
            | Self::EmptyErrorCode
            | Self::EmptyErrorMessage => "validate.invalid_envelope",
        }
    }
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
