use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayoffError {
    #[error("Invalid price range: start {start}, end {end}, step {step} — {reason}")]
    InvalidRange {
        start: Decimal,
        end: Decimal,
        step: Decimal,
        reason: String,
    },

    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PayoffError {
    fn from(e: serde_json::Error) -> Self {
        PayoffError::SerializationError(e.to_string())
    }
}
