use thiserror::Error;

#[derive(Debug, Error)]
pub enum RealtyError {
    #[error("Invalid policy: {field} — {reason}")]
    InvalidPolicy { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RealtyError {
    fn from(e: serde_json::Error) -> Self {
        RealtyError::SerializationError(e.to_string())
    }
}
