use thiserror::Error;

/// Validation and contract errors exposed by `stockdeck-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("instrument cannot be empty")]
    EmptySymbol,
    #[error("instrument contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 or ISO-8601 local date-time: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("backend url must start with http:// or https://: '{value}'")]
    InvalidBackendUrl { value: String },
    #[error("timeout must be greater than zero milliseconds")]
    ZeroTimeout,
    #[error("invalid value '{value}' for {name}")]
    InvalidEnvValue { name: &'static str, value: String },

    #[error("no page is routed at '{path}'")]
    UnknownRoute { path: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}
