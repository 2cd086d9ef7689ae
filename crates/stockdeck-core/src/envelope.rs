use serde::{Deserialize, Serialize};

use crate::gateway::GatewayError;
use crate::{UtcDateTime, ValidationError};

/// Standard response envelope for machine-readable page output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        meta.validate()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    pub generated_at: UtcDateTime,
    /// Client path of the rendered page, e.g. `/stocks-data/HINDALCO`, or the
    /// backend path for commands that are not pages.
    pub route: String,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        schema_version: impl Into<String>,
        route: impl Into<String>,
        latency_ms: u64,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            schema_version: schema_version.into(),
            generated_at: UtcDateTime::now(),
            route: route.into(),
            latency_ms,
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        Ok(())
    }
}

/// Structured error payload for failed page loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let error = Self {
            code: code.into(),
            message: message.into(),
            retryable: None,
        };
        error.validate()?;
        Ok(error)
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }

        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }

        Ok(())
    }
}

impl From<&GatewayError> for EnvelopeError {
    fn from(error: &GatewayError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.message().to_owned(),
            retryable: Some(error.retryable()),
        }
    }
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let mut parts = version.split('.');
    let major = parts.next();
    let minor = parts.next();
    let patch = parts.next();

    if parts.next().is_some() {
        return false;
    }

    [major, minor, patch].iter().all(|part| {
        part.is_some_and(|segment| {
            !segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_digit())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_meta() {
        let meta = EnvelopeMeta::new("request-12345", "v1.0.0", "/stocks", 11)
            .expect("meta should be valid");

        assert_eq!(meta.schema_version, "v1.0.0");
        assert_eq!(meta.route, "/stocks");
    }

    #[test]
    fn rejects_bad_schema_version() {
        let err = EnvelopeMeta::new("request-12345", "1.0.0", "/", 1).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));
    }

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("req", "v1.0.0", "/", 1).expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidRequestId);
    }

    #[test]
    fn gateway_errors_convert_with_code() {
        let error = EnvelopeError::from(&GatewayError::status(404, "Stock not found"));

        assert_eq!(error.code, "gateway.not_found");
        assert_eq!(error.message, "Stock not found");
        assert_eq!(error.retryable, Some(false));
        assert!(error.validate().is_ok());
    }
}
