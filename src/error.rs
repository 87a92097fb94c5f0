//! Engine error taxonomy.
//!
//! None of these surface as hard failures from the engine entry points: each
//! variant has a defined fallback (empty series, reference soil profile,
//! generic crop label, zero output, or a dropped rendering artifact). They
//! exist so the fallible internals can use `?` and so fallbacks are logged
//! with a reason.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Weather or soil source could not be reached or returned garbage
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Required soil properties are missing
    #[error("insufficient data: missing {}", .0.join(", "))]
    InsufficientData(Vec<&'static str>),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("computation failure: {0}")]
    ComputationFailure(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            EngineError::SourceUnavailable(format!("request timed out: {error}"))
        } else if error.is_decode() {
            EngineError::SourceUnavailable(format!("malformed payload: {error}"))
        } else {
            EngineError::SourceUnavailable(error.to_string())
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::SourceUnavailable(format!("malformed payload: {error}"))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EngineError::SourceUnavailable("HTTP 503".to_string());
        assert_eq!(error.to_string(), "source unavailable: HTTP 503");

        let error = EngineError::InsufficientData(vec!["pH", "clay"]);
        assert_eq!(error.to_string(), "insufficient data: missing pH, clay");
    }

    #[test]
    fn test_json_error_maps_to_source_unavailable() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: EngineError = parse.into();
        assert!(matches!(error, EngineError::SourceUnavailable(_)));
    }
}
