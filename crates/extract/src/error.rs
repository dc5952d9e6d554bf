/// Why a chart-generation attempt could not produce a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("QA backend request failed: {0}")]
    Transport(String),

    #[error("no structured payload found in answer")]
    NoPayloadFound,

    #[error("payload could not be decoded: {0}")]
    MalformedPayload(String),

    #[error("field '{field}' does not match the expected schema: {reason}")]
    SchemaMismatch { field: String, reason: String },
}

impl ExtractionError {
    pub fn schema(field: &str, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable tag used in logs and JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport_error",
            Self::NoPayloadFound => "no_payload_found",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::SchemaMismatch { .. } => "schema_mismatch",
        }
    }

    /// Text shown to the operator when chart generation fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Error generating chart",
            Self::NoPayloadFound | Self::MalformedPayload(_) => {
                "Could not extract chart data. Try uploading a balance sheet first."
            }
            Self::SchemaMismatch { .. } => {
                "Could not parse financial data. The document may not contain structured data."
            }
        }
    }

    /// Name of the offending field for schema mismatches.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_failures_share_message() {
        assert_eq!(
            ExtractionError::NoPayloadFound.user_message(),
            ExtractionError::MalformedPayload("eof".into()).user_message()
        );
    }

    #[test]
    fn test_schema_mismatch_names_field() {
        let err = ExtractionError::schema("liabilities", "expected 2 values, got 1");
        assert_eq!(err.field(), Some("liabilities"));
        assert_eq!(err.kind(), "schema_mismatch");
        assert!(err.to_string().contains("liabilities"));
        assert!(err.user_message().starts_with("Could not parse financial data"));
    }

    #[test]
    fn test_transport_message_is_generic() {
        let err = ExtractionError::Transport("connection refused".into());
        assert_eq!(err.user_message(), "Error generating chart");
        assert_eq!(err.field(), None);
    }
}
