use serde_json::Value;
use thiserror::Error;

/// Failures surfaced while digesting channel events or bot answers.
///
/// Recoverable situations (an empty webhook, a malformed URL-button setting, an inbound event
/// that cannot be digested) never reach this type; they degrade locally inside the digester.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Unknown answer type: {payload}")]
    UnknownAnswerType { payload: Value },
    #[error("Unknown ChatbotAPI response: {payload}")]
    UnknownApiResponse { payload: Value },
    #[error("{kind} answer does not match its expected shape: {source}")]
    InvalidAnswer {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid request: no external id could be resolved")]
    InvalidRequest,
}

pub type DigestResult<T> = Result<T, DigestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_answer_type_keeps_payload() {
        let err = DigestError::UnknownAnswerType {
            payload: json!({"type": "carousel"}),
        };
        assert!(err.to_string().starts_with("Unknown answer type"));
        assert!(err.to_string().contains("carousel"));
    }

    #[test]
    fn invalid_request_has_fixed_message() {
        assert_eq!(
            DigestError::InvalidRequest.to_string(),
            "Invalid request: no external id could be resolved"
        );
    }
}
