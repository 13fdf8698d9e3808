use thiserror::Error;

/// Main error type for the indexer client
#[derive(Error, Debug)]
pub enum ZenlandError {
    // Transport errors
    /// The indexer answered with a non-success HTTP status. The body is never
    /// inspected for GraphQL errors in this case.
    #[error("indexer request failed ({status} {status_text}){}", body_suffix(.body))]
    Request {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The indexer answered 2xx but the envelope carried one or more errors.
    #[error("{}", .messages.join("; "))]
    GraphQl {
        messages: Vec<String>,
        errors: Vec<serde_json::Value>,
    },

    #[error("indexer response missing data")]
    MissingData,

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl ZenlandError {
    /// Transport-level failure: a bad HTTP status or a connection that never produced one.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Http(_))
    }

    /// Query-level failure reported inside a 2xx envelope.
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::GraphQl { .. })
    }

    /// HTTP status code, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for ZenlandError
pub type Result<T> = std::result::Result<T, ZenlandError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_error_display_includes_body_when_present() {
        let err = ZenlandError::Request {
            status: 502,
            status_text: "Bad Gateway".into(),
            body: "upstream down".into(),
        };
        assert_eq!(
            err.to_string(),
            "indexer request failed (502 Bad Gateway): upstream down"
        );
        assert!(err.is_request_error());
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn request_error_display_omits_empty_body() {
        let err = ZenlandError::Request {
            status: 404,
            status_text: "Not Found".into(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "indexer request failed (404 Not Found)");
    }

    #[test]
    fn graphql_error_joins_messages() {
        let err = ZenlandError::GraphQl {
            messages: vec!["bad field".into(), "GraphQL error".into()],
            errors: vec![json!({"message": "bad field"}), json!({})],
        };
        assert_eq!(err.to_string(), "bad field; GraphQL error");
        assert!(err.is_protocol_error());
        assert!(!err.is_request_error());
        assert_eq!(err.status(), None);
    }
}
