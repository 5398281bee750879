use hris_core::HrisError;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by [`super::ApiClient`].
///
/// `Network` means no response was obtained; `Http` means the server
/// answered with a non-2xx status. [`ApiError::status`] is `None` exactly
/// when no response was received.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The server could not be reached.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server rejected the request.
    #[error("{message}")]
    Http {
        status: u16,
        /// Server-supplied `message`, or a generic message.
        message: String,
        /// Parsed response body (`Null` when empty or not JSON).
        body: Value,
    },

    /// A request body could not be encoded or a response did not match the expected shape.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The session could not be persisted.
    #[error(transparent)]
    Storage(#[from] HrisError),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Builds an `Http` error from a status and parsed body.
    pub fn from_response(status: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| generic_message(status));
        Self::Http {
            status,
            message,
            body,
        }
    }

    /// HTTP status, or `None` when no response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Network { message }
            | Self::Http { message, .. }
            | Self::Serialization { message } => message.clone(),
            Self::Storage(e) => e.to_string(),
        }
    }

    /// Raw response body for `Http` errors.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

fn generic_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_preferred() {
        let err = ApiError::from_response(404, json!({ "message": "not found" }));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "not found");
        assert_eq!(err.to_string(), "not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_generic_message_fallback() {
        let err = ApiError::from_response(500, Value::Null);
        assert_eq!(err.message(), "Request failed with status 500");

        let blank = ApiError::from_response(422, json!({ "message": "  " }));
        assert_eq!(blank.message(), "Request failed with status 422");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.status(), None);
        assert!(err.is_network());
        assert!(err.body().is_none());
    }
}
