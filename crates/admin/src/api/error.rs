//! Admin API errors.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the MyTrack admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token missing, invalid or expired.
    #[error("Unauthorized: {}", .detail.as_deref().unwrap_or("invalid or expired token"))]
    Unauthorized { detail: Option<String> },

    /// API returned a non-success status.
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// Failed to parse a success response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Token cannot be used as a header value.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl ApiError {
    /// Human-readable detail supplied by the server, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an error from a non-success status and its raw body.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let detail = parse_detail(body);
        if status == 401 {
            Self::Unauthorized { detail }
        } else {
            Self::Status { status, detail }
        }
    }
}

/// Error body shape: `{"detail": "..."}`.
///
/// Validation errors carry a structured `detail`; only plain strings are
/// surfaced to the administrator.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_extracted_from_string_body() {
        let err = ApiError::from_response(403, r#"{"detail": "Only owner can change roles"}"#);
        assert_eq!(err.detail(), Some("Only owner can change roles"));
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "API error 403: Only owner can change roles");
    }

    #[test]
    fn test_structured_detail_is_ignored() {
        let err = ApiError::from_response(
            422,
            r#"{"detail": [{"loc": ["body", "role"], "msg": "field required"}]}"#,
        );
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_non_json_body_has_no_detail() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.detail(), None);
        assert_eq!(err.to_string(), "API error 502: no detail");
    }

    #[test]
    fn test_unauthorized_mapping() {
        let err = ApiError::from_response(401, r#"{"detail": "Token expired"}"#);
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.detail(), Some("Token expired"));
    }
}
