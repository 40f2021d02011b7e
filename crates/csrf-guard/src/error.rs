use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Why a state-changing request was rejected.
///
/// The messages are what ends up in the 403 body, so they name the compared
/// origins but never a path, query string or fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsrfRejection {
    /// Unsafe-method https request without any Origin or Referer header.
    #[error("Origin checking failed - no Origin or Referer.")]
    NoOrigin,
    /// Origin/Referer present but pointing at another site.
    #[error("Origin checking failed - {origin} does not match {host_url}.")]
    BadOrigin { origin: String, host_url: String },
    /// The session-bound token comparison failed.
    #[error("CSRF token missing or incorrect.")]
    BadToken,
}

impl CsrfRejection {
    pub fn status(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }
}

impl IntoResponse for CsrfRejection {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
