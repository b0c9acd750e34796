use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Failure of the web shell itself. Prediction and validation problems are
/// rendered into the page and never become an `AppError`.
#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    public_code: &'static str,
    public_message: Option<String>,
}

impl AppError {
    fn new(status: StatusCode, public_code: &'static str, public_message: Option<String>) -> Self {
        Self {
            status,
            public_code,
            public_message,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!("Internal error: {}", msg);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Bad request: {}", msg);
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", Some(msg))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorEnvelope<'a> {
            error: ErrorBody<'a>,
        }

        #[derive(Serialize)]
        struct ErrorBody<'a> {
            code: &'a str,
            message: &'a str,
        }

        let message = self
            .public_message
            .as_deref()
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("Error"));

        (
            self.status,
            Json(ErrorEnvelope {
                error: ErrorBody {
                    code: self.public_code,
                    message,
                },
            }),
        )
            .into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::bad_request(format!("Unreadable form data: {}", err))
    }
}

impl From<exoscope_types::minijinja::Error> for AppError {
    fn from(err: exoscope_types::minijinja::Error) -> Self {
        Self::internal(format!("Template error: {:#}", err))
    }
}

impl From<exoscope::HandoffError> for AppError {
    fn from(err: exoscope::HandoffError) -> Self {
        Self::internal(format!("Handoff error: {}", err))
    }
}

impl std::error::Error for AppError {}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.public_code)
    }
}
