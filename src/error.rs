use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::Value;

use crate::io_struct::ErrorBody;

pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("message is required")]
    MissingField,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Missing OPENAI_API_KEY")]
    Misconfiguration,

    /// Carries the provider's own error payload when it sent one.
    #[error("provider error: {0}")]
    Provider(Value),

    #[error("{0}")]
    Unhandled(String),
}

impl RelayError {
    /// Value placed under `error` in the JSON response.
    pub fn payload(&self) -> Value {
        match self {
            RelayError::Provider(payload) => payload.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        RelayError::Unhandled(e.to_string())
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingField | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Misconfiguration | RelayError::Provider(_) | RelayError::Unhandled(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.payload(),
        })
    }
}
