//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the API as the same JSON envelope:
//!
//! ```json
//! {
//!   "status": 400,
//!   "error": "Bad Request",
//!   "timestamp": "2024-06-01T12:00:00Z",
//!   "message": "Validation failed",
//!   "errors": [{ "field": "ipn", "rejectedValue": "1", "message": "...", "code": "FORMAT" }]
//! }
//! ```
//!
//! `errors` is present only for validation failures.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use people_core::{person::PersonId, validation::Violation};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Validation failed")]
  Validation(Vec<Violation>),

  #[error("Person with IPN {0} already exists.")]
  DuplicateIpn(String),

  #[error("Person with ID {0} not found.")]
  NotFound(PersonId),

  /// The request could not be parsed (body, path, or query string).
  #[error("{0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::DuplicateIpn(_) | ApiError::BadRequest(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<people_core::Error> for ApiError {
  fn from(e: people_core::Error) -> Self {
    match e {
      people_core::Error::Validation(v) => ApiError::Validation(v),
      people_core::Error::DuplicateIpn(ipn) => ApiError::DuplicateIpn(ipn),
      people_core::Error::NotFound(id) => ApiError::NotFound(id),
      people_core::Error::Store(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
  #[schema(example = 400)]
  pub status:    u16,
  /// Reason phrase of `status`.
  #[schema(value_type = String, example = "Bad Request")]
  pub error:     &'static str,
  pub timestamp: DateTime<Utc>,
  pub message:   String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub errors:    Vec<Violation>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();

    // Store failures keep their detail in the log only.
    let message = match &self {
      ApiError::Store(_) => "Internal server error".to_owned(),
      other => other.to_string(),
    };

    match &self {
      ApiError::Validation(violations) => tracing::error!(
        status = status.as_u16(),
        ?violations,
        "{message}"
      ),
      ApiError::Store(e) => tracing::error!(
        status = status.as_u16(),
        error = %e,
        "{message}"
      ),
      _ => tracing::error!(status = status.as_u16(), "{message}"),
    }

    let errors = match self {
      ApiError::Validation(violations) => violations,
      _ => Vec::new(),
    };

    let body = ErrorBody {
      status: status.as_u16(),
      error: status.canonical_reason().unwrap_or("Unknown"),
      timestamp: Utc::now(),
      message,
      errors,
    };
    (status, Json(body)).into_response()
  }
}
