//! Handler-boundary error type.
//!
//! Field-level validation failures never reach this module; they are
//! rendered inline on the originating form. What lands here is either a
//! persistence failure (500, logged, no retry) or an explicit 404 when
//! strict not-found handling is configured.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use kontak_core::StoreError;
use thiserror::Error;

/// Errors escaping a request handler.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistence failure; surfaces as a plain 500
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Template rendering failure
    #[error("template error: {0}")]
    Render(#[from] askama::Error),

    /// Contact not found while strict not-found handling is on
    #[error("not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => {
                (StatusCode::NOT_FOUND, Html("<h1>404</h1>".to_string())).into_response()
            }
            Self::Store(err) => {
                tracing::error!(error = %err, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Internal Server Error</h1>".to_string()),
                )
                    .into_response()
            }
            Self::Render(err) => {
                tracing::error!(error = %err, "render failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Internal Server Error</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}
