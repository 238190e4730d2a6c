//! Conversion from catalog failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use marquee_core::{CatalogError, ErrorEnvelope};

/// Response-side wrapper around [`ErrorEnvelope`].
///
/// The envelope carries an advisory status; this type is what actually
/// applies it, keeping status semantics out of the core crate.
#[derive(Debug)]
pub struct ApiError(ErrorEnvelope);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError(ErrorEnvelope::from(&err))
    }
}

impl From<ErrorEnvelope> for ApiError {
    fn from(envelope: ErrorEnvelope) -> Self {
        ApiError(envelope)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}
