//! JSON error responses for the API routes.
//!
//! Every API route reports failures the same way: an HTTP 500 with a fixed,
//! route-specific message. The underlying cause is logged, never sent.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The body of an API error response, e.g. `{"error": "Error fetching statistics"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The route-specific description of what failed.
    pub error: String,
}

/// An error raised at an API route boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteError {
    message: &'static str,
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.message.to_owned(),
            }),
        )
            .into_response()
    }
}

impl Error {
    /// Log the error and replace it with the static `message` of the route it
    /// occurred in.
    pub(crate) fn into_route_error(self, message: &'static str) -> RouteError {
        tracing::error!("{message}: {self}");
        RouteError { message }
    }
}
