//! Error -> HTTP response mapping.
//!
//! 400 for client mistakes, 404 for absent records, 500 for everything that
//! went wrong on our side. Bodies are short plain text; internal details stay
//! in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use mymetrics_core::{ErrorClass, MetricsError};

#[derive(Debug)]
pub struct ApiError(pub MetricsError);

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.class() {
            ErrorClass::BadRequest => StatusCode::BAD_REQUEST,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0.class() {
            ErrorClass::Internal => {
                tracing::error!(error = %self.0, "request failed");
                "internal server error".to_string()
            }
            class => {
                tracing::debug!(code = class.as_str(), error = %self.0, "request rejected");
                self.0.to_string()
            }
        };
        (status, body).into_response()
    }
}
