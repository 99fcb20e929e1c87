//! Error handling
//!
//! Request-level failures render as an HTML error page. Domain-level
//! degradations (unknown community, model load failure) are normal values
//! shown in the page body and never pass through here.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::render;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Plot rendering errors
    PlotError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::PlotError(msg) => {
                tracing::error!("Plot rendering error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render plot")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Html(render::error_page(status.as_u16(), message));
        (status, body).into_response()
    }
}

impl From<crate::plot::PlotError> for AppError {
    fn from(err: crate::plot::PlotError) -> Self {
        AppError::PlotError(err.to_string())
    }
}
