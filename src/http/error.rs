use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::commands::Error),

    #[error("Template error: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{self}");

        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
    }
}
