use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use invoice_core::InvoiceError;
use serde::Serialize;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "PDF file not found. Please generate it first!";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON body: {0}")]
    MalformedJson(String),

    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error("Background task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            AppError::Invoice(err) => match err {
                InvoiceError::MissingField { .. } | InvoiceError::InvalidField { .. } => {
                    StatusCode::BAD_REQUEST
                }
                InvoiceError::TotalsAggregation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                InvoiceError::RenderFailure(_) | InvoiceError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Worker(_) | AppError::Io(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_errors_map_to_statuses() {
        let cases = [
            (
                InvoiceError::MissingField {
                    field: "items".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                InvoiceError::InvalidField {
                    field: "invoice_number".into(),
                    expected: "a string".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                InvoiceError::TotalsAggregation {
                    reason: "text".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                InvoiceError::Storage(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn not_found_message_is_exact() {
        assert_eq!(
            AppError::NotFound.to_string(),
            "PDF file not found. Please generate it first!"
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
