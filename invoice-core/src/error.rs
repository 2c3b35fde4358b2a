use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field {field}: expected {expected}")]
    InvalidField { field: String, expected: String },

    #[error("Cannot total line items: {reason}")]
    TotalsAggregation { reason: String },

    #[error("Failed to render invoice: {0}")]
    RenderFailure(#[from] pdf_core::Error),

    #[error("Failed to store invoice: {0}")]
    Storage(#[from] io::Error),
}

impl InvoiceError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        InvoiceError::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, expected: &str) -> Self {
        InvoiceError::InvalidField {
            field: field.into(),
            expected: expected.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
