use std::io;

use thiserror::Error;

/// Failures while laying out or writing a document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] io::Error),

    #[error("{kind} needs {height:.1}pt but page {page} only has a {available:.1}pt frame")]
    FlowableTooLarge {
        kind: &'static str,
        height: f64,
        available: f64,
        page: usize,
    },

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, Error>;
