//! Invoice document composition: request validation, layout, and
//! storage of the rendered PDF.

pub mod composer;
pub mod error;
pub mod header;
pub mod model;
pub mod storage;
pub mod tables;
pub mod validation;

pub use composer::{page_geometry, Composer, ComposerOptions, DEFAULT_COMPANY_NAME};
pub use error::InvoiceError;
pub use header::HeaderDecorator;
pub use model::{
    BuyerDetails, InvoiceNumber, InvoiceRequest, IssuerDetails, LineItem, PartyDetails, Scalar,
};
pub use storage::InvoiceStore;
