//! HTTP transport for invoice generation and retrieval.

pub mod config;
pub mod error;
pub mod handlers;
pub mod startup;
pub mod telemetry;
