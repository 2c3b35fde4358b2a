use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use invoice_core::{InvoiceError, InvoiceRequest};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::startup::AppState;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "invoice-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate the body, render the invoice off the async reactor, and
/// publish it as `<invoice_number>.pdf`.
pub async fn generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::MalformedJson(rejection.body_text()))?;
    let request = InvoiceRequest::from_json(&body)?;
    let invoice_number = request.invoice_number.clone();
    let date = Local::now().date_naive();

    let composer = state.composer.clone();
    let store = state.store.clone();
    let path = tokio::task::spawn_blocking(move || {
        let pdf = composer.render_to_vec(&request, date)?;
        store.write(&request.invoice_number, &pdf)
    })
    .await??;

    tracing::info!(
        invoice_number = %invoice_number,
        path = %path.display(),
        "PDF generated"
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "PDF generated successfully!" })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub filename: Option<String>,
}

/// Serve a stored invoice inline.
pub async fn view_pdf(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Response, AppError> {
    let filename = params.filename.ok_or_else(|| InvoiceError::MissingField {
        field: "filename".to_string(),
    })?;

    let store = state.store.clone();
    let lookup = filename.clone();
    let pdf = tokio::task::spawn_blocking(move || store.read_file(&lookup))
        .await??
        .ok_or(AppError::NotFound)?;

    tracing::info!(filename = %filename, bytes = pdf.len(), "PDF served");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", filename),
            ),
        ],
        pdf,
    )
        .into_response())
}
