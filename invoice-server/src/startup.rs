use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use invoice_core::{Composer, InvoiceStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::error::AppError;
use crate::handlers::{generate_pdf, health_check, view_pdf};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub composer: Arc<Composer>,
    pub store: Arc<InvoiceStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate-pdf", post(generate_pdf))
        .route("/view-pdf", get(view_pdf))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and wire up state. Port 0 picks a free port.
    pub async fn build(settings: &Settings) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(&settings.output_dir)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create output directory {}: {}",
                    settings.output_dir.display(),
                    e
                );
                e
            })?;

        let state = AppState {
            composer: Arc::new(Composer::new(settings.composer_options())),
            store: Arc::new(InvoiceStore::new(&settings.output_dir)),
        };

        let address = format!("{}:{}", settings.host, settings.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            output_dir = %settings.output_dir.display(),
            "invoice-server ready"
        );

        Ok(Application {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serve until `signal` resolves, then finish in-flight requests.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
