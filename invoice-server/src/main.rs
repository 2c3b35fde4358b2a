use invoice_server::config::Settings;
use invoice_server::startup::Application;
use invoice_server::telemetry::init_tracing;
use tokio::signal;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(&settings.log_level);

    let app = Application::build(&settings)
        .await
        .map_err(|e| std::io::Error::other(format!("Startup error: {}", e)))?;

    tracing::info!(
        "Starting invoice-server on {}:{}",
        settings.host,
        app.port()
    );

    app.run_with_shutdown(shutdown_signal()).await
}
