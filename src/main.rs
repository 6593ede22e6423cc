use coverage_service::config::CoverageConfig;
use coverage_service::observability::init_tracing;
use coverage_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("coverage-service", "info");

    let config = CoverageConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("Coverage service listening on port {}", app.port());
    app.run_until_stopped().await
}
