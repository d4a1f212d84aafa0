pub mod router;
pub mod server;
pub mod state;
pub mod tracing;

use crate::config;
use crate::error::AppError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Application entry point. Initializes tracing, configuration, the classifier, and starts the server.
pub async fn run() -> Result<(), AppError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings = config::get_configuration()?;
    ::tracing::info!(
        model = %settings.inference_model,
        endpoint = %settings.inference_base_url,
        "Loaded settings"
    );

    // The classifier is built once and shared read-only by every request.
    let client = state::AppState::client_from_settings(&settings)?;
    if let Err(e) = client.health_check().await {
        ::tracing::warn!("Inference endpoint not ready yet: {e}");
    }
    let app_state = state::AppState::new(Arc::new(client))?;

    let app = router::main_router(app_state);

    server::serve(app, settings.http_port, CancellationToken::new()).await
}
