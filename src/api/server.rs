//! HTTP server lifecycle: bind, serve the agenda router, shut down on Ctrl-C.

use crate::api::router::agenda_router;
use crate::api::types::ApiContext;
use crate::config::AppConfig;
use crate::pipeline::letter::RenderError;
use crate::pipeline::processor::AgendaProcessor;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Letter renderer unavailable: {0}")]
    Renderer(#[from] RenderError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the processor, bind, and serve until Ctrl-C.
///
/// A configured template that cannot be loaded fails here, before binding.
pub async fn serve(config: &AppConfig) -> Result<(), ServerError> {
    let processor = AgendaProcessor::from_config(config)?;
    let app = agenda_router(ApiContext::new(processor), config.server.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    let addr = listener.local_addr()?;

    tracing::info!(
        addr = %addr,
        template = ?config.letter.template_path,
        max_upload_bytes = config.server.max_upload_bytes,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
