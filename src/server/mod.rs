//! HTTP surface of the gateway (axum).
//!
//! **Public API**: [`build_state`], [`router`], [`run_serve`], [`run_serve_on_listener`].

mod app;
mod response;

pub use app::{
    extract_credentials, router, AppState, OPENROUTER_KEY_HEADER, SERPER_KEY_HEADER,
    SERVICE_KEY_HEADER,
};

use crate::core::agent::{AgentSettings, HttpAgentFactory};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the shared state from configuration: one pooled HTTP client, no provider keys.
pub fn build_state<C: ConfigProvider + ?Sized>(config: &C) -> Result<Arc<AppState>> {
    let settings = AgentSettings::from_config(config);
    tracing::debug!(
        "Agent settings: model={}, max_results={}, timeout={}s",
        settings.model,
        settings.max_results,
        settings.request_timeout_seconds
    );
    let factory = HttpAgentFactory::new(settings)?;
    Ok(Arc::new(AppState::new(
        Arc::new(factory),
        config.service_secret(),
    )))
}

/// Serves on an existing listener until `shutdown` resolves. Tests bind 127.0.0.1:0 and pass it in.
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("🚀 Gateway listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn run_serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let state = build_state(config)?;
    let listener = TcpListener::bind(config.bind_addr()).await?;
    run_serve_on_listener(listener, state, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
        }
    })
    .await
}
