// Adapters layer: concrete HTTP clients for the external search and model providers.
// Credentials are fields on the client structs; nothing here reads the environment.

pub mod openrouter;
pub mod serper;

pub use openrouter::OpenRouterClient;
pub use serper::SerperClient;

use crate::utils::error::{GatewayError, Result};

/// 非 2xx 回應轉成 UpstreamError，保留狀態碼與回應內容
pub(crate) async fn ensure_success(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    tracing::debug!("{} response status: {}", provider, status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::UpstreamError {
        provider: provider.to_string(),
        status: status.as_u16(),
        body,
    })
}
