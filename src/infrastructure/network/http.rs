// HTTP client utilities
use crate::domain::error::AppError;
use crate::infrastructure::config::Config;
use reqwest::Client;
use tracing::debug;

/// Build the shared HTTP client. No request timeout is set: calls resolve or
/// fail according to the transport.
pub fn create_client(config: &Config) -> Result<Client, AppError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("hnai/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = config.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        debug!(proxy, "Using HTTP proxy");
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}
