use anyhow::Context;
use pal_config::PalConfig;
use pal_http::ApiClient;

pub fn load_config() -> anyhow::Result<PalConfig> {
    let config = PalConfig::load_with_dotenv().context("failed to load configuration")?;
    tracing::debug!(
        base_url = %config.api.base_url,
        persist_cookies = config.session.persist_cookies,
        "configuration loaded"
    );
    Ok(config)
}

/// Build the HTTP client, restoring the persisted session if there is one.
pub fn build_client(config: &PalConfig) -> anyhow::Result<ApiClient> {
    ApiClient::from_config(&config.api, &config.session)
        .with_context(|| format!("failed to build API client for {}", config.api.base_url))
}
