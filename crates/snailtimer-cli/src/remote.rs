use std::time::Duration;

use snailtimer_core::{ApiClient, Config};

/// Client for the configured remote service, `None` when unset.
pub fn client(config: &Config) -> Result<Option<ApiClient>, Box<dyn std::error::Error>> {
    let Some(base_url) = config.api.base_url.as_deref() else {
        return Ok(None);
    };
    let timeout = Duration::from_secs(config.api.timeout_secs.max(1));
    Ok(Some(ApiClient::new(base_url, timeout)?))
}

/// Like [`client`], but an unset base URL is an error.
pub fn require_client(config: &Config) -> Result<ApiClient, Box<dyn std::error::Error>> {
    client(config)?.ok_or_else(|| {
        "remote service not configured (snailtimer config set api.base_url <url>)".into()
    })
}
