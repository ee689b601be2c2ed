use crate::errors::{Error, Result, Service};
use reqwest::Response;

pub mod anthropic;
pub mod ollama;
pub mod openai;

/// Reads a JSON body, turning transport failures and error statuses into `ServiceUnavailable`
pub(crate) async fn read_json(
    res: reqwest::Result<Response>,
    service: Service,
    provider: &str,
) -> Result<serde_json::Value> {
    let res = res.map_err(|e| Error::unavailable(service, format!("{} request failed: {}", provider, e)))?;

    if !res.status().is_success() {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        return Err(Error::unavailable(
            service,
            format!("{} API error ({}): {}", provider, status, text),
        ));
    }

    res.json()
        .await
        .map_err(|e| Error::unavailable(service, format!("{} returned invalid JSON: {}", provider, e)))
}

/// Reads an API key from the environment
pub(crate) fn api_key_from_env(var: &str) -> Result<String> {
    std::env::var(var).map_err(|_| Error::Config(format!("{} environment variable not set", var)))
}
