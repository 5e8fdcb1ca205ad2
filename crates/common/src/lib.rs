use thiserror::Error;

pub mod types;
pub mod utils;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream responded with status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Outbound call to the third-party demo endpoint.
pub mod external {
    use std::time::Duration;

    use super::*;

    /// Build the shared HTTP client used for outbound calls.
    pub fn build_client(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<reqwest::Client, CoreError> {
        reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| CoreError::Network(e.to_string()))
    }

    /// GET `url` and hand back its JSON body untouched.
    pub async fn fetch_external_data(client: &reqwest::Client, url: &str) -> Result<serde_json::Value, CoreError> {
        let resp = client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Status(status.as_u16()));
        }
        let json = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        tracing::debug!(%url, "external data fetched");
        Ok(json)
    }
}
