use common::external::fetch_external_data;
use tracing::warn;

use crate::errors::ServiceError;

/// Relay to one fixed third-party JSON endpoint.
#[derive(Clone)]
pub struct ExternalDataService {
    client: reqwest::Client,
    url: String,
}

impl ExternalDataService {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<serde_json::Value, ServiceError> {
        fetch_external_data(&self.client, &self.url).await.map_err(|e| {
            warn!(url = %self.url, error = %e, "external fetch failed");
            ServiceError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{routing::get, Json, Router};

    use super::*;

    fn client() -> reqwest::Client {
        common::external::build_client(Duration::from_secs(1), Duration::from_secs(2)).expect("client")
    }

    #[tokio::test]
    async fn unreachable_upstream_is_upstream_error() -> anyhow::Result<()> {
        // 先绑定再释放端口，得到一个无人监听的地址
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let svc = ExternalDataService::new(client(), format!("http://{addr}/posts/1"));
        assert!(matches!(svc.fetch().await, Err(ServiceError::Upstream(_))));
        Ok(())
    }

    #[tokio::test]
    async fn relays_json_body() -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = Router::new().route("/data", get(|| async { Json(serde_json::json!([1, 2, 3])) }));
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let svc = ExternalDataService::new(client(), format!("http://{addr}/data"));
        assert_eq!(svc.fetch().await?, serde_json::json!([1, 2, 3]));
        Ok(())
    }
}
