use async_trait::async_trait;
use common::types::{Account, ApiResponse};
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::errors::ClientError;

/// Create body: all three fields are required by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateAccountRequest {
    pub name: String,
    pub balance: f64,
    pub email: String,
}

/// Update body: omitted fields stay untouched on the server.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Network seam used by [`crate::sync::AccountSync`].
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Account>, ClientError>;
    async fn create(&self, req: CreateAccountRequest) -> Result<Account, ClientError>;
    async fn update(&self, id: u64, req: UpdateAccountRequest) -> Result<Account, ClientError>;
    async fn delete(&self, id: u64) -> Result<Account, ClientError>;
}

/// `reqwest` implementation against a running server, e.g. `http://localhost:5000/api`.
#[derive(Clone)]
pub struct HttpAccountApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAccountApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn accounts_url(&self) -> String {
        format!("{}/accounts", self.base_url)
    }

    fn account_url(&self, id: u64) -> String {
        format!("{}/accounts/{id}", self.base_url)
    }
}

/// Unwrap the `data` of a success envelope, or turn an error envelope into [`ClientError::Api`].
async fn read_envelope<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    if status.is_success() {
        let envelope: ApiResponse<T> =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
        return envelope
            .data
            .ok_or_else(|| ClientError::Decode("response envelope has no data".into()));
    }
    Err(api_error(status, &bytes))
}

fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("Request failed with status code {}", status.as_u16()));
    ClientError::Api { status: status.as_u16(), message }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn list(&self) -> Result<Vec<Account>, ClientError> {
        let resp = self.http.get(self.accounts_url()).send().await?;
        let accounts: Vec<Account> = read_envelope(resp).await?;
        debug!(count = accounts.len(), "GET /accounts");
        Ok(accounts)
    }

    async fn create(&self, req: CreateAccountRequest) -> Result<Account, ClientError> {
        let resp = self.http.post(self.accounts_url()).json(&req).send().await?;
        let account: Account = read_envelope(resp).await?;
        debug!(id = account.id, "POST /accounts");
        Ok(account)
    }

    async fn update(&self, id: u64, req: UpdateAccountRequest) -> Result<Account, ClientError> {
        let resp = self.http.put(self.account_url(id)).json(&req).send().await?;
        let account = read_envelope(resp).await?;
        debug!(id, "PUT /accounts/:id");
        Ok(account)
    }

    async fn delete(&self, id: u64) -> Result<Account, ClientError> {
        let resp = self.http.delete(self.account_url(id)).send().await?;
        let account = read_envelope(resp).await?;
        debug!(id, "DELETE /accounts/:id");
        Ok(account)
    }
}
