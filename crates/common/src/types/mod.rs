use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A managed account record, as stored by the server and mirrored by clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub balance: f64,
    pub email: String,
}

/// Response envelope shared by every `/api` endpoint.
///
/// Error envelopes leave `data` empty and may carry an `error` detail; both
/// fields are skipped from the JSON when absent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: message.into(), data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self { success: false, message: message.into(), data: None, error }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Health {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Health {
    pub fn now() -> Self {
        Self { success: true, message: "Backend server is running".into(), timestamp: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::failure("Account not found", None)).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "message": "Account not found"}));
    }

    #[test]
    fn envelope_without_data_decodes() {
        let parsed: ApiResponse<Account> =
            serde_json::from_str(r#"{"success":false,"message":"nope","error":"boom"}"#).unwrap();
        assert!(parsed.data.is_none());
        assert_eq!(parsed.error.as_deref(), Some("boom"));
    }
}
