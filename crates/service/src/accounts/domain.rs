use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub use common::types::Account;

pub const MISSING_FIELDS: &str = "Please provide name, balance, and email";

/// 创建输入：字段均为可选，以便区分「缺失」与「为零」
/// - `balance: 0` 是合法值，只有缺失（或 `null`）才会被拒绝
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NewAccountInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
    pub email: Option<String>,
}

/// Creation input that passed the presence check.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub balance: f64,
    pub email: String,
}

impl NewAccountInput {
    pub fn new(name: impl Into<String>, balance: f64, email: impl Into<String>) -> Self {
        Self { name: Some(name.into()), balance: Some(balance), email: Some(email.into()) }
    }

    /// 统一校验：name、email 非空，balance 必须提供
    pub fn validate(self) -> Result<NewAccount, ServiceError> {
        match (self.name, self.balance, self.email) {
            (Some(name), Some(balance), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Ok(NewAccount { name, balance, email })
            }
            _ => Err(ServiceError::Validation(MISSING_FIELDS.into())),
        }
    }
}

/// 部分更新：只覆盖提供的字段，不做取值校验（显式传入空字符串也会生效）
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AccountPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.balance.is_none() && self.email.is_none()
    }

    pub fn apply_to(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
        if let Some(email) = self.email {
            account.email = email;
        }
    }
}

/// Records every freshly started server holds.
pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account { id: 1, name: "John Doe".into(), balance: 5000.0, email: "john@example.com".into() },
        Account { id: 2, name: "Jane Smith".into(), balance: 7500.0, email: "jane@example.com".into() },
    ]
}

/// `max(existing ids) + 1`, or 1 for an empty collection. Freed ids can come back.
pub fn next_id(accounts: &[Account]) -> u64 {
    accounts.iter().map(|a| a.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_balance_passes_presence_check() {
        let ok = NewAccountInput::new("A", 0.0, "a@x.com").validate().unwrap();
        assert_eq!(ok.balance, 0.0);
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        let cases = [
            NewAccountInput::new("", 10.0, "x@x.com"),
            NewAccountInput::new("A", 10.0, ""),
            NewAccountInput { balance: None, ..NewAccountInput::new("A", 1.0, "a@x.com") },
            NewAccountInput { name: None, ..NewAccountInput::new("A", 1.0, "a@x.com") },
            NewAccountInput::default(),
        ];
        for input in cases {
            assert!(matches!(input.validate(), Err(ServiceError::Validation(m)) if m == MISSING_FIELDS));
        }
    }

    #[test]
    fn next_id_follows_max() {
        assert_eq!(next_id(&[]), 1);
        let mut accounts = seed_accounts();
        assert_eq!(next_id(&accounts), 3);
        accounts.remove(0);
        assert_eq!(next_id(&accounts), 3);
        accounts.clear();
        assert_eq!(next_id(&accounts), 1);
    }

    #[test]
    fn patch_decodes_zero_balance_as_supplied() {
        let patch: AccountPatch = serde_json::from_str(r#"{"balance":0}"#).unwrap();
        assert_eq!(patch.balance, Some(0.0));
        assert!(patch.name.is_none());

        let empty: AccountPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
