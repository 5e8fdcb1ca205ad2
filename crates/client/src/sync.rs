use std::time::{Duration, Instant};

use common::types::Account;
use tracing::{info, warn};

use crate::api::{AccountApi, CreateAccountRequest, UpdateAccountRequest};
use crate::errors::ClientError;

pub const DEFAULT_FLASH: Duration = Duration::from_secs(3);

/// Form contents as typed by the user; every field is text until submitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountDraft {
    pub name: String,
    pub balance: String,
    pub email: String,
}

impl AccountDraft {
    pub fn new(name: impl Into<String>, balance: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), balance: balance.into(), email: email.into() }
    }

    pub fn from_account(account: &Account) -> Self {
        Self::new(account.name.clone(), account.balance.to_string(), account.email.clone())
    }

    fn parse_balance(&self) -> Result<f64, ClientError> {
        // inf / NaN would go over the wire as `null`
        self.balance
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|b| b.is_finite())
            .ok_or_else(|| ClientError::Validation("Balance must be a number".into()))
    }

    fn to_create(&self) -> Result<CreateAccountRequest, ClientError> {
        if self.name.is_empty() || self.balance.is_empty() || self.email.is_empty() {
            return Err(ClientError::Validation("All fields are required".into()));
        }
        Ok(CreateAccountRequest { name: self.name.clone(), balance: self.parse_balance()?, email: self.email.clone() })
    }

    // 空文本视为未修改，不发送
    fn to_update(&self) -> Result<UpdateAccountRequest, ClientError> {
        let balance = if self.balance.is_empty() { None } else { Some(self.parse_balance()?) };
        Ok(UpdateAccountRequest {
            name: (!self.name.is_empty()).then(|| self.name.clone()),
            balance,
            email: (!self.email.is_empty()).then(|| self.email.clone()),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// Transient status line. Success messages expire; errors stay until the next operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
    pub shown_at: Instant,
}

/// Local mirror of the server collection plus the form/confirmation state around it.
///
/// The cache only changes after a success response, so a failed call never
/// needs rolling back.
pub struct AccountSync<A> {
    api: A,
    accounts: Vec<Account>,
    form: AccountDraft,
    editing_id: Option<u64>,
    delete_confirm: Option<u64>,
    flash: Option<Flash>,
    flash_for: Duration,
}

impl<A: AccountApi> AccountSync<A> {
    pub fn new(api: A) -> Self {
        Self::with_flash_duration(api, DEFAULT_FLASH)
    }

    pub fn with_flash_duration(api: A, flash_for: Duration) -> Self {
        Self {
            api,
            accounts: Vec::new(),
            form: AccountDraft::default(),
            editing_id: None,
            delete_confirm: None,
            flash: None,
            flash_for,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn form(&self) -> &AccountDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AccountDraft {
        &mut self.form
    }

    pub fn editing_id(&self) -> Option<u64> {
        self.editing_id
    }

    pub fn pending_delete(&self) -> Option<u64> {
        self.delete_confirm
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    /// Drop a success message once it has been visible for the display duration.
    pub fn expire_flash(&mut self, now: Instant) {
        if let Some(f) = &self.flash {
            if f.kind == FlashKind::Success && now.saturating_duration_since(f.shown_at) >= self.flash_for {
                self.flash = None;
            }
        }
    }

    fn begin_request(&mut self) {
        if matches!(&self.flash, Some(f) if f.kind == FlashKind::Error) {
            self.flash = None;
        }
    }

    fn show(&mut self, kind: FlashKind, text: String) {
        self.flash = Some(Flash { kind, text, shown_at: Instant::now() });
    }

    fn fail(&mut self, verb: &str, err: ClientError) -> ClientError {
        warn!(operation = verb, error = %err, "account request failed");
        self.show(FlashKind::Error, format!("Failed to {verb} account: {err}"));
        err
    }

    /// Replace the cache with the server's full list.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.begin_request();
        let res = self.api.list().await;
        match res {
            Ok(accounts) => {
                info!(count = accounts.len(), "accounts refreshed");
                self.accounts = accounts;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed");
                self.show(FlashKind::Error, format!("Failed to fetch accounts: {e}"));
                Err(e)
            }
        }
    }

    /// Create from the current form; on success the server record is appended.
    pub async fn submit_create(&mut self) -> Result<(), ClientError> {
        let req = match self.form.to_create() {
            Ok(req) => req,
            Err(e) => {
                self.show(FlashKind::Error, e.to_string());
                return Err(e);
            }
        };
        self.begin_request();
        let res = self.api.create(req).await;
        match res {
            Ok(account) => {
                self.accounts.push(account);
                self.form = AccountDraft::default();
                self.show(FlashKind::Success, "Account created successfully!".into());
                Ok(())
            }
            Err(e) => Err(self.fail("create", e)),
        }
    }

    /// Update `id` from the current form; on success the cached record is replaced.
    pub async fn submit_update(&mut self, id: u64) -> Result<(), ClientError> {
        let req = match self.form.to_update() {
            Ok(req) => req,
            Err(e) => {
                self.show(FlashKind::Error, e.to_string());
                return Err(e);
            }
        };
        self.begin_request();
        let res = self.api.update(id, req).await;
        match res {
            Ok(updated) => {
                if let Some(slot) = self.accounts.iter_mut().find(|a| a.id == id) {
                    *slot = updated;
                }
                self.form = AccountDraft::default();
                self.editing_id = None;
                self.show(FlashKind::Success, "Account updated successfully!".into());
                Ok(())
            }
            Err(e) => Err(self.fail("update", e)),
        }
    }

    /// Delete `id`; on success it is removed from the cache.
    pub async fn submit_delete(&mut self, id: u64) -> Result<(), ClientError> {
        self.begin_request();
        let res = self.api.delete(id).await;
        match res {
            Ok(_) => {
                self.accounts.retain(|a| a.id != id);
                self.delete_confirm = None;
                self.show(FlashKind::Success, "Account deleted successfully!".into());
                Ok(())
            }
            Err(e) => Err(self.fail("delete", e)),
        }
    }

    /// Submit the form as an update while editing, otherwise as a create.
    pub async fn submit_form(&mut self) -> Result<(), ClientError> {
        match self.editing_id {
            Some(id) => self.submit_update(id).await,
            None => self.submit_create().await,
        }
    }

    /// Load a cached account into the form. Returns false for an unknown id.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(account) = self.accounts.iter().find(|a| a.id == id) else {
            return false;
        };
        self.form = AccountDraft::from_account(account);
        self.editing_id = Some(id);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.form = AccountDraft::default();
    }

    pub fn request_delete(&mut self, id: u64) {
        self.delete_confirm = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm = None;
    }

    /// Delete the account awaiting confirmation, if any.
    pub async fn confirm_delete(&mut self) -> Result<bool, ClientError> {
        match self.delete_confirm {
            Some(id) => self.submit_delete(id).await.map(|_| true),
            None => Ok(false),
        }
    }
}
