use std::fmt::Write;

use common::types::Account;

use crate::api::AccountApi;
use crate::sync::{AccountSync, FlashKind};

pub const EMPTY_LIST: &str = "No accounts found. Create one to get started!";

/// One account card: name, id, balance with two decimals, email.
pub fn render_card(account: &Account) -> String {
    format!(
        "{} (ID: {})\n  Balance: ${:.2}\n  Email: {}",
        account.name, account.id, account.balance, account.email
    )
}

/// Text rendering of the whole screen: status line, form, account list.
pub fn render<A: AccountApi>(sync: &AccountSync<A>) -> String {
    let mut out = String::from("== Bank Account Manager ==\n");

    if let Some(flash) = sync.flash() {
        let tag = match flash.kind {
            FlashKind::Success => "ok",
            FlashKind::Error => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", flash.text);
    }

    let title = match sync.editing_id() {
        Some(id) => format!("Update Account #{id}"),
        None => "Create New Account".to_string(),
    };
    let form = sync.form();
    let _ = writeln!(out, "\n-- {title} --");
    let _ = writeln!(out, "  name:    {}", form.name);
    let _ = writeln!(out, "  balance: {}", form.balance);
    let _ = writeln!(out, "  email:   {}", form.email);

    let _ = writeln!(out, "\n-- All Accounts --");
    if sync.accounts().is_empty() {
        let _ = writeln!(out, "{EMPTY_LIST}");
    } else {
        for account in sync.accounts() {
            let _ = writeln!(out, "{}", render_card(account));
            if sync.pending_delete() == Some(account.id) {
                let _ = writeln!(out, "  Are you sure? (confirm / cancel)");
            }
        }
    }
    out
}
