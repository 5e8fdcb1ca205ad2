//! Line commands understood by the interactive client.

use crate::api::AccountApi;
use crate::errors::ClientError;
use crate::sync::AccountSync;

pub const HELP: &str = "\
commands:
  refresh                          reload all accounts from the server
  new <name> <balance> <email>     fill the form for a new account
  set <name|balance|email> <text>  edit one form field (text may contain spaces)
  edit <id>                        load an account into the form
  save                             submit the form (create, or update while editing)
  cancel                           leave edit mode / drop a pending delete
  delete <id>                      ask to delete an account
  confirm                          delete the account awaiting confirmation
  help                             show this text
  quit                             exit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Balance,
    Email,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Refresh,
    New { name: String, balance: String, email: String },
    Set(Field, String),
    Edit(u64),
    Save,
    Cancel,
    Delete(u64),
    Confirm,
    Help,
    Quit,
}

fn parse_id(raw: Option<&str>) -> Result<u64, ClientError> {
    raw.and_then(|s| s.parse().ok())
        .ok_or_else(|| ClientError::Validation("expected a numeric account id".into()))
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ClientError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();
        let cmd = match head {
            "" => return Ok(None),
            "refresh" | "list" => Self::Refresh,
            "new" => match (args.next(), args.next(), args.next()) {
                (Some(n), Some(b), Some(e)) => Self::New { name: n.into(), balance: b.into(), email: e.into() },
                _ => return Err(ClientError::Validation("usage: new <name> <balance> <email>".into())),
            },
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = match field {
                    "name" => Field::Name,
                    "balance" => Field::Balance,
                    "email" => Field::Email,
                    _ => return Err(ClientError::Validation("usage: set <name|balance|email> <text>".into())),
                };
                Self::Set(field, value.trim().to_string())
            }
            "edit" => Self::Edit(parse_id(args.next())?),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "delete" => Self::Delete(parse_id(args.next())?),
            "confirm" => Self::Confirm,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ClientError::Validation(format!("unknown command `{other}` (try `help`)"))),
        };
        Ok(Some(cmd))
    }

    /// Apply the command to `sync`. Network failures are already reflected in the flash line.
    pub async fn apply<A: AccountApi>(self, sync: &mut AccountSync<A>) -> Result<(), ClientError> {
        match self {
            Self::Refresh => sync.refresh().await,
            Self::New { name, balance, email } => {
                sync.cancel_edit();
                let form = sync.form_mut();
                form.name = name;
                form.balance = balance;
                form.email = email;
                Ok(())
            }
            Self::Set(field, value) => {
                let form = sync.form_mut();
                match field {
                    Field::Name => form.name = value,
                    Field::Balance => form.balance = value,
                    Field::Email => form.email = value,
                }
                Ok(())
            }
            Self::Edit(id) => {
                if sync.begin_edit(id) {
                    Ok(())
                } else {
                    Err(ClientError::Validation(format!("no account with id {id} in view")))
                }
            }
            Self::Save => sync.submit_form().await,
            Self::Cancel => {
                sync.cancel_edit();
                sync.cancel_delete();
                Ok(())
            }
            Self::Delete(id) => {
                sync.request_delete(id);
                Ok(())
            }
            Self::Confirm => sync.confirm_delete().await.map(|_| ()),
            Self::Help | Self::Quit => Ok(()),
        }
    }
}
