//! Operator input and its mapping onto coordinator commands.

use client_core::{CommandCoordinator, CommandOutcome, FormMode, UserForm};
use shared::domain::UserId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Show,
    Help,
    Page(usize),
    Add,
    Edit(UserId),
    Save(Vec<(FormField, String)>),
    Cancel,
    Delete(UserId),
    Dismiss,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    First,
    Last,
    Email,
    Department,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}'; type 'help'")]
    UnknownCommand(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("unknown field '{0}'; use first=, last=, email= or dept=")]
    UnknownField(String),
}

pub const HELP: &str = "\
commands:
  page N                          show page N
  add                             open the form for a new user
  edit ID                         open the form for user ID
  save first=.. last=.. email=.. dept=..
                                  submit the open form (edit keeps unset fields)
  cancel                          close the form
  delete ID                       delete user ID
  dismiss                         hide the error banner
  show | help | quit";

pub fn parse_line(line: &str) -> Result<HostCommand, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(HostCommand::Show);
    };
    let rest: Vec<&str> = tokens.collect();

    match head.to_ascii_lowercase().as_str() {
        "show" | "list" => Ok(HostCommand::Show),
        "help" | "?" => Ok(HostCommand::Help),
        "page" => parse_number(&rest, "page", "a page number").map(HostCommand::Page),
        "add" => Ok(HostCommand::Add),
        "edit" => parse_id(&rest, "edit").map(HostCommand::Edit),
        "save" => parse_fields(&rest).map(HostCommand::Save),
        "cancel" => Ok(HostCommand::Cancel),
        "delete" | "rm" => parse_id(&rest, "delete").map(HostCommand::Delete),
        "dismiss" => Ok(HostCommand::Dismiss),
        "quit" | "exit" => Ok(HostCommand::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_number(
    rest: &[&str],
    command: &'static str,
    expected: &'static str,
) -> Result<usize, ParseError> {
    let raw = rest
        .first()
        .ok_or(ParseError::MissingArgument { command, expected })?;
    raw.parse()
        .map_err(|_| ParseError::NotANumber((*raw).to_string()))
}

fn parse_id(rest: &[&str], command: &'static str) -> Result<UserId, ParseError> {
    let raw = rest.first().ok_or(ParseError::MissingArgument {
        command,
        expected: "a user id",
    })?;
    raw.parse::<i64>()
        .map(UserId)
        .map_err(|_| ParseError::NotANumber((*raw).to_string()))
}

/// `key=value` pairs; a token without `=` continues the previous value, so
/// `last=Van Buren` keeps its space.
fn parse_fields(rest: &[&str]) -> Result<Vec<(FormField, String)>, ParseError> {
    let mut fields: Vec<(FormField, String)> = Vec::new();
    for token in rest {
        match token.split_once('=') {
            Some((key, value)) => {
                let field = match key.to_ascii_lowercase().as_str() {
                    "first" => FormField::First,
                    "last" => FormField::Last,
                    "email" => FormField::Email,
                    "dept" | "department" => FormField::Department,
                    _ => return Err(ParseError::UnknownField(key.to_string())),
                };
                fields.push((field, value.to_string()));
            }
            None => match fields.last_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(token);
                }
                None => return Err(ParseError::UnknownField((*token).to_string())),
            },
        }
    }
    Ok(fields)
}

pub enum Flow {
    Continue(Option<String>),
    Quit,
}

pub async fn dispatch(coordinator: &CommandCoordinator, command: HostCommand) -> Flow {
    tracing::debug!(?command, "dispatching host command");
    let outcome = match command {
        HostCommand::Show => return Flow::Continue(None),
        HostCommand::Help => return Flow::Continue(Some(HELP.to_string())),
        HostCommand::Quit => return Flow::Quit,
        HostCommand::Page(page) => coordinator.set_page(page).await,
        HostCommand::Add => coordinator.open_for_add().await,
        HostCommand::Edit(id) => coordinator.open_for_edit(id).await,
        HostCommand::Cancel => coordinator.cancel_form().await,
        HostCommand::Delete(id) => coordinator.delete(id).await,
        HostCommand::Dismiss => coordinator.dismiss_error().await,
        HostCommand::Save(fields) => {
            let form = draft_for(coordinator, fields).await;
            match coordinator.save(&form).await {
                Ok(outcome) => outcome,
                Err(err) => return Flow::Continue(Some(format!("form: {err}"))),
            }
        }
    };

    match outcome {
        CommandOutcome::Ignored => Flow::Continue(Some("nothing to do".to_string())),
        CommandOutcome::Detached => Flow::Quit,
        CommandOutcome::Applied | CommandOutcome::Failed(_) => Flow::Continue(None),
    }
}

/// Starts from the edited record (or a blank form) and overlays the given fields.
async fn draft_for(coordinator: &CommandCoordinator, fields: Vec<(FormField, String)>) -> UserForm {
    let mut form = match coordinator.snapshot().await {
        Some(state) if matches!(state.form(), FormMode::Editing(Some(_))) => state
            .form_target()
            .map(UserForm::from_record)
            .unwrap_or_default(),
        _ => UserForm::blank(),
    };
    for (field, value) in fields {
        match field {
            FormField::First => form.first_name = value,
            FormField::Last => form.last_name = value,
            FormField::Email => form.email = value,
            FormField::Department => form.department = value,
        }
    }
    form
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
