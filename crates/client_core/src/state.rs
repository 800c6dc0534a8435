//! View state and its transitions.
//!
//! `ViewState::apply` is the only way the cache, pagination, form mode and error slot change.
//! It is synchronous and pure apart from logging, so every reconciliation rule can be tested
//! without a remote store or a renderer.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use shared::domain::{NewUserRecord, UserId, UserRecord};
use tracing::{debug, error, info, warn};

use crate::{
    cache::LocalUserCache,
    error::CommandError,
    error_channel::ErrorChannel,
    pagination::{paginate, PageView, PaginationState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    /// `None` targets a new record, `Some(id)` the record being edited.
    Editing(Option<UserId>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Initialized(Vec<UserRecord>),
    Failed(CommandError),
    Created {
        record: NewUserRecord,
        completed_at: DateTime<Utc>,
    },
    Updated(UserRecord),
    Deleted(UserId),
    OpenForAdd,
    OpenForEdit(UserId),
    CancelForm,
    SetPage(usize),
    DismissError,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Initialized(_) => "initialized",
            Transition::Failed(_) => "failed",
            Transition::Created { .. } => "created",
            Transition::Updated(_) => "updated",
            Transition::Deleted(_) => "deleted",
            Transition::OpenForAdd => "open_for_add",
            Transition::OpenForEdit(_) => "open_for_edit",
            Transition::CancelForm => "cancel_form",
            Transition::SetPage(_) => "set_page",
            Transition::DismissError => "dismiss_error",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    cache: LocalUserCache,
    pagination: PaginationState,
    form: FormMode,
    error: ErrorChannel,
    initialized: bool,
    last_minted: Option<i64>,
}

impl ViewState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            pagination: PaginationState::new(page_size),
            ..Self::default()
        }
    }

    pub fn apply(mut self, transition: Transition) -> Self {
        debug!(transition = transition.name(), "applying view transition");
        match transition {
            Transition::Initialized(_) if self.initialized => {
                debug!("roster already loaded; ignoring repeated list");
            }
            Transition::Initialized(records) => {
                // Records created while the load was pending or after a failed one stay,
                // after the listed ones.
                let mut merged: Vec<UserRecord> = records
                    .into_iter()
                    .filter(|record| !self.cache.contains(record.id))
                    .collect();
                merged.extend(self.cache.records().iter().cloned());
                self.cache.replace_all(merged);
                self.initialized = true;
                self.error.clear();
                info!(count = self.cache.len(), "user roster loaded");
            }
            Transition::Failed(err) => {
                warn!(%err, "remote operation failed");
                self.error.set(err.to_string());
            }
            Transition::Created {
                record,
                completed_at,
            } => {
                let id = self.mint_local_id(completed_at);
                match self.cache.append(record.with_id(id)) {
                    Ok(()) => {
                        info!(user_id = id.0, "user created");
                        self.form = FormMode::Closed;
                        self.error.clear();
                    }
                    Err(err) => error!(%err, "minted id collided with cached user"),
                }
            }
            Transition::Updated(record) => {
                let id = record.id;
                self.cache.replace_by_id(id, record);
                info!(user_id = id.0, "user updated");
                self.form = FormMode::Closed;
                self.error.clear();
            }
            Transition::Deleted(id) => {
                if self.cache.remove_by_id(id) {
                    info!(user_id = id.0, "user deleted");
                } else {
                    debug!(user_id = id.0, "deleted user was not cached");
                }
                self.error.clear();
            }
            Transition::OpenForAdd => self.form = FormMode::Editing(None),
            Transition::OpenForEdit(id) => {
                if self.cache.contains(id) {
                    self.form = FormMode::Editing(Some(id));
                } else {
                    warn!(user_id = id.0, "cannot edit a user that is not cached");
                }
            }
            Transition::CancelForm => self.form = FormMode::Closed,
            Transition::SetPage(page) => self.pagination.set_page(page),
            Transition::DismissError => self.error.clear(),
        }
        self
    }

    /// Ids start from the wall-clock millisecond at which the create resolved and are bumped
    /// past the last minted id and past any id already cached.
    fn mint_local_id(&mut self, completed_at: DateTime<Utc>) -> UserId {
        let mut candidate = completed_at.timestamp_millis();
        if let Some(last) = self.last_minted {
            candidate = candidate.max(last.saturating_add(1));
        }
        while self.cache.contains(UserId(candidate)) {
            candidate = candidate.saturating_add(1);
        }
        self.last_minted = Some(candidate);
        UserId(candidate)
    }

    pub fn page(&self) -> PageView<'_> {
        paginate(
            self.cache.records(),
            self.pagination.page_size(),
            self.pagination.current_page(),
        )
    }

    pub fn cache(&self) -> &LocalUserCache {
        &self.cache
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn form(&self) -> FormMode {
        self.form
    }

    /// The record the open form edits, if it is an edit of a cached record.
    pub fn form_target(&self) -> Option<&UserRecord> {
        match self.form {
            FormMode::Editing(Some(id)) => self.cache.get(id),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.current()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
