//! Applies create/update/delete against the remote store and reconciles the outcome into
//! the view state.
//!
//! The remote store is used as a validation gate only: it accepts writes without retaining
//! them, so on success the locally held value is what lands in the cache, and a create gets a
//! locally minted id instead of the one the store echoed.

use std::{
    collections::HashMap,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex as StdMutex, PoisonError,
    },
};

use chrono::Utc;
use shared::domain::{NewUserRecord, UserId, UserRecord};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{CommandError, FormError},
    form::UserForm,
    pagination::DEFAULT_PAGE_SIZE,
    remote::RemoteUserStore,
    state::{FormMode, Transition, ViewState},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Failed(CommandError),
    /// The command did not apply to the current state (closed form, repeated initialize).
    Ignored,
    /// The view was unmounted before the command resolved.
    Detached,
}

/// Sole writer of the view state.
///
/// Commands take `&self` and may overlap; each reconciles at the moment its remote call
/// resolves, so for two writes to the same record the one completing last wins.
pub struct CommandCoordinator {
    store: Arc<dyn RemoteUserStore>,
    state: Mutex<Option<ViewState>>,
    loading: AtomicBool,
    inflight_writes: StdMutex<HashMap<UserId, usize>>,
}

/// Marks the initial list call as in flight until dropped.
struct LoadingSlot<'a>(&'a AtomicBool);

impl Drop for LoadingSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Counts one pending write to `id`; the count drops with the guard, including when the
/// command future is abandoned mid-flight.
struct InflightWrite<'a> {
    writes: &'a StdMutex<HashMap<UserId, usize>>,
    id: UserId,
}

impl Drop for InflightWrite<'_> {
    fn drop(&mut self) {
        let mut writes = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = writes.get_mut(&self.id) {
            *pending = pending.saturating_sub(1);
            if *pending == 0 {
                writes.remove(&self.id);
            }
        }
    }
}

impl CommandCoordinator {
    pub fn new(store: Arc<dyn RemoteUserStore>) -> Arc<Self> {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(store: Arc<dyn RemoteUserStore>, page_size: NonZeroUsize) -> Arc<Self> {
        Arc::new(Self {
            store,
            state: Mutex::new(Some(ViewState::new(page_size))),
            loading: AtomicBool::new(false),
            inflight_writes: StdMutex::new(HashMap::new()),
        })
    }

    /// Loads the roster once. Repeating after a successful load, or while one is in flight,
    /// is ignored; a failed load may be retried.
    pub async fn initialize(&self) -> CommandOutcome {
        let _slot = {
            let guard = self.state.lock().await;
            match guard.as_ref() {
                None => return CommandOutcome::Detached,
                Some(state) if state.is_initialized() => {
                    debug!("roster already initialized");
                    return CommandOutcome::Ignored;
                }
                Some(_) => {}
            }
            if self.loading.swap(true, Ordering::AcqRel) {
                debug!("roster load already in flight");
                return CommandOutcome::Ignored;
            }
            LoadingSlot(&self.loading)
        };

        match self.store.list().await {
            Ok(records) => self.apply(Transition::Initialized(records)).await,
            Err(err) => {
                warn!(%err, "listing users failed");
                self.fail(CommandError::FetchList).await
            }
        }
    }

    pub async fn create(&self, record: NewUserRecord) -> CommandOutcome {
        debug!(name = %record.name, "creating user");
        match self.store.create(&record).await {
            Ok(echoed) => {
                if let Some(remote_id) = echoed {
                    debug!(remote_id = remote_id.0, "ignoring remote-assigned id");
                }
                self.apply(Transition::Created {
                    record,
                    completed_at: Utc::now(),
                })
                .await
            }
            Err(err) => {
                warn!(%err, "creating user failed");
                self.fail(CommandError::Create).await
            }
        }
    }

    pub async fn update(&self, id: UserId, record: UserRecord) -> CommandOutcome {
        let record = UserRecord { id, ..record };
        let result = {
            let _write = self.begin_write(id);
            self.store.update(id, &record).await
        };

        match result {
            Ok(()) => self.apply(Transition::Updated(record)).await,
            Err(err) => {
                warn!(user_id = id.0, %err, "updating user failed");
                self.fail(CommandError::Update).await
            }
        }
    }

    pub async fn delete(&self, id: UserId) -> CommandOutcome {
        let result = {
            let _write = self.begin_write(id);
            self.store.delete(id).await
        };

        match result {
            Ok(()) => self.apply(Transition::Deleted(id)).await,
            Err(err) => {
                warn!(user_id = id.0, %err, "deleting user failed");
                self.fail(CommandError::Delete).await
            }
        }
    }

    /// Submits the open form: create when it was opened for add, update when opened for an
    /// edit. An invalid draft is returned to the caller and nothing is sent.
    pub async fn save(&self, form: &UserForm) -> Result<CommandOutcome, FormError> {
        let record = form.assemble()?;
        let mode = match self.state.lock().await.as_ref() {
            Some(state) => state.form(),
            None => return Ok(CommandOutcome::Detached),
        };

        let outcome = match mode {
            FormMode::Closed => {
                debug!("save requested with the form closed");
                CommandOutcome::Ignored
            }
            FormMode::Editing(None) => self.create(record).await,
            FormMode::Editing(Some(id)) => self.update(id, record.with_id(id)).await,
        };
        Ok(outcome)
    }

    pub async fn open_for_add(&self) -> CommandOutcome {
        self.apply(Transition::OpenForAdd).await
    }

    pub async fn open_for_edit(&self, id: UserId) -> CommandOutcome {
        self.apply(Transition::OpenForEdit(id)).await
    }

    pub async fn cancel_form(&self) -> CommandOutcome {
        self.apply(Transition::CancelForm).await
    }

    pub async fn set_page(&self, page: usize) -> CommandOutcome {
        self.apply(Transition::SetPage(page)).await
    }

    pub async fn dismiss_error(&self) -> CommandOutcome {
        self.apply(Transition::DismissError).await
    }

    /// A clone of the current state; cheap because the cache shares its records.
    pub async fn snapshot(&self) -> Option<ViewState> {
        self.state.lock().await.clone()
    }

    /// Discards the view state. Anything still in flight resolves into a no-op.
    pub async fn unmount(&self) {
        if self.state.lock().await.take().is_some() {
            info!("user roster view unmounted");
        }
    }

    async fn fail(&self, err: CommandError) -> CommandOutcome {
        match self.apply(Transition::Failed(err)).await {
            CommandOutcome::Applied => CommandOutcome::Failed(err),
            other => other,
        }
    }

    async fn apply(&self, transition: Transition) -> CommandOutcome {
        let mut guard = self.state.lock().await;
        let Some(state) = guard.take() else {
            debug!(
                transition = transition.name(),
                "view unmounted; dropping late completion"
            );
            return CommandOutcome::Detached;
        };
        *guard = Some(state.apply(transition));
        CommandOutcome::Applied
    }

    fn begin_write(&self, id: UserId) -> InflightWrite<'_> {
        let mut writes = self
            .inflight_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let pending = writes.entry(id).or_insert(0);
        if *pending > 0 {
            warn!(
                user_id = id.0,
                pending = *pending,
                "overlapping writes to the same user; the last to complete wins"
            );
        }
        *pending += 1;
        InflightWrite {
            writes: &self.inflight_writes,
            id,
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
