//! Client-side synchronization and view-state engine for the user roster.
//!
//! [`CommandCoordinator`] is the only writer of the [`ViewState`]; it talks to the remote
//! collection through a [`RemoteUserStore`] and turns every outcome into a state transition.

pub mod cache;
pub mod coordinator;
pub mod error;
pub mod error_channel;
pub mod form;
pub mod pagination;
pub mod remote;
pub mod state;

pub use cache::LocalUserCache;
pub use coordinator::{CommandCoordinator, CommandOutcome};
pub use error::{CacheError, CommandError, FormError, RemoteError};
pub use error_channel::ErrorChannel;
pub use form::UserForm;
pub use pagination::{paginate, total_pages, PageView, PaginationState, DEFAULT_PAGE_SIZE};
pub use remote::{HttpUserStore, RemoteUserStore};
pub use state::{FormMode, Transition, ViewState};
