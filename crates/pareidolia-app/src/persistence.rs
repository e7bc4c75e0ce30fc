//! # Persistence Port
//!
//! The only way services reach stored data. Implementations decide how
//! events, reviews and accounts are kept. [`crate::store::InMemoryPersistence`]
//! is the bundled adapter.
//!
//! Events are stored with their lifecycle state as its name string and are
//! reconstructed on load, so a backend may hit a tag it does not recognise.
//! That surfaces as [`PersistenceError::Decode`].
//!
//! Lifecycle moves and review inserts are read-check-write sequences.
//! [`Persistence::update_event`] and [`Persistence::save_review`] must run
//! each one atomically, so concurrent callers on the same event or author
//! never both succeed against the same prior state.

use thiserror::Error;

use pareidolia_core::{Account, AccountId, AccountRole, EventId, ReviewId};
use pareidolia_review::{LookupFailure, RawReview, ReviewRecord, RoleResolver};
use pareidolia_state::{Event, EventStateError};

use crate::error::AppError;

/// Errors raised by a persistence backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// No record of this kind with this identifier.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A stored record could not be turned back into its domain type.
    #[error("stored record could not be decoded: {0}")]
    Decode(#[from] EventStateError),

    /// The write clashes with a record already stored.
    #[error("{0}")]
    Conflict(String),

    /// The backend failed to answer.
    #[error("persistence backend error: {0}")]
    Backend(String),
}

impl PersistenceError {
    pub fn not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Storage operations used by the application services.
pub trait Persistence: Send + Sync {
    fn load_event(&self, id: &EventId) -> Result<Event, PersistenceError>;

    /// Insert or overwrite an event.
    fn save_event(&self, event: &Event) -> Result<(), PersistenceError>;

    /// Load, change and store one event with no other write to it in between.
    ///
    /// `apply` sees the current stored event. If it fails, nothing is written
    /// and its error is returned in the inner `Err`. Otherwise the changed
    /// event is stored and returned.
    fn update_event(
        &self,
        id: &EventId,
        apply: &mut dyn FnMut(&mut Event) -> Result<(), AppError>,
    ) -> Result<Result<Event, AppError>, PersistenceError>;

    /// Load a review joined with its author's display data.
    fn load_review(&self, id: &ReviewId) -> Result<RawReview, PersistenceError>;

    /// Store an undecorated review.
    ///
    /// Fails with [`PersistenceError::Conflict`] if a different review by the
    /// same author for the same event is already stored. The check and the
    /// write are one atomic step.
    fn save_review(&self, review: &ReviewRecord) -> Result<(), PersistenceError>;

    /// All reviews for an event, newest first.
    fn list_reviews_for_event(&self, event: &EventId) -> Result<Vec<RawReview>, PersistenceError>;

    fn load_account(&self, id: &AccountId) -> Result<Account, PersistenceError>;

    fn load_account_role(&self, id: &AccountId) -> Result<AccountRole, PersistenceError> {
        self.load_account(id).map(|account| account.role)
    }
}

/// Serves author role lookups for the review pipeline from a [`Persistence`].
#[derive(Clone, Copy)]
pub struct PersistenceRoleResolver<'a> {
    persistence: &'a dyn Persistence,
}

impl<'a> PersistenceRoleResolver<'a> {
    pub fn new(persistence: &'a dyn Persistence) -> Self {
        Self { persistence }
    }
}

impl std::fmt::Debug for PersistenceRoleResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceRoleResolver").finish_non_exhaustive()
    }
}

impl RoleResolver for PersistenceRoleResolver<'_> {
    fn resolve_role(&self, account: &AccountId) -> Result<AccountRole, LookupFailure> {
        self.persistence
            .load_account_role(account)
            .map_err(|err| match err {
                PersistenceError::NotFound { .. } => LookupFailure::AccountNotFound(*account),
                PersistenceError::Decode(_)
                | PersistenceError::Conflict(_)
                | PersistenceError::Backend(_) => {
                    LookupFailure::Unavailable(err.to_string())
                }
            })
    }
}
