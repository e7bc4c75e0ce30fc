//! # In-Memory Persistence
//!
//! [`Store`] is a thread-safe, cloneable key-value map. [`InMemoryPersistence`]
//! builds the [`Persistence`] port from three of them. Events are kept as
//! [`EventRow`]s, the shape a relational backend would hold, so loading an
//! event goes through the same state-tag decoding a database adapter does.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pareidolia_core::{Account, AccountId, EventId, ReviewId, Timestamp};
use pareidolia_review::{RawReview, ReviewRecord};
use pareidolia_state::{Event, EventState, EventStateError};

use crate::error::AppError;
use crate::persistence::{Persistence, PersistenceError};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// Clones share the same map. The lock is `parking_lot`, so a panicking
/// writer does not poison it.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// Clone every record matching `predicate`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.data
            .read()
            .values()
            .filter(|value| predicate(value))
            .cloned()
            .collect()
    }

    /// Read-validate-update under one write lock.
    ///
    /// Returns `None` if the record doesn't exist.
    pub fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Insert unless a stored record matches `clashes`, checked under the
    /// same write lock. On a clash nothing is written and a copy of the
    /// clashing record is returned.
    pub fn insert_unless(
        &self,
        id: Uuid,
        value: T,
        clashes: impl Fn(&T) -> bool,
    ) -> Result<Option<T>, T> {
        let mut guard = self.data.write();
        if let Some(existing) = guard.values().find(|existing| clashes(existing)) {
            return Err(existing.clone());
        }
        Ok(guard.insert(id, value))
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Stored Shapes ------------------------------------------------------------

/// An event as stored: the lifecycle state is kept as its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub promoters: Vec<AccountId>,
    /// `DRAFT`, `REVIEW` or `PUBLISHED`.
    pub state: String,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            promoters: event.promoters.clone(),
            state: event.state.name().to_string(),
            ends_at: event.ends_at,
            created_at: event.created_at,
        }
    }
}

impl TryFrom<EventRow> for Event {
    type Error = EventStateError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let state: EventState = row.state.parse()?;
        Ok(Event {
            id: row.id,
            title: row.title,
            description: row.description,
            promoters: row.promoters,
            state,
            ends_at: row.ends_at,
            created_at: row.created_at,
        })
    }
}

// -- Adapter ------------------------------------------------------------------

/// [`Persistence`] over in-process maps.
///
/// Reviews whose author account is missing are treated as absent, the way
/// a cascading delete would leave them. Event updates and review inserts
/// each run under their store's write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersistence {
    events: Store<EventRow>,
    reviews: Store<ReviewRecord>,
    accounts: Store<Account>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_account(&self, account: Account) {
        self.accounts.insert(*account.id.as_uuid(), account);
    }

    /// Store a pre-built row as-is, without checking its state tag.
    pub fn insert_event_row(&self, row: EventRow) {
        self.events.insert(*row.id.as_uuid(), row);
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    fn join_author(&self, record: ReviewRecord) -> Result<RawReview, PersistenceError> {
        let author = self.load_account(&record.author_id)?;
        Ok(RawReview::new(record, &author))
    }
}

impl Persistence for InMemoryPersistence {
    fn load_event(&self, id: &EventId) -> Result<Event, PersistenceError> {
        let row = self
            .events
            .get(id.as_uuid())
            .ok_or_else(|| PersistenceError::not_found("event", id))?;
        Ok(Event::try_from(row)?)
    }

    fn save_event(&self, event: &Event) -> Result<(), PersistenceError> {
        self.events.insert(*event.id.as_uuid(), EventRow::from(event));
        Ok(())
    }

    fn update_event(
        &self,
        id: &EventId,
        apply: &mut dyn FnMut(&mut Event) -> Result<(), AppError>,
    ) -> Result<Result<Event, AppError>, PersistenceError> {
        self.events
            .try_update(
                id.as_uuid(),
                |row: &mut EventRow| -> Result<Result<Event, AppError>, PersistenceError> {
                    let mut event = Event::try_from(row.clone())?;
                    if let Err(rejected) = apply(&mut event) {
                        return Ok(Err(rejected));
                    }
                    *row = EventRow::from(&event);
                    Ok(Ok(event))
                },
            )
            .unwrap_or_else(|| Err(PersistenceError::not_found("event", id)))
    }

    fn load_review(&self, id: &ReviewId) -> Result<RawReview, PersistenceError> {
        let record = self
            .reviews
            .get(id.as_uuid())
            .ok_or_else(|| PersistenceError::not_found("review", id))?;
        self.join_author(record).map_err(|err| match err {
            PersistenceError::NotFound { .. } => PersistenceError::not_found("review", id),
            other => other,
        })
    }

    fn save_review(&self, review: &ReviewRecord) -> Result<(), PersistenceError> {
        self.reviews
            .insert_unless(*review.id.as_uuid(), review.clone(), |existing| {
                existing.id != review.id
                    && existing.author_id == review.author_id
                    && existing.event_id == review.event_id
            })
            .map(|_| ())
            .map_err(|existing| {
                PersistenceError::Conflict(format!(
                    "account {} already reviewed event {} ({})",
                    review.author_id, review.event_id, existing.id
                ))
            })
    }

    fn list_reviews_for_event(&self, event: &EventId) -> Result<Vec<RawReview>, PersistenceError> {
        let mut records = self.reviews.filter(|r| r.event_id == *event);
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let mut joined = Vec::with_capacity(records.len());
        for record in records {
            match self.join_author(record) {
                Ok(raw) => joined.push(raw),
                Err(PersistenceError::NotFound { .. }) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(joined)
    }

    fn load_account(&self, id: &AccountId) -> Result<Account, PersistenceError> {
        self.accounts
            .get(id.as_uuid())
            .ok_or_else(|| PersistenceError::not_found("account", id))
    }
}
