//! # Event Lifecycle Service
//!
//! Moderators (reviewers and admins) move events forward and backward.
//! Promoters edit their drafts and submit them for review. Consumers and the
//! public only ever see published events.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pareidolia_core::{EventId, Timestamp, ValidationError};
use pareidolia_state::{Direction, Event, EventState, TransitionRecord};

use crate::caller::CallerIdentity;
use crate::error::AppError;
use crate::persistence::Persistence;

const TITLE_MAX_CHARS: usize = 255;
const DESCRIPTION_MAX_CHARS: usize = 65_535;

/// Changes a promoter may make to a draft. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ends_at: Option<Timestamp>,
}

impl EventUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            ValidationError::check_text("title", title, TITLE_MAX_CHARS)?;
        }
        if let Some(description) = &self.description {
            ValidationError::check_text("description", description, DESCRIPTION_MAX_CHARS)?;
        }
        Ok(())
    }

    fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(ends_at) = self.ends_at {
            event.ends_at = ends_at;
        }
    }
}

/// Lifecycle operations on events.
#[derive(Clone)]
pub struct EventService {
    persistence: Arc<dyn Persistence>,
}

impl EventService {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    /// Advance an event one step. Moderators only.
    pub fn move_forward(&self, caller: &CallerIdentity, id: &EventId) -> Result<Event, AppError> {
        self.moderate(caller, id, Direction::Forward)
    }

    /// Send an event back one step. Moderators only.
    pub fn move_backwards(&self, caller: &CallerIdentity, id: &EventId) -> Result<Event, AppError> {
        self.moderate(caller, id, Direction::Backward)
    }

    /// Hand a draft to the moderators.
    ///
    /// Only the event's promoters (or an admin) may submit, and only from
    /// `Draft`.
    pub fn submit_for_review(
        &self,
        caller: &CallerIdentity,
        id: &EventId,
    ) -> Result<Event, AppError> {
        let mut record = None;
        let event = self
            .persistence
            .update_event(id, &mut |event: &mut Event| -> Result<(), AppError> {
                require_manager(caller, event)?;
                record = Some(event.move_to(EventState::Review)?);
                Ok(())
            })?
            .map_err(|err| {
                tracing::info!(event_id = %id, error = %err, "submission for review rejected");
                err
            })?;

        if let Some(record) = &record {
            log_transition(caller, record);
        }
        Ok(event)
    }

    /// Edit a draft's details.
    pub fn update_details(
        &self,
        caller: &CallerIdentity,
        id: &EventId,
        update: EventUpdate,
    ) -> Result<Event, AppError> {
        update.validate()?;

        let mut pending = Some(update);
        let event = self
            .persistence
            .update_event(id, &mut |event: &mut Event| -> Result<(), AppError> {
                require_manager(caller, event)?;
                event.ensure_editable()?;
                if let Some(update) = pending.take() {
                    update.apply(event);
                }
                Ok(())
            })??;

        tracing::info!(event_id = %id, actor = %caller.account_id, "event details updated");
        Ok(event)
    }

    /// Fetch an event as consumers and the public see it.
    ///
    /// Anything not yet published is reported as missing.
    pub fn published_event(&self, id: &EventId) -> Result<Event, AppError> {
        let event = self.persistence.load_event(id)?;
        if event.state != EventState::Published {
            return Err(AppError::NotFound(format!("event {id} not found")));
        }
        Ok(event)
    }

    fn moderate(
        &self,
        caller: &CallerIdentity,
        id: &EventId,
        direction: Direction,
    ) -> Result<Event, AppError> {
        if !caller.can_moderate() {
            return Err(AppError::Forbidden(format!(
                "role {} cannot move events {direction}",
                caller.role
            )));
        }

        let mut record = None;
        let event = self
            .persistence
            .update_event(id, &mut |event: &mut Event| -> Result<(), AppError> {
                let outcome = match direction {
                    Direction::Forward => event.move_forward(),
                    Direction::Backward => event.move_backwards(),
                };
                record = Some(outcome?);
                Ok(())
            })?
            .map_err(|err| {
                tracing::info!(event_id = %id, %direction, error = %err, "event transition rejected");
                err
            })?;

        if let Some(record) = &record {
            log_transition(caller, record);
        }
        Ok(event)
    }
}

fn require_manager(caller: &CallerIdentity, event: &Event) -> Result<(), AppError> {
    if caller.can_manage(event) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{} is not a promoter of event {}",
            caller.account_id, event.id
        )))
    }
}

fn log_transition(caller: &CallerIdentity, record: &TransitionRecord) {
    tracing::info!(
        event_id = %record.event_id,
        from = %record.from_state,
        to = %record.to_state,
        direction = %record.direction,
        actor = %caller.account_id,
        at = %record.timestamp,
        "event lifecycle transition",
    );
}
