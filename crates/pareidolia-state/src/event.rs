//! # Event Lifecycle
//!
//! ## States
//!
//! | State     | forward    | backward | edit | message |
//! |-----------|------------|----------|------|---------|
//! | DRAFT     | REVIEW     | rejected | yes  | yes     |
//! | REVIEW    | PUBLISHED  | DRAFT    | no   | yes     |
//! | PUBLISHED | rejected   | DRAFT    | no   | no      |
//!
//! A transition changes only [`Event::state`]. Bookings, messages and
//! promoter associations belong to other aggregates and are never touched.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pareidolia_core::{AccountId, EventId, Timestamp};

// ─── Event State ─────────────────────────────────────────────────────

/// The lifecycle phase of an event.
///
/// Serialized as `"DRAFT"`, `"REVIEW"` or `"PUBLISHED"`. Deserializing any
/// other string fails with [`EventStateError::UnknownState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventState {
    /// Being written by its promoters. The only editable phase.
    #[default]
    Draft,
    /// Submitted and awaiting a reviewer's decision.
    Review,
    /// Visible to consumers and open for booking.
    Published,
}

/// Direction of a lifecycle move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Forward, Direction::Backward];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        })
    }
}

impl EventState {
    /// Every state, in lifecycle order.
    pub const ALL: [EventState; 3] = [EventState::Draft, EventState::Review, EventState::Published];

    /// Canonical persisted name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Review => "REVIEW",
            Self::Published => "PUBLISHED",
        }
    }

    /// The transition table.
    ///
    /// Total over `(state, direction)`: every pair yields either the next
    /// state or an [`EventStateError::InvalidTransition`].
    pub fn step(self, direction: Direction) -> Result<EventState, EventStateError> {
        match (self, direction) {
            (Self::Draft, Direction::Forward) => Ok(Self::Review),
            (Self::Review, Direction::Forward) => Ok(Self::Published),
            (Self::Review, Direction::Backward) => Ok(Self::Draft),
            (Self::Published, Direction::Backward) => Ok(Self::Draft),
            (Self::Draft, Direction::Backward) => Err(EventStateError::InvalidTransition {
                from: self,
                attempted: direction.to_string(),
                reason: "cannot move backwards from initial state".to_string(),
            }),
            (Self::Published, Direction::Forward) => Err(EventStateError::InvalidTransition {
                from: self,
                attempted: direction.to_string(),
                reason: "cannot move forward from terminal state".to_string(),
            }),
        }
    }

    pub fn forward(self) -> Result<EventState, EventStateError> {
        self.step(Direction::Forward)
    }

    pub fn backward(self) -> Result<EventState, EventStateError> {
        self.step(Direction::Backward)
    }

    /// Event details may only change while drafting.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Promoters and reviewers may exchange messages until publication.
    pub fn can_send_message(&self) -> bool {
        matches!(self, Self::Draft | Self::Review)
    }

    /// No backward move exists from here.
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// No forward move exists from here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventState {
    type Err = EventStateError;

    /// Exact, case-sensitive match on the persisted name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "REVIEW" => Ok(Self::Review),
            "PUBLISHED" => Ok(Self::Published),
            other => Err(EventStateError::UnknownState(other.to_string())),
        }
    }
}

impl TryFrom<String> for EventState {
    type Error = EventStateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventState> for String {
    fn from(state: EventState) -> Self {
        state.name().to_string()
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by the event lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventStateError {
    /// The requested move is not allowed from the current state.
    #[error("invalid event transition from {from} ({attempted}): {reason}")]
    InvalidTransition {
        /// State the event was in.
        from: EventState,
        /// The direction or target that was requested.
        attempted: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A persisted state tag is not one of DRAFT, REVIEW, PUBLISHED.
    #[error("unknown event state: {0:?}")]
    UnknownState(String),

    /// The event's details cannot change in its current state.
    #[error("event cannot be edited in state {state}")]
    NotEditable {
        /// Current state.
        state: EventState,
    },

    /// Messaging about the event is closed in its current state.
    #[error("messages cannot be sent for an event in state {state}")]
    MessagingClosed {
        /// Current state.
        state: EventState,
    },
}

// ─── Transition Record ───────────────────────────────────────────────

/// Outcome of a successful lifecycle move, returned to the caller for
/// logging or auditing. The event itself does not keep a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub event_id: EventId,
    pub from_state: EventState,
    pub to_state: EventState,
    pub direction: Direction,
    pub timestamp: Timestamp,
}

// ─── Event ───────────────────────────────────────────────────────────

/// A bookable event together with its current lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// Accounts allowed to edit and submit the event.
    pub promoters: Vec<AccountId>,
    /// Current lifecycle phase. Exactly one at any time.
    pub state: EventState,
    /// When the event is over. Reviews are accepted only afterwards.
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
}

impl Event {
    /// Create a new event in the `Draft` state.
    pub fn new_draft(
        title: impl Into<String>,
        description: impl Into<String>,
        promoters: Vec<AccountId>,
        ends_at: Timestamp,
    ) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            description: description.into(),
            promoters,
            state: EventState::Draft,
            ends_at,
            created_at: Timestamp::now(),
        }
    }

    /// Apply the forward transition for the current state.
    ///
    /// Fails with `InvalidTransition` on a published event.
    pub fn move_forward(&mut self) -> Result<TransitionRecord, EventStateError> {
        self.apply(Direction::Forward)
    }

    /// Apply the backward transition for the current state.
    ///
    /// Fails with `InvalidTransition` on a draft.
    pub fn move_backwards(&mut self) -> Result<TransitionRecord, EventStateError> {
        self.apply(Direction::Backward)
    }

    /// Move to a named state, provided a single forward or backward step
    /// from the current state reaches it.
    pub fn move_to(&mut self, target: EventState) -> Result<TransitionRecord, EventStateError> {
        if self.state == target {
            return Err(EventStateError::InvalidTransition {
                from: self.state,
                attempted: target.to_string(),
                reason: format!("event is already in {target}"),
            });
        }

        let direction = Direction::ALL
            .into_iter()
            .find(|direction| self.state.step(*direction).ok() == Some(target))
            .ok_or_else(|| EventStateError::InvalidTransition {
                from: self.state,
                attempted: target.to_string(),
                reason: format!("{target} is not reachable from {}", self.state),
            })?;

        self.apply(direction)
    }

    pub fn can_edit(&self) -> bool {
        self.state.can_edit()
    }

    pub fn can_send_message(&self) -> bool {
        self.state.can_send_message()
    }

    /// Reject edits outside `Draft`.
    pub fn ensure_editable(&self) -> Result<(), EventStateError> {
        if !self.can_edit() {
            return Err(EventStateError::NotEditable { state: self.state });
        }
        Ok(())
    }

    /// Reject messages once the event is published.
    pub fn ensure_messaging_open(&self) -> Result<(), EventStateError> {
        if !self.can_send_message() {
            return Err(EventStateError::MessagingClosed { state: self.state });
        }
        Ok(())
    }

    /// Whether `account` is one of the event's promoters.
    pub fn is_promoted_by(&self, account: &AccountId) -> bool {
        self.promoters.contains(account)
    }

    /// Whether the event is over at `now`.
    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.ends_at
    }

    fn apply(&mut self, direction: Direction) -> Result<TransitionRecord, EventStateError> {
        let to = self.state.step(direction)?;
        let record = TransitionRecord {
            event_id: self.id,
            from_state: self.state,
            to_state: to,
            direction,
            timestamp: Timestamp::now(),
        };
        self.state = to;
        Ok(record)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
