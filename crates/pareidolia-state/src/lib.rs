//! # pareidolia-state: Event Lifecycle State Machine
//!
//! An event moves through three phases:
//!
//! ```text
//!            forward            forward
//!   DRAFT ───────────▶ REVIEW ───────────▶ PUBLISHED
//!     ▲                  │                    │
//!     └──── backward ────┘                    │
//!     ▲                                       │
//!     └──────────────── backward ─────────────┘
//! ```
//!
//! ## Design
//!
//! [`EventState::step()`] is the only place transition rules live. Every
//! operation on [`Event`], including the "move to a named state" entry point,
//! is expressed through it, so there is no second rule set that can drift.
//!
//! The persisted form of the state is its upper-case name. Parsing is total:
//! any other tag fails with [`EventStateError::UnknownState`].

pub mod event;

pub use event::{Direction, Event, EventState, EventStateError, TransitionRecord};
