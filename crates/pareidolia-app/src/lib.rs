//! # pareidolia-app: Application Services
//!
//! Wires the lifecycle state machine and the review pipeline to the outside
//! world through one narrow port, [`Persistence`]. Transport (HTTP, JWT
//! parsing), storage technology, and mail delivery stay outside this crate;
//! a host supplies a `Persistence` implementation and a [`CallerIdentity`]
//! per request.
//!
//! ## Request Flows
//!
//! ```text
//! review fetch:     load_review ──▶ ReviewPipeline ──▶ ReviewView
//! event transition: update_event { Event::move_* } ──▶ Event
//! ```
//!
//! ## Crate Policy
//!
//! - Every domain error is converted into [`AppError`] at the service boundary.
//! - Services are synchronous and hold no locks across calls. Concurrent
//!   writes to the same event are serialized by the persistence backend.

pub mod caller;
pub mod config;
pub mod error;
pub mod persistence;
pub mod services;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

pub use caller::CallerIdentity;
pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use persistence::{Persistence, PersistenceError, PersistenceRoleResolver};
pub use services::events::{EventService, EventUpdate};
pub use services::reviews::ReviewService;
pub use store::{EventRow, InMemoryPersistence, Store};

/// The application's services over a shared persistence backend.
#[derive(Clone)]
pub struct App {
    pub events: EventService,
    pub reviews: ReviewService,
}

impl App {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self {
            events: EventService::new(Arc::clone(&persistence)),
            reviews: ReviewService::new(persistence),
        }
    }

    /// Install the global tracing subscriber and build the services.
    ///
    /// Call once per process.
    pub fn bootstrap(
        config: &AppConfig,
        persistence: Arc<dyn Persistence>,
    ) -> Result<Self, telemetry::TelemetryError> {
        telemetry::init_tracing(config)?;
        tracing::info!(log_format = ?config.log_format, "pareidolia services ready");
        Ok(Self::new(persistence))
    }
}
