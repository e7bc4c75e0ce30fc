//! # Review Service
//!
//! Reviews are stored raw and decorated on every read. A fresh
//! [`ReviewPipeline`] is assembled per call over the service's persistence,
//! so decoration never outlives the request that asked for it.

use std::sync::Arc;

use pareidolia_core::{EventId, ReviewId, Timestamp};
use pareidolia_review::{ReviewContext, ReviewPipeline, ReviewSubmission, ReviewView};
use pareidolia_state::EventState;

use crate::caller::CallerIdentity;
use crate::error::AppError;
use crate::persistence::{Persistence, PersistenceRoleResolver};

/// Read and write access to reviews.
#[derive(Clone)]
pub struct ReviewService {
    persistence: Arc<dyn Persistence>,
}

impl ReviewService {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    fn pipeline(&self) -> ReviewPipeline<PersistenceRoleResolver<'_>> {
        ReviewPipeline::new(PersistenceRoleResolver::new(self.persistence.as_ref()))
    }

    /// Fetch one review, decorated for `ctx`.
    pub fn get_review(&self, id: &ReviewId, ctx: &ReviewContext) -> Result<ReviewView, AppError> {
        let raw = self.persistence.load_review(id)?;
        Ok(self.pipeline().decorate(raw, ctx))
    }

    /// Every review of an event, decorated, newest first.
    pub fn reviews_for_event(
        &self,
        event_id: &EventId,
        ctx: &ReviewContext,
    ) -> Result<Vec<ReviewView>, AppError> {
        let raws = self.persistence.list_reviews_for_event(event_id)?;
        let pipeline = self.pipeline();
        Ok(raws
            .into_iter()
            .map(|raw| pipeline.decorate(raw, ctx))
            .collect())
    }

    /// Record a review of a finished, published event.
    ///
    /// One review per author and event, enforced atomically by the store.
    /// The record is stored undecorated and the decorated view is returned.
    pub fn submit_review(
        &self,
        caller: &CallerIdentity,
        submission: ReviewSubmission,
    ) -> Result<ReviewView, AppError> {
        if !caller.can_write_reviews() {
            return Err(AppError::Forbidden(format!(
                "role {} cannot write reviews",
                caller.role
            )));
        }

        let record = submission.into_record(caller.account_id)?;

        let event = self.persistence.load_event(&record.event_id)?;
        if event.state != EventState::Published {
            return Err(AppError::NotFound(format!("event {} not found", event.id)));
        }
        if !event.has_ended(Timestamp::now()) {
            return Err(AppError::Conflict(format!(
                "event {} has not finished yet",
                event.id
            )));
        }

        self.persistence.save_review(&record).map_err(|err| {
            tracing::info!(event_id = %record.event_id, error = %err, "review rejected");
            err
        })?;
        tracing::info!(
            review_id = %record.id,
            event_id = %record.event_id,
            author = %record.author_id,
            score = record.score,
            "review stored",
        );

        let raw = self.persistence.load_review(&record.id)?;
        Ok(self
            .pipeline()
            .decorate(raw, &ReviewContext::for_viewer(Some(caller.role))))
    }
}
