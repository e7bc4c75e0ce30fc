//! # Review Submission Validation
//!
//! Field rules applied before a new review is stored. Whether the event is
//! over and whether the author already reviewed it depend on persistence and
//! are checked by the application layer.

use serde::{Deserialize, Serialize};

use pareidolia_core::{AccountId, EventId, ReviewId, Timestamp, ValidationError};

use crate::record::ReviewRecord;

const TITLE_MAX_CHARS: usize = 150;
const DESCRIPTION_MAX_CHARS: usize = 2000;
const SCORE_MIN: i64 = 1;
const SCORE_MAX: i64 = 5;

/// A review as submitted by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub score: i64,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

/// Check title, description and score.
pub fn validate_submission(submission: &ReviewSubmission) -> Result<(), ValidationError> {
    ValidationError::check_text("title", &submission.title, TITLE_MAX_CHARS)?;
    ValidationError::check_text("description", &submission.description, DESCRIPTION_MAX_CHARS)?;
    if !(SCORE_MIN..=SCORE_MAX).contains(&submission.score) {
        return Err(ValidationError::OutOfRange {
            field: "score",
            min: SCORE_MIN,
            max: SCORE_MAX,
            actual: submission.score,
        });
    }
    Ok(())
}

impl ReviewSubmission {
    /// Validate and turn into a record authored by `author`.
    pub fn into_record(self, author: AccountId) -> Result<ReviewRecord, ValidationError> {
        validate_submission(&self)?;
        let score = u8::try_from(self.score).map_err(|_| ValidationError::OutOfRange {
            field: "score",
            min: SCORE_MIN,
            max: SCORE_MAX,
            actual: self.score,
        })?;
        Ok(ReviewRecord {
            id: ReviewId::new(),
            title: self.title,
            description: self.description,
            score,
            author_id: author,
            event_id: self.event_id,
            tag: self.tag,
            anonymous: self.anonymous,
            created_at: Timestamp::now(),
        })
    }
}
