//! # Review Records and Views
//!
//! - [`ReviewRecord`] is what persistence stores. It is never decorated.
//! - [`RawReview`] is a record joined with its author's display data, the
//!   input to the decoration pipeline.
//! - [`ReviewView`] is what crosses the serialization boundary. One is built
//!   per fetch, decorated once, and discarded after serialization.

use serde::{Deserialize, Serialize};

use pareidolia_core::{Account, AccountId, AccountRole, EventId, ReviewId, Timestamp};

/// A review as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: ReviewId,
    pub title: String,
    pub description: String,
    /// 1 to 5 inclusive.
    pub score: u8,
    pub author_id: AccountId,
    pub event_id: EventId,
    /// Free-text label chosen by the author. `None` and `""` both mean untagged.
    pub tag: Option<String>,
    /// The author asked not to be named.
    pub anonymous: bool,
    pub created_at: Timestamp,
}

/// A [`ReviewRecord`] joined with its author's display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    pub record: ReviewRecord,
    pub author_name: String,
    pub author_role: Option<AccountRole>,
}

impl RawReview {
    /// Join a record with the account that wrote it.
    pub fn new(record: ReviewRecord, author: &Account) -> Self {
        Self {
            record,
            author_name: author.display_name(),
            author_role: Some(author.role),
        }
    }
}

/// The finalized, caller-facing shape of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: ReviewId,
    pub title: String,
    pub description: String,
    pub score: u8,
    /// Absent once the review has been anonymised.
    pub author_id: Option<AccountId>,
    pub event_id: EventId,
    pub author_name: String,
    pub author_role: Option<AccountRole>,
    pub anonymous: bool,
    pub tag: Option<String>,
    pub created_at: Timestamp,
}

impl From<RawReview> for ReviewView {
    /// The base component: an undecorated copy of the raw review.
    fn from(raw: RawReview) -> Self {
        let RawReview {
            record,
            author_name,
            author_role,
        } = raw;
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            score: record.score,
            author_id: Some(record.author_id),
            event_id: record.event_id,
            author_name,
            author_role,
            anonymous: record.anonymous,
            tag: record.tag,
            created_at: record.created_at,
        }
    }
}
