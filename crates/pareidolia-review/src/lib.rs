//! # pareidolia-review: Review Records and Decoration
//!
//! A review is stored raw and decorated on the way out. Decoration is a fixed
//! chain of single-purpose steps applied to a [`ReviewView`]:
//!
//! ```text
//! RawReview ──▶ base ──▶ Highlight ──▶ Anonymous ──▶ Tagged ──▶ ReviewView
//! ```
//!
//! - **Highlight** resolves the author's role on the true identity and badges
//!   promoters. Lookup failures are logged and ignored.
//! - **Anonymous** runs after Highlight, so an anonymous review loses the
//!   badge along with the name.
//! - **Tagged** appends the tag annotation to the description.
//!
//! The only collaborator is [`RoleResolver`], a single-method capability, so
//! the pipeline is testable without a database.

pub mod decorator;
pub mod pipeline;
pub mod record;
pub mod resolver;
pub mod validation;

pub use decorator::{
    AnonymousDecorator, HighlightDecorator, ReviewDecorator, TaggedDecorator,
    ANONYMOUS_AUTHOR_NAME, PROMOTER_BADGE,
};
pub use pipeline::{ReviewContext, ReviewPipeline};
pub use record::{RawReview, ReviewRecord, ReviewView};
pub use resolver::{FnRoleResolver, LookupFailure, RoleResolver};
pub use validation::{validate_submission, ReviewSubmission};
