//! # Decoration Pipeline
//!
//! Assembles the decorators in their fixed order and runs them once over a
//! raw review. Order matters:
//!
//! 1. **base**: copy the raw review into a view, folding the caller's
//!    anonymity request into the record's own flag.
//! 2. **highlight**: resolve the author's role on the real identity.
//! 3. **anonymous**: strip the identity, including any badge just added.
//! 4. **tagged**: annotate the description.
//!
//! The pipeline owns nothing mutable. Concurrent calls over different
//! reviews share only the resolver, which is `Sync`.

use serde::{Deserialize, Serialize};

use pareidolia_core::AccountRole;

use crate::decorator::{AnonymousDecorator, HighlightDecorator, ReviewDecorator, TaggedDecorator};
use crate::record::{RawReview, ReviewView};
use crate::resolver::RoleResolver;

/// Per-request decoration context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewContext {
    /// Treat the review as anonymous even if the record is not flagged.
    pub anonymous_requested: bool,
    /// Role of the caller viewing the review, if authenticated.
    pub viewer_role: Option<AccountRole>,
}

impl ReviewContext {
    pub fn for_viewer(viewer_role: Option<AccountRole>) -> Self {
        Self {
            anonymous_requested: false,
            viewer_role,
        }
    }
}

/// The fixed decoration chain over a role resolver.
#[derive(Debug, Clone)]
pub struct ReviewPipeline<R> {
    resolver: R,
}

impl<R: RoleResolver> ReviewPipeline<R> {
    /// Stage names in execution order, after the base copy.
    pub const STAGES: [&'static str; 3] = ["highlight", "anonymous", "tagged"];

    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Produce the finalized view of `raw`.
    pub fn decorate(&self, raw: RawReview, ctx: &ReviewContext) -> ReviewView {
        let span = tracing::debug_span!(
            "decorate_review",
            review_id = %raw.record.id,
            viewer_role = ?ctx.viewer_role,
        );
        let _entered = span.enter();

        let mut view = ReviewView::from(raw);
        view.anonymous |= ctx.anonymous_requested;

        let highlight = HighlightDecorator::new(&self.resolver);
        let stages: [&dyn ReviewDecorator; 3] = [&highlight, &AnonymousDecorator, &TaggedDecorator];
        for stage in stages {
            view = stage.decorate(view);
            tracing::trace!(stage = stage.name(), "review stage applied");
        }
        view
    }
}
