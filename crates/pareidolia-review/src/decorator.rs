//! # Review Decorators
//!
//! Each decorator takes a [`ReviewView`] by value, rewrites display fields of
//! that same review, and hands it back. None of them create a new identity,
//! touch anything outside the view, or call back into the chain.

use pareidolia_core::AccountRole;

use crate::record::ReviewView;
use crate::resolver::{LookupFailure, RoleResolver};

/// Name shown in place of the author on anonymous reviews.
pub const ANONYMOUS_AUTHOR_NAME: &str = "Anonymous";

/// Prefix added to the author name of reviews written by promoters.
pub const PROMOTER_BADGE: &str = "⭐ [Promoter] ";

/// A single step of the decoration pipeline.
pub trait ReviewDecorator {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    fn decorate(&self, view: ReviewView) -> ReviewView;
}

// ─── Highlight ───────────────────────────────────────────────────────

/// Badges reviews written by promoters.
///
/// Fail-open: if the author's role cannot be resolved, the failure is logged
/// and the view passes through with its name untouched.
pub struct HighlightDecorator<'r> {
    resolver: &'r dyn RoleResolver,
}

impl<'r> HighlightDecorator<'r> {
    pub fn new(resolver: &'r dyn RoleResolver) -> Self {
        Self { resolver }
    }
}

impl ReviewDecorator for HighlightDecorator<'_> {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn decorate(&self, mut view: ReviewView) -> ReviewView {
        let lookup = match view.author_id {
            Some(author) => self.resolver.resolve_role(&author),
            None => Err(LookupFailure::MissingAuthor),
        };

        match lookup {
            Ok(role) => {
                view.author_role = Some(role);
                if role == AccountRole::Promoter {
                    view.author_name = format!("{PROMOTER_BADGE}{}", view.author_name);
                }
            }
            Err(error) => {
                tracing::warn!(
                    review_id = %view.id,
                    error = %error,
                    "author role lookup failed, review left unhighlighted"
                );
            }
        }
        view
    }
}

// ─── Anonymous ───────────────────────────────────────────────────────

/// Strips the author's identity from anonymous reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousDecorator;

impl ReviewDecorator for AnonymousDecorator {
    fn name(&self) -> &'static str {
        "anonymous"
    }

    fn decorate(&self, mut view: ReviewView) -> ReviewView {
        if view.anonymous {
            view.author_id = None;
            view.author_role = None;
            view.author_name = ANONYMOUS_AUTHOR_NAME.to_string();
        }
        view
    }
}

// ─── Tagged ──────────────────────────────────────────────────────────

/// Appends ` [Tag: <tag>]` to the description of tagged reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedDecorator;

impl ReviewDecorator for TaggedDecorator {
    fn name(&self) -> &'static str {
        "tagged"
    }

    fn decorate(&self, mut view: ReviewView) -> ReviewView {
        if let Some(tag) = view.tag.as_deref().filter(|tag| !tag.is_empty()) {
            view.description = format!("{} [Tag: {tag}]", view.description);
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pareidolia_core::{AccountId, EventId, ReviewId, Timestamp};

    use super::*;
    use crate::resolver::FnRoleResolver;

    fn view(author: AccountId) -> ReviewView {
        ReviewView {
            id: ReviewId::new(),
            title: "Loved it".to_string(),
            description: "Best concert this year.".to_string(),
            score: 5,
            author_id: Some(author),
            event_id: EventId::new(),
            author_name: "John Doe".to_string(),
            author_role: None,
            anonymous: false,
            tag: None,
            created_at: Timestamp::now(),
        }
    }

    // ── Highlight ────────────────────────────────────────────────────

    #[test]
    fn highlight_badges_promoters() {
        let author = AccountId::new();
        let roles = HashMap::from([(author, AccountRole::Promoter)]);
        let out = HighlightDecorator::new(&roles).decorate(view(author));
        assert_eq!(out.author_name, "⭐ [Promoter] John Doe");
        assert_eq!(out.author_role, Some(AccountRole::Promoter));
    }

    #[test]
    fn highlight_leaves_consumers_alone() {
        let author = AccountId::new();
        let roles = HashMap::from([(author, AccountRole::Consumer)]);
        let out = HighlightDecorator::new(&roles).decorate(view(author));
        assert_eq!(out.author_name, "John Doe");
        assert_eq!(out.author_role, Some(AccountRole::Consumer));
    }

    #[test]
    fn highlight_fails_open_on_missing_account() {
        let roles: HashMap<AccountId, AccountRole> = HashMap::new();
        let input = view(AccountId::new());
        let out = HighlightDecorator::new(&roles).decorate(input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn highlight_fails_open_on_backend_error() {
        let resolver = FnRoleResolver(|_: &AccountId| -> Result<AccountRole, LookupFailure> {
            Err(LookupFailure::Unavailable("timeout".to_string()))
        });
        let input = view(AccountId::new());
        let out = HighlightDecorator::new(&resolver).decorate(input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn highlight_skips_views_without_author() {
        let resolver = FnRoleResolver(|_: &AccountId| -> Result<AccountRole, LookupFailure> {
            panic!("resolver must not be called without an author")
        });
        let mut input = view(AccountId::new());
        input.author_id = None;
        let out = HighlightDecorator::new(&resolver).decorate(input.clone());
        assert_eq!(out, input);
    }

    // ── Anonymous ────────────────────────────────────────────────────

    #[test]
    fn anonymous_strips_identity() {
        let mut input = view(AccountId::new());
        input.anonymous = true;
        input.author_role = Some(AccountRole::Consumer);
        let out = AnonymousDecorator.decorate(input);
        assert_eq!(out.author_id, None);
        assert_eq!(out.author_role, None);
        assert_eq!(out.author_name, ANONYMOUS_AUTHOR_NAME);
    }

    #[test]
    fn anonymous_passes_named_reviews_through() {
        let input = view(AccountId::new());
        assert_eq!(AnonymousDecorator.decorate(input.clone()), input);
    }

    // ── Tagged ───────────────────────────────────────────────────────

    #[test]
    fn tagged_appends_annotation() {
        let mut input = view(AccountId::new());
        input.tag = Some("VIP".to_string());
        let out = TaggedDecorator.decorate(input);
        assert_eq!(out.description, "Best concert this year. [Tag: VIP]");
    }

    #[test]
    fn tagged_ignores_empty_and_absent_tags() {
        let mut empty = view(AccountId::new());
        empty.tag = Some(String::new());
        assert_eq!(TaggedDecorator.decorate(empty.clone()).description, empty.description);

        let absent = view(AccountId::new());
        assert_eq!(TaggedDecorator.decorate(absent.clone()).description, absent.description);
    }

    #[test]
    fn decorators_keep_identity() {
        let author = AccountId::new();
        let roles = HashMap::from([(author, AccountRole::Promoter)]);
        let mut input = view(author);
        input.anonymous = true;
        input.tag = Some("x".to_string());
        let highlight = HighlightDecorator::new(&roles);

        let stages: [&dyn ReviewDecorator; 3] = [&highlight, &AnonymousDecorator, &TaggedDecorator];
        for stage in stages {
            let out = stage.decorate(input.clone());
            assert_eq!(out.id, input.id, "{} changed the review id", stage.name());
            assert_eq!(out.event_id, input.event_id);
            assert_eq!(out.score, input.score);
        }
    }
}
