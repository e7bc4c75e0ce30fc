//! # Role Resolution Capability
//!
//! The Highlight step needs exactly one fact from the outside world: the role
//! of the review's author. [`RoleResolver`] is that capability and nothing
//! more, so any account store (or a closure, or a map in a test) can serve it.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use pareidolia_core::{AccountId, AccountRole};

/// Why an author's role could not be resolved.
///
/// Always non-fatal inside the decoration pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// No account exists with this identifier.
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// The review carries no author reference.
    #[error("review has no author reference")]
    MissingAuthor,

    /// The backing store could not answer.
    #[error("role lookup unavailable: {0}")]
    Unavailable(String),
}

/// Resolve an account identifier to its role.
pub trait RoleResolver: Send + Sync {
    fn resolve_role(&self, account: &AccountId) -> Result<AccountRole, LookupFailure>;
}

impl<T: RoleResolver + ?Sized> RoleResolver for &T {
    fn resolve_role(&self, account: &AccountId) -> Result<AccountRole, LookupFailure> {
        (**self).resolve_role(account)
    }
}

impl<T: RoleResolver + ?Sized> RoleResolver for Arc<T> {
    fn resolve_role(&self, account: &AccountId) -> Result<AccountRole, LookupFailure> {
        (**self).resolve_role(account)
    }
}

impl RoleResolver for HashMap<AccountId, AccountRole> {
    fn resolve_role(&self, account: &AccountId) -> Result<AccountRole, LookupFailure> {
        self.get(account)
            .copied()
            .ok_or(LookupFailure::AccountNotFound(*account))
    }
}

/// Adapter turning a closure into a [`RoleResolver`].
pub struct FnRoleResolver<F>(pub F);

impl<F> RoleResolver for FnRoleResolver<F>
where
    F: Fn(&AccountId) -> Result<AccountRole, LookupFailure> + Send + Sync,
{
    fn resolve_role(&self, account: &AccountId) -> Result<AccountRole, LookupFailure> {
        (self.0)(account)
    }
}

impl<F> std::fmt::Debug for FnRoleResolver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnRoleResolver(..)")
    }
}
