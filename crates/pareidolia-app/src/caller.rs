//! # Caller Identity
//!
//! Who is making the request, as established by the host's token handling.

use serde::{Deserialize, Serialize};

use pareidolia_core::{AccountId, AccountRole};
use pareidolia_state::Event;

/// Identity of the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub account_id: AccountId,
    pub role: AccountRole,
}

impl CallerIdentity {
    pub fn new(account_id: AccountId, role: AccountRole) -> Self {
        Self { account_id, role }
    }

    /// Reviewers and admins may move events through their lifecycle.
    pub fn can_moderate(&self) -> bool {
        self.role.is_moderator()
    }

    /// Admins act on any event. Promoters act only on events they promote.
    pub fn can_manage(&self, event: &Event) -> bool {
        match self.role {
            AccountRole::Admin => true,
            AccountRole::Promoter => event.is_promoted_by(&self.account_id),
            AccountRole::Consumer | AccountRole::Reviewer => false,
        }
    }

    /// Consumers review events they attended. Admins may too.
    pub fn can_write_reviews(&self) -> bool {
        matches!(self.role, AccountRole::Consumer | AccountRole::Admin)
    }
}
