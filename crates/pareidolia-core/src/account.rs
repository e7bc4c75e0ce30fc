//! # Accounts and Roles
//!
//! Every account carries exactly one role. The role decides which lifecycle
//! operations a caller may perform and whether a review author earns the
//! promoter badge.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::AccountId;

/// The role attached to an account.
///
/// Wire form is the upper-case name, matching the persisted reference type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    /// Browses, books, and reviews published events.
    Consumer,
    /// Creates events and submits them for review.
    Promoter,
    /// Approves, rejects, and moves events through their lifecycle.
    Reviewer,
    /// Full access.
    Admin,
}

impl AccountRole {
    /// Every role, in declaration order.
    pub const ALL: [AccountRole; 4] = [
        AccountRole::Consumer,
        AccountRole::Promoter,
        AccountRole::Reviewer,
        AccountRole::Admin,
    ];

    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumer => "CONSUMER",
            Self::Promoter => "PROMOTER",
            Self::Reviewer => "REVIEWER",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether this role may move events between lifecycle states.
    pub fn is_moderator(&self) -> bool {
        matches!(self, Self::Reviewer | Self::Admin)
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = ValidationError;

    /// Case-insensitive: `"promoter"` and `"PROMOTER"` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownRole(s.to_string()))
    }
}

/// An account as seen by the core: identity, display name parts, and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub surname: String,
    pub role: AccountRole,
}

impl Account {
    pub fn new(name: impl Into<String>, surname: impl Into<String>, role: AccountRole) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            surname: surname.into(),
            role,
        }
    }

    /// `"<name> <surname>"`, the name shown next to reviews.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}
