//! # pareidolia-core: Foundational Types
//!
//! Leaf crate of the Pareidolia workspace. Defines the primitives every other
//! crate shares: identifier newtypes, the account role taxonomy, UTC-only
//! timestamps, and the field validation error type.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pareidolia-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.
//! - Identifiers are newtypes. An `EventId` cannot be passed where an
//!   `AccountId` is expected.

pub mod account;
pub mod error;
pub mod identity;
pub mod temporal;

pub use account::{Account, AccountRole};
pub use error::ValidationError;
pub use identity::{AccountId, EventId, ReviewId};
pub use temporal::Timestamp;
