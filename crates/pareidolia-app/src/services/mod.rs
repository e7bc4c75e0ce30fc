//! Application services. Each takes the caller's identity where access
//! depends on it and returns [`crate::AppError`] on failure.

pub mod events;
pub mod reviews;
