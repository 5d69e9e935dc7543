//! HTTP client for the remote session-record service.
//!
//! The service stores records server-side and answers with pre-computed
//! stats in the same camelCase shape as [`crate::FocusStats`].

mod client;

pub use client::{ApiClient, User, UserId};
