//! Command and query handlers, one module per operation.
//!
//! Each handler validates its input first, then touches the store. Every
//! outcome, success or failure, comes back as an [`AppResult`](crate::error::AppResult).

pub mod auth;
pub mod tasks;
