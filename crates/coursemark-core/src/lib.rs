//! Core types and trait definitions for Coursemark.
//!
//! Progress tracking, certificate eligibility and the collaborator contracts
//! live here. This crate has no database or rendering dependencies; the
//! certificate layout engine and the SQLite store build on top of it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod course;
pub mod dashboard;
pub mod deletion;
pub mod draft;
pub mod eligibility;
pub mod error;
pub mod progress;
pub mod service;
pub mod session;
pub mod store;

pub use error::{Error, Result};
