//! Financial Insights API
//!
//! A small HTTP API that forwards investment questions to LLM providers and
//! exposes arithmetic utility endpoints. The crate's own logic is the shared
//! request pipeline:
//!
//! INPUT → NEGOTIATE REPRESENTATION → VALIDATE → COMPUTE → SHAPE RESPONSE
//!
//! - Validation and arithmetic are pure functions with no shared state, so
//!   requests run concurrently without locking.
//! - The only suspension points are the delegated advisor (LLM) calls,
//!   bounded by client timeouts with no retries.

pub mod advisor;
pub mod calculator;
pub mod config;
pub mod docs;
pub mod error;
pub mod negotiate;
pub mod routes;
pub mod validator;

pub use error::{ApiError, Result};
