//! Shared test utilities for lead-relay integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod builders;
pub mod fake_telegram_api;

pub use assertions::*;
pub use builders::*;
pub use fake_telegram_api::*;
pub use fixtures::*;
