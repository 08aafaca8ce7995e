//! Domain logic for template-driven asset generation.
//!
//! Everything in this crate is pure: no database access, no clocks. Callers
//! pass "today" explicitly so derivations are reproducible in tests.

pub mod asset;
pub mod dashboard;
pub mod error;
pub mod generation;
pub mod maintenance;
pub mod naming;
pub mod template;
pub mod types;
pub mod versioning;
