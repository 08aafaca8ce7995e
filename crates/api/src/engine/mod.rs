//! Transactional orchestration for generation, version transitions and
//! maintenance derivation.
//!
//! The rules live in `assetforge_core`; functions here load and lock rows,
//! apply those rules, write the result and commit. Each public function is
//! one transaction, so a dropped request before commit leaves nothing
//! behind.

pub mod generation;
pub mod maintenance;
pub mod versioning;

use assetforge_core::types::Date;

/// The date maintenance statuses are evaluated against.
pub fn today() -> Date {
    chrono::Utc::now().date_naive()
}
