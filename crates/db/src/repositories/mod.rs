//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or `&mut PgConnection` inside a transaction) as the
//! first argument.

pub mod asset_repo;
pub mod asset_template_repo;
pub mod dashboard_repo;

pub use asset_repo::{AssetRepo, BatchInsertOutcome};
pub use asset_template_repo::AssetTemplateRepo;
pub use dashboard_repo::{AssetGrouping, DashboardRepo};
