//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for list widgets. Clamped with
/// [`assetforge_core::dashboard::clamp_limit`].
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?name=` lookup by logical asset name.
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: String,
}
