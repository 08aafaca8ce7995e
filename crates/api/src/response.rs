//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One independently computed dashboard widget: `{ "data": T }` on success,
/// `{ "error": "..." }` when its query failed.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WidgetResult<T: Serialize> {
    Data { data: T },
    Error { error: String },
}

impl<T: Serialize> WidgetResult<T> {
    /// Wrap a query result, logging the failure instead of propagating it.
    pub fn from_result<E: std::fmt::Display>(widget: &'static str, result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Data { data },
            Err(e) => {
                tracing::error!(widget, error = %e, "Dashboard widget query failed");
                Self::Error {
                    error: format!("Failed to load {widget}"),
                }
            }
        }
    }
}
