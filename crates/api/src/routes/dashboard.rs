use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET  /metrics              metrics
/// GET  /summary              summary
/// GET  /needs-maintenance    needs_maintenance
/// GET  /top-value            top_value
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(dashboard::metrics))
        .route("/summary", get(dashboard::summary))
        .route("/needs-maintenance", get(dashboard::needs_maintenance))
        .route("/top-value", get(dashboard::top_value))
}
