use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /                  list_active
/// POST   /                  create
/// GET    /{id}              get_by_id
/// POST   /{id}/deactivate   deactivate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list_active).post(templates::create))
        .route("/{id}", get(templates::get_by_id))
        .route("/{id}/deactivate", post(templates::deactivate))
}
