use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/generation`.
///
/// ```text
/// POST   /          generate
/// POST   /preview   preview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(generation::generate))
        .route("/preview", post(generation::preview))
}
