use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /{category}    -> get
/// PUT    /{category}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{category}", get(settings::get).put(settings::update))
}
