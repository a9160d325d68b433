use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// DELETE /?id={id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(notification::list)
            .post(notification::create)
            .delete(notification::delete),
    )
}
