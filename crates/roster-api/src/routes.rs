//! API routes

use axum::{routing::get, Router};

use crate::extractors::AppState;
use crate::handlers::{records, uploads};

/// Create the complete API router.
///
/// Stored attachments are served under the attachment manager's public path.
pub fn router(state: AppState) -> Router {
    let uploads_route = format!("{}/:key", state.store.attachments().public_path());

    Router::new()
        .nest("/api", api_router())
        .route(&uploads_route, get(uploads::serve_upload))
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new().nest("/users", users_router())
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list_users).post(records::create_user))
        .route(
            "/:id",
            get(records::get_user)
                .put(records::update_user)
                .delete(records::delete_user),
        )
}
