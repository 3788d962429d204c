use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/roster", get(handlers::get_roster))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/members", post(handlers::add_member))
        .route("/api/members/:id", delete(handlers::remove_member))
        .route("/api/members/:id/edit", post(handlers::begin_edit))
        .route("/api/members/:id/name", put(handlers::rename_member))
        .route("/api/members/:id/points/add", post(handlers::add_point))
        .route("/api/members/:id/points/remove", post(handlers::remove_point))
        .route("/api/edit/name", put(handlers::set_editing_name))
        .route("/api/edit/cancel", post(handlers::cancel_edit))
        .route("/api/points/reset", post(handlers::reset_points))
        .route("/api/config/limit", put(handlers::set_limit))
        .route("/api/config/punishment", put(handlers::set_punishment))
        .with_state(state)
}
