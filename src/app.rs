use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/hours/:hour", post(handlers::save_hour_form))
        .route("/api/schedule", get(handlers::get_schedule))
        .route("/api/hours/:hour", post(handlers::save_hour))
        .route("/api/clear", post(handlers::clear_day))
        .route("/api/now", get(handlers::get_now))
        .route("/api/theme/toggle", post(handlers::theme_toggle))
        .with_state(state)
}
