use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/clients", get(handlers::clients::list_clients_handler))
        .route(
            "/clients/new",
            post(handlers::clients::create_client_handler),
        )
        .route("/client", get(handlers::clients::get_client_handler))
        .route("/assignLead", post(handlers::leads::assign_lead_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
