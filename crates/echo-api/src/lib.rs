//! echo-api
//!
//! HTTP surface of Dr. Echo: report submission and rendering, chat
//! extraction and prefill, ID minting, patients and user profiles.

pub mod config;
pub mod error;
pub mod form;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Templates
        .route("/templates", get(routes::templates::list_templates))
        .route("/templates/{id}", get(routes::templates::get_template_detail))
        .route("/templates/{id}/view", post(routes::templates::view_form))
        .route("/templates/{id}/validate", post(routes::templates::validate_form))
        // Reports
        .route("/reports", post(routes::reports::submit_report))
        .route("/reports/{id}", get(routes::reports::get_report))
        .route("/reports/{id}/generate", post(routes::reports::generate_report))
        .route("/reports/{id}/text", put(routes::reports::save_report_text))
        .route("/reports/{id}/page", get(routes::reports::report_page))
        .route("/reports/{id}/docx", get(routes::reports::report_docx))
        // Chat
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/chat/{session}/prefill", get(routes::chat::prefill_form))
        .route(
            "/api/generate-standard-report",
            post(routes::legacy::generate_standard_report),
        )
        .route("/ids/{kind}", post(routes::ids::mint_id))
        .route("/patients/{id}", get(routes::patients::get_patient))
        .route("/users", post(routes::users::register))
        .route(
            "/users/{uid}",
            get(routes::users::get_user).put(routes::users::update_user),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
