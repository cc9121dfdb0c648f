//! HTTP face of the Recruiting Backend, so `HttpBackend` has something real to talk to.

pub mod handlers;
pub mod health;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/jobs", get(handlers::handle_list_jobs))
        .route(
            "/api/jobs/recommendations",
            post(handlers::handle_recommendations),
        )
        .route("/api/jobs/:job_id", get(handlers::handle_get_job))
        .route("/api/applications", get(handlers::handle_list_applications))
        .route(
            "/api/applications/analyze-cv",
            post(handlers::handle_analyze_cv),
        )
        .route(
            "/api/applications/:application_id/questions",
            get(handlers::handle_get_questions),
        )
        .route(
            "/api/applications/:application_id/answers",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/applications/:application_id/candidate-questions",
            post(handlers::handle_candidate_question),
        )
        .route(
            "/api/applications/:application_id/complete",
            post(handlers::handle_complete),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
