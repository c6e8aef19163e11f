pub mod health;
pub mod reference;

use axum::{
    routing::{get, post},
    Router,
};

use crate::content::handlers as content;
use crate::flow::handlers as flow;
use crate::report::handlers as report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/stages", get(reference::handle_list_stages))
        .route("/api/v1/subjects", get(reference::handle_list_subjects))
        // Learning flow
        .route("/api/v1/sessions", post(flow::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(flow::handle_get_session).delete(flow::handle_discard_session),
        )
        .route("/api/v1/sessions/:id/actions", post(flow::handle_action))
        .route("/api/v1/sessions/:id/report", get(report::handle_get_report))
        .route(
            "/api/v1/sessions/:id/report/export",
            get(report::handle_export_report),
        )
        // Admin
        .route("/api/v1/admin/login", post(content::handle_login))
        .route(
            "/api/v1/admin/materials",
            get(content::handle_list_materials).post(content::handle_create_material),
        )
        .route(
            "/api/v1/admin/materials/:id",
            get(content::handle_get_material)
                .put(content::handle_update_material)
                .delete(content::handle_delete_material),
        )
        .with_state(state)
}
