//! Axum route handlers for the admin reading-material editor.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::content::admin::RequireAdmin;
use crate::errors::AppError;
use crate::models::material::ReadingMaterial;
use crate::models::stage::is_known_stage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct StageFilter {
    /// `all` or a stage id.
    pub stage: Option<String>,
}

/// POST /api/v1/admin/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<StatusCode, AppError> {
    if request.password == state.config.admin_password {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Unauthorized)
    }
}

/// GET /api/v1/admin/materials?stage=step3
pub async fn handle_list_materials(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<StageFilter>,
) -> Result<Json<Vec<ReadingMaterial>>, AppError> {
    let materials = state.store.list().await;
    let materials = match filter.stage.as_deref() {
        None | Some("all") => materials,
        Some(stage) if is_known_stage(stage) => materials
            .into_iter()
            .filter(|m| m.stage_id == stage)
            .collect(),
        Some(stage) => {
            return Err(AppError::Validation(format!("unknown stage '{stage}'")));
        }
    };
    Ok(Json(materials))
}

/// GET /api/v1/admin/materials/:id
pub async fn handle_get_material(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReadingMaterial>, AppError> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Material {id} not found")))
}

/// POST /api/v1/admin/materials
///
/// A blank id is replaced by a millisecond timestamp.
pub async fn handle_create_material(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(mut material): Json<ReadingMaterial>,
) -> Result<(StatusCode, Json<ReadingMaterial>), AppError> {
    if material.id.trim().is_empty() {
        material.id = Utc::now().timestamp_millis().to_string();
    }
    state.store.create(material.clone()).await?;
    info!("Admin created material {}", material.id);
    Ok((StatusCode::CREATED, Json(material)))
}

/// PUT /api/v1/admin/materials/:id
pub async fn handle_update_material(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(material): Json<ReadingMaterial>,
) -> Result<Json<ReadingMaterial>, AppError> {
    if material.id != id {
        return Err(AppError::Validation(format!(
            "body id '{}' does not match path id '{id}'",
            material.id
        )));
    }
    state.store.update(material.clone()).await?;
    info!("Admin updated material {id}");
    Ok(Json(material))
}

/// DELETE /api/v1/admin/materials/:id
///
/// Deleting an id that does not exist succeeds.
pub async fn handle_delete_material(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    let removed = state.store.delete(&id).await;
    info!("Admin deleted material {id} (existed: {removed})");
    StatusCode::NO_CONTENT
}
