//! Axum route handlers for the learning flow.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::flow::{Action, Session};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub session: Session,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, session) = state.flow.create_session().await;
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            session,
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.flow.snapshot(session_id).await?;
    Ok(Json(SessionResponse {
        session_id,
        session,
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_discard_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.flow.discard(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/actions
///
/// Applies one action. Actions that call the gateway return once the reply
/// has been folded in; a concurrent request sees `pending: true`.
pub async fn handle_action(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(action): Json<Action>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.flow.dispatch(session_id, action).await?;
    Ok(Json(SessionResponse {
        session_id,
        session,
    }))
}
