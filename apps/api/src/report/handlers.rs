use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::report::export::{export_file_name, render_svg, ExportError};
use crate::report::{assemble, is_ready, ReportSnapshot};
use crate::state::AppState;

async fn load_report(state: &AppState, session_id: Uuid) -> Result<ReportSnapshot, AppError> {
    let session = state.flow.snapshot(session_id).await?;
    if !is_ready(&session) {
        return Err(ExportError::NotReady.into());
    }
    Ok(assemble(&session, Utc::now().date_naive()))
}

/// GET /api/v1/sessions/:id/report
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ReportSnapshot>, AppError> {
    Ok(Json(load_report(&state, session_id).await?))
}

/// GET /api/v1/sessions/:id/report/export
///
/// Renders the report as an SVG download. Session state is never touched.
pub async fn handle_export_report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = load_report(&state, session_id).await?;
    let svg = render_svg(&report)?;
    let file_name = export_file_name(&report.job);
    info!(%session_id, file_name = %file_name, "Exported report");

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        svg,
    ))
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let encoded = urlencoding::encode(file_name);
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
