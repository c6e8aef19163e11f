//! Static reference data the client renders its pickers from.

use axum::Json;

use crate::models::stage::{ValueChainStage, VALUE_CHAIN};
use crate::models::subject::{UniversitySubject, UNIVERSITY_SUBJECTS};

/// GET /api/v1/stages
pub async fn handle_list_stages() -> Json<&'static [ValueChainStage]> {
    let stages: &'static [ValueChainStage] = &VALUE_CHAIN;
    Json(stages)
}

/// GET /api/v1/subjects
pub async fn handle_list_subjects() -> Json<&'static [UniversitySubject]> {
    Json(UNIVERSITY_SUBJECTS)
}
