//! Recommendation Gateway: the contract for the four LLM-backed operations
//! the learning flow depends on.
//!
//! Implementations report failures as `GatewayError`; `perform` is the only
//! caller and turns every failure into the operation's fixed fallback, so the
//! flow never sees an error from this boundary.

pub mod llm;
pub mod payload;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::LlmError;
use crate::models::chat::{EsgThoughts, Turn};
use crate::models::material::{MaterialSummary, ReadingMaterial};

/// Shown when career recommendations cannot be produced.
pub const CAREERS_FALLBACK: &str =
    "Something went wrong while preparing recommendations. Please try again.";
/// Appended to the mentor chat when a reply cannot be produced.
pub const MENTOR_FALLBACK: &str =
    "I couldn't reach my notes just now. Could you say that once more?";
/// Appended to the consultant chat when feedback cannot be produced.
pub const ESG_FALLBACK: &str =
    "Feedback is unavailable at the moment. Let's keep refining your ESG ideas.";

/// At most this many existing materials are offered per request.
pub const MAX_RECOMMENDED: usize = 2;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("malformed gateway payload: {0}")]
    Malformed(String),
}

/// A reading material freshly written by the gateway. It has no id yet;
/// the flow controller mints one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMaterial {
    pub title: String,
    pub stage_id: String,
    pub content: String,
    pub majors: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialSuggestion {
    pub recommended_ids: Vec<String>,
    pub generated: Option<GeneratedMaterial>,
}

#[async_trait]
pub trait RecommendationGateway: Send + Sync {
    /// Subject list → human-readable guidance on majors and careers.
    async fn recommend_careers(&self, subjects: &[String]) -> Result<String, GatewayError>;

    /// Job + connection thought → ids of matching known materials and one new material.
    async fn recommend_and_generate(
        &self,
        job: &str,
        thought: &str,
        known: &[MaterialSummary],
    ) -> Result<MaterialSuggestion, GatewayError>;

    /// One Socratic career-mentor turn.
    async fn mentor_chat(
        &self,
        log: &[Turn],
        job: &str,
        material: &ReadingMaterial,
    ) -> Result<String, GatewayError>;

    /// One ESG-consultant turn.
    async fn esg_feedback(
        &self,
        job: &str,
        material_title: &str,
        thoughts: &EsgThoughts,
        log: &[Turn],
    ) -> Result<String, GatewayError>;
}

/// A gateway call the flow controller wants issued, with every argument
/// captured at the moment of the request.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayRequest {
    RecommendCareers {
        subjects: Vec<String>,
    },
    RecommendAndGenerate {
        job: String,
        thought: String,
        known: Vec<ReadingMaterial>,
    },
    MentorChat {
        log: Vec<Turn>,
        job: String,
        material: ReadingMaterial,
    },
    EsgFeedback {
        job: String,
        material_title: String,
        thoughts: EsgThoughts,
        log: Vec<Turn>,
    },
}

impl GatewayRequest {
    pub fn operation(&self) -> &'static str {
        match self {
            GatewayRequest::RecommendCareers { .. } => "recommend_careers",
            GatewayRequest::RecommendAndGenerate { .. } => "recommend_and_generate",
            GatewayRequest::MentorChat { .. } => "mentor_chat",
            GatewayRequest::EsgFeedback { .. } => "esg_feedback",
        }
    }
}

/// The answer to a `GatewayRequest`, already degraded to its fallback on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply {
    Careers(String),
    Materials(MaterialSuggestion),
    Mentor(String),
    Esg(String),
}

/// Issues `request` against `gateway`. Never fails.
pub async fn perform(gateway: &dyn RecommendationGateway, request: &GatewayRequest) -> GatewayReply {
    let operation = request.operation();
    info!("Gateway call: {operation}");

    match request {
        GatewayRequest::RecommendCareers { subjects } => {
            match gateway.recommend_careers(subjects).await {
                Ok(text) => GatewayReply::Careers(text),
                Err(e) => {
                    warn!("{operation} failed, using fallback: {e}");
                    GatewayReply::Careers(CAREERS_FALLBACK.to_string())
                }
            }
        }
        GatewayRequest::RecommendAndGenerate {
            job,
            thought,
            known,
        } => {
            let summaries: Vec<MaterialSummary> = known.iter().map(|m| m.summary()).collect();
            match gateway.recommend_and_generate(job, thought, &summaries).await {
                Ok(suggestion) => GatewayReply::Materials(suggestion),
                Err(e) => {
                    warn!("{operation} failed, using fallback: {e}");
                    GatewayReply::Materials(MaterialSuggestion::default())
                }
            }
        }
        GatewayRequest::MentorChat { log, job, material } => {
            match gateway.mentor_chat(log, job, material).await {
                Ok(text) => GatewayReply::Mentor(text),
                Err(e) => {
                    warn!("{operation} failed, using fallback: {e}");
                    GatewayReply::Mentor(MENTOR_FALLBACK.to_string())
                }
            }
        }
        GatewayRequest::EsgFeedback {
            job,
            material_title,
            thoughts,
            log,
        } => match gateway.esg_feedback(job, material_title, thoughts, log).await {
            Ok(text) => GatewayReply::Esg(text),
            Err(e) => {
                warn!("{operation} failed, using fallback: {e}");
                GatewayReply::Esg(ESG_FALLBACK.to_string())
            }
        },
    }
}
