//! Flow Controller: the state machine that walks a learner through the two
//! class periods.
//!
//! Transitions are pure: `Session::apply` validates an `Action`, updates the
//! session and optionally hands back a `Dispatch` (the one gateway call to
//! issue). `Session::resolve` folds the reply back in. `FlowController`
//! performs the calls and owns the per-session locks.

pub mod controller;
pub mod handlers;
pub mod period1;
pub mod period2;
pub mod session;

use serde::Deserialize;
use thiserror::Error;

use crate::gateway::GatewayRequest;
use crate::models::material::ReadingMaterial;

pub use controller::FlowController;
pub use session::{Period1Step, Period2Step, Session, View};

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    #[error("{0}")]
    Validation(String),

    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("a request is still in progress")]
    Busy,

    #[error("'{action}' is not available {location}")]
    InvalidTransition { action: &'static str, location: String },

    #[error("incorrect admin password")]
    WrongAdminPassword,
}

/// Everything a learner can do, as sent by the client.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    StartPeriod1,
    StartPeriod2,
    OpenAdmin {
        password: String,
    },
    Home,
    Restart,
    Back,
    AnswerCareerChoice {
        has_choice: bool,
    },
    ToggleSubject {
        subject: String,
    },
    RequestRecommendations,
    ContinueToJob,
    SetJob {
        job: String,
        #[serde(default)]
        thought: String,
    },
    FindMaterials,
    SelectMaterial {
        material_id: String,
    },
    SendMentorMessage {
        text: String,
    },
    GoToPeriod2,
    SetEsgThoughts {
        #[serde(default)]
        environment: String,
        #[serde(default)]
        social: String,
        #[serde(default)]
        economic: String,
    },
    StartConsultation,
    SendConsultantMessage {
        text: String,
    },
    CompleteActivity,
    EditThoughts,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartPeriod1 => "startPeriod1",
            Action::StartPeriod2 => "startPeriod2",
            Action::OpenAdmin { .. } => "openAdmin",
            Action::Home => "home",
            Action::Restart => "restart",
            Action::Back => "back",
            Action::AnswerCareerChoice { .. } => "answerCareerChoice",
            Action::ToggleSubject { .. } => "toggleSubject",
            Action::RequestRecommendations => "requestRecommendations",
            Action::ContinueToJob => "continueToJob",
            Action::SetJob { .. } => "setJob",
            Action::FindMaterials => "findMaterials",
            Action::SelectMaterial { .. } => "selectMaterial",
            Action::SendMentorMessage { .. } => "sendMentorMessage",
            Action::GoToPeriod2 => "goToPeriod2",
            Action::SetEsgThoughts { .. } => "setEsgThoughts",
            Action::StartConsultation => "startConsultation",
            Action::SendConsultantMessage { .. } => "sendConsultantMessage",
            Action::CompleteActivity => "completeActivity",
            Action::EditThoughts => "editThoughts",
        }
    }

    /// Whether `apply` needs the full list of known materials.
    pub fn needs_catalog(&self) -> bool {
        matches!(self, Action::FindMaterials)
    }
}

/// Inputs to `Session::apply` that live outside the session.
#[derive(Debug, Clone, Copy)]
pub struct FlowContext<'a> {
    pub admin_password: &'a str,
    pub catalog: &'a [ReadingMaterial],
}

/// A gateway call the session is now waiting on.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub ticket: u64,
    pub request: GatewayRequest,
}
