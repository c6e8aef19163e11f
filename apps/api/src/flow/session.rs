use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::flow::{Action, Dispatch, FlowContext, FlowError};
use crate::gateway::{GatewayReply, GatewayRequest};
use crate::models::chat::{EsgThoughts, Turn};
use crate::models::material::ReadingMaterial;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Landing,
    Period1,
    Period2,
    Admin,
}

/// Period 1: career exploration.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Period1Step {
    HasCareerChoice,
    PickSubjects,
    ShowRecommendations,
    EnterJobAndThought,
    FindingOrShowingMaterials,
    ChatWithMentor,
}

impl Period1Step {
    pub fn index(self) -> u8 {
        match self {
            Period1Step::HasCareerChoice => 0,
            Period1Step::PickSubjects => 1,
            Period1Step::ShowRecommendations => 2,
            Period1Step::EnterJobAndThought => 3,
            Period1Step::FindingOrShowingMaterials => 4,
            Period1Step::ChatWithMentor => 5,
        }
    }
}

/// Period 2: ESG reflection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Period2Step {
    CollectThoughts,
    ConsultantChat,
    Report,
}

impl Period2Step {
    pub fn index(self) -> u8 {
        match self {
            Period2Step::CollectThoughts => 1,
            Period2Step::ConsultantChat => 2,
            Period2Step::Report => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingCall {
    pub ticket: u64,
    pub request: GatewayRequest,
}

/// The full transient state of one learner's visit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub view: View,
    pub period1_step: Period1Step,
    pub period2_step: Period2Step,
    /// Period-1 steps actually visited on the way to the current one.
    #[serde(skip)]
    pub(crate) trail: Vec<Period1Step>,
    pub selected_subjects: Vec<String>,
    pub recommended_jobs_text: Option<String>,
    pub my_job: String,
    pub my_connection_thought: String,
    pub matched_materials: Vec<ReadingMaterial>,
    pub generated_material: Option<ReadingMaterial>,
    pub selected_material: Option<ReadingMaterial>,
    #[serde(rename = "period1ChatLog")]
    pub period1_log: Vec<Turn>,
    #[serde(rename = "period2ChatLog")]
    pub period2_log: Vec<Turn>,
    pub esg_thoughts: EsgThoughts,
    #[serde(serialize_with = "serialize_pending")]
    pub(crate) pending: Option<PendingCall>,
    #[serde(skip)]
    next_ticket: u64,
}

fn serialize_pending<S: Serializer>(
    pending: &Option<PendingCall>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(pending.is_some())
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            view: View::Landing,
            period1_step: Period1Step::HasCareerChoice,
            period2_step: Period2Step::CollectThoughts,
            trail: Vec::new(),
            selected_subjects: Vec::new(),
            recommended_jobs_text: None,
            my_job: String::new(),
            my_connection_thought: String::new(),
            matched_materials: Vec::new(),
            generated_material: None,
            selected_material: None,
            period1_log: Vec::new(),
            period2_log: Vec::new(),
            esg_thoughts: EsgThoughts::default(),
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies one learner action. On success the session is updated and the
    /// gateway call to issue, if any, is returned. On error nothing changed.
    pub fn apply(
        &mut self,
        action: Action,
        ctx: &FlowContext<'_>,
    ) -> Result<Option<Dispatch>, FlowError> {
        let name = action.name();
        debug!("Applying {name} at {}", self.location());

        match action {
            Action::StartPeriod1 => {
                self.require_view(View::Landing, name)?;
                self.view = View::Period1;
                Ok(None)
            }
            Action::StartPeriod2 => {
                self.require_view(View::Landing, name)?;
                self.view = View::Period2;
                self.period2_step = Period2Step::CollectThoughts;
                Ok(None)
            }
            Action::OpenAdmin { password } => {
                self.require_view(View::Landing, name)?;
                if password != ctx.admin_password {
                    warn!("Admin login rejected");
                    return Err(FlowError::WrongAdminPassword);
                }
                self.view = View::Admin;
                Ok(None)
            }
            Action::Home => {
                self.view = View::Landing;
                Ok(None)
            }
            Action::Restart => {
                info!("Session restarted");
                *self = Session {
                    next_ticket: self.next_ticket,
                    ..Session::new()
                };
                Ok(None)
            }
            Action::Back => {
                match self.view {
                    View::Landing => {}
                    View::Admin => self.view = View::Landing,
                    View::Period1 => self.back_period1(),
                    View::Period2 => self.back_period2(),
                }
                Ok(None)
            }
            Action::AnswerCareerChoice { has_choice } => {
                self.require_period1(Period1Step::HasCareerChoice, name)?;
                self.answer_career_choice(has_choice);
                Ok(None)
            }
            Action::ToggleSubject { subject } => {
                self.require_period1(Period1Step::PickSubjects, name)?;
                self.toggle_subject(subject);
                Ok(None)
            }
            Action::RequestRecommendations => {
                self.require_period1(Period1Step::PickSubjects, name)?;
                self.request_recommendations().map(Some)
            }
            Action::ContinueToJob => {
                self.require_period1(Period1Step::ShowRecommendations, name)?;
                self.advance_period1(Period1Step::EnterJobAndThought);
                Ok(None)
            }
            Action::SetJob { job, thought } => {
                self.require_period1(Period1Step::EnterJobAndThought, name)?;
                self.my_job = job;
                self.my_connection_thought = thought;
                Ok(None)
            }
            Action::FindMaterials => {
                self.require_period1(Period1Step::EnterJobAndThought, name)?;
                self.find_materials(ctx.catalog).map(Some)
            }
            Action::SelectMaterial { material_id } => {
                self.require_period1(Period1Step::FindingOrShowingMaterials, name)?;
                self.select_material(&material_id)?;
                Ok(None)
            }
            Action::SendMentorMessage { text } => {
                self.require_period1(Period1Step::ChatWithMentor, name)?;
                self.send_mentor_message(&text)
            }
            Action::GoToPeriod2 => {
                self.require_period1(Period1Step::ChatWithMentor, name)?;
                self.view = View::Period2;
                self.period2_step = Period2Step::CollectThoughts;
                Ok(None)
            }
            Action::SetEsgThoughts {
                environment,
                social,
                economic,
            } => {
                self.require_period2(Period2Step::CollectThoughts, name)?;
                self.esg_thoughts = EsgThoughts {
                    environment,
                    social,
                    economic,
                };
                Ok(None)
            }
            Action::StartConsultation => {
                self.require_period2(Period2Step::CollectThoughts, name)?;
                self.start_consultation().map(Some)
            }
            Action::SendConsultantMessage { text } => {
                self.require_period2(Period2Step::ConsultantChat, name)?;
                self.send_consultant_message(&text)
            }
            Action::CompleteActivity => {
                self.require_period2(Period2Step::ConsultantChat, name)?;
                self.period2_step = Period2Step::Report;
                Ok(None)
            }
            Action::EditThoughts => {
                self.require_period2(Period2Step::ConsultantChat, name)?;
                self.period2_step = Period2Step::CollectThoughts;
                Ok(None)
            }
        }
    }

    /// Folds a gateway reply into the session. Returns false, changing
    /// nothing, when `ticket` is not the call the session is waiting on
    /// (the session was restarted or the conversation reseeded meanwhile).
    pub fn resolve(&mut self, ticket: u64, reply: GatewayReply) -> bool {
        let waiting_on = self.pending.as_ref().map(|p| p.ticket);
        if waiting_on != Some(ticket) {
            debug!("Ignoring stale reply for ticket {ticket} (waiting on {waiting_on:?})");
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        match (pending.request, reply) {
            (GatewayRequest::RecommendCareers { .. }, GatewayReply::Careers(text)) => {
                self.receive_recommendations(text);
            }
            (GatewayRequest::RecommendAndGenerate { known, .. }, GatewayReply::Materials(s)) => {
                self.receive_materials(&known, s);
            }
            (GatewayRequest::MentorChat { .. }, GatewayReply::Mentor(text)) => {
                self.period1_log.push(Turn::assistant(text));
            }
            (GatewayRequest::EsgFeedback { .. }, GatewayReply::Esg(text)) => {
                self.period2_log.push(Turn::assistant(text));
            }
            (request, reply) => {
                warn!(
                    "Reply {reply:?} does not answer {}; dropped",
                    request.operation()
                );
                return false;
            }
        }
        true
    }

    /// Registers `request` as the one in-flight call.
    pub(crate) fn begin(&mut self, request: GatewayRequest) -> Result<Dispatch, FlowError> {
        if self.pending.is_some() {
            return Err(FlowError::Busy);
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(PendingCall {
            ticket,
            request: request.clone(),
        });
        Ok(Dispatch { ticket, request })
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), FlowError> {
        if self.pending.is_some() {
            Err(FlowError::Busy)
        } else {
            Ok(())
        }
    }

    fn require_view(&self, view: View, action: &'static str) -> Result<(), FlowError> {
        if self.view == view {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn require_period1(&self, step: Period1Step, action: &'static str) -> Result<(), FlowError> {
        if self.view == View::Period1 && self.period1_step == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn require_period2(&self, step: Period2Step, action: &'static str) -> Result<(), FlowError> {
        if self.view == View::Period2 && self.period2_step == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            location: self.location(),
        }
    }

    fn location(&self) -> String {
        match self.view {
            View::Landing => "on the landing page".to_string(),
            View::Admin => "in the admin view".to_string(),
            View::Period1 => format!("at period 1 step {}", self.period1_step.index()),
            View::Period2 => format!("at period 2 step {}", self.period2_step.index()),
        }
    }
}
