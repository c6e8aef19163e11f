//! Period 2: ESG reflection: collect thoughts, talk them through with the
//! consultant, finish with the report.

use crate::flow::session::{Period1Step, Period2Step, Session, View};
use crate::flow::{Dispatch, FlowError};
use crate::gateway::prompts::GENERAL_CONTEXT_LABEL;
use crate::gateway::GatewayRequest;
use crate::models::chat::Turn;

impl Session {
    /// 1 → 2. Seeds the log with the learner's three ideas and asks for the
    /// first round of feedback.
    pub(crate) fn start_consultation(&mut self) -> Result<Dispatch, FlowError> {
        if !self.esg_thoughts.is_complete() {
            return Err(FlowError::Validation(
                "Fill in all three ESG areas.".to_string(),
            ));
        }
        self.ensure_idle()?;

        self.period2_log = vec![Turn::user(esg_summary(
            &self.my_job,
            &self.esg_thoughts.environment,
            &self.esg_thoughts.social,
            &self.esg_thoughts.economic,
        ))];
        self.period2_step = Period2Step::ConsultantChat;
        self.begin(self.esg_request())
    }

    pub(crate) fn send_consultant_message(
        &mut self,
        text: &str,
    ) -> Result<Option<Dispatch>, FlowError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.ensure_idle()?;

        self.period2_log.push(Turn::user(text));
        self.begin(self.esg_request()).map(Some)
    }

    fn esg_request(&self) -> GatewayRequest {
        GatewayRequest::EsgFeedback {
            job: self.my_job.clone(),
            material_title: self
                .selected_material
                .as_ref()
                .map(|m| m.title.clone())
                .unwrap_or_else(|| GENERAL_CONTEXT_LABEL.to_string()),
            thoughts: self.esg_thoughts.clone(),
            log: self.period2_log.clone(),
        }
    }

    pub(crate) fn back_period2(&mut self) {
        match self.period2_step {
            Period2Step::CollectThoughts => {
                if self.selected_material.is_some() && !self.period1_log.is_empty() {
                    self.view = View::Period1;
                    self.advance_period1(Period1Step::ChatWithMentor);
                } else {
                    self.view = View::Landing;
                }
            }
            Period2Step::ConsultantChat => self.period2_step = Period2Step::CollectThoughts,
            Period2Step::Report => self.period2_step = Period2Step::ConsultantChat,
        }
    }
}

fn esg_summary(job: &str, environment: &str, social: &str, economic: &str) -> String {
    format!(
        "Here are my ESG ideas for my hoped-for career ({job}):\n\
        Environment: {environment}\n\
        Social: {social}\n\
        Economic/Governance: {economic}"
    )
}
