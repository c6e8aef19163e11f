//! Report Assembler: the end-of-session summary card.

pub mod export;
pub mod handlers;

use chrono::NaiveDate;
use serde::Serialize;

use crate::flow::{Period2Step, Session, View};
use crate::models::chat::{EsgThoughts, Speaker};
use crate::models::stage::find_stage;

/// Shown in place of the mentoring summary when no feedback was given.
pub const NO_CONVERSATION: &str = "No conversation took place.";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMaterial {
    pub title: String,
    pub stage_id: String,
    pub stage_label: Option<String>,
}

/// Read-only snapshot of what the learner produced.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub job: String,
    pub connection_thought: String,
    pub material: Option<ReportMaterial>,
    pub esg_thoughts: EsgThoughts,
    pub mentoring_summary: String,
    pub generated_on: NaiveDate,
}

/// Whether the session has reached the report step.
pub fn is_ready(session: &Session) -> bool {
    session.view == View::Period2 && session.period2_step == Period2Step::Report
}

pub fn assemble(session: &Session, generated_on: NaiveDate) -> ReportSnapshot {
    ReportSnapshot {
        job: session.my_job.clone(),
        connection_thought: session.my_connection_thought.clone(),
        material: session.selected_material.as_ref().map(|m| ReportMaterial {
            title: m.title.clone(),
            stage_id: m.stage_id.clone(),
            stage_label: find_stage(&m.stage_id).map(|s| s.label.to_string()),
        }),
        esg_thoughts: session.esg_thoughts.clone(),
        mentoring_summary: session
            .period2_log
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Assistant)
            .map(|t| t.text.clone())
            .unwrap_or_else(|| NO_CONVERSATION.to_string()),
        generated_on,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::make_material;
    use crate::models::chat::Turn;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_assemble_takes_last_assistant_turn() {
        let mut session = Session::new();
        session.my_job = "Architect".to_string();
        session.my_connection_thought = "Fabs are buildings".to_string();
        session.selected_material = Some(make_material("m1", "Water in fabs", "step3"));
        session.period2_log = vec![
            Turn::user("ideas"),
            Turn::assistant("first feedback"),
            Turn::user("more"),
            Turn::assistant("final feedback"),
            Turn::user("unanswered"),
        ];

        let before = session.clone();
        let report = assemble(&session, date());

        assert_eq!(report.job, "Architect");
        assert_eq!(report.mentoring_summary, "final feedback");
        let material = report.material.unwrap();
        assert_eq!(material.stage_label.as_deref(), Some("Fabrication"));
        assert_eq!(report.generated_on, date());
        assert_eq!(session.period2_log, before.period2_log);
    }

    #[test]
    fn test_assemble_without_material_or_feedback() {
        let report = assemble(&Session::new(), date());
        assert!(report.material.is_none());
        assert_eq!(report.mentoring_summary, NO_CONVERSATION);
    }
}
