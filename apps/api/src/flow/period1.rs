//! Period 1: career exploration.
//!
//! ```text
//! 0 HasCareerChoice ──no──▶ 1 PickSubjects ──(recommend_careers)──▶ 2 ShowRecommendations
//!        │ yes                                                              │
//!        └──────────────▶ 3 EnterJobAndThought ◀─────────────────────────────┘
//!                                │ (recommend_and_generate)
//!                                ▼
//!                         4 FindingOrShowingMaterials ──select──▶ 5 ChatWithMentor
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::flow::session::{Period1Step, Session, View};
use crate::flow::{Dispatch, FlowError};
use crate::gateway::{GatewayRequest, MaterialSuggestion, MAX_RECOMMENDED};
use crate::models::chat::Turn;
use crate::models::material::ReadingMaterial;
use crate::models::stage::is_known_stage;

impl Session {
    pub(crate) fn answer_career_choice(&mut self, has_choice: bool) {
        let next = if has_choice {
            Period1Step::EnterJobAndThought
        } else {
            Period1Step::PickSubjects
        };
        self.advance_period1(next);
    }

    pub(crate) fn toggle_subject(&mut self, subject: String) {
        let subject = subject.trim().to_string();
        if subject.is_empty() {
            return;
        }
        match self.selected_subjects.iter().position(|s| *s == subject) {
            Some(i) => {
                self.selected_subjects.remove(i);
            }
            None => self.selected_subjects.push(subject),
        }
    }

    /// 1 → 2. The step changes only once the recommendation text arrives.
    pub(crate) fn request_recommendations(&mut self) -> Result<Dispatch, FlowError> {
        if self.selected_subjects.is_empty() {
            return Err(FlowError::Validation(
                "Select at least one subject.".to_string(),
            ));
        }
        self.begin(GatewayRequest::RecommendCareers {
            subjects: self.selected_subjects.clone(),
        })
    }

    pub(crate) fn receive_recommendations(&mut self, text: String) {
        self.recommended_jobs_text = Some(text);
        if self.view == View::Period1 && self.period1_step == Period1Step::PickSubjects {
            self.advance_period1(Period1Step::ShowRecommendations);
        }
    }

    /// 3 → 4. The step changes immediately; results are revealed once the
    /// call resolves.
    pub(crate) fn find_materials(
        &mut self,
        catalog: &[ReadingMaterial],
    ) -> Result<Dispatch, FlowError> {
        if self.my_job.trim().is_empty() {
            return Err(FlowError::Validation("Enter a career first.".to_string()));
        }
        let dispatch = self.begin(GatewayRequest::RecommendAndGenerate {
            job: self.my_job.trim().to_string(),
            thought: self.my_connection_thought.clone(),
            known: catalog.to_vec(),
        })?;
        self.advance_period1(Period1Step::FindingOrShowingMaterials);
        Ok(dispatch)
    }

    pub(crate) fn receive_materials(
        &mut self,
        known: &[ReadingMaterial],
        suggestion: MaterialSuggestion,
    ) {
        // Holds for any `RecommendationGateway`, not only the validated LLM payload.
        if let Some(generated) = &suggestion.generated {
            if !is_known_stage(&generated.stage_id) {
                warn!(
                    "Generated material has unknown stage '{}'; discarding the reply",
                    generated.stage_id
                );
                self.matched_materials.clear();
                self.generated_material = None;
                return;
            }
        }

        self.matched_materials = known
            .iter()
            .filter(|m| suggestion.recommended_ids.contains(&m.id))
            .take(MAX_RECOMMENDED)
            .cloned()
            .collect();

        self.generated_material = suggestion.generated.map(|g| ReadingMaterial {
            id: mint_generated_id(known, Utc::now().timestamp_millis()),
            title: g.title,
            stage_id: g.stage_id,
            majors: g.majors,
            keywords: g.keywords,
            content: g.content,
            search_keywords: Vec::new(),
            references: Vec::new(),
            is_generated: true,
        });

        info!(
            "Materials ready: {} matched, generated={}",
            self.matched_materials.len(),
            self.generated_material.is_some()
        );
    }

    /// 4 → 5. Only a material that was actually offered can be picked.
    pub(crate) fn select_material(&mut self, material_id: &str) -> Result<(), FlowError> {
        if let Some(pending) = &self.pending {
            if matches!(pending.request, GatewayRequest::RecommendAndGenerate { .. }) {
                return Err(FlowError::Busy);
            }
        }

        let material = self
            .generated_material
            .iter()
            .chain(self.matched_materials.iter())
            .find(|m| m.id == material_id)
            .cloned()
            .ok_or_else(|| FlowError::UnknownMaterial(material_id.to_string()))?;

        // A reply to the previous conversation must not land in the new one.
        if let Some(pending) = &self.pending {
            if matches!(pending.request, GatewayRequest::MentorChat { .. }) {
                debug!("Dropping in-flight mentor reply (ticket {})", pending.ticket);
                self.pending = None;
            }
        }

        self.period1_log = vec![Turn::intro(
            mentor_intro(&self.my_job, &material.title),
            material.stage_id.clone(),
        )];
        self.selected_material = Some(material);
        self.advance_period1(Period1Step::ChatWithMentor);
        Ok(())
    }

    /// Blank input is ignored without touching the log.
    pub(crate) fn send_mentor_message(&mut self, text: &str) -> Result<Option<Dispatch>, FlowError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.ensure_idle()?;
        let Some(material) = self.selected_material.clone() else {
            return Err(FlowError::Validation("Pick a material first.".to_string()));
        };

        self.period1_log.push(Turn::user(text));
        self.begin(GatewayRequest::MentorChat {
            log: self.period1_log.clone(),
            job: self.my_job.clone(),
            material,
        })
        .map(Some)
    }

    /// Forward move that records where it came from.
    pub(crate) fn advance_period1(&mut self, next: Period1Step) {
        if next != self.period1_step {
            self.trail.push(self.period1_step);
            self.period1_step = next;
        }
    }

    /// Returns to the step actually visited before the current one. Data
    /// entered on any step is kept.
    pub(crate) fn back_period1(&mut self) {
        if let Some(previous) = self.trail.pop() {
            self.period1_step = previous;
            return;
        }
        self.period1_step = match self.period1_step {
            Period1Step::HasCareerChoice => {
                self.view = View::Landing;
                Period1Step::HasCareerChoice
            }
            Period1Step::PickSubjects => Period1Step::HasCareerChoice,
            Period1Step::ShowRecommendations => Period1Step::PickSubjects,
            Period1Step::EnterJobAndThought if self.recommended_jobs_text.is_some() => {
                Period1Step::ShowRecommendations
            }
            Period1Step::EnterJobAndThought => Period1Step::HasCareerChoice,
            Period1Step::FindingOrShowingMaterials => Period1Step::EnterJobAndThought,
            Period1Step::ChatWithMentor => Period1Step::FindingOrShowingMaterials,
        };
    }
}

fn mentor_intro(job: &str, title: &str) -> String {
    format!(
        "Hello! So you are interested in becoming a **{job}**.\n\n\
        The material we are reading together is **\"{title}\"**.\n\n\
        From a **{job}**'s point of view, how do you think this issue could affect your field?"
    )
}

/// `gen_<millis>`, bumped until it collides with no known id.
fn mint_generated_id(known: &[ReadingMaterial], now_millis: i64) -> String {
    let mut stamp = now_millis;
    loop {
        let id = format!("gen_{stamp}");
        if !known.iter().any(|m| m.id == id) {
            return id;
        }
        stamp += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::make_material;
    use crate::flow::session::tests::ctx;
    use crate::flow::{Action, FlowContext};
    use crate::gateway::{GatewayReply, GeneratedMaterial};
    use crate::models::chat::{Speaker, TurnKind};

    fn act(session: &mut Session, action: Action) -> Option<Dispatch> {
        session.apply(action, &ctx()).unwrap()
    }

    fn in_period1() -> Session {
        let mut session = Session::new();
        act(&mut session, Action::StartPeriod1);
        session
    }

    fn generated(stage_id: &str) -> GeneratedMaterial {
        GeneratedMaterial {
            title: "Designing fabs that share water".to_string(),
            stage_id: stage_id.to_string(),
            content: "## [Deep dive]".to_string(),
            majors: vec!["Architecture".to_string()],
            keywords: vec!["water".to_string()],
        }
    }

    /// Drives a session to step 4 with results in place.
    fn at_materials(catalog: &[ReadingMaterial], suggestion: MaterialSuggestion) -> Session {
        let mut session = in_period1();
        act(&mut session, Action::AnswerCareerChoice { has_choice: true });
        act(
            &mut session,
            Action::SetJob {
                job: "Architect".to_string(),
                thought: String::new(),
            },
        );
        let ctx = FlowContext {
            admin_password: "1234",
            catalog,
        };
        let dispatch = session.apply(Action::FindMaterials, &ctx).unwrap().unwrap();
        assert!(session.resolve(dispatch.ticket, GatewayReply::Materials(suggestion)));
        session
    }

    #[test]
    fn test_scenario_a_subjects_to_recommendations() {
        let mut session = in_period1();
        act(&mut session, Action::AnswerCareerChoice { has_choice: false });
        assert_eq!(session.period1_step, Period1Step::PickSubjects);

        for subject in ["Biology", "Economics"] {
            act(
                &mut session,
                Action::ToggleSubject {
                    subject: subject.to_string(),
                },
            );
        }
        let dispatch = act(&mut session, Action::RequestRecommendations).unwrap();
        assert_eq!(
            dispatch.request,
            GatewayRequest::RecommendCareers {
                subjects: vec!["Biology".to_string(), "Economics".to_string()]
            }
        );
        // Still on step 1 until the reply arrives.
        assert_eq!(session.period1_step, Period1Step::PickSubjects);
        assert!(session.is_pending());

        let text = "1) Bioinformatics\n2) Health economics";
        assert!(session.resolve(dispatch.ticket, GatewayReply::Careers(text.to_string())));
        assert_eq!(session.period1_step, Period1Step::ShowRecommendations);
        assert_eq!(session.recommended_jobs_text.as_deref(), Some(text));
        assert!(!session.is_pending());
    }

    #[test]
    fn test_recommendations_rejected_without_subjects() {
        let mut session = in_period1();
        act(&mut session, Action::AnswerCareerChoice { has_choice: false });
        let before = session.clone();

        let err = session
            .apply(Action::RequestRecommendations, &ctx())
            .unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(session.period1_step, before.period1_step);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_toggle_subject_twice_removes_it() {
        let mut session = in_period1();
        act(&mut session, Action::AnswerCareerChoice { has_choice: false });
        for _ in 0..2 {
            act(
                &mut session,
                Action::ToggleSubject {
                    subject: "Biology".to_string(),
                },
            );
        }
        assert!(session.selected_subjects.is_empty());
    }

    #[test]
    fn test_find_materials_requires_job() {
        let mut session = in_period1();
        act(&mut session, Action::AnswerCareerChoice { has_choice: true });
        act(
            &mut session,
            Action::SetJob {
                job: "   ".to_string(),
                thought: "anything".to_string(),
            },
        );
        let err = session.apply(Action::FindMaterials, &ctx()).unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(session.period1_step, Period1Step::EnterJobAndThought);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_find_materials_moves_to_step_4_while_pending() {
        let catalog = vec![make_material("a", "A", "step1")];
        let mut session = in_period1();
        act(&mut session, Action::AnswerCareerChoice { has_choice: true });
        act(
            &mut session,
            Action::SetJob {
                job: "Architect".to_string(),
                thought: "fabs are buildings".to_string(),
            },
        );
        let ctx = FlowContext {
            admin_password: "1234",
            catalog: &catalog,
        };
        let dispatch = session.apply(Action::FindMaterials, &ctx).unwrap().unwrap();

        assert_eq!(session.period1_step, Period1Step::FindingOrShowingMaterials);
        assert!(session.is_pending());
        assert_eq!(
            dispatch.request,
            GatewayRequest::RecommendAndGenerate {
                job: "Architect".to_string(),
                thought: "fabs are buildings".to_string(),
                known: catalog.clone(),
            }
        );

        // Results are not selectable until the call resolves.
        let err = session
            .apply(
                Action::SelectMaterial {
                    material_id: "a".to_string(),
                },
                &ctx,
            )
            .unwrap_err();
        assert_eq!(err, FlowError::Busy);
    }

    #[test]
    fn test_scenario_b_select_generated_material() {
        let catalog = vec![
            make_material("m1", "Neon", "step1"),
            make_material("m2", "Water", "step3"),
            make_material("m3", "Power", "step5"),
        ];
        let mut session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["m1".to_string(), "m3".to_string()],
                generated: Some(generated("step3")),
            },
        );
        assert_eq!(session.matched_materials.len(), 2);
        let generated = session.generated_material.clone().unwrap();
        assert!(generated.is_generated);
        assert!(generated.id.starts_with("gen_"));

        act(
            &mut session,
            Action::SelectMaterial {
                material_id: generated.id.clone(),
            },
        );
        assert_eq!(session.period1_step, Period1Step::ChatWithMentor);
        assert_eq!(session.selected_material.as_ref(), Some(&generated));
        assert_eq!(session.period1_log.len(), 1);
        let intro = &session.period1_log[0];
        assert_eq!(intro.speaker, Speaker::Assistant);
        assert_eq!(intro.turn_kind, Some(TurnKind::Intro));
        assert_eq!(intro.related_stage.as_deref(), Some("step3"));
        assert!(intro.text.contains("Architect"));
        assert!(intro.text.contains(&generated.title));
    }

    #[test]
    fn test_unknown_recommended_ids_are_filtered() {
        let catalog = vec![make_material("m1", "Neon", "step1")];
        let session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["ghost".to_string(), "m1".to_string()],
                generated: None,
            },
        );
        let ids: Vec<_> = session.matched_materials.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m1"]);
        assert!(session.generated_material.is_none());
    }

    #[test]
    fn test_known_ids_survive_leading_unknown_ones() {
        let catalog = vec![
            make_material("m1", "Neon", "step1"),
            make_material("m2", "Water", "step3"),
            make_material("m3", "Power", "step5"),
        ];
        let session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: ["ghost1", "ghost2", "m1", "m3", "m2"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                generated: None,
            },
        );
        let ids: Vec<_> = session.matched_materials.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m1", "m2"]);
    }

    #[test]
    fn test_generated_material_with_unknown_stage_is_discarded() {
        let catalog = vec![make_material("m1", "Neon", "step1")];
        let session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["m1".to_string()],
                generated: Some(generated("step0")),
            },
        );
        assert!(session.matched_materials.is_empty());
        assert!(session.generated_material.is_none());
    }

    #[test]
    fn test_cannot_select_material_that_was_not_offered() {
        let catalog = vec![make_material("m1", "Neon", "step1"), make_material("m2", "W", "step3")];
        let mut session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["m1".to_string()],
                generated: None,
            },
        );
        let err = session
            .apply(
                Action::SelectMaterial {
                    material_id: "m2".to_string(),
                },
                &ctx(),
            )
            .unwrap_err();
        assert_eq!(err, FlowError::UnknownMaterial("m2".to_string()));
        assert!(session.selected_material.is_none());
    }

    #[test]
    fn test_mint_generated_id_avoids_known_ids() {
        let known = vec![
            make_material("gen_100", "A", "step1"),
            make_material("gen_101", "B", "step1"),
        ];
        assert_eq!(mint_generated_id(&known, 100), "gen_102");
        assert_eq!(mint_generated_id(&[], 7), "gen_7");
    }

    #[test]
    fn test_mentor_chat_round_trip_and_blank_noop() {
        let catalog = vec![make_material("m1", "Neon", "step1")];
        let mut session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["m1".to_string()],
                generated: None,
            },
        );
        act(
            &mut session,
            Action::SelectMaterial {
                material_id: "m1".to_string(),
            },
        );

        assert!(act(
            &mut session,
            Action::SendMentorMessage {
                text: " \n\t ".to_string()
            }
        )
        .is_none());
        assert_eq!(session.period1_log.len(), 1);
        assert!(!session.is_pending());

        let dispatch = act(
            &mut session,
            Action::SendMentorMessage {
                text: "Maybe clean rooms?".to_string(),
            },
        )
        .unwrap();
        match &dispatch.request {
            GatewayRequest::MentorChat { log, job, material } => {
                assert_eq!(log.len(), 2);
                assert_eq!(job, "Architect");
                assert_eq!(material.id, "m1");
            }
            other => panic!("unexpected request {other:?}"),
        }

        // No second send while the first is outstanding.
        let err = session
            .apply(
                Action::SendMentorMessage {
                    text: "hello?".to_string(),
                },
                &ctx(),
            )
            .unwrap_err();
        assert_eq!(err, FlowError::Busy);
        assert_eq!(session.period1_log.len(), 2);

        assert!(session.resolve(dispatch.ticket, GatewayReply::Mentor("Why clean rooms?".to_string())));
        assert_eq!(session.period1_log.len(), 3);
        assert_eq!(session.period1_log[2], Turn::assistant("Why clean rooms?"));
    }

    #[test]
    fn test_reselecting_material_drops_in_flight_mentor_reply() {
        let catalog = vec![make_material("m1", "Neon", "step1"), make_material("m2", "W", "step3")];
        let mut session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["m1".to_string(), "m2".to_string()],
                generated: None,
            },
        );
        act(&mut session, Action::SelectMaterial { material_id: "m1".to_string() });
        let dispatch = act(
            &mut session,
            Action::SendMentorMessage {
                text: "hi".to_string(),
            },
        )
        .unwrap();

        act(&mut session, Action::Back);
        act(&mut session, Action::SelectMaterial { material_id: "m2".to_string() });
        assert!(!session.is_pending());

        assert!(!session.resolve(dispatch.ticket, GatewayReply::Mentor("late".to_string())));
        assert_eq!(session.period1_log.len(), 1);
        assert_eq!(session.period1_log[0].related_stage.as_deref(), Some("step3"));
    }

    #[test]
    fn test_back_from_job_step_follows_actual_path() {
        // Reached step 3 via "yes": back goes to 0 even with cached text.
        let mut session = in_period1();
        session.recommended_jobs_text = Some("cached from earlier".to_string());
        act(&mut session, Action::AnswerCareerChoice { has_choice: true });
        act(&mut session, Action::Back);
        assert_eq!(session.period1_step, Period1Step::HasCareerChoice);

        // Reached step 3 via recommendations: back goes to 2, then 1, then 0, then landing.
        act(&mut session, Action::AnswerCareerChoice { has_choice: false });
        act(&mut session, Action::ToggleSubject { subject: "Biology".to_string() });
        let dispatch = act(&mut session, Action::RequestRecommendations).unwrap();
        session.resolve(dispatch.ticket, GatewayReply::Careers("text".to_string()));
        act(&mut session, Action::ContinueToJob);
        assert_eq!(session.period1_step, Period1Step::EnterJobAndThought);

        let expected = [
            Period1Step::ShowRecommendations,
            Period1Step::PickSubjects,
            Period1Step::HasCareerChoice,
        ];
        for step in expected {
            act(&mut session, Action::Back);
            assert_eq!(session.period1_step, step);
            assert_eq!(session.view, View::Period1);
        }
        act(&mut session, Action::Back);
        assert_eq!(session.view, View::Landing);
        assert_eq!(session.selected_subjects, ["Biology"]);
    }

    #[test]
    fn test_back_navigation_never_clears_data() {
        let catalog = vec![make_material("m1", "Neon", "step1")];
        let mut session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["m1".to_string()],
                generated: None,
            },
        );
        act(&mut session, Action::SelectMaterial { material_id: "m1".to_string() });
        let dispatch = act(&mut session, Action::SendMentorMessage { text: "hi".to_string() }).unwrap();
        session.resolve(dispatch.ticket, GatewayReply::Mentor("hello".to_string()));

        let job = session.my_job.clone();
        let log = session.period1_log.clone();
        let material = session.selected_material.clone();

        for _ in 0..6 {
            act(&mut session, Action::Back);
            assert_eq!(session.my_job, job);
            assert_eq!(session.period1_log, log);
            assert_eq!(session.selected_material, material);
        }
        assert_eq!(session.view, View::Landing);

        // Coming back resumes at the step that was left.
        act(&mut session, Action::StartPeriod1);
        assert_eq!(session.period1_step, Period1Step::HasCareerChoice);
        act(&mut session, Action::AnswerCareerChoice { has_choice: true });
        assert_eq!(session.my_job, job);
    }

    #[test]
    fn test_go_to_period2_from_mentor_chat() {
        let catalog = vec![make_material("m1", "Neon", "step1")];
        let mut session = at_materials(
            &catalog,
            MaterialSuggestion {
                recommended_ids: vec!["m1".to_string()],
                generated: None,
            },
        );
        let err = session.apply(Action::GoToPeriod2, &ctx()).unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition { .. }));

        act(&mut session, Action::SelectMaterial { material_id: "m1".to_string() });
        act(&mut session, Action::GoToPeriod2);
        assert_eq!(session.view, View::Period2);
        assert_eq!(session.period2_step.index(), 1);
        assert_eq!(session.selected_material.as_ref().map(|m| m.id.as_str()), Some("m1"));
    }
}
