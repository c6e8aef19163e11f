//! `RecommendationGateway` backed by the shared `LlmClient`.

use async_trait::async_trait;

use crate::gateway::payload::RawSuggestion;
use crate::gateway::prompts::{
    CAREERS_PROMPT_TEMPLATE, CAREERS_SYSTEM, CONVERSATION_OPENER, ESG_SYSTEM_TEMPLATE,
    MATERIALS_PROMPT_TEMPLATE, MATERIALS_SYSTEM, MENTOR_SYSTEM_TEMPLATE,
};
use crate::gateway::{GatewayError, MaterialSuggestion, RecommendationGateway};
use crate::llm_client::prompts::{language_instruction, JSON_ONLY_INSTRUCTION, NO_TABLES_INSTRUCTION};
use crate::llm_client::{LlmClient, Message, Role};
use crate::models::chat::{EsgThoughts, Speaker, Turn};
use crate::models::material::{MaterialSummary, ReadingMaterial};
use crate::models::stage::{find_stage, VALUE_CHAIN};

pub struct LlmGateway {
    llm: LlmClient,
    language: String,
}

impl LlmGateway {
    pub fn new(llm: LlmClient, language: impl Into<String>) -> Self {
        Self {
            llm,
            language: language.into(),
        }
    }

    fn system(&self, base: &str) -> String {
        format!(
            "{base}\n{}\n{}",
            NO_TABLES_INSTRUCTION,
            language_instruction(&self.language)
        )
    }
}

#[async_trait]
impl RecommendationGateway for LlmGateway {
    async fn recommend_careers(&self, subjects: &[String]) -> Result<String, GatewayError> {
        let prompt = CAREERS_PROMPT_TEMPLATE.replace("{subjects}", &subjects.join(", "));
        let text = self
            .llm
            .call_text(&[Message::user(prompt)], &self.system(CAREERS_SYSTEM))
            .await?;
        Ok(text)
    }

    async fn recommend_and_generate(
        &self,
        job: &str,
        thought: &str,
        known: &[MaterialSummary],
    ) -> Result<MaterialSuggestion, GatewayError> {
        let existing_json = serde_json::to_string(known)
            .map_err(|e| GatewayError::Malformed(format!("failed to serialize summaries: {e}")))?;
        let prompt = build_materials_prompt(job, thought, &existing_json);
        let system = format!("{}\n{}", self.system(MATERIALS_SYSTEM), JSON_ONLY_INSTRUCTION);

        let raw: RawSuggestion = self.llm.call_json(&prompt, &system).await?;
        raw.into_suggestion()
    }

    async fn mentor_chat(
        &self,
        log: &[Turn],
        job: &str,
        material: &ReadingMaterial,
    ) -> Result<String, GatewayError> {
        let stage_label = find_stage(&material.stage_id)
            .map(|s| s.label)
            .unwrap_or("unknown");
        let system = MENTOR_SYSTEM_TEMPLATE
            .replace("{job}", job)
            .replace("{title}", &material.title)
            .replace("{stage_label}", stage_label);

        let text = self
            .llm
            .call_text(&to_messages(log), &self.system(&system))
            .await?;
        Ok(text)
    }

    async fn esg_feedback(
        &self,
        job: &str,
        material_title: &str,
        thoughts: &EsgThoughts,
        log: &[Turn],
    ) -> Result<String, GatewayError> {
        let system = ESG_SYSTEM_TEMPLATE
            .replace("{job}", job)
            .replace("{title}", material_title)
            .replace("{environment}", &thoughts.environment)
            .replace("{social}", &thoughts.social)
            .replace("{economic}", &thoughts.economic);

        let text = self
            .llm
            .call_text(&to_messages(log), &self.system(&system))
            .await?;
        Ok(text)
    }
}

fn build_materials_prompt(job: &str, thought: &str, existing_json: &str) -> String {
    let stages = VALUE_CHAIN
        .iter()
        .map(|s| format!("     - {}: {}", s.id, s.label))
        .collect::<Vec<_>>()
        .join("\n");
    let thought = if thought.trim().is_empty() {
        "(not written yet)"
    } else {
        thought
    };

    MATERIALS_PROMPT_TEMPLATE
        .replace("{stages}", &stages)
        .replace("{existing_json}", existing_json)
        .replace("{thought}", thought)
        .replace("{job}", job)
}

/// Maps a chat log onto API messages: the log may open with the mentor's
/// intro, so a user opener is prepended, and consecutive turns by the same
/// speaker are merged so roles alternate.
fn to_messages(log: &[Turn]) -> Vec<Message> {
    let mut messages: Vec<Message> = Vec::with_capacity(log.len() + 1);

    for turn in log {
        let role = match turn.speaker {
            Speaker::User => Role::User,
            Speaker::Assistant => Role::Assistant,
        };
        if messages.is_empty() && role == Role::Assistant {
            messages.push(Message::user(CONVERSATION_OPENER));
        }
        match messages.last_mut() {
            Some(last) if last.role == role => {
                last.content.push_str("\n\n");
                last.content.push_str(&turn.text);
            }
            _ => messages.push(Message {
                role,
                content: turn.text.clone(),
            }),
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_messages_prepends_opener_before_intro() {
        let log = vec![
            Turn::intro("Welcome, future architect!", "step3"),
            Turn::user("Fabs need buildings?"),
        ];
        let messages = to_messages(&log);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], Message::user(CONVERSATION_OPENER));
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[2], Message::user("Fabs need buildings?"));
    }

    #[test]
    fn test_to_messages_merges_consecutive_speakers() {
        let log = vec![
            Turn::user("first"),
            Turn::assistant("reply"),
            Turn::user("second"),
            Turn::user("third"),
        ];
        let messages = to_messages(&log);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, "second\n\nthird");
    }

    #[test]
    fn test_materials_prompt_fills_placeholders() {
        let prompt = build_materials_prompt("Architect", "", "[]");
        assert!(prompt.contains("Student's career: Architect"));
        assert!(prompt.contains("(not written yet)"));
        assert!(prompt.contains("step6: AI Services & Applications"));
        assert!(!prompt.contains("{existing_json}"));
        assert!(!prompt.contains("{job}"));
    }
}
