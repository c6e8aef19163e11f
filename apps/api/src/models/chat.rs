use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Opening turn of a mentor conversation; rendered with the value-chain widget.
    Intro,
    Normal,
}

/// One message of a chat log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_kind: Option<TurnKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_stage: Option<String>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            turn_kind: None,
            related_stage: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            turn_kind: Some(TurnKind::Normal),
            related_stage: None,
        }
    }

    pub fn intro(text: impl Into<String>, stage_id: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            turn_kind: Some(TurnKind::Intro),
            related_stage: Some(stage_id.into()),
        }
    }
}

/// The learner's three ESG reflections collected in Period 2.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EsgThoughts {
    pub environment: String,
    pub social: String,
    pub economic: String,
}

impl EsgThoughts {
    pub fn is_complete(&self) -> bool {
        [&self.environment, &self.social, &self.economic]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
