use serde::{Deserialize, Serialize};

use crate::models::stage::is_known_stage;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reference {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A reading material placed on the value chain.
///
/// Created by the admin screen or synthesized by the gateway (`is_generated`).
/// The learning flow only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingMaterial {
    pub id: String,
    pub title: String,
    pub stage_id: String,
    #[serde(default)]
    pub majors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub is_generated: bool,
}

impl ReadingMaterial {
    pub fn has_known_stage(&self) -> bool {
        is_known_stage(&self.stage_id)
    }

    pub fn summary(&self) -> MaterialSummary {
        MaterialSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            tags: self
                .majors
                .iter()
                .chain(self.keywords.iter())
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// The slice of a material the gateway sees when picking matches.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialSummary {
    pub id: String,
    pub title: String,
    pub tags: String,
}
