//! Typed view of the JSON the material-generation prompt asks for, with
//! required-field checks. A payload either validates completely or is
//! rejected as `GatewayError::Malformed`.

use serde::Deserialize;

use crate::gateway::{GatewayError, GeneratedMaterial, MaterialSuggestion};
use crate::models::stage::is_known_stage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSuggestion {
    #[serde(default)]
    pub recommended_ids: Vec<String>,
    pub generated_material: Option<RawGeneratedMaterial>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeneratedMaterial {
    pub title: Option<String>,
    pub stage_id: Option<String>,
    pub content: Option<String>,
    pub majors: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}

impl RawSuggestion {
    pub fn into_suggestion(self) -> Result<MaterialSuggestion, GatewayError> {
        let generated = self
            .generated_material
            .map(RawGeneratedMaterial::validate)
            .transpose()?;

        let mut recommended_ids = Vec::new();
        for id in self.recommended_ids {
            let id = id.trim().to_string();
            if !id.is_empty() && !recommended_ids.contains(&id) {
                recommended_ids.push(id);
            }
        }

        Ok(MaterialSuggestion {
            recommended_ids,
            generated,
        })
    }
}

impl RawGeneratedMaterial {
    fn validate(self) -> Result<GeneratedMaterial, GatewayError> {
        let title = required_text(self.title, "title")?;
        let content = required_text(self.content, "content")?;
        let stage_id = required_text(self.stage_id, "stageId")?;
        if !is_known_stage(&stage_id) {
            return Err(GatewayError::Malformed(format!(
                "generatedMaterial.stageId '{stage_id}' is not a value-chain stage"
            )));
        }
        let majors = self.majors.ok_or_else(|| missing("majors"))?;
        let keywords = self.keywords.ok_or_else(|| missing("keywords"))?;

        Ok(GeneratedMaterial {
            title,
            stage_id,
            content,
            majors,
            keywords,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, GatewayError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(missing(field)),
    }
}

fn missing(field: &str) -> GatewayError {
    GatewayError::Malformed(format!("generatedMaterial.{field} is missing"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<MaterialSuggestion, GatewayError> {
        serde_json::from_value::<RawSuggestion>(json)
            .unwrap()
            .into_suggestion()
    }

    #[test]
    fn test_complete_payload_validates() {
        let suggestion = parse(serde_json::json!({
            "recommendedIds": ["mat_fab_water", "mat_fab_water", "mat_neon_supply", "extra"],
            "generatedMaterial": {
                "title": "Designing fabs that share water",
                "stageId": "step3",
                "content": "## [Deep dive] ...",
                "majors": ["Architecture"],
                "keywords": ["water", "fab design"]
            }
        }))
        .unwrap();

        assert_eq!(
            suggestion.recommended_ids,
            ["mat_fab_water", "mat_neon_supply", "extra"]
        );
        let generated = suggestion.generated.unwrap();
        assert_eq!(generated.stage_id, "step3");
        assert_eq!(generated.majors, ["Architecture"]);
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let result = parse(serde_json::json!({
            "recommendedIds": [],
            "generatedMaterial": {
                "title": "No body",
                "stageId": "step1",
                "majors": [],
                "keywords": []
            }
        }));
        assert!(matches!(result, Err(GatewayError::Malformed(msg)) if msg.contains("content")));
    }

    #[test]
    fn test_unknown_stage_is_malformed() {
        let result = parse(serde_json::json!({
            "generatedMaterial": {
                "title": "T",
                "stageId": "step8",
                "content": "C",
                "majors": [],
                "keywords": []
            }
        }));
        assert!(matches!(result, Err(GatewayError::Malformed(_))));
    }

    #[test]
    fn test_absent_generated_material_is_none() {
        let suggestion = parse(serde_json::json!({ "recommendedIds": ["a"] })).unwrap();
        assert_eq!(suggestion.recommended_ids, ["a"]);
        assert!(suggestion.generated.is_none());
    }
}
