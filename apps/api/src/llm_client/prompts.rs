// Shared prompt fragments used by every gateway operation.
// Operation-specific prompts live in gateway/prompts.rs.

/// Appended to system prompts that expect a JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Markdown tables do not survive the chat renderer.
pub const NO_TABLES_INSTRUCTION: &str = "Never use markdown tables.";

/// Language instruction. Replace `{language}` before sending.
pub const LANGUAGE_INSTRUCTION_TEMPLATE: &str = "Always answer in {language}.";

pub fn language_instruction(language: &str) -> String {
    LANGUAGE_INSTRUCTION_TEMPLATE.replace("{language}", language)
}
