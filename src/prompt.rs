use serde_json::{Map, Value};

use crate::error::Result;

/// Builds the instruction sent to the model for structured extraction.
pub fn build_extraction_prompt(schema: &Map<String, Value>, text: &str) -> Result<String> {
    let schema = serde_json::to_string_pretty(schema)?;

    let mut result = String::with_capacity(schema.len() + text.len() + 200);
    result.push_str("Extract information from the following text according to this JSON schema:\n\n");
    result.push_str("Schema:\n");
    result.push_str(&schema);
    result.push_str("\n\nText:\n");
    result.push_str(text);
    result.push_str("\n\nReturn ONLY valid JSON matching the schema above, with no additional text or explanation.");
    Ok(result)
}
