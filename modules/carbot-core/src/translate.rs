use ai_client::{strip_code_blocks, OpenAi};
use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::deps::FilterTranslator;
use crate::schema;
use crate::types::SearchFilters;

/// System prompt preamble for filter extraction.
const SYSTEM_PREAMBLE: &str = r#"You are a query parser for a car-shopping bot.

Given a free-text car description, fill in the search filters below. Use null
for anything the description does not mention. Only use exact values from the
allowed vocabulary. Write make and model the way the manufacturer does
(e.g. "BMW", "Mercedes-Benz", "Toyota", "3 Series", "Corolla").

## Allowed vocabulary
"#;

const WORKED_EXAMPLES: &str = r#"
## Examples
"red bmw convertible"
{"make":"BMW","model":null,"exterior_color":"red","body_style":"convertible","category":null,"condition":null,"features":null,"transmission":null,"driveline":null,"sort_order":null}

"cheap used toyota with a backup camera"
{"make":"Toyota","model":null,"exterior_color":null,"body_style":null,"category":null,"condition":"used","features":"backup_camera","transmission":null,"driveline":null,"sort_order":"price:asc"}

"newest manual muscle car"
{"make":null,"model":null,"exterior_color":null,"body_style":null,"category":"muscle","condition":null,"features":null,"transmission":"manual","driveline":null,"sort_order":"year:desc"}
"#;

pub fn system_prompt() -> String {
    format!(
        "{}{}{}",
        SYSTEM_PREAMBLE,
        schema::vocabulary_block(),
        WORKED_EXAMPLES
    )
}

/// Strict response schema: exactly the ten filter keys, each an allowed
/// value or null, nothing else.
pub fn response_schema() -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    for key in schema::FILTER_KEYS {
        let property = match schema::allowed_values(key) {
            Some(values) => {
                let mut options: Vec<serde_json::Value> =
                    values.iter().map(|v| json!(v)).collect();
                options.push(serde_json::Value::Null);
                json!({ "type": ["string", "null"], "enum": options })
            }
            None => json!({ "type": ["string", "null"] }),
        };
        properties.insert((*key).to_string(), property);
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": schema::FILTER_KEYS,
        "additionalProperties": false,
    })
}

/// Parse completion output into filters. `None` for empty or non-JSON
/// output. Null-valued keys come back absent; non-null values are passed
/// through verbatim (the defensive vocabulary pass happens at query-build
/// time, not here).
pub fn parse_filters(raw: &str) -> Option<SearchFilters> {
    let cleaned = strip_code_blocks(raw);
    if cleaned.is_empty() {
        return None;
    }
    match serde_json::from_str(cleaned) {
        Ok(filters) => Some(filters),
        Err(e) => {
            warn!(error = %e, "completion output was not valid filter JSON");
            None
        }
    }
}

/// OpenAI-backed implementation of the translation seam.
pub struct OpenAiTranslator {
    ai: OpenAi,
}

impl OpenAiTranslator {
    pub fn new(ai: OpenAi) -> Self {
        Self { ai }
    }
}

#[async_trait]
impl FilterTranslator for OpenAiTranslator {
    async fn translate(&self, free_text: &str) -> SearchFilters {
        match self
            .ai
            .structured_output(&system_prompt(), free_text, response_schema())
            .await
        {
            Ok(raw) => parse_filters(&raw).unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "filter translation failed, searching on price alone");
                SearchFilters::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_output_parses_to_none() {
        assert!(parse_filters("the best car is a red one").is_none());
    }

    #[test]
    fn empty_and_whitespace_output_parse_to_none() {
        assert!(parse_filters("").is_none());
        assert!(parse_filters("   \n  ").is_none());
    }

    #[test]
    fn fenced_json_parses() {
        let raw = "```json\n{\"make\":\"BMW\",\"model\":null,\"exterior_color\":\"red\",\
                   \"body_style\":null,\"category\":null,\"condition\":null,\"features\":null,\
                   \"transmission\":null,\"driveline\":null,\"sort_order\":null}\n```";
        let filters = parse_filters(raw).unwrap();
        assert_eq!(filters.make.as_deref(), Some("BMW"));
        assert_eq!(filters.exterior_color.as_deref(), Some("red"));
    }

    #[test]
    fn null_values_become_absent() {
        let raw = r#"{"make":null,"model":null,"exterior_color":"blue","body_style":null,
                      "category":null,"condition":null,"features":null,"transmission":null,
                      "driveline":null,"sort_order":null}"#;
        let filters = parse_filters(raw).unwrap();
        assert!(filters.make.is_none());
        assert_eq!(filters.exterior_color.as_deref(), Some("blue"));
    }

    #[test]
    fn non_null_values_pass_through_verbatim() {
        // The translator does not re-validate vocabulary membership; even an
        // out-of-vocabulary value survives until the query is built.
        let raw = r#"{"make":"BMW","model":"3 Series","exterior_color":"neon",
                      "body_style":"sedan","category":"sport","condition":"used",
                      "features":"sunroof","transmission":"manual","driveline":"AWD",
                      "sort_order":"price:asc"}"#;
        let filters = parse_filters(raw).unwrap();
        assert_eq!(filters.make.as_deref(), Some("BMW"));
        assert_eq!(filters.model.as_deref(), Some("3 Series"));
        assert_eq!(filters.exterior_color.as_deref(), Some("neon"));
        assert_eq!(filters.body_style.as_deref(), Some("sedan"));
        assert_eq!(filters.category.as_deref(), Some("sport"));
        assert_eq!(filters.condition.as_deref(), Some("used"));
        assert_eq!(filters.features.as_deref(), Some("sunroof"));
        assert_eq!(filters.transmission.as_deref(), Some("manual"));
        assert_eq!(filters.driveline.as_deref(), Some("AWD"));
        assert_eq!(filters.sort_order.as_deref(), Some("price:asc"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw = r#"{"make":"BMW","horsepower":"300"}"#;
        let filters = parse_filters(raw).unwrap();
        assert_eq!(filters.make.as_deref(), Some("BMW"));
    }

    #[test]
    fn response_schema_covers_all_ten_keys() {
        let schema_value = response_schema();
        let properties = schema_value["properties"].as_object().unwrap();
        assert_eq!(properties.len(), schema::FILTER_KEYS.len());
        assert_eq!(
            schema_value["required"].as_array().unwrap().len(),
            schema::FILTER_KEYS.len()
        );
        assert_eq!(schema_value["additionalProperties"], serde_json::json!(false));
    }

    #[test]
    fn system_prompt_carries_the_vocabulary() {
        let prompt = system_prompt();
        assert!(prompt.contains("certified pre-owned"));
        assert!(prompt.contains("4X4"));
        assert!(prompt.contains("price:asc"));
    }
}
