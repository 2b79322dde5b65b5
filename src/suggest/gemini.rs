use std::time::Duration;

use serde_json::{Value, json};

use crate::suggest::{SuggestError, SuggestionBackend};

const PROMPT: &str = "You are an address autocompletion service. Given a partial \
address, suggest a list of possible complete addresses. Respond with only a JSON \
array of strings, most relevant first.";

/// Gemini `generateContent` backend. The model is prompted to emit a JSON
/// array of address strings which is parsed out of the first candidate.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, SuggestError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SuggestError::Unreachable(format!("failed to build client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            model,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait::async_trait]
impl SuggestionBackend for GeminiBackend {
    async fn complete(&self, partial_address: &str) -> Result<Vec<String>, SuggestError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": format!("{PROMPT}\n\nPartial Address: {partial_address}") }]
            }]
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| SuggestError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::Unreachable(format!(
                "backend returned status {status}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| SuggestError::Malformed(err.to_string()))?;

        let text = payload
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.pointer("/content/parts/0/text"))
            .and_then(Value::as_str)
            .ok_or_else(|| SuggestError::Malformed("missing candidate text".to_string()))?;

        parse_suggestions(text)
    }
}

/// Extracts the JSON array the model was asked for, tolerating markdown
/// code fences around it.
pub(crate) fn parse_suggestions(text: &str) -> Result<Vec<String>, SuggestError> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let values: Vec<Value> = serde_json::from_str(trimmed)
        .map_err(|err| SuggestError::Malformed(format!("not a JSON array: {err}")))?;

    values
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            other => Err(SuggestError::Malformed(format!(
                "array element is not a string: {other}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_suggestions;

    #[test]
    fn parses_plain_json_array() {
        let suggestions = parse_suggestions(r#"["Av. Italia 1234, Montevideo"]"#).unwrap();
        assert_eq!(suggestions, vec!["Av. Italia 1234, Montevideo".to_string()]);
    }

    #[test]
    fn parses_fenced_json_array_and_keeps_order() {
        let text = "```json\n[\"18 de Julio 1500\", \"18 de Julio 1502\"]\n```";
        let suggestions = parse_suggestions(text).unwrap();
        assert_eq!(
            suggestions,
            vec!["18 de Julio 1500".to_string(), "18 de Julio 1502".to_string()]
        );
    }

    #[test]
    fn prose_output_is_malformed() {
        assert!(parse_suggestions("I suggest Av. Italia 1234.").is_err());
    }

    #[test]
    fn non_string_elements_are_malformed() {
        assert!(parse_suggestions(r#"[{"direccion": "Av. Italia"}]"#).is_err());
    }
}
