use serde::Serialize;
use serde_json::Value;

use super::types::GenerativeClient;
use super::GenerativeError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Longest slice of a non-JSON error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Gemini `generateContent` client.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, GenerativeError> {
        if api_key.trim().is_empty() {
            return Err(GenerativeError::MissingApiKey);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerativeError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.trim().to_string(),
            client,
            timeout_secs,
        })
    }

    /// Endpoint URL without the key query parameter.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Request body for `generateContent`.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

impl GenerativeClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
        let url = self.endpoint();
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Gemini request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    GenerativeError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    GenerativeError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    // The URL carries the key; keep it out of the message.
                    GenerativeError::HttpClient(e.without_url().to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| GenerativeError::ResponseParsing(e.without_url().to_string()))?;

        interpret_response(status, &body)
    }
}

/// Turn a raw HTTP status and body from `generateContent` into text.
///
/// An `error` object in the body wins over the status code; a success
/// status with no usable text is `EmptyResponse`.
pub fn interpret_response(status: u16, body: &str) -> Result<String, GenerativeError> {
    let success = (200..300).contains(&status);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !success => {
            return Err(GenerativeError::Api {
                status,
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            })
        }
        Err(e) => return Err(GenerativeError::ResponseParsing(e.to_string())),
    };

    if let Some(message) = api_error_message(&value) {
        return Err(GenerativeError::Api { status, message });
    }
    if !success {
        return Err(GenerativeError::Api {
            status,
            message: format!("Gemini HTTP {status}"),
        });
    }

    let text = extract_generated_text(&value);
    if text.is_empty() {
        Err(GenerativeError::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// Collect every text part from `candidates[].content.parts[]`.
///
/// Each part contributes its `text` string, or `generatedContent` when
/// `text` is absent. Fields that are missing or not strings are skipped.
/// Parts are joined with newlines and the result trimmed.
pub fn extract_generated_text(response: &Value) -> String {
    let Some(candidates) = response.get("candidates").and_then(Value::as_array) else {
        return String::new();
    };

    let parts: Vec<&str> = candidates
        .iter()
        .filter_map(|c| c.get("content")?.get("parts")?.as_array())
        .flatten()
        .filter_map(|p| {
            p.get("text")
                .and_then(Value::as_str)
                .or_else(|| p.get("generatedContent").and_then(Value::as_str))
        })
        .collect();

    parts.join("\n").trim().to_string()
}

fn api_error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown Gemini error")
                .to_string(),
        ),
    }
}
