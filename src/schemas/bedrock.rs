//! Bedrock InvokeModel wire schemas
//!
//! Anthropic models on Bedrock accept two different request bodies through
//! `InvokeModel`: the Messages API used by the Claude 3 Sonnet family and the
//! legacy Text Completions API. This module owns both request shapes, the
//! rule that picks one from a model ID, and the extraction of generated text
//! from the (loosely shaped) JSON response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `anthropic_version` sent with every Messages API request.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Content type used for both the request body and the accepted response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Returned when a Messages API response carries no text content.
pub const NO_RESPONSE_FALLBACK: &str = "No response from Bedrock";

/// Prefix of the diagnostic returned when a completion response has no text.
pub const NO_VALID_RESPONSE_PREFIX: &str = "No valid response found. Raw response: ";

/// Model ID fragments routed to the Messages API.
const MESSAGES_MODEL_MARKERS: [&str; 2] = ["claude-3-sonnet", "claude-3-5-sonnet"];

/// Turn marker of the legacy completion prompt template.
const HUMAN_TURN: &str = "\n\nHuman:";

const COMPLETION_TEMPERATURE: f64 = 0.5;
const COMPLETION_TOP_P: u8 = 1;

// ============================================================================
// Request Bodies
// ============================================================================

/// Single user turn of a Messages API request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserMessage {
    pub role: String,
    pub content: String,
}

/// Messages API request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagesRequest {
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub messages: Vec<UserMessage>,
}

impl MessagesRequest {
    /// Build a one-turn request for `prompt`.
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens,
            messages: vec![UserMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
        }
    }
}

/// Text Completions API request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens_to_sample: u32,
    pub temperature: f64,
    pub top_p: u8,
    pub stop_sequences: Vec<String>,
}

impl CompletionRequest {
    /// Wrap `prompt` in the Human/Assistant template.
    pub fn new(prompt: &str, max_tokens: u32) -> Self {
        Self {
            prompt: format!("{HUMAN_TURN} {prompt}\n\nAssistant:"),
            max_tokens_to_sample: max_tokens,
            temperature: COMPLETION_TEMPERATURE,
            top_p: COMPLETION_TOP_P,
            stop_sequences: vec![HUMAN_TURN.to_string()],
        }
    }
}

// ============================================================================
// Schema Selection
// ============================================================================

/// Request/response format used for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireSchema {
    /// Anthropic Messages API (`content[0].text` responses)
    Messages,
    /// Legacy Text Completions API (`completion` responses)
    Completion,
}

impl WireSchema {
    /// Pick the schema for a model ID.
    ///
    /// This is a plain substring match: any ID containing `claude-3-sonnet`
    /// or `claude-3-5-sonnet` uses the Messages API, everything else falls
    /// back to completions.
    pub fn for_model(model_id: &str) -> Self {
        if MESSAGES_MODEL_MARKERS
            .iter()
            .any(|marker| model_id.contains(marker))
        {
            WireSchema::Messages
        } else {
            WireSchema::Completion
        }
    }

    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            WireSchema::Messages => "messages",
            WireSchema::Completion => "completion",
        }
    }

    /// Serialize the request body for this schema.
    pub fn build_body(&self, prompt: &str, max_tokens: u32) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            WireSchema::Messages => serde_json::to_vec(&MessagesRequest::new(prompt, max_tokens)),
            WireSchema::Completion => {
                serde_json::to_vec(&CompletionRequest::new(prompt, max_tokens))
            }
        }
    }

    /// Pull the generated text out of a parsed response body.
    ///
    /// Missing fields never fail: they degrade to a fallback string.
    pub fn extract_text(&self, response: &Value) -> String {
        match self {
            WireSchema::Messages => extract_messages_text(response),
            WireSchema::Completion => extract_completion_text(response),
        }
    }
}

impl std::fmt::Display for WireSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Response Extraction
// ============================================================================

fn extract_messages_text(response: &Value) -> String {
    let text = response
        .get("content")
        .and_then(Value::as_array)
        .and_then(|content| content.first())
        .and_then(|block| block.get("text"));

    match text {
        Some(text) if !text.is_null() => value_text(text),
        _ => NO_RESPONSE_FALLBACK.to_string(),
    }
}

fn extract_completion_text(response: &Value) -> String {
    if let Some(completion) = response.get("completion") {
        return value_text(completion);
    }

    if let Some(text) = response.get("output").and_then(|output| output.get("text")) {
        return value_text(text);
    }

    let raw = serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string());
    format!("{NO_VALID_RESPONSE_PREFIX}{raw}")
}

/// Render a JSON value as response text; strings are taken verbatim.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
