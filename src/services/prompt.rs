//! Prompt adapter
//!
//! Turns a [`PromptRequest`] into one `InvokeModel` call using the wire
//! schema selected from the model ID, and extracts the generated text from
//! the response.

use serde_json::Value;
use validator::Validate;

use crate::error::InvocationError;
use crate::schemas::WireSchema;
use crate::services::bedrock::{InferenceClient, InvokeModelInput};

/// Token budget used when the caller does not set one
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Normalized prompt invocation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct PromptRequest {
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,

    #[validate(length(min = 1, message = "model_id must not be empty"))]
    pub model_id: String,

    pub region: String,

    #[validate(range(min = 1, message = "max_tokens must be greater than 0"))]
    pub max_tokens: u32,
}

impl PromptRequest {
    /// Create a request with the default token budget
    pub fn new(
        prompt: impl Into<String>,
        model_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: model_id.into(),
            region: region.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Wire schema this request will be sent with
    pub fn schema(&self) -> WireSchema {
        WireSchema::for_model(&self.model_id)
    }
}

/// Text generated for a request, alongside the parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    pub text: String,
    pub raw_response: Value,
}

/// Send `request` through `client` and extract the generated text.
pub async fn invoke(
    request: &PromptRequest,
    client: &dyn InferenceClient,
) -> Result<InferenceResult, InvocationError> {
    let schema = request.schema();

    tracing::info!(
        model_id = %request.model_id,
        region = %request.region,
        schema = %schema,
        max_tokens = request.max_tokens,
        prompt_chars = request.prompt.chars().count(),
        "Invoking Bedrock model"
    );

    let body = schema.build_body(&request.prompt, request.max_tokens)?;
    let input = InvokeModelInput::json(&request.model_id, body);

    let response = client.invoke_model(input).await.map_err(|err| {
        tracing::warn!(error_kind = err.kind(), error = %err, "Bedrock invocation failed");
        InvocationError::from(err)
    })?;

    let raw_response: Value = serde_json::from_slice(&response)?;
    let text = schema.extract_text(&raw_response);

    tracing::debug!(response_chars = text.chars().count(), "Extracted response text");

    Ok(InferenceResult { text, raw_response })
}
