//! Module error types

use thiserror::Error;

use crate::module::SUPPORTED_PARAMETERS;
use crate::services::BedrockError;

/// Failure of a prompt invocation.
///
/// Serialization, remote call and response parsing failures all collapse
/// into this one kind, carrying the underlying error's description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InvocationError {
    message: String,
}

impl InvocationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<BedrockError> for InvocationError {
    fn from(err: BedrockError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for InvocationError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Errors reported back to the automation framework as `msg`.
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Unable to read module arguments: {0}")]
    ArgsFile(String),

    #[error("missing required arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error(
        "Unsupported parameters for (bedrock_prompt) module: {}. Supported parameters include: {}.",
        .0.join(", "),
        SUPPORTED_PARAMETERS.join(", ")
    )]
    UnsupportedParameters(Vec<String>),

    #[error("argument '{name}' is of type {found} and we were unable to convert to {expected}")]
    InvalidType {
        name: String,
        found: String,
        expected: String,
    },

    #[error("{0}")]
    InvalidValue(String),

    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_error_keeps_message() {
        let err = InvocationError::from(BedrockError::ValidationError(
            "ValidationException: max_tokens_to_sample: range: 1..1,000,000".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "ValidationException: max_tokens_to_sample: range: 1..1,000,000"
        );
    }

    #[test]
    fn test_module_error_messages() {
        let err = ModuleError::MissingArguments(vec!["model_id".into(), "prompt".into()]);
        assert_eq!(err.to_string(), "missing required arguments: model_id, prompt");

        let err = ModuleError::UnsupportedParameters(vec!["temperature".into()]);
        assert_eq!(
            err.to_string(),
            "Unsupported parameters for (bedrock_prompt) module: temperature. \
             Supported parameters include: max_tokens, model_id, prompt, region."
        );

        let err = ModuleError::from(InvocationError::new("boom"));
        assert_eq!(err.to_string(), "boom");
    }
}
