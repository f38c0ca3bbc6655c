//! Bedrock service for AWS Bedrock API interactions
//!
//! This module wraps the Bedrock Runtime `InvokeModel` operation behind the
//! [`InferenceClient`] trait so the prompt adapter can be driven by the real
//! SDK client or by an in-process double.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::{operation::invoke_model::InvokeModelError, Client as BedrockRuntimeClient};
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::{error::display::DisplayErrorContext, Blob};
use std::sync::Arc;

use crate::config::{create_bedrock_client, Settings};
use crate::schemas::JSON_CONTENT_TYPE;

/// Input of a single `InvokeModel` call.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeModelInput {
    /// Bedrock model ID or inference profile
    pub model_id: String,

    /// Serialized request body
    pub body: Vec<u8>,

    /// Accepted response content type
    pub accept: String,

    /// Request body content type
    pub content_type: String,
}

impl InvokeModelInput {
    /// Create an input exchanging JSON in both directions.
    pub fn json(model_id: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            model_id: model_id.into(),
            body,
            accept: JSON_CONTENT_TYPE.to_string(),
            content_type: JSON_CONTENT_TYPE.to_string(),
        }
    }
}

/// Capability to invoke a hosted model and return the raw response body.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn invoke_model(&self, input: InvokeModelInput) -> Result<Vec<u8>, BedrockError>;
}

/// Builds an [`InferenceClient`] for a region.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self, region: &str) -> Box<dyn InferenceClient>;
}

/// Service for interacting with AWS Bedrock API.
#[derive(Clone)]
pub struct BedrockService {
    /// AWS Bedrock Runtime SDK client
    client: BedrockRuntimeClient,
}

impl BedrockService {
    /// Create a new Bedrock service.
    pub fn new(client: BedrockRuntimeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InferenceClient for BedrockService {
    async fn invoke_model(&self, input: InvokeModelInput) -> Result<Vec<u8>, BedrockError> {
        tracing::debug!(
            model_id = %input.model_id,
            body_bytes = input.body.len(),
            "Calling Bedrock InvokeModel API"
        );

        let output = self
            .client
            .invoke_model()
            .model_id(&input.model_id)
            .body(Blob::new(input.body))
            .accept(input.accept)
            .content_type(input.content_type)
            .send()
            .await
            .map_err(BedrockError::from_invoke_model_error)?;

        let body = output.body.into_inner();

        tracing::debug!(
            response_bytes = body.len(),
            "Bedrock InvokeModel API call completed"
        );

        Ok(body)
    }
}

/// Creates SDK-backed Bedrock services from application settings.
#[derive(Clone)]
pub struct SdkClientFactory {
    settings: Arc<Settings>,
}

impl SdkClientFactory {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ClientFactory for SdkClientFactory {
    async fn connect(&self, region: &str) -> Box<dyn InferenceClient> {
        let client = create_bedrock_client(&self.settings, region).await;
        Box::new(BedrockService::new(client))
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during Bedrock API calls
///
/// The variant classifies the failure for logs; the payload is the SDK's own
/// description of the error and is what gets reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BedrockError {
    /// Model not found
    #[error("{0}")]
    ModelNotFound(String),

    /// Throttling error (rate limited or quota exceeded)
    #[error("{0}")]
    Throttled(String),

    /// Validation error (invalid request)
    #[error("{0}")]
    ValidationError(String),

    /// Service unavailable
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Access denied
    #[error("{0}")]
    AccessDenied(String),

    /// Model failed while processing the request
    #[error("{0}")]
    ModelError(String),

    /// Internal service error
    #[error("{0}")]
    InternalError(String),

    /// Transport, credential or unmodeled failure
    #[error("{0}")]
    Unknown(String),
}

impl BedrockError {
    /// Create BedrockError from InvokeModel API error
    pub fn from_invoke_model_error<R>(err: SdkError<InvokeModelError, R>) -> Self
    where
        R: std::fmt::Debug,
    {
        let SdkError::ServiceError(service_err) = &err else {
            return BedrockError::Unknown(DisplayErrorContext(&err).to_string());
        };

        let error = service_err.err();
        let message = error.to_string();
        match error {
            InvokeModelError::ThrottlingException(_)
            | InvokeModelError::ServiceQuotaExceededException(_) => {
                BedrockError::Throttled(message)
            }
            InvokeModelError::ValidationException(_) => BedrockError::ValidationError(message),
            InvokeModelError::ModelNotReadyException(_)
            | InvokeModelError::ModelTimeoutException(_)
            | InvokeModelError::ServiceUnavailableException(_) => {
                BedrockError::ServiceUnavailable(message)
            }
            InvokeModelError::InternalServerException(_) => BedrockError::InternalError(message),
            InvokeModelError::AccessDeniedException(_) => BedrockError::AccessDenied(message),
            InvokeModelError::ResourceNotFoundException(_) => BedrockError::ModelNotFound(message),
            InvokeModelError::ModelErrorException(_) => BedrockError::ModelError(message),
            _ => BedrockError::Unknown(DisplayErrorContext(error).to_string()),
        }
    }

    /// Stable category name used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            BedrockError::ModelNotFound(_) => "model_not_found",
            BedrockError::Throttled(_) => "throttled",
            BedrockError::ValidationError(_) => "validation",
            BedrockError::ServiceUnavailable(_) => "service_unavailable",
            BedrockError::AccessDenied(_) => "access_denied",
            BedrockError::ModelError(_) => "model_error",
            BedrockError::InternalError(_) => "internal",
            BedrockError::Unknown(_) => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockruntime::types::error::{
        AccessDeniedException, ServiceQuotaExceededException, ValidationException,
    };
    use aws_smithy_runtime_api::http::{Response as HttpResponse, StatusCode};
    use aws_smithy_types::body::SdkBody;

    #[test]
    fn test_json_input() {
        let input = InvokeModelInput::json("anthropic.claude-v2", b"{}".to_vec());

        assert_eq!(input.model_id, "anthropic.claude-v2");
        assert_eq!(input.accept, "application/json");
        assert_eq!(input.content_type, "application/json");
        assert_eq!(input.body, b"{}");
    }

    fn service_error(error: InvokeModelError, status: u16) -> SdkError<InvokeModelError, HttpResponse> {
        let response = HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty());
        SdkError::service_error(error, response)
    }

    #[test]
    fn test_service_error_keeps_sdk_description() {
        let err = BedrockError::from_invoke_model_error(service_error(
            InvokeModelError::ServiceQuotaExceededException(
                ServiceQuotaExceededException::builder().message("quota hit").build(),
            ),
            429,
        ));

        assert_eq!(err.kind(), "throttled");
        assert_eq!(err.to_string(), "ServiceQuotaExceededException: quota hit");
    }

    #[test]
    fn test_service_errors_are_classified_for_logs() {
        let err = BedrockError::from_invoke_model_error(service_error(
            InvokeModelError::AccessDeniedException(
                AccessDeniedException::builder()
                    .message("You don't have access to the model")
                    .build(),
            ),
            403,
        ));
        assert!(matches!(err, BedrockError::AccessDenied(_)));
        assert_eq!(
            err.to_string(),
            "AccessDeniedException: You don't have access to the model"
        );

        let err = BedrockError::from_invoke_model_error(service_error(
            InvokeModelError::ValidationException(ValidationException::builder().build()),
            400,
        ));
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.to_string(), "ValidationException");
    }

    #[test]
    fn test_error_display_and_kind() {
        let err = BedrockError::Throttled("ThrottlingException: Too many requests".to_string());
        assert_eq!(err.to_string(), "ThrottlingException: Too many requests");
        assert_eq!(err.kind(), "throttled");

        let err = BedrockError::Unknown("dispatch failure".to_string());
        assert_eq!(err.to_string(), "dispatch failure");
        assert_eq!(err.kind(), "unknown");
    }

    #[tokio::test]
    async fn test_sdk_client_factory_connect() {
        let factory = SdkClientFactory::new(Arc::new(Settings::default()));
        let _client = factory.connect("us-west-2").await;
        // Client created without any network access
    }
}
