//! Services module
//!
//! Contains the prompt adapter and the Bedrock client integration.

pub mod bedrock;
pub mod prompt;

pub use bedrock::{
    BedrockError, BedrockService, ClientFactory, InferenceClient, InvokeModelInput,
    SdkClientFactory,
};
pub use prompt::{invoke, InferenceResult, PromptRequest, DEFAULT_MAX_TOKENS};
