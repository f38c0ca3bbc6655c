//! Wire schemas for Bedrock model invocation

pub mod bedrock;

pub use bedrock::{
    CompletionRequest, MessagesRequest, UserMessage, WireSchema, ANTHROPIC_VERSION,
    JSON_CONTENT_TYPE, NO_RESPONSE_FALLBACK, NO_VALID_RESPONSE_PREFIX,
};
