//! Bedrock prompt module library
//!
//! Sends a prompt to a model hosted on AWS Bedrock and reports the generated
//! text back to an automation framework.

// Public modules
pub mod config;
pub mod error;
pub mod logging;
pub mod module;
pub mod schemas;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use error::{InvocationError, ModuleError};
pub use module::{run_module, ModuleArgs, ModuleResult};
pub use schemas::WireSchema;
pub use services::{invoke, InferenceClient, InferenceResult, PromptRequest};
