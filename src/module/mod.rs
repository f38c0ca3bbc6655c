//! Automation framework module boundary
//!
//! Parses the framework's parameters, honors check mode, builds a client for
//! the requested region and reports the prompt adapter's outcome as a
//! [`ModuleResult`].

pub mod args;
pub mod result;

pub use args::{ModuleArgs, MODULE_NAME, SUPPORTED_PARAMETERS};
pub use result::ModuleResult;

use crate::error::ModuleError;
use crate::services::{invoke, ClientFactory};

/// Run one module invocation.
///
/// Check mode returns the default result without connecting to Bedrock.
/// Failures never escape: they are folded into a failed result.
pub async fn run_module(args: &ModuleArgs, factory: &dyn ClientFactory) -> ModuleResult {
    if args.check_mode {
        tracing::info!(module = MODULE_NAME, "Check mode, skipping Bedrock invocation");
        return ModuleResult::default();
    }

    let request = &args.request;
    let client = factory.connect(&request.region).await;

    match invoke(request, client.as_ref()).await {
        Ok(result) => ModuleResult::success(result.text),
        Err(err) => {
            let err = ModuleError::from(err);
            tracing::error!(module = MODULE_NAME, error = %err, "Module invocation failed");
            ModuleResult::failure(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{RecordingClient, StaticFactory};
    use crate::services::BedrockError;
    use serde_json::json;

    fn args(model_id: &str, check_mode: bool) -> ModuleArgs {
        ModuleArgs::from_value(json!({
            "prompt": "What are the key benefits of cloud computing?",
            "model_id": model_id,
            "region": "us-west-2",
            "max_tokens": 1000,
            "_ansible_check_mode": check_mode
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_check_mode_skips_remote_call() {
        let factory = StaticFactory::new(RecordingClient::replying(json!({"completion": "x"})));

        let result = run_module(&args("anthropic.claude-v2", true), &factory).await;

        assert_eq!(result, ModuleResult::default());
        assert_eq!(factory.connects(), 0);
        assert!(factory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_reports_response() {
        let factory = StaticFactory::new(RecordingClient::replying(json!({
            "content": [{"type": "text", "text": "Scalability and flexibility."}]
        })));

        let result = run_module(&args("anthropic.claude-3-5-sonnet-20240620-v1:0", false), &factory).await;

        assert_eq!(result, ModuleResult::success("Scalability and flexibility."));
        assert!(!result.changed);
        assert_eq!(factory.regions(), vec!["us-west-2".to_string()]);
        assert_eq!(factory.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_reports_message() {
        let factory = StaticFactory::new(RecordingClient::failing(BedrockError::Throttled(
            "ThrottlingException: Too many requests, please wait before trying again.".to_string(),
        )));

        let result = run_module(&args("anthropic.claude-v2", false), &factory).await;

        assert!(result.is_failed());
        assert_eq!(result.bedrock_response, "");
        assert_eq!(
            result.msg.as_deref(),
            Some("ThrottlingException: Too many requests, please wait before trying again.")
        );
    }

    #[tokio::test]
    async fn test_unparseable_body_reports_failure() {
        let factory = StaticFactory::new(RecordingClient::replying_raw(b"not json".to_vec()));

        let result = run_module(&args("anthropic.claude-v2", false), &factory).await;

        assert!(result.is_failed());
        assert!(result.msg.is_some());
    }

    #[tokio::test]
    async fn test_completion_diagnostic_is_not_a_failure() {
        let factory = StaticFactory::new(RecordingClient::replying(json!({"results": []})));

        let result = run_module(&args("amazon.titan-text-express-v1", false), &factory).await;

        assert!(!result.is_failed());
        assert!(result
            .bedrock_response
            .starts_with("No valid response found. Raw response:"));
        assert!(result.bedrock_response.contains("\"results\": []"));
    }
}
