//! Module result document
//!
//! The JSON object a binary module prints on stdout for the framework.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Result reported back to the automation framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleResult {
    /// Prompting never changes remote state
    pub changed: bool,

    /// Extracted model output, empty on failure and in check mode
    pub bedrock_response: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ModuleResult {
    pub fn success(bedrock_response: impl Into<String>) -> Self {
        Self {
            bedrock_response: bedrock_response.into(),
            ..Self::default()
        }
    }

    pub fn failure(error: impl Display) -> Self {
        Self {
            failed: true,
            msg: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_default_result() {
        let value: Value = serde_json::from_str(&ModuleResult::default().to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"changed": false, "bedrock_response": ""}));
    }

    #[test]
    fn test_success_result() {
        let result = ModuleResult::success("Cloud computing offers scalability.");
        let value: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({"changed": false, "bedrock_response": "Cloud computing offers scalability."})
        );
        assert!(!result.is_failed());
    }

    #[test]
    fn test_failure_result() {
        let result = ModuleResult::failure("Access denied: no model access");
        let value: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "changed": false,
                "bedrock_response": "",
                "failed": true,
                "msg": "Access denied: no model access"
            })
        );
    }
}
