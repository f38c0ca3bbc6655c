//! Module argument parsing
//!
//! The framework hands a binary module the path of a JSON file holding its
//! parameters. The parameters are either a flat object or wrapped under
//! `ANSIBLE_MODULE_ARGS`, and may carry framework-internal `_ansible_*`
//! keys. Validation follows the framework's argument spec conventions.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use validator::Validate;

use crate::error::ModuleError;
use crate::services::{PromptRequest, DEFAULT_MAX_TOKENS};

/// Name the framework knows this module by
pub const MODULE_NAME: &str = "bedrock_prompt";

/// Accepted parameters, sorted
pub const SUPPORTED_PARAMETERS: [&str; 4] = ["max_tokens", "model_id", "prompt", "region"];

const REQUIRED_PARAMETERS: [&str; 3] = ["model_id", "prompt", "region"];

const WRAPPER_KEY: &str = "ANSIBLE_MODULE_ARGS";
const INTERNAL_PREFIX: &str = "_ansible_";
const CHECK_MODE_KEY: &str = "_ansible_check_mode";

/// Validated module parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleArgs {
    pub request: PromptRequest,

    /// Dry run requested by the framework
    pub check_mode: bool,
}

impl ModuleArgs {
    /// Read and validate the framework's args file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ModuleError::ArgsFile(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ModuleError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ModuleError::ArgsFile(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build the parameters from standalone command-line flags
    ///
    /// Absent flags are left out so the usual missing-argument checks apply.
    pub fn from_flags(
        prompt: Option<&str>,
        model_id: Option<&str>,
        region: Option<&str>,
        max_tokens: Option<i64>,
        check_mode: bool,
    ) -> Result<Self, ModuleError> {
        let mut params = Map::new();
        let flags = [("prompt", prompt), ("model_id", model_id), ("region", region)];
        for (name, value) in flags {
            if let Some(value) = value {
                params.insert(name.to_string(), Value::from(value));
            }
        }
        if let Some(max_tokens) = max_tokens {
            params.insert("max_tokens".to_string(), Value::from(max_tokens));
        }
        params.insert(CHECK_MODE_KEY.to_string(), Value::Bool(check_mode));

        Self::from_value(Value::Object(params))
    }

    pub fn from_value(value: Value) -> Result<Self, ModuleError> {
        let mut params = match value {
            Value::Object(params) => params,
            other => {
                return Err(ModuleError::ArgsFile(format!(
                    "expected a JSON object, found {}",
                    type_name(&other)
                )))
            }
        };

        if let Some(Value::Object(inner)) = params.remove(WRAPPER_KEY) {
            params = inner;
        }

        let mut unsupported: Vec<String> = params
            .keys()
            .filter(|key| !key.starts_with(INTERNAL_PREFIX))
            .filter(|key| !SUPPORTED_PARAMETERS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unsupported.is_empty() {
            unsupported.sort();
            return Err(ModuleError::UnsupportedParameters(unsupported));
        }

        let missing: Vec<String> = REQUIRED_PARAMETERS
            .iter()
            .filter(|name| params.get(**name).map_or(true, Value::is_null))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ModuleError::MissingArguments(missing));
        }

        let request = PromptRequest {
            prompt: str_param(&params, "prompt")?,
            model_id: str_param(&params, "model_id")?,
            region: str_param(&params, "region")?,
            max_tokens: max_tokens_param(&params)?,
        };
        request
            .validate()
            .map_err(|e| ModuleError::InvalidValue(e.to_string()))?;

        let check_mode = params
            .get(CHECK_MODE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            request,
            check_mode,
        })
    }
}

/// Read a `str` parameter, converting scalars the way the framework does
fn str_param(params: &Map<String, Value>, name: &str) -> Result<String, ModuleError> {
    match params.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(value.to_string()),
        Some(value) => Err(invalid_type(name, value, "str")),
        None => Err(ModuleError::MissingArguments(vec![name.to_string()])),
    }
}

/// Read `max_tokens`, accepting integers and integer-valued strings
fn max_tokens_param(params: &Map<String, Value>) -> Result<u32, ModuleError> {
    const NAME: &str = "max_tokens";

    let value = match params.get(NAME) {
        None | Some(Value::Null) => return Ok(DEFAULT_MAX_TOKENS),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let tokens = parsed.ok_or_else(|| invalid_type(NAME, value, "int"))?;
    u32::try_from(tokens)
        .ok()
        .filter(|tokens| *tokens > 0)
        .ok_or_else(|| {
            ModuleError::InvalidValue(format!("max_tokens must be a positive integer, got {tokens}"))
        })
}

fn invalid_type(name: &str, value: &Value, expected: &str) -> ModuleError {
    ModuleError::InvalidType {
        name: name.to_string(),
        found: type_name(value).to_string(),
        expected: expected.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
