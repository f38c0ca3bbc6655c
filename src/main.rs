//! bedrock-prompt
//!
//! Binary module that sends a prompt to AWS Bedrock and prints the result
//! document for the automation framework on stdout.

use anyhow::{Context, Result};
use bedrock_prompt::{
    config::Settings,
    logging::init_tracing,
    module::{run_module, ModuleArgs, ModuleResult},
    services::SdkClientFactory,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Send a prompt to AWS Bedrock and return the response
///
/// Run by the automation framework with the path of its JSON arguments file,
/// or standalone with the parameters given as flags.
#[derive(Parser, Debug)]
#[command(name = "bedrock-prompt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON arguments file written by the automation framework
    #[arg(conflicts_with_all = ["prompt", "model_id", "region", "max_tokens", "check"])]
    args_file: Option<PathBuf>,

    /// Text prompt to send
    #[arg(long)]
    prompt: Option<String>,

    /// Bedrock model ID
    #[arg(long)]
    model_id: Option<String>,

    /// AWS region where Bedrock is called
    #[arg(long)]
    region: Option<String>,

    /// Maximum number of tokens to generate (default: 300)
    #[arg(long, allow_negative_numbers = true)]
    max_tokens: Option<i64>,

    /// Dry run: validate the parameters without calling Bedrock
    #[arg(long)]
    check: bool,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long)]
    log_level: Option<String>,

    /// Append JSON logs to this file in addition to stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Resolve the module parameters from the args file or the flags
    fn module_args(&self) -> Result<ModuleArgs, bedrock_prompt::ModuleError> {
        if let Some(path) = &self.args_file {
            return ModuleArgs::from_file(path);
        }

        ModuleArgs::from_flags(
            self.prompt.as_deref(),
            self.model_id.as_deref(),
            self.region.as_deref(),
            self.max_tokens,
            self.check,
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let result = match run(&args).await {
        Ok(result) => result,
        Err(err) => ModuleResult::failure(format!("{err:#}")),
    };

    println!("{}", result.to_json().context("Failed to serialize module result")?);

    if result.is_failed() {
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: &Args) -> Result<ModuleResult> {
    // Load configuration first (before logging, so we can use log_level)
    let mut settings = Settings::load()?;

    if let Some(log_level) = &args.log_level {
        settings.log_level = log_level.to_lowercase();
        settings.validate()?;
    }

    init_tracing(&settings.log_level, args.log_file.as_deref())
        .context("Failed to open log file")?;

    tracing::debug!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        "Starting module"
    );

    let module_args = match args.module_args() {
        Ok(module_args) => module_args,
        Err(err) => {
            tracing::error!(error = %err, "Invalid module arguments");
            return Ok(ModuleResult::failure(err));
        }
    };

    let factory = SdkClientFactory::new(Arc::new(settings));
    Ok(run_module(&module_args, &factory).await)
}
