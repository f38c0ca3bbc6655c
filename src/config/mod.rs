//! Configuration management module
//!
//! This module handles loading and validating application configuration
//! from environment variables and .env files, and building AWS SDK clients.

pub mod aws;
pub mod settings;

pub use aws::{build_aws_config, create_bedrock_client, AwsConfigBuilder};
pub use settings::Settings;
