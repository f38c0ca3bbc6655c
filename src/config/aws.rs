//! AWS SDK configuration
//!
//! Builds the Bedrock Runtime client for the region a module invocation
//! asks for. Credentials come from the SDK's default provider chain.

use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, Region, SdkConfig};
use aws_sdk_bedrockruntime::Client as BedrockRuntimeClient;

use crate::config::Settings;

/// AWS configuration builder
///
/// Creates AWS SDK configuration with support for:
/// - The region requested by the caller, falling back to the default chain
/// - Credential providers (environment, profile, instance profile, etc.)
/// - A custom Bedrock endpoint URL for local testing
pub struct AwsConfigBuilder<'a> {
    settings: &'a Settings,
}

impl<'a> AwsConfigBuilder<'a> {
    /// Create a new AWS configuration builder
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Build the base AWS SDK configuration for `region`
    ///
    /// A blank region defers entirely to the default region provider.
    pub async fn build_sdk_config(&self, region: &str) -> SdkConfig {
        let region = region.trim();
        let region_provider = if region.is_empty() {
            RegionProviderChain::default_provider()
        } else {
            RegionProviderChain::first_try(Region::new(region.to_string())).or_default_provider()
        };

        aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await
    }

    /// Create a Bedrock Runtime client with optional custom endpoint
    ///
    /// If `BEDROCK_ENDPOINT_URL` is set in settings, the client will use
    /// that endpoint (useful for testing with mocks).
    pub async fn build_bedrock_client(&self, region: &str) -> BedrockRuntimeClient {
        let sdk_config = self.build_sdk_config(region).await;

        if let Some(endpoint_url) = &self.settings.bedrock_endpoint_url {
            tracing::info!(endpoint = %endpoint_url, "Using custom Bedrock endpoint");

            let bedrock_config = aws_sdk_bedrockruntime::config::Builder::from(&sdk_config)
                .endpoint_url(endpoint_url)
                .build();

            BedrockRuntimeClient::from_conf(bedrock_config)
        } else {
            BedrockRuntimeClient::new(&sdk_config)
        }
    }
}

/// Build AWS SDK config for a region (convenience function)
pub async fn build_aws_config(settings: &Settings, region: &str) -> SdkConfig {
    AwsConfigBuilder::new(settings).build_sdk_config(region).await
}

/// Create a Bedrock Runtime client for a region (convenience function)
pub async fn create_bedrock_client(settings: &Settings, region: &str) -> BedrockRuntimeClient {
    AwsConfigBuilder::new(settings).build_bedrock_client(region).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_requested_region_wins() {
        let settings = Settings::default();
        let config = build_aws_config(&settings, "eu-central-1").await;

        assert_eq!(config.region().unwrap().as_ref(), "eu-central-1");
    }

    #[tokio::test]
    async fn test_bedrock_client_region() {
        let settings = Settings::default();
        let client = create_bedrock_client(&settings, "us-west-2").await;

        assert_eq!(client.config().region().unwrap().as_ref(), "us-west-2");
    }

    #[tokio::test]
    async fn test_custom_endpoint_bedrock() {
        let mut settings = Settings::default();
        settings.bedrock_endpoint_url = Some("http://localhost:4566".to_string());

        let _client = create_bedrock_client(&settings, "us-east-1").await;
        // Client created with custom endpoint
    }
}
