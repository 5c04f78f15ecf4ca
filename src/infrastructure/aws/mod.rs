use crate::infrastructure::config::Config;
use aws_config::retry::RetryConfig;
use aws_config::ConfigLoader;
use aws_sdk_polly::Client as PollyClient;

/// Build the Polly client once per process from the resolved configuration
pub async fn create_polly_client(config: &Config) -> PollyClient {
    tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

    // Check for AWS credentials in environment (for debugging)
    let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
    let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
    tracing::info!(
        has_access_key_id = has_access_key,
        has_secret_access_key = has_secret_key,
        profile = config.aws_profile.as_deref().unwrap_or("default"),
        "AWS credentials environment check"
    );

    if config.aws_profile.is_none() && (!has_access_key || !has_secret_key) {
        tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (shared config, instance metadata, etc.)");
    }

    let aws_config = polly_config_loader(config).load().await;

    // Log AWS config details (without exposing credentials)
    tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

    PollyClient::new(&aws_config)
}

/// SDK settings for Polly: region, optional profile and no automatic retries.
/// A failed call surfaces immediately so one segment costs one provider hit.
pub fn polly_config_loader(config: &Config) -> ConfigLoader {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .retry_config(RetryConfig::disabled());
    if let Some(profile) = &config.aws_profile {
        loader = loader.profile_name(profile);
    }
    loader
}
