use std::fmt;
use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;

use crate::error::{SpotError, SpotResult};

/// Where AWS credentials are taken from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AwsConfig {
    Profile(String),
    Env,
}

impl fmt::Display for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwsConfig::Profile(profile) => write!(f, "profile:{}", profile),
            AwsConfig::Env => write!(f, "env"),
        }
    }
}

impl From<Option<String>> for AwsConfig {
    fn from(profile: Option<String>) -> Self {
        match profile {
            Some(profile) => AwsConfig::Profile(profile),
            None => AwsConfig::Env,
        }
    }
}

// The default chain covers env vars, shared config files, SSO and IMDS.
// Retries are disabled: a failed request is reported, never replayed.
pub async fn get_initialized_aws_conf(
    initialization_conf: AwsConfig,
    region: impl Into<String>,
    timeout: Duration,
) -> SpotResult<SdkConfig> {
    let config_loader = aws_config::defaults(BehaviorVersion::latest())
        .retry_config(RetryConfig::disabled())
        .timeout_config(
            TimeoutConfig::builder()
                .operation_attempt_timeout(timeout)
                .build(),
        );

    let loader = match initialization_conf {
        AwsConfig::Profile(profile) => {
            tracing::debug!("Trying to load AWS config using profile '{}'", profile);
            config_loader.profile_name(profile)
        }
        AwsConfig::Env => {
            tracing::debug!("Trying to load AWS config from the default credential chain");
            config_loader
        }
    };

    let config = loader.region(Region::new(region.into())).load().await;
    let credentials_provider = config
        .credentials_provider()
        .ok_or_else(|| SpotError::Auth("no AWS credentials provider is configured".into()))?;

    match credentials_provider.provide_credentials().await {
        Ok(_) => {
            tracing::debug!("Successfully retrieved AWS credentials");
            Ok(config)
        }
        Err(err) => {
            tracing::warn!("Failed to get AWS credentials: {:?}", err);
            Err(SpotError::Auth(format!("could not load AWS credentials: {}", err)))
        }
    }
}

/// Resolves credentials from the named profile, falling back to the default chain.
pub async fn resolve_available_aws_config(
    profile: AwsConfig,
    region: &str,
    timeout: Duration,
) -> SpotResult<SdkConfig> {
    if let AwsConfig::Profile(profile_name) = &profile {
        match get_initialized_aws_conf(profile.clone(), region, timeout).await {
            Ok(conf) => {
                tracing::info!("Resolved AWS credentials using profile '{}'", profile_name);
                return Ok(conf);
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Failed to resolve credentials using profile '{}'",
                    profile_name
                );
            }
        }
    }

    let env_conf = get_initialized_aws_conf(AwsConfig::Env, region, timeout).await;
    if env_conf.is_ok() {
        tracing::info!("Resolved AWS credentials using the default credential chain.");
    } else {
        tracing::warn!("Could not resolve AWS credentials from profile or environment.");
    }
    env_conf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_config_from_optional_profile() {
        assert_eq!(
            AwsConfig::from(Some("analytics".to_string())),
            AwsConfig::Profile("analytics".into())
        );
        assert_eq!(AwsConfig::from(None), AwsConfig::Env);
    }

    #[test]
    fn test_aws_config_display() {
        assert_eq!(AwsConfig::Profile("me".into()).to_string(), "profile:me");
        assert_eq!(AwsConfig::Env.to_string(), "env");
    }
}
