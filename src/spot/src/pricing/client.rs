use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::cloud_providers::aws::config::{resolve_available_aws_config, AwsConfig};
use crate::cloud_providers::aws::ec2::Ec2Client;
use crate::error::{SpotError, SpotResult};
use crate::types::{PriceSample, QueryParameters};

use super::{into_chronological, SpotPriceSource};

/// Live spot price source backed by the EC2 API
pub struct SpotPriceClient {
    aws_config: AwsConfig,
    timeout: Duration,
}

impl SpotPriceClient {
    pub fn new(aws_config: AwsConfig, timeout: Duration) -> Self {
        Self {
            aws_config,
            timeout,
        }
    }

    async fn fetch_unordered(&self, query: &QueryParameters) -> SpotResult<Vec<PriceSample>> {
        let (start, end) = query.window();
        let conf =
            resolve_available_aws_config(self.aws_config.clone(), &query.region, self.timeout)
                .await?;

        Ec2Client::new_with_config(&conf)
            .describe_spot_price_history(query, start, end)
            .await
    }
}

#[async_trait]
impl SpotPriceSource for SpotPriceClient {
    async fn fetch_price_history(&self, query: &QueryParameters) -> SpotResult<Vec<PriceSample>> {
        // bounds credential resolution and every page together
        let samples = with_timeout(self.timeout, self.fetch_unordered(query)).await?;
        into_chronological(samples)
    }
}

/// Runs `fut`, turning expiry of `timeout` into a `Network` error.
pub(crate) async fn with_timeout<T, F>(timeout: Duration, fut: F) -> SpotResult<T>
where
    F: Future<Output = SpotResult<T>>,
{
    tokio::time::timeout(timeout, fut).await.map_err(|_| {
        tracing::warn!(?timeout, "Spot price request timed out");
        SpotError::Network(format!("request timed out after {}s", timeout.as_secs()))
    })?
}
