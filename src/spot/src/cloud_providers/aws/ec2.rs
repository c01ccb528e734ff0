use aws_config::SdkConfig;
use aws_sdk_ec2 as ec2_client;
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::primitives::DateTime as SmithyDateTime;
use aws_sdk_ec2::types::{InstanceType, SpotPrice};
use chrono::{DateTime, Utc};

use crate::error::{SpotError, SpotResult};
use crate::types::{PriceSample, QueryParameters};

const AUTH_ERROR_CODES: &[&str] = &[
    "AuthFailure",
    "UnauthorizedOperation",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "RequestExpired",
    "OptInRequired",
    "UnrecognizedClientException",
];

const INVALID_ARGUMENT_ERROR_CODES: &[&str] = &[
    "InvalidParameterValue",
    "InvalidParameterCombination",
    "InvalidParameter",
    "InvalidInstanceType",
    "InvalidAvailabilityZone",
];

pub struct Ec2Client {
    client: ec2_client::Client,
}

impl Ec2Client {
    /// Creates a new Ec2Client instance
    pub fn new_with_config(conf: &SdkConfig) -> Self {
        Self {
            client: ec2_client::Client::new(conf),
        }
    }

    /// Returns every spot price entry in `[start, end]`, following all result pages.
    /// Entries come back in provider order, which is not chronological.
    /// The provider also returns the price in effect at `start`, stamped with the time it
    /// took effect; such entries are moved to `start`.
    pub async fn describe_spot_price_history(
        &self,
        query: &QueryParameters,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SpotResult<Vec<PriceSample>> {
        tracing::info!(
            region = %query.region,
            instance_type = %query.instance_type,
            product = %query.product_description,
            %start,
            %end,
            "Fetching spot price history"
        );

        let mut request = self
            .client
            .describe_spot_price_history()
            .start_time(to_smithy_datetime(start))
            .end_time(to_smithy_datetime(end))
            .instance_types(InstanceType::from(query.instance_type.as_str()))
            .product_descriptions(query.product_description.as_str());

        if let Some(availability_zone) = &query.availability_zone {
            request = request.availability_zone(availability_zone);
        }

        let mut paginator = request.into_paginator().send();
        let mut samples = Vec::new();
        let mut pages = 0usize;
        let mut skipped = 0usize;

        while let Some(page) = paginator.next().await {
            let page = page.map_err(classify_sdk_error)?;
            pages += 1;

            for entry in page.spot_price_history() {
                match sample_from_entry(entry, start) {
                    Some(sample) => samples.push(sample),
                    None => {
                        skipped += 1;
                        tracing::debug!(?entry, "Skipping spot price entry without usable data");
                    }
                }
            }
        }

        tracing::info!(
            pages,
            samples = samples.len(),
            skipped,
            "Fetched spot price history"
        );

        Ok(samples)
    }
}

fn to_smithy_datetime(time: DateTime<Utc>) -> SmithyDateTime {
    SmithyDateTime::from_secs(time.timestamp())
}

fn from_smithy_datetime(time: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.secs(), time.subsec_nanos())
}

/// Converts a provider entry, dropping entries with a missing timestamp or an unusable price.
/// Timestamps before `window_start` are clamped to it.
fn sample_from_entry(entry: &SpotPrice, window_start: DateTime<Utc>) -> Option<PriceSample> {
    let price = entry.spot_price()?.trim().parse::<f64>().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    let timestamp = from_smithy_datetime(entry.timestamp()?)?.max(window_start);

    Some(PriceSample {
        timestamp,
        price,
        availability_zone: entry.availability_zone().map(str::to_string),
    })
}

fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> SpotError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    tracing::warn!(error = %message, "DescribeSpotPriceHistory failed");

    match &err {
        SdkError::ServiceError(service_err) => {
            classify_error_code(service_err.err().code(), message)
        }
        SdkError::TimeoutError(_) => SpotError::Network(format!("request timed out: {}", message)),
        SdkError::ConstructionFailure(_) => SpotError::InvalidArgument(message),
        _ => SpotError::Network(message),
    }
}

/// Maps a provider error code onto the error taxonomy.
pub(crate) fn classify_error_code(code: Option<&str>, message: String) -> SpotError {
    match code {
        Some(code) if AUTH_ERROR_CODES.contains(&code) => SpotError::Auth(message),
        Some(code) if INVALID_ARGUMENT_ERROR_CODES.contains(&code) => {
            SpotError::InvalidArgument(message)
        }
        _ => SpotError::Network(message),
    }
}
