use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

use crate::cloud_providers::aws::config::AwsConfig;
use crate::config::Config;
use crate::constants::{
    MAX_CHART_HEIGHT, MAX_CHART_WIDTH, MAX_TIMEOUT_SECS, MAX_WINDOW_HOURS, MIN_CHART_HEIGHT,
    MIN_CHART_WIDTH,
};
use crate::error::{SpotError, SpotResult};
use crate::render::chart::ChartOptions;
use crate::types::QueryParameters;

use super::commands::Cli;

/// Everything a run needs, validated. CLI flags win over config values.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArguments {
    pub query: QueryParameters,
    pub aws_config: AwsConfig,
    pub timeout: Duration,
    pub chart: ChartOptions,
    pub log_file: Option<PathBuf>,
}

pub fn resolve_arguments(cli: &Cli, config: &Config) -> SpotResult<ResolvedArguments> {
    let region = validate_identifier("--region", &cli.region)?;
    let instance_type = validate_identifier("--instance-type", &cli.instance_type)?;
    let window_hours = validate_hours(cli.hours.unwrap_or(config.hours))?;

    let availability_zone = cli
        .availability_zone
        .as_deref()
        .map(|zone| validate_availability_zone(zone, &region))
        .transpose()?;

    let query = QueryParameters {
        region,
        instance_type,
        window_hours,
        product_description: cli
            .product_description
            .unwrap_or(config.product_description),
        availability_zone,
        window_end: Utc::now(),
    };

    let profile = cli
        .profile
        .clone()
        .or_else(|| config.profile.clone())
        .filter(|profile| !profile.trim().is_empty());

    let timeout = validate_timeout(cli.timeout_secs.unwrap_or(config.timeout_secs))?;

    let chart = ChartOptions {
        width: validate_dimension(
            "--width",
            cli.width.or(config.chart_width),
            MIN_CHART_WIDTH,
            MAX_CHART_WIDTH,
        )?,
        height: validate_dimension(
            "--height",
            cli.height.or(config.chart_height),
            MIN_CHART_HEIGHT,
            MAX_CHART_HEIGHT,
        )?,
        enabled: !cli.no_chart,
    };

    Ok(ResolvedArguments {
        query,
        aws_config: AwsConfig::from(profile),
        timeout,
        chart,
        log_file: config.log_file.clone(),
    })
}

/// Accepts a non-empty identifier without inner whitespace.
fn validate_identifier(flag: &str, value: &str) -> SpotResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SpotError::InvalidArgument(format!("{} must not be empty", flag)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(SpotError::InvalidArgument(format!(
            "{} must not contain whitespace, got '{}'",
            flag, value
        )));
    }
    Ok(value.to_string())
}

pub(crate) fn validate_hours(hours: i64) -> SpotResult<u32> {
    if hours <= 0 {
        return Err(SpotError::InvalidArgument(format!(
            "--hours must be a positive integer, got {}",
            hours
        )));
    }
    if hours > i64::from(MAX_WINDOW_HOURS) {
        return Err(SpotError::InvalidArgument(format!(
            "--hours must be at most {}, got {}",
            MAX_WINDOW_HOURS, hours
        )));
    }
    Ok(hours as u32)
}

fn validate_availability_zone(zone: &str, region: &str) -> SpotResult<String> {
    let zone = validate_identifier("--availability-zone", zone)?;
    if !zone.starts_with(region) || zone.len() == region.len() {
        return Err(SpotError::InvalidArgument(format!(
            "availability zone '{}' is not in region '{}'",
            zone, region
        )));
    }
    Ok(zone)
}

fn validate_timeout(seconds: u64) -> SpotResult<Duration> {
    if seconds == 0 || seconds > MAX_TIMEOUT_SECS {
        return Err(SpotError::InvalidArgument(format!(
            "--timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, seconds
        )));
    }
    Ok(Duration::from_secs(seconds))
}

fn validate_dimension(flag: &str, value: Option<u16>, min: u16, max: u16) -> SpotResult<Option<u16>> {
    match value {
        Some(value) if !(min..=max).contains(&value) => Err(SpotError::InvalidArgument(format!(
            "{} must be between {} and {}, got {}",
            flag, min, max, value
        ))),
        other => Ok(other),
    }
}
