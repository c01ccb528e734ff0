use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use clap::Parser;
use spot::cli::commands::Cli;
use spot::cli::{resolve_arguments, run_query};
use spot::config::Config;
use spot::error::SpotError;
use spot::pricing::{into_chronological, MockSpotPriceSource};
use spot::render::format_usd;
use spot::types::{PriceSample, ProductDescription};

fn config() -> Config {
    Config {
        hours: 12,
        product_description: ProductDescription::default(),
        timeout_secs: 20,
        profile: None,
        chart_width: None,
        chart_height: None,
        log_file: None,
    }
}

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["spot"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

// Twelve hours of prices at 45-minute intervals, newest first as the provider returns them.
fn provider_samples() -> Vec<PriceSample> {
    let end = Utc::now();
    let mut samples: Vec<PriceSample> = (0..16u32)
        .map(|i| {
            let price = 0.0890 + f64::from(i % 5) * 0.0013;
            PriceSample::new(end - Duration::minutes(45 * i64::from(i)), price)
                .with_availability_zone(if i % 2 == 0 { "us-east-1a" } else { "us-east-1b" })
        })
        .collect();
    samples.reverse();
    samples.rotate_left(7);
    samples
}

#[tokio::test]
async fn us_east_1_m5_large_twelve_hours() {
    let args = resolve_arguments(
        &cli(&[
            "--region",
            "us-east-1",
            "--instance-type",
            "m5.large",
            "--hours",
            "12",
            "--width",
            "60",
            "--height",
            "10",
        ]),
        &config(),
    )
    .unwrap();
    assert_eq!(args.timeout, StdDuration::from_secs(20));

    let mut source = MockSpotPriceSource::new();
    source
        .expect_fetch_price_history()
        .withf(|query| {
            query.region == "us-east-1"
                && query.instance_type == "m5.large"
                && query.window_hours == 12
                && query.product_description == ProductDescription::LinuxUnixVpc
        })
        .times(1)
        .returning(|_| into_chronological(provider_samples()));

    let mut out = Vec::new();
    let summary = run_query(&source, &args, &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(summary.samples, 16);
    assert!(summary.last_timestamp - summary.first_timestamp <= Duration::hours(12));
    assert!(summary.min <= summary.mean && summary.mean <= summary.max);

    assert!(output.contains(&format_usd(summary.min)));
    assert!(output.contains(&format_usd(summary.max)));
    assert!(output.contains(&format_usd(summary.mean)));
    assert!(output.contains('●'));
}

#[test]
fn provider_order_is_chronological() {
    let samples = into_chronological(provider_samples()).unwrap();
    assert!(samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn zero_samples_is_empty_result_without_chart() {
    let args = resolve_arguments(
        &cli(&["--region", "us-east-1", "--instance-type", "m5.large"]),
        &config(),
    )
    .unwrap();

    let mut source = MockSpotPriceSource::new();
    source
        .expect_fetch_price_history()
        .times(1)
        .returning(|_| into_chronological(vec![]));

    let mut out = Vec::new();
    let err = run_query(&source, &args, &mut out).await.unwrap_err();

    let spot_error = err.downcast_ref::<SpotError>().unwrap();
    assert!(matches!(spot_error, SpotError::EmptyResult(_)));
    assert_ne!(spot_error.exit_code(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn network_failure_maps_to_network_exit_code() {
    let args = resolve_arguments(
        &cli(&["--region", "ap-south-1", "--instance-type", "c6g.medium"]),
        &config(),
    )
    .unwrap();

    let mut source = MockSpotPriceSource::new();
    source
        .expect_fetch_price_history()
        .returning(|_| Err(SpotError::Network("request timed out after 20s".into())));

    let mut out = Vec::new();
    let err = run_query(&source, &args, &mut out).await.unwrap_err();

    assert_eq!(err.downcast_ref::<SpotError>().map(SpotError::exit_code), Some(4));
}
