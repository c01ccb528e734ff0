//! Reduction of a price series into summary statistics.

use chrono::{DateTime, Utc};

use crate::constants::EMPTY_RESULT_MESSAGE;
use crate::error::{SpotError, SpotResult};
use crate::types::PriceSample;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation, zero for a single sample.
    pub stdev: f64,
    /// Price of the most recent sample.
    pub latest: f64,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
}

impl PriceSummary {
    pub fn is_flat(&self) -> bool {
        (self.max - self.min).abs() < f64::EPSILON
    }
}

/// Summarises a price series. Fails with `EmptyResult` when there is nothing to summarise.
pub fn summarize(samples: &[PriceSample]) -> SpotResult<PriceSummary> {
    let (Some(first), Some(last)) = (
        samples.iter().min_by_key(|s| s.timestamp),
        samples.iter().max_by_key(|s| s.timestamp),
    ) else {
        return Err(SpotError::EmptyResult(EMPTY_RESULT_MESSAGE.to_string()));
    };

    let count = samples.len() as f64;
    let min = samples.iter().map(|s| s.price).fold(f64::INFINITY, f64::min);
    let max = samples
        .iter()
        .map(|s| s.price)
        .fold(f64::NEG_INFINITY, f64::max);

    // float summation can land a hair outside the observed range
    let mean = (samples.iter().map(|s| s.price).sum::<f64>() / count).clamp(min, max);

    let variance = samples
        .iter()
        .map(|s| (s.price - mean).powi(2))
        .sum::<f64>()
        / count;

    Ok(PriceSummary {
        samples: samples.len(),
        min,
        max,
        mean,
        median: median(samples),
        stdev: if samples.len() > 1 { variance.sqrt() } else { 0.0 },
        latest: last.price,
        first_timestamp: first.timestamp,
        last_timestamp: last.timestamp,
    })
}

fn median(samples: &[PriceSample]) -> f64 {
    let mut prices: Vec<f64> = samples.iter().map(|s| s.price).collect();
    prices.sort_by(f64::total_cmp);

    let mid = prices.len() / 2;
    if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    }
}
