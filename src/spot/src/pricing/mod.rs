//! Spot price history retrieval behind a swappable source.

mod client;

pub use client::SpotPriceClient;

use async_trait::async_trait;
use mockall::automock;

use crate::constants::EMPTY_RESULT_MESSAGE;
use crate::error::{SpotError, SpotResult};
use crate::types::{PriceSample, QueryParameters};

/// A provider of spot price history
#[automock]
#[async_trait]
pub trait SpotPriceSource {
    /// Returns the samples for `query`, sorted ascending by timestamp.
    async fn fetch_price_history(&self, query: &QueryParameters) -> SpotResult<Vec<PriceSample>>;
}

/// Orders raw provider samples chronologically; an empty set is an `EmptyResult`.
pub fn into_chronological(mut samples: Vec<PriceSample>) -> SpotResult<Vec<PriceSample>> {
    if samples.is_empty() {
        return Err(SpotError::EmptyResult(EMPTY_RESULT_MESSAGE.to_string()));
    }
    samples.sort_by_key(|sample| sample.timestamp);
    Ok(samples)
}
