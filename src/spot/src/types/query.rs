use chrono::{DateTime, Duration, Utc};

use super::ProductDescription;

/// Validated parameters of a single spot price history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub region: String,
    pub instance_type: String,
    pub window_hours: u32,
    pub product_description: ProductDescription,
    pub availability_zone: Option<String>,
    /// Fixed when arguments are resolved so every consumer sees the same window.
    pub window_end: DateTime<Utc>,
}

impl QueryParameters {
    /// The `(start, end)` of the lookback window.
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.window_end - Duration::hours(i64::from(self.window_hours)),
            self.window_end,
        )
    }
}
