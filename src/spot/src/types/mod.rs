mod query;
mod spot_price;

pub use query::QueryParameters;
pub use spot_price::{PriceSample, ProductDescription};
