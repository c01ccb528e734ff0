use std::path::PathBuf;

use clap::Parser;

use crate::types::ProductDescription;

const EXAMPLES: &str = "\
Examples:
  spot --region us-east-1 --instance-type m5.large --hours 12
  spot --region us-west-2 --instance-type c5.xlarge --hours 24 --product-description \"Linux/UNIX\"";

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "spot",
    about = "Fetch EC2 spot price history and chart it in the terminal",
    version = env!("CARGO_PKG_VERSION"),
    after_help = EXAMPLES
)]
pub struct Cli {
    /// AWS region to query, e.g. us-east-1
    #[clap(long)]
    pub region: String,

    /// EC2 instance type to query, e.g. m5.large
    #[clap(long)]
    pub instance_type: String,

    /// Number of hours in the past to include in the query window [default: 12]
    #[clap(long, allow_negative_numbers = true)]
    pub hours: Option<i64>,

    /// Product description filter [default: "Linux/UNIX (Amazon VPC)"]
    #[clap(long, value_enum)]
    pub product_description: Option<ProductDescription>,

    /// Only include prices from this availability zone, e.g. us-east-1a
    #[clap(long)]
    pub availability_zone: Option<String>,

    /// AWS profile to load credentials from
    #[clap(long)]
    pub profile: Option<String>,

    /// Seconds to wait for the pricing API before giving up [default: 20]
    #[clap(long)]
    pub timeout_secs: Option<u64>,

    /// Chart width in columns (defaults to the terminal width)
    #[clap(long)]
    pub width: Option<u16>,

    /// Chart height in rows (defaults to fit the terminal)
    #[clap(long)]
    pub height: Option<u16>,

    /// Print statistics only
    #[clap(long)]
    pub no_chart: bool,

    /// Path to a TOML config file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[clap(long, short)]
    pub verbose: bool,
}
