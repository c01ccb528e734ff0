use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One point of the spot price history, in USD per instance-hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub availability_zone: Option<String>,
}

impl PriceSample {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self {
            timestamp,
            price,
            availability_zone: None,
        }
    }

    pub fn with_availability_zone(mut self, availability_zone: impl Into<String>) -> Self {
        self.availability_zone = Some(availability_zone.into());
        self
    }
}

/// Operating system / network platform the spot price applies to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum ProductDescription {
    #[serde(rename = "Linux/UNIX")]
    #[value(name = "Linux/UNIX")]
    LinuxUnix,
    #[default]
    #[serde(rename = "Linux/UNIX (Amazon VPC)")]
    #[value(name = "Linux/UNIX (Amazon VPC)")]
    LinuxUnixVpc,
    #[serde(rename = "Windows")]
    #[value(name = "Windows")]
    Windows,
    #[serde(rename = "Windows (Amazon VPC)")]
    #[value(name = "Windows (Amazon VPC)")]
    WindowsVpc,
}

impl ProductDescription {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductDescription::LinuxUnix => "Linux/UNIX",
            ProductDescription::LinuxUnixVpc => "Linux/UNIX (Amazon VPC)",
            ProductDescription::Windows => "Windows",
            ProductDescription::WindowsVpc => "Windows (Amazon VPC)",
        }
    }
}

impl fmt::Display for ProductDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
