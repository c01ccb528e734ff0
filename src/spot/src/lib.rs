pub mod cli;
pub mod cloud_providers;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod render;
pub mod stats;
pub mod types;
