pub mod config;
pub mod ec2;
