//! Underwriting workflows for restaurant insurance applications.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
