//! Shared types, errors, and configuration for Clubhouse.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The error-kind taxonomy shared by all engines
//! - Policy configuration (time limits, alert thresholds, sweep cadence)

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::ErrorKind;
