//! Configuration module for the backup monitor
//!
//! Supports loading configuration from TOML files and environment variables.

mod settings;

pub use settings::*;
