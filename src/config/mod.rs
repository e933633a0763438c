//! Configuration management for powertrace.
//!
//! This module handles loading and saving application configuration from TOML files
//! stored in the user's config directory.

pub mod file;

pub use file::{get_config_path, DisplayConfig, MeteringConfig, PowertraceConfig};
