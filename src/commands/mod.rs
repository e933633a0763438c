//! Application command handlers for powertrace.
//!
//! This module organizes command handling into separate submodules, each responsible for a specific
//! application command.
//!
//! # Commands
//! - `render`: Draw a power trace as a vertical-bar waveform
//! - `buckets`: Print the bucket set of a power trace as a table or JSON
//! - `meter`: Build a power trace from a WAV file
//! - `config`: Open configuration file in user's preferred editor
//! - `logs`: Display recent log entries

pub mod buckets;
pub mod config;
pub mod logs;
pub mod meter;
pub mod render;

pub use buckets::handle_buckets;
pub use config::handle_config;
pub use logs::handle_logs;
pub use meter::handle_meter;
pub use render::handle_render;
