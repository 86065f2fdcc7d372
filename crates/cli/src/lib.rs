//! Interactive shell for the food waste tracker.

pub mod config;
pub mod render;
pub mod shell;

pub use config::{CliConfig, ConfigError};
pub use shell::{MenuChoice, Shell};
