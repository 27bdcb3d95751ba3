//! Configuration file loading for armykit
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ARMYKIT_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./armykit.toml` or `./.armykit.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/armykit/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAuditConfig, FileConfig, FilePipelineConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
