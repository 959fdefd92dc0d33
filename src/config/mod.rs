//! Configuration: TOML file, serde defaults, validation.

mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{Config, DemoConfig, LoggingConfig, RuntimeConfig};
