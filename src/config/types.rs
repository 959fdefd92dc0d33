use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Runtime loop tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Skip rendering when an update returns the same snapshot (default: true).
    #[serde(default = "default_skip_unchanged_renders")]
    pub skip_unchanged_renders: bool,
    /// Log a warning once more commands than this are in flight (default: 64).
    #[serde(default = "default_in_flight_warn_threshold")]
    pub in_flight_warn_threshold: usize,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Settings for the demonstration binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Simulated API latency in milliseconds (default: 150).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_skip_unchanged_renders() -> bool {
    true
}

fn default_in_flight_warn_threshold() -> usize {
    64
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_latency_ms() -> u64 {
    150
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            skip_unchanged_renders: default_skip_unchanged_renders(),
            in_flight_warn_threshold: default_in_flight_warn_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}
