use crate::flag_or;

#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// Level applied to this crate's targets when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory for the rolling log files.
    pub log_dir: String,
    pub metrics_enabled: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "storage/logs".to_string()),
            metrics_enabled: flag_or(&lookup, "METRICS_ENABLED", true),
        }
    }
}
