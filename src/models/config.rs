use crate::models::{BreakpointTable, CarouselOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repository the page links to from its top-right corner.
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/manuelsanchezweb/qwik-dragonball-slider";

/// Settings loaded from `Carousel Settings.yaml`
///
/// Everything here is static for the lifetime of the process. The base URL of
/// the data feed is not part of this file; it comes from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSettings {
    #[serde(rename = "Breakpoints", default)]
    pub breakpoints: BreakpointTable,

    #[serde(rename = "Carousel", default)]
    pub options: CarouselOptions,

    /// Fallback wait before the first mount when no layout barrier is wired
    #[serde(rename = "Mount Delay MS", default = "default_mount_delay_ms")]
    pub mount_delay_ms: u64,

    #[serde(rename = "Repository URL", default = "default_repository_url")]
    pub repository_url: String,

    #[serde(rename = "Logging", default)]
    pub logging: LoggingSettings,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::default(),
            options: CarouselOptions::default(),
            mount_delay_ms: default_mount_delay_ms(),
            repository_url: default_repository_url(),
            logging: LoggingSettings::default(),
        }
    }
}

impl CarouselSettings {
    pub fn mount_delay(&self) -> Duration {
        Duration::from_millis(self.mount_delay_ms)
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(rename = "Directory", default = "default_log_dir")]
    pub directory: String,

    #[serde(rename = "Prefix", default = "default_log_prefix")]
    pub prefix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Console", default = "default_console")]
    pub console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
            prefix: default_log_prefix(),
            debug_mode: false,
            console: default_console(),
        }
    }
}

fn default_mount_delay_ms() -> u64 {
    50
}

fn default_repository_url() -> String {
    DEFAULT_REPOSITORY_URL.to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "carousel".to_string()
}

fn default_console() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = CarouselSettings::default();

        assert_eq!(settings.mount_delay(), Duration::from_millis(50));
        assert_eq!(settings.repository_url, DEFAULT_REPOSITORY_URL);
        assert_eq!(settings.breakpoints, BreakpointTable::default());
        assert_eq!(settings.logging.prefix, "carousel");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "Mount Delay MS: 120\nLogging:\n  Debug Mode: true\n";
        let settings: CarouselSettings = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(settings.mount_delay_ms, 120);
        assert!(settings.logging.debug_mode);
        assert_eq!(settings.logging.directory, "logs");
        assert_eq!(settings.options, CarouselOptions::default());
    }
}
