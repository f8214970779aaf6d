//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub scheduling: SchedulingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Posts to load when `--posts` is not given
    #[serde(default)]
    pub posts_file: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_view")]
    pub default_view: String,

    #[serde(default = "default_max_visible_per_day")]
    pub max_visible_per_day: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingSettings {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    #[serde(default = "default_priority")]
    pub default_priority: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_timezone() -> String {
    "EST".to_string()
}

fn default_view() -> String {
    "month".to_string()
}

fn default_max_visible_per_day() -> usize {
    3
}

fn default_recent_limit() -> usize {
    5
}

fn default_priority() -> String {
    "medium".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            posts_file: None,
            log_level: default_log_level(),
            default_timezone: default_timezone(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_view: default_view(),
            max_visible_per_day: default_max_visible_per_day(),
        }
    }
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            default_priority: default_priority(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./contentflow.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CONTENTFLOW")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# contentflow configuration

[general]
# JSON array of posts to load; the built-in sample posts are used when unset
# posts_file = "./posts.json"
log_level = "warn"
# Label attached to new posts; times are never converted
default_timezone = "EST"

[calendar]
# month, week or day
default_view = "month"
# Posts listed per month cell before "+N more"
max_visible_per_day = 3

[scheduling]
recent_limit = 5
# low, medium, high or urgent
default_priority = "medium"
"#
        .to_string()
    }
}
