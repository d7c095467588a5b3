//! dayname configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CALENDAR_NAME, DEFAULT_TIMEZONE, DEFAULT_URL};
use crate::error::{DaynameError, DaynameResult};
use crate::layout::LayoutConfig;
use crate::pipeline::Pipeline;
use crate::title::TitleRules;

static DEFAULT_CALENDAR_DIR: &str = "~/calendar";
static DEFAULT_DATA_DIR: &str = "~/.local/share/dayname";

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_error_notice_interval() -> String {
    "1day".to_string()
}

fn default_retries() -> u32 {
    3
}

fn default_timeout() -> String {
    "30s".to_string()
}

/// Page fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// humantime duration, e.g. "30s"
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            retries: default_retries(),
            timeout: default_timeout(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> DaynameResult<Duration> {
        parse_duration("fetch.timeout", &self.timeout)
    }
}

/// Configuration at ~/.config/dayname/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaynameConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// Parent directory of the calendar's directory
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    /// Outbox and run state live here
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// The page's time zone (IANA name)
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Minimum time between two error notices, e.g. "1day"
    #[serde(default = "default_error_notice_interval")]
    pub error_notice_interval: String,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub titles: TitleRules,

    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Default for DaynameConfig {
    fn default() -> Self {
        DaynameConfig {
            url: default_url(),
            calendar_name: default_calendar_name(),
            calendar_dir: default_calendar_dir(),
            data_dir: default_data_dir(),
            timezone: default_timezone(),
            error_notice_interval: default_error_notice_interval(),
            layout: LayoutConfig::default(),
            titles: TitleRules::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl DaynameConfig {
    pub fn config_path() -> DaynameResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaynameError::Config("Could not determine config directory".into()))?
            .join("dayname");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the default config file, creating it on first use.
    pub fn load() -> DaynameResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`, with `DAYNAME_*` environment variables on top.
    pub fn load_from(path: &Path) -> DaynameResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("DAYNAME")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| DaynameError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaynameError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaynameResult<()> {
        let contents = format!(
            "\
# dayname configuration

# Page listing the days:
# url = \"{DEFAULT_URL}\"

# Calendar the days are written to (a directory under calendar_dir):
# calendar_name = \"{DEFAULT_CALENDAR_NAME}\"
# calendar_dir = \"{DEFAULT_CALENDAR_DIR}\"

# Notification outbox and run state:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Time zone of the page, used to decide which day is today:
# timezone = \"{DEFAULT_TIMEZONE}\"

# Send at most one error notice per interval:
# error_notice_interval = \"1day\"

# [layout]
# root_selector = \"#dayname\"
# exclude = \".titreday\"              # \"\" to turn off
# accept = \"text\"                  # or {{ text_under = [\"p\", \"li\"] }}
# strategy = \"month_day_year\"      # or \"weekday\"
# tolerance_days = 45

# [titles]
# prefix = \"IYD: \"
# [[titles.rules]]
# contains = \"Gourmet Night\"
# title = \"FP Gourmet Night\"

# [fetch]
# retries = 3
# timeout = \"30s\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaynameError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaynameError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Directory holding this calendar's .ics files.
    pub fn calendar_path(&self) -> PathBuf {
        expand(&self.calendar_dir).join(slug::slugify(&self.calendar_name))
    }

    pub fn outbox_path(&self) -> PathBuf {
        expand(&self.data_dir).join("outbox")
    }

    pub fn state_path(&self) -> PathBuf {
        expand(&self.data_dir).join("state")
    }

    pub fn timezone(&self) -> DaynameResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| DaynameError::Config(format!("Invalid timezone '{}': {e}", self.timezone)))
    }

    /// Today's date in the page's time zone.
    pub fn today(&self) -> DaynameResult<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }

    pub fn pipeline(&self) -> DaynameResult<Pipeline> {
        Pipeline::new(&self.layout, &self.titles)
    }

    pub fn error_notice_interval(&self) -> DaynameResult<Duration> {
        parse_duration("error_notice_interval", &self.error_notice_interval)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn parse_duration(key: &str, value: &str) -> DaynameResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| DaynameError::Config(format!("Invalid duration for {key} '{value}': {e}")))
}
