//! Runtime configuration read from a TOML file.

use super::*;
use std::fs;
use std::path::Path;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Debug,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuViConfig {
    /// Hours east of UTC for lunar conversion.
    pub time_zone: f64,
    /// Filter directives used when RUST_LOG is unset.
    pub log_filter: String,
    pub output: OutputFormat,
}

impl Default for TuViConfig {
    fn default() -> Self {
        TuViConfig {
            time_zone: lunar_calendar::VIETNAM_TIME_ZONE,
            log_filter: "info".to_string(),
            output: OutputFormat::Debug,
        }
    }
}

impl TuViConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = TuViConfig::from_toml(&contents)?;
        tracing::debug!("loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => TuViConfig::load(path),
            None => Ok(TuViConfig::default()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: TuViConfig =
            toml::from_str(contents).map_err(|e| TuViError::Config(format!("failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(-12.0..=14.0).contains(&self.time_zone) {
            return Err(TuViError::Config(format!(
                "time_zone {} outside -12..=14",
                self.time_zone
            )));
        }
        Ok(())
    }

    pub fn calendar(&self) -> VietnameseCalendar {
        VietnameseCalendar::new(self.time_zone)
    }
}
