//! Loading quiz settings (setup form options, defaults, flag images) from TOML.
//!
//! Every key is optional; see `QuizSettings::default` for the built-in values.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::GameConfig;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct QuizSettings {
  /// Preselected values of the setup form; also fills limits a client omits.
  pub defaults: GameConfig,
  /// Question counts offered in count mode.
  pub count_options: Vec<u32>,
  /// Countdown lengths offered in timed mode.
  pub time_options: Vec<TimeOption>,
  pub flags: FlagSettings,
  pub display: DisplaySettings,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TimeOption {
  pub label: String,
  pub seconds: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FlagSettings {
  pub cdn_base: String,
  pub width: u32,
}

/// Suggested result display times for the view. The engine itself never waits.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
  pub correct_delay_ms: u64,
  pub failed_delay_ms: u64,
  pub escalate_delay_ms: u64,
}

impl Default for QuizSettings {
  fn default() -> Self {
    Self {
      defaults: GameConfig::default(),
      count_options: vec![10, 25, 50, 100],
      time_options: [("10s", 10), ("30s", 30), ("1m", 60), ("5m", 300), ("10m", 600)]
        .into_iter()
        .map(|(label, seconds)| TimeOption { label: label.into(), seconds })
        .collect(),
      flags: FlagSettings::default(),
      display: DisplaySettings::default(),
    }
  }
}

impl Default for FlagSettings {
  fn default() -> Self {
    Self { cdn_base: "https://flagcdn.com".into(), width: 320 }
  }
}

impl Default for DisplaySettings {
  fn default() -> Self {
    Self { correct_delay_ms: 1200, failed_delay_ms: 1500, escalate_delay_ms: 500 }
  }
}

impl QuizSettings {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }
}

/// Attempt to load `QuizSettings` from QUIZ_CONFIG_PATH. Falls back to defaults
/// when the variable is unset or the file cannot be read or parsed.
pub fn load_settings_from_env() -> QuizSettings {
  let Ok(path) = std::env::var("QUIZ_CONFIG_PATH") else {
    info!(target: "flagquiz_backend", "QUIZ_CONFIG_PATH not set; using built-in quiz settings");
    return QuizSettings::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match QuizSettings::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "flagquiz_backend", %path, "Loaded quiz settings (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "flagquiz_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        QuizSettings::default()
      }
    },
    Err(e) => {
      error!(target: "flagquiz_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      QuizSettings::default()
    }
  }
}
