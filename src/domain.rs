//! Game-level value types shared by the session, protocol and configuration.

use serde::{Deserialize, Serialize};

use crate::catalog::RegionFilter;
use crate::error::QuizError;

/// Pacing mode: a fixed number of questions, or a wall-clock countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
  #[default]
  Count,
  Timed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
  #[default]
  Setup,
  Playing,
  Finished,
}

/// Result shown for the current question while it waits to be advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
  Correct,
  Wrong,
}

/// Setup form output. Only the limit matching `mode` is used.
/// Omitted keys take the values of `GameConfig::default()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
  pub mode: GameMode,
  pub region: RegionFilter,
  #[serde(alias = "count_limit")]
  pub count_limit: Option<u32>,
  /// Seconds.
  #[serde(alias = "time_limit")]
  pub time_limit: Option<u32>,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      mode: GameMode::Count,
      region: RegionFilter::All,
      count_limit: Some(10),
      time_limit: Some(60),
    }
  }
}

/// Validated pacing of a started session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
  Count(u32),
  Timed(u32),
}

impl GameConfig {
  pub fn count(region: RegionFilter, count_limit: u32) -> Self {
    Self { mode: GameMode::Count, region, count_limit: Some(count_limit), time_limit: None }
  }

  pub fn timed(region: RegionFilter, time_limit: u32) -> Self {
    Self { mode: GameMode::Timed, region, count_limit: None, time_limit: Some(time_limit) }
  }

  /// Fill limits the setup form left out from `defaults`.
  pub fn with_defaults(mut self, defaults: &GameConfig) -> Self {
    if self.count_limit.is_none() { self.count_limit = defaults.count_limit; }
    if self.time_limit.is_none() { self.time_limit = defaults.time_limit; }
    self
  }

  /// The active limit for `mode`; it must be present and non-zero.
  pub fn pacing(&self) -> Result<Pacing, QuizError> {
    match self.mode {
      GameMode::Count => match self.count_limit {
        Some(n) if n > 0 => Ok(Pacing::Count(n)),
        Some(_) => Err(QuizError::InvalidConfig("countLimit must be at least 1".into())),
        None => Err(QuizError::InvalidConfig("countLimit is required in count mode".into())),
      },
      GameMode::Timed => match self.time_limit {
        Some(s) if s > 0 => Ok(Pacing::Timed(s)),
        Some(_) => Err(QuizError::InvalidConfig("timeLimit must be at least 1 second".into())),
        None => Err(QuizError::InvalidConfig("timeLimit is required in timed mode".into())),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::Region;

  #[test]
  fn parses_setup_form_json() {
    let cfg: GameConfig =
      serde_json::from_str(r#"{"mode":"timed","region":"Oceania","timeLimit":30}"#).unwrap();
    assert_eq!(cfg.mode, GameMode::Timed);
    assert_eq!(cfg.region, RegionFilter::Only(Region::Oceania));
    assert_eq!(cfg.pacing().unwrap(), Pacing::Timed(30));
  }

  #[test]
  fn missing_limits_come_from_defaults() {
    let cfg: GameConfig = serde_json::from_str(r#"{"mode":"count"}"#).unwrap();
    assert_eq!(cfg.pacing().unwrap(), Pacing::Count(10));

    let cfg: GameConfig = serde_json::from_str(r#"{"mode":"count","countLimit":null}"#).unwrap();
    assert!(cfg.pacing().is_err());
    let cfg = cfg.with_defaults(&GameConfig::count(RegionFilter::All, 25));
    assert_eq!(cfg.pacing().unwrap(), Pacing::Count(25));
  }

  #[test]
  fn zero_limits_are_rejected() {
    assert!(matches!(
      GameConfig::count(RegionFilter::All, 0).pacing(),
      Err(QuizError::InvalidConfig(_))
    ));
    assert!(matches!(
      GameConfig::timed(RegionFilter::All, 0).pacing(),
      Err(QuizError::InvalidConfig(_))
    ));
  }

  #[test]
  fn inactive_limit_is_ignored() {
    let cfg = GameConfig { mode: GameMode::Count, region: RegionFilter::All, count_limit: Some(5), time_limit: Some(0) };
    assert_eq!(cfg.pacing().unwrap(), Pacing::Count(5));
  }
}
