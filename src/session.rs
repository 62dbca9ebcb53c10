//! Quiz session state machine: `setup -> playing -> finished`.
//!
//! Every transition is synchronous and leaves the session in a state the view
//! can render directly. Display delays (showing "correct" before moving on,
//! flashing the hint button) are the view's business; the session only records
//! that a result is pending until `advance_question` is called.
//!
//! Invalid actions (hint at max level, submit while a result is showing, ticks
//! outside timed play) are no-ops reported through the returned outcome.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::answer::{effective_answer, is_correct, PlayerInput};
use crate::catalog::{list_by_region, Country};
use crate::domain::{AnswerOutcome, GameConfig, GameMode, GameStatus, Pacing};
use crate::error::QuizError;
use crate::hints::{self, MAX_HINT_LEVEL};
use crate::sampler::{build_pool, PriorSessionMemory, QuestionPool};
use crate::scoring::{points_for_hint_level, MAX_POINTS_PER_QUESTION};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// Accepted; the question waits for `advance_question`.
  Correct { points: u32 },
  /// Rejected below the max hint level; one more hint was applied and the
  /// player may retry.
  Escalated { hint_level: u8 },
  /// Rejected at the max hint level; the canonical name is revealed and the
  /// question waits for `advance_question`.
  Failed { answer: &'static str },
  Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintOutcome {
  Revealed { hint_level: u8 },
  Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
  Next { index: usize },
  Finished,
  Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
  Ticked { remaining: u32 },
  TimeUp,
  Ignored,
}

/// End-of-session figures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
  pub score: u32,
  pub max_score: u32,
  pub answered_count: u32,
  pub hints_used: u32,
}

pub struct QuizSession {
  id: Option<Uuid>,
  status: GameStatus,
  config: GameConfig,
  pool: QuestionPool,
  question_limit: usize,
  current_index: usize,
  score: u32,
  hints_used: u32,
  hint_level: u8,
  revealed: BTreeSet<usize>,
  answered_count: u32,
  time_remaining: u32,
  result: Option<AnswerOutcome>,
  input: PlayerInput,
  rng: StdRng,
}

impl Default for QuizSession {
  fn default() -> Self {
    Self::with_rng(StdRng::from_entropy())
  }
}

impl QuizSession {
  /// A session in `setup`, drawing randomness from the OS.
  pub fn new() -> Self {
    Self::default()
  }

  /// A session in `setup` with an explicit random source.
  pub fn with_rng(rng: StdRng) -> Self {
    Self {
      id: None,
      status: GameStatus::Setup,
      config: GameConfig::default(),
      pool: Vec::new(),
      question_limit: 0,
      current_index: 0,
      score: 0,
      hints_used: 0,
      hint_level: 0,
      revealed: BTreeSet::new(),
      answered_count: 0,
      time_remaining: 0,
      result: None,
      input: PlayerInput::default(),
      rng,
    }
  }

  /// Start a new session, discarding whatever was in progress.
  ///
  /// Returns the memory the next session should be started with.
  #[instrument(level = "info", skip(self, prior), fields(mode = ?config.mode, region = %config.region, prior = prior.len()))]
  pub fn start(&mut self, config: GameConfig, prior: &PriorSessionMemory) -> Result<PriorSessionMemory, QuizError> {
    let pacing = config.pacing()?;
    let source = list_by_region(config.region);

    let (pool, question_limit, time_remaining) = match pacing {
      Pacing::Count(n) => {
        let limit = (n as usize).min(source.len());
        let pool = build_pool(&source, limit, prior, &mut self.rng);
        let question_limit = pool.len();
        (pool, question_limit, 0)
      }
      Pacing::Timed(seconds) => {
        let pool = build_pool(&source, source.len(), prior, &mut self.rng);
        let question_limit = pool.len();
        (pool, question_limit, seconds)
      }
    };

    let next_memory = PriorSessionMemory::from_pool(&pool);
    let id = Uuid::new_v4();

    self.id = Some(id);
    self.config = config;
    self.pool = pool;
    self.question_limit = question_limit;
    self.current_index = 0;
    self.score = 0;
    self.hints_used = 0;
    self.answered_count = 0;
    self.time_remaining = time_remaining;
    self.result = None;
    self.reset_question();
    self.status = GameStatus::Playing;

    info!(target: "quiz", session = %id, pool = self.pool.len(), question_limit, time_remaining, "Session started");
    Ok(next_memory)
  }

  /// Back to `setup`; the finished or in-progress session is dropped.
  pub fn reset(&mut self) {
    let rng = std::mem::replace(&mut self.rng, StdRng::seed_from_u64(0));
    *self = Self::with_rng(rng);
  }

  /// Replace the draft input (per-keystroke updates from the view).
  pub fn update_input(&mut self, input: PlayerInput) -> bool {
    if !self.accepts_input() {
      return false;
    }
    self.input = input;
    true
  }

  #[instrument(level = "debug", skip(self, input), fields(session = ?self.id, index = self.current_index, hint_level = self.hint_level))]
  pub fn submit_answer(&mut self, input: PlayerInput) -> SubmitOutcome {
    if !self.accepts_input() {
      return SubmitOutcome::Ignored;
    }
    let Some(country) = self.current_country() else {
      return SubmitOutcome::Ignored;
    };

    self.input = input;
    let answer = effective_answer(country, self.hint_level, &self.revealed, &self.input);

    if is_correct(country, &answer) {
      let points = points_for_hint_level(self.hint_level);
      self.score += points;
      self.answered_count += 1;
      self.result = Some(AnswerOutcome::Correct);
      debug!(target: "quiz", code = country.code, points, score = self.score, "Correct answer");
      SubmitOutcome::Correct { points }
    } else if self.hint_level < MAX_HINT_LEVEL {
      self.escalate(country);
      debug!(target: "quiz", code = country.code, hint_level = self.hint_level, "Wrong answer; hint applied");
      SubmitOutcome::Escalated { hint_level: self.hint_level }
    } else {
      self.answered_count += 1;
      self.result = Some(AnswerOutcome::Wrong);
      debug!(target: "quiz", code = country.code, "Wrong answer at max hint level");
      SubmitOutcome::Failed { answer: country.name }
    }
  }

  #[instrument(level = "debug", skip(self), fields(session = ?self.id, index = self.current_index))]
  pub fn request_hint(&mut self) -> HintOutcome {
    if !self.hint_available() {
      return HintOutcome::Ignored;
    }
    let Some(country) = self.current_country() else {
      return HintOutcome::Ignored;
    };
    self.escalate(country);
    HintOutcome::Revealed { hint_level: self.hint_level }
  }

  /// Move past a question whose result is showing.
  pub fn advance_question(&mut self) -> AdvanceOutcome {
    if self.status != GameStatus::Playing || self.result.is_none() {
      return AdvanceOutcome::Ignored;
    }
    self.next_question()
  }

  /// Timed mode: give up on the current question without scoring.
  pub fn skip(&mut self) -> AdvanceOutcome {
    if self.mode() != GameMode::Timed || !self.accepts_input() {
      return AdvanceOutcome::Ignored;
    }
    self.answered_count += 1;
    self.next_question()
  }

  /// One second of the countdown. Reaching zero ends the session.
  pub fn tick(&mut self) -> TickOutcome {
    if !self.is_ticking() {
      return TickOutcome::Ignored;
    }
    self.time_remaining -= 1;
    if self.time_remaining == 0 {
      self.time_up();
      return TickOutcome::TimeUp;
    }
    TickOutcome::Ticked { remaining: self.time_remaining }
  }

  /// End a timed session now, whatever the current question is doing.
  /// Count sessions have no clock and ignore this.
  pub fn time_up(&mut self) -> bool {
    if self.status != GameStatus::Playing || self.mode() != GameMode::Timed {
      return false;
    }
    self.time_remaining = 0;
    self.finish();
    true
  }

  // ---- queries ----

  pub fn id(&self) -> Option<Uuid> { self.id }
  pub fn status(&self) -> GameStatus { self.status }
  pub fn config(&self) -> &GameConfig { &self.config }
  pub fn mode(&self) -> GameMode { self.config.mode }
  pub fn pool(&self) -> &[&'static Country] { &self.pool }
  pub fn question_limit(&self) -> usize { self.question_limit }
  pub fn current_index(&self) -> usize { self.current_index }
  pub fn score(&self) -> u32 { self.score }
  pub fn hints_used(&self) -> u32 { self.hints_used }
  pub fn hint_level(&self) -> u8 { self.hint_level }
  pub fn revealed(&self) -> &BTreeSet<usize> { &self.revealed }
  pub fn answered_count(&self) -> u32 { self.answered_count }
  pub fn time_remaining(&self) -> u32 { self.time_remaining }
  pub fn result(&self) -> Option<AnswerOutcome> { self.result }
  pub fn input(&self) -> &PlayerInput { &self.input }

  /// Country on screen; `None` outside `playing`.
  pub fn current_country(&self) -> Option<&'static Country> {
    if self.status != GameStatus::Playing {
      return None;
    }
    self.pool.get(self.current_index).copied()
  }

  pub fn hint_available(&self) -> bool {
    self.accepts_input() && self.hint_level < MAX_HINT_LEVEL
  }

  pub fn skip_available(&self) -> bool {
    self.mode() == GameMode::Timed && self.accepts_input()
  }

  /// True while the countdown should be running.
  pub fn is_ticking(&self) -> bool {
    self.status == GameStatus::Playing && self.mode() == GameMode::Timed && self.time_remaining > 0
  }

  /// Count mode is judged against every question it asked; timed mode only
  /// against the questions the player got to.
  pub fn max_score(&self) -> u32 {
    let questions = match self.mode() {
      GameMode::Count => self.question_limit as u32,
      GameMode::Timed => self.answered_count,
    };
    questions * MAX_POINTS_PER_QUESTION
  }

  pub fn summary(&self) -> Option<SessionSummary> {
    (self.status == GameStatus::Finished).then(|| SessionSummary {
      score: self.score,
      max_score: self.max_score(),
      answered_count: self.answered_count,
      hints_used: self.hints_used,
    })
  }

  // ---- internals ----

  fn accepts_input(&self) -> bool {
    self.status == GameStatus::Playing && self.result.is_none()
  }

  fn escalate(&mut self, country: &'static Country) {
    self.hint_level += 1;
    self.revealed = hints::revealed_indices(country, self.hint_level, &self.revealed, &mut self.rng);
    self.input = PlayerInput::blank_for(country, self.hint_level);
    self.hints_used += 1;
  }

  fn next_question(&mut self) -> AdvanceOutcome {
    if self.current_index + 1 >= self.question_limit {
      self.finish();
      return AdvanceOutcome::Finished;
    }
    self.current_index += 1;
    self.result = None;
    self.reset_question();
    AdvanceOutcome::Next { index: self.current_index }
  }

  fn reset_question(&mut self) {
    self.hint_level = 0;
    self.revealed.clear();
    self.input = PlayerInput::default();
  }

  fn finish(&mut self) {
    self.status = GameStatus::Finished;
    if let Some(id) = self.id {
      info!(
        target: "quiz",
        session = %id,
        score = self.score,
        max_score = self.max_score(),
        answered = self.answered_count,
        hints_used = self.hints_used,
        "Session finished"
      );
    }
  }
}
