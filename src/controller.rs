//! Per-connection quiz controller.
//!
//! Owns the current session and the memory of the previous session's
//! countries, so consecutive games on one connection avoid repeating
//! themselves. Translates client messages into session transitions and
//! answers every message with a snapshot.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::QuizSettings;
use crate::domain::GameConfig;
use crate::protocol::{snapshot, ClientMessage, ServerMessage, SessionEvent};
use crate::sampler::PriorSessionMemory;
use crate::session::{AdvanceOutcome, HintOutcome, QuizSession, SubmitOutcome, TickOutcome};

pub struct QuizController {
  session: QuizSession,
  memory: PriorSessionMemory,
  settings: Arc<QuizSettings>,
  last_config: Option<GameConfig>,
}

impl QuizController {
  pub fn new(settings: Arc<QuizSettings>) -> Self {
    Self::with_session(settings, QuizSession::new())
  }

  pub fn with_session(settings: Arc<QuizSettings>, session: QuizSession) -> Self {
    Self { session, memory: PriorSessionMemory::new(), settings, last_config: None }
  }

  pub fn session(&self) -> &QuizSession { &self.session }
  pub fn memory(&self) -> &PriorSessionMemory { &self.memory }

  #[instrument(level = "debug", skip(self), fields(session = ?self.session.id()))]
  pub fn handle(&mut self, msg: ClientMessage) -> ServerMessage {
    let event = match msg {
      ClientMessage::Ping => return ServerMessage::Pong,

      ClientMessage::Start { config } => match self.start(config) {
        Ok(event) => event,
        Err(message) => return ServerMessage::Error { message },
      },

      ClientMessage::Restart => {
        let config = self.last_config.clone().unwrap_or_else(|| self.settings.defaults.clone());
        match self.start(config) {
          Ok(event) => event,
          Err(message) => return ServerMessage::Error { message },
        }
      }

      ClientMessage::Input { input } => {
        if self.session.update_input(input) { SessionEvent::InputUpdated } else { SessionEvent::Ignored }
      }

      ClientMessage::Submit { input } => match self.session.submit_answer(input) {
        SubmitOutcome::Correct { points } => SessionEvent::Correct { points },
        SubmitOutcome::Escalated { hint_level } => SessionEvent::Escalated { level: hint_level },
        SubmitOutcome::Failed { answer } => SessionEvent::Failed { answer },
        SubmitOutcome::Ignored => SessionEvent::Ignored,
      },

      ClientMessage::Hint => match self.session.request_hint() {
        HintOutcome::Revealed { hint_level } => SessionEvent::HintRevealed { level: hint_level },
        HintOutcome::Ignored => SessionEvent::Ignored,
      },

      ClientMessage::Skip => match self.session.skip() {
        AdvanceOutcome::Next { index } => SessionEvent::Skipped { index },
        AdvanceOutcome::Finished => SessionEvent::Finished,
        AdvanceOutcome::Ignored => SessionEvent::Ignored,
      },

      ClientMessage::Advance => match self.session.advance_question() {
        AdvanceOutcome::Next { index } => SessionEvent::Advanced { index },
        AdvanceOutcome::Finished => SessionEvent::Finished,
        AdvanceOutcome::Ignored => SessionEvent::Ignored,
      },

      ClientMessage::Reset => {
        self.session.reset();
        SessionEvent::Reset
      }

      ClientMessage::Snapshot => SessionEvent::Current,
    };
    self.reply(event)
  }

  /// One second of countdown for the session the clock was armed for.
  ///
  /// Returns `None` when `id` is not the current session: the tick belongs to
  /// a session that has since been restarted or reset and must not be applied.
  pub fn on_tick(&mut self, id: Uuid) -> Option<ServerMessage> {
    if self.session.id() != Some(id) {
      debug!(target: "quiz", stale = %id, current = ?self.session.id(), "Dropped stale clock tick");
      return None;
    }
    let event = match self.session.tick() {
      TickOutcome::Ticked { remaining } => SessionEvent::Tick { remaining },
      TickOutcome::TimeUp => SessionEvent::TimeUp,
      TickOutcome::Ignored => SessionEvent::Ignored,
    };
    Some(self.reply(event))
  }

  fn start(&mut self, config: GameConfig) -> Result<SessionEvent, String> {
    let config = config.with_defaults(&self.settings.defaults);
    match self.session.start(config.clone(), &self.memory) {
      Ok(next) => {
        self.memory = next;
        self.last_config = Some(config);
        Ok(SessionEvent::Started)
      }
      Err(e) => {
        warn!(target: "quiz", error = %e, "Rejected game config");
        Err(e.to_string())
      }
    }
  }

  fn reply(&self, event: SessionEvent) -> ServerMessage {
    if matches!(event, SessionEvent::Finished | SessionEvent::TimeUp) {
      info!(target: "quiz", session = ?self.session.id(), ?event, "Session ended");
    }
    ServerMessage::Snapshot { event, session: snapshot(&self.session, &self.settings.flags) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::PlayerInput;
  use crate::catalog::{Region, RegionFilter};
  use crate::domain::{GameMode, GameStatus};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn controller(seed: u64) -> QuizController {
    QuizController::with_session(Arc::new(QuizSettings::default()), QuizSession::with_rng(StdRng::seed_from_u64(seed)))
  }

  fn event_of(msg: &ServerMessage) -> &SessionEvent {
    match msg {
      ServerMessage::Snapshot { event, .. } => event,
      other => panic!("expected snapshot, got {other:?}"),
    }
  }

  #[test]
  fn ping_pongs() {
    let mut c = controller(1);
    assert!(matches!(c.handle(ClientMessage::Ping), ServerMessage::Pong));
  }

  #[test]
  fn start_records_memory_and_config() {
    let mut c = controller(2);
    let reply = c.handle(ClientMessage::Start { config: GameConfig::count(Region::Oceania.into(), 4) });
    assert_eq!(event_of(&reply), &SessionEvent::Started);
    assert_eq!(c.memory().len(), 4);
    assert_eq!(c.session().status(), GameStatus::Playing);

    let first_id = c.session().id();
    let reply = c.handle(ClientMessage::Restart);
    assert_eq!(event_of(&reply), &SessionEvent::Started);
    assert_ne!(c.session().id(), first_id);
    assert_eq!(c.session().question_limit(), 4);
    assert!(c.session().pool().iter().all(|country| c.memory().contains(country.code)));
  }

  #[test]
  fn bad_config_is_reported_not_applied() {
    let mut c = controller(3);
    let reply = c.handle(ClientMessage::Start { config: GameConfig::timed(RegionFilter::All, 0) });
    assert!(matches!(reply, ServerMessage::Error { .. }));
    assert_eq!(c.session().status(), GameStatus::Setup);
    assert!(c.memory().is_empty());
  }

  #[test]
  fn missing_limit_uses_settings_default() {
    let mut c = controller(4);
    let config = GameConfig { mode: GameMode::Timed, region: RegionFilter::All, count_limit: None, time_limit: None };
    c.handle(ClientMessage::Start { config });
    assert_eq!(c.session().time_remaining(), 60);
  }

  #[test]
  fn submit_flow_maps_to_events() {
    let mut c = controller(5);
    c.handle(ClientMessage::Start { config: GameConfig::count(Region::Europe.into(), 2) });

    let reply = c.handle(ClientMessage::Submit { input: PlayerInput::Text("Atlantis".into()) });
    assert_eq!(event_of(&reply), &SessionEvent::Escalated { level: 1 });

    let name = c.session().current_country().unwrap().name;
    let reply = c.handle(ClientMessage::Submit { input: PlayerInput::Text(name.into()) });
    assert_eq!(event_of(&reply), &SessionEvent::Correct { points: 8 });

    let reply = c.handle(ClientMessage::Hint);
    assert_eq!(event_of(&reply), &SessionEvent::Ignored);

    let reply = c.handle(ClientMessage::Advance);
    assert_eq!(event_of(&reply), &SessionEvent::Advanced { index: 1 });

    let name = c.session().current_country().unwrap().name;
    c.handle(ClientMessage::Submit { input: PlayerInput::Text(name.into()) });
    let reply = c.handle(ClientMessage::Advance);
    assert_eq!(event_of(&reply), &SessionEvent::Finished);
    match reply {
      ServerMessage::Snapshot { session, .. } => {
        let summary = session.summary.unwrap();
        assert_eq!(summary.score, 18);
        assert_eq!(summary.max_score, 20);
        assert_eq!(summary.hints_used, 1);
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn ticks_drive_timed_sessions() {
    let mut c = controller(6);
    c.handle(ClientMessage::Start { config: GameConfig::timed(Region::Asia.into(), 2) });
    let id = c.session().id().unwrap();
    assert_eq!(event_of(&c.on_tick(id).unwrap()), &SessionEvent::Tick { remaining: 1 });
    assert_eq!(event_of(&c.on_tick(id).unwrap()), &SessionEvent::TimeUp);
    assert_eq!(event_of(&c.on_tick(id).unwrap()), &SessionEvent::Ignored);
    assert_eq!(c.session().status(), GameStatus::Finished);
  }

  #[test]
  fn tick_for_replaced_session_is_dropped() {
    let mut c = controller(8);
    c.handle(ClientMessage::Start { config: GameConfig::timed(Region::Asia.into(), 30) });
    let old_id = c.session().id().unwrap();

    c.handle(ClientMessage::Restart);
    assert_ne!(c.session().id(), Some(old_id));
    assert!(c.on_tick(old_id).is_none());
    assert_eq!(c.session().time_remaining(), 30);

    c.handle(ClientMessage::Reset);
    assert!(c.on_tick(old_id).is_none());
    assert_eq!(c.session().status(), GameStatus::Setup);
  }

  #[test]
  fn reset_keeps_memory() {
    let mut c = controller(7);
    c.handle(ClientMessage::Start { config: GameConfig::count(Region::Africa.into(), 5) });
    let reply = c.handle(ClientMessage::Reset);
    assert_eq!(event_of(&reply), &SessionEvent::Reset);
    assert_eq!(c.session().status(), GameStatus::Setup);
    assert_eq!(c.memory().len(), 5);
  }
}
