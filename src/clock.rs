//! Once-per-second countdown driver for timed sessions.
//!
//! The clock is armed for a specific session id. Anything that is not that
//! session playing in timed mode disarms it, and a disarmed clock never fires,
//! so a stale interval cannot tick a newer session.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;
use uuid::Uuid;

use crate::session::QuizSession;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Default)]
pub struct GameClock {
    armed: Option<(Uuid, Interval)>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Arm, re-arm or disarm to match the session's current state.
    pub fn sync(&mut self, session: &QuizSession) {
        match (session.is_ticking(), session.id()) {
            (true, Some(id)) => {
                if matches!(&self.armed, Some((armed_id, _)) if *armed_id == id) {
                    return;
                }
                // First tick one full period after arming.
                let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                debug!(target: "quiz", session = %id, "Clock armed");
                self.armed = Some((id, interval));
            }
            _ => self.disarm(),
        }
    }

    pub fn disarm(&mut self) {
        if let Some((id, _)) = self.armed.take() {
            debug!(target: "quiz", session = %id, "Clock disarmed");
        }
    }

    /// Resolves at the next tick of the armed session; pends forever otherwise.
    pub async fn tick(&mut self) -> Uuid {
        match &mut self.armed {
            Some((id, interval)) => {
                interval.tick().await;
                *id
            }
            None => std::future::pending().await,
        }
    }
}
