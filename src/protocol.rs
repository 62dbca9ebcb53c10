//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::PlayerInput;
use crate::catalog::{Country, Region, RegionFilter};
use crate::config::{DisplaySettings, FlagSettings, TimeOption};
use crate::domain::{AnswerOutcome, GameConfig, GameMode, GameStatus};
use crate::hints::MAX_HINT_LEVEL;
use crate::session::{QuizSession, SessionSummary};
use crate::util::format_clock;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping,
    Start {
        #[serde(default)]
        config: GameConfig,
    },
    /// Draft update while typing; not judged.
    Input {
        input: PlayerInput,
    },
    Submit {
        input: PlayerInput,
    },
    Hint,
    Skip,
    Advance,
    /// Start again with the last config.
    Restart,
    /// Back to the setup screen.
    Reset,
    /// Ask for the current snapshot without changing anything.
    Snapshot,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Pong,
    Snapshot {
        event: SessionEvent,
        session: SessionSnapshot,
    },
    Error {
        message: String,
    },
}

/// What the last transition did, so the view can pick its animation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    Started,
    Correct { points: u32 },
    Escalated { level: u8 },
    Failed { answer: &'static str },
    HintRevealed { level: u8 },
    Advanced { index: usize },
    Skipped { index: usize },
    Tick { remaining: u32 },
    TimeUp,
    Finished,
    InputUpdated,
    Reset,
    Current,
    Ignored,
}

/// One slot of the letter-box layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LetterCell {
    Space,
    Revealed { letter: char },
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Letters,
}

/// The question on screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub code: &'static str,
    pub flag_url: String,
    pub input_kind: InputKind,
    /// Empty while `input_kind` is `text`.
    pub letters: Vec<LetterCell>,
    pub input: PlayerInput,
    pub hint_available: bool,
    pub skip_available: bool,
    pub result: Option<AnswerOutcome>,
    /// Canonical name, only once the question is decided.
    pub answer: Option<&'static str>,
}

/// Full session state after a transition.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Option<Uuid>,
    pub status: GameStatus,
    pub mode: GameMode,
    pub region: RegionFilter,
    pub current_index: usize,
    pub question_limit: usize,
    pub score: u32,
    pub hints_used: u32,
    pub hint_level: u8,
    pub max_hint_level: u8,
    pub answered_count: u32,
    pub time_remaining: Option<u32>,
    /// `M:SS` rendering of `time_remaining`.
    pub clock: Option<String>,
    pub question: Option<QuestionOut>,
    pub summary: Option<SessionSummary>,
}

/// Letter-box layout of `country` with the given revealed positions.
pub fn letter_cells(country: &Country, session: &QuizSession) -> Vec<LetterCell> {
    country
        .name
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            if ch == ' ' {
                LetterCell::Space
            } else if session.revealed().contains(&i) {
                LetterCell::Revealed { letter: ch }
            } else {
                LetterCell::Hidden
            }
        })
        .collect()
}

/// Convert the session (internal) to the public snapshot.
pub fn snapshot(session: &QuizSession, flags: &FlagSettings) -> SessionSnapshot {
    let timed = session.mode() == GameMode::Timed && session.status() != GameStatus::Setup;
    let time_remaining = timed.then(|| session.time_remaining());

    let question = session.current_country().map(|country| {
        let letter_boxes = session.hint_level() > 0;
        QuestionOut {
            code: country.code,
            flag_url: country.flag_url(&flags.cdn_base, flags.width),
            input_kind: if letter_boxes { InputKind::Letters } else { InputKind::Text },
            letters: if letter_boxes { letter_cells(country, session) } else { Vec::new() },
            input: session.input().clone(),
            hint_available: session.hint_available(),
            skip_available: session.skip_available(),
            result: session.result(),
            answer: session.result().map(|_| country.name),
        }
    });

    SessionSnapshot {
        session_id: session.id(),
        status: session.status(),
        mode: session.mode(),
        region: session.config().region,
        current_index: session.current_index(),
        question_limit: session.question_limit(),
        score: session.score(),
        hints_used: session.hints_used(),
        hint_level: session.hint_level(),
        max_hint_level: MAX_HINT_LEVEL,
        answered_count: session.answered_count(),
        time_remaining,
        clock: time_remaining.map(format_clock),
        question,
        summary: session.summary(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct RegionOut {
    pub id: &'static str,
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct CountriesQuery {
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryOut {
    pub name: &'static str,
    pub code: &'static str,
    pub region: Region,
    pub alternate_names: &'static [&'static str],
    pub flag_url: String,
}

pub fn country_out(c: &Country, flags: &FlagSettings) -> CountryOut {
    CountryOut {
        name: c.name,
        code: c.code,
        region: c.region,
        alternate_names: c.alternate_names,
        flag_url: c.flag_url(&flags.cdn_base, flags.width),
    }
}

/// Everything the setup form needs to render its choices.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsOut {
    pub defaults: GameConfig,
    pub count_options: Vec<u32>,
    pub time_options: Vec<TimeOption>,
    pub max_hint_level: u8,
    pub hint_scores: &'static [u32],
    pub display: DisplaySettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Region;
    use crate::sampler::PriorSessionMemory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn client_messages_parse() {
        let msg: ClientMessage = serde_json::from_value(json!({
            "type": "start",
            "config": { "mode": "timed", "region": "Europe", "timeLimit": 30 }
        }))
        .unwrap();
        assert!(matches!(msg, ClientMessage::Start { config } if config.time_limit == Some(30)));

        let msg: ClientMessage =
            serde_json::from_value(json!({ "type": "submit", "input": { "text": "chad" } })).unwrap();
        assert!(matches!(msg, ClientMessage::Submit { input: PlayerInput::Text(t) } if t == "chad"));

        let msg: ClientMessage = serde_json::from_value(json!({
            "type": "input",
            "input": { "letters": ["C", "", "a", ""] }
        }))
        .unwrap();
        assert!(matches!(msg, ClientMessage::Input { input: PlayerInput::Letters(cells) } if cells.len() == 4));

        assert!(serde_json::from_value::<ClientMessage>(json!({ "type": "hint" })).is_ok());
    }

    #[test]
    fn setup_snapshot_has_no_question() {
        let session = QuizSession::with_rng(StdRng::seed_from_u64(1));
        let snap = snapshot(&session, &FlagSettings::default());
        assert_eq!(snap.status, GameStatus::Setup);
        assert!(snap.question.is_none());
        assert!(snap.time_remaining.is_none());
        assert!(snap.summary.is_none());
    }

    #[test]
    fn snapshot_hides_name_until_decided() {
        let mut session = QuizSession::with_rng(StdRng::seed_from_u64(2));
        session
            .start(GameConfig::timed(Region::Oceania.into(), 75), &PriorSessionMemory::new())
            .unwrap();
        session.request_hint();
        session.request_hint();

        let snap = snapshot(&session, &FlagSettings::default());
        assert_eq!(snap.clock.as_deref(), Some("1:15"));
        let q = snap.question.as_ref().unwrap();
        assert_eq!(q.input_kind, InputKind::Letters);
        assert!(q.answer.is_none());
        let country = session.current_country().unwrap();
        assert_eq!(q.letters.len(), country.name.chars().count());
        let revealed = q.letters.iter().filter(|c| matches!(c, LetterCell::Revealed { .. })).count();
        assert_eq!(revealed, 1);
        assert!(q.flag_url.ends_with(&format!("/w320/{}.png", country.code)));

        session.submit_answer(PlayerInput::Text(country.name.to_string()));
        let snap = snapshot(&session, &FlagSettings::default());
        assert_eq!(snap.question.unwrap().answer, Some(country.name));
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let mut session = QuizSession::with_rng(StdRng::seed_from_u64(3));
        session
            .start(GameConfig::count(Region::Europe.into(), 5), &PriorSessionMemory::new())
            .unwrap();
        let msg = ServerMessage::Snapshot {
            event: SessionEvent::Started,
            session: snapshot(&session, &FlagSettings::default()),
        };
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "snapshot");
        assert_eq!(v["event"]["kind"], "started");
        assert_eq!(v["session"]["status"], "playing");
        assert_eq!(v["session"]["questionLimit"], 5);
        assert_eq!(v["session"]["region"], "Europe");
        assert_eq!(v["session"]["question"]["inputKind"], "text");
        assert!(v["session"]["timeRemaining"].is_null());
    }
}
