//! Flag Quiz · game engine and backend
//!
//! The engine (`catalog`, `answer`, `sampler`, `hints`, `scoring`, `session`)
//! is synchronous and in-memory. `controller`, `clock`, `protocol` and `routes`
//! host one engine per WebSocket connection for a browser front end.

pub mod answer;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod hints;
pub mod protocol;
pub mod routes;
pub mod sampler;
pub mod scoring;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod util;
