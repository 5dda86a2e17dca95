//! Topic-based event stream of everything a session does.
//!
//! The bus is an observation channel for loggers, replays and UIs. Session
//! control never depends on anyone listening.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ActionEvent, SessionEvent, TurnEvent};
