//! Async turn controller for the wizard duel.
//!
//! This crate drives [`game_core`] on behalf of a front end. The front end
//! implements the [`Host`] traits (render sink, audio cues, dialogs) and feeds
//! [`Input`] edges to a [`GameSession`]; computer-controlled sides are played
//! by an [`ActionProvider`], [`DuelAi`] by default.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the turn controller, interaction modes and menus
//! - [`api`] exposes the host interfaces, provider trait and errors
//! - [`providers`] contains the rule-based AI
//! - [`events`] provides topic-based event bus for observers
//! - [`config`] carries pacing, AI tuning and who is AI controlled
pub mod api;
pub mod config;
pub mod events;
pub mod providers;
pub mod session;

pub use api::{
    ActionProvider, AudioCue, AudioSink, Banner, Decision, DialogHost, Effect, ExamineCard, Host,
    InputError, MenuItem, MenuView, PassProvider, RenderSink, Result, RuntimeError,
};
pub use config::{AiConfig, Pacing, RuntimeConfig};
pub use events::{ActionEvent, Event, EventBus, SessionEvent, Topic, TurnEvent};
pub use providers::{AiContext, AiRule, DuelAi, RuleChain};
pub use session::{GameSession, Input, MenuEntry, MenuPage, Mode, SessionBuilder, Step, Targeting};
