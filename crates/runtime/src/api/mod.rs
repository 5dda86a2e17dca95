//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate:
//! errors, the host interfaces a front end implements, and the action
//! provider abstraction used by computer-controlled sides.

pub mod errors;
pub mod host;
pub mod providers;

pub use errors::{InputError, Result, RuntimeError};
pub use host::{
    AudioCue, AudioSink, Banner, DialogHost, Effect, ExamineCard, Host, MenuItem, MenuView,
    RenderSink,
};
pub use providers::{ActionProvider, Decision, PassProvider};
