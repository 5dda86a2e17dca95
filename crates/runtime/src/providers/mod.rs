//! Action provider implementations for computer-controlled sides.

pub mod ai;

pub use ai::{AiContext, AiRule, DuelAi, RuleChain};
