//! Rule-based AI for the computer-controlled wizard.
//!
//! Decision-making is an ordered chain of rules evaluated against an
//! [`AiContext`]; the first rule that produces a [`crate::Decision`] wins:
//!
//! 1. **Shield**: shield up when unable to attack from afar, or when hurt
//! 2. **Offensive**: strongest preferred spell in range with a clear line
//! 3. **Ice Wall**: block the opponent's approach at medium distance
//! 4. **Approach**: step to the free neighbour closest to the opponent
//!
//! When no rule applies the wizard passes.

pub mod context;
pub mod provider;
pub mod rules;

pub use context::AiContext;
pub use provider::DuelAi;
pub use rules::{AiRule, ApproachRule, IceWallRule, OffensiveRule, RuleChain, ShieldRule};
