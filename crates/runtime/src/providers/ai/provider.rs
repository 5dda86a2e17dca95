//! Rule-chain AI action provider.

use async_trait::async_trait;
use game_core::{GameEnv, GameState, PlayerId};

use super::{AiContext, RuleChain};
use crate::api::{ActionProvider, Decision, Result};
use crate::config::AiConfig;

/// Computer opponent driven by a [`RuleChain`].
///
/// Planning is synchronous and side-effect free; the provider only reads
/// the snapshot it is handed. Falls back to [`Decision::Pass`] when no rule
/// applies.
pub struct DuelAi {
    config: AiConfig,
    rules: RuleChain,
}

impl DuelAi {
    pub fn new(config: AiConfig) -> Self {
        Self::with_rules(config, RuleChain::default())
    }

    pub fn with_rules(config: AiConfig, rules: RuleChain) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn plan(&self, player: PlayerId, state: &GameState, env: GameEnv<'_>) -> Result<Decision> {
        let ctx = AiContext::new(player, state, env, &self.config)?;

        let decision = match self.rules.select(&ctx) {
            Some((rule, decision)) => {
                tracing::debug!(%player, rule, ?decision, distance = ctx.distance, "AI decision");
                decision
            }
            None => {
                tracing::debug!(%player, distance = ctx.distance, "AI has nothing to do, passing");
                Decision::Pass
            }
        };

        Ok(decision)
    }
}

impl Default for DuelAi {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

#[async_trait]
impl ActionProvider for DuelAi {
    async fn decide(
        &self,
        player: PlayerId,
        state: &GameState,
        env: GameEnv<'_>,
    ) -> Result<Decision> {
        self.plan(player, state, env)
    }
}
