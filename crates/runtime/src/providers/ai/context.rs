//! Read-only view of the board from the AI wizard's perspective.

use game_core::{
    Combatant, GameEnv, GameState, PlayerId, Position, SpellDefinition, Wizard,
};

use crate::api::{Result, RuntimeError};
use crate::config::AiConfig;

/// Blackboard shared by every rule of the chain.
pub struct AiContext<'a> {
    pub player: PlayerId,
    pub state: &'a GameState,
    pub env: GameEnv<'a>,
    pub config: &'a AiConfig,
    pub wizard: &'a Wizard,
    pub position: Position,
    pub opponent: Position,
    /// Chebyshev distance to the opposing wizard.
    pub distance: u32,
}

impl<'a> AiContext<'a> {
    pub fn new(
        player: PlayerId,
        state: &'a GameState,
        env: GameEnv<'a>,
        config: &'a AiConfig,
    ) -> Result<Self> {
        let own = state
            .wizard(player)
            .ok_or(RuntimeError::MissingWizard(player))?;
        let wizard = own
            .unit
            .as_wizard()
            .ok_or(RuntimeError::MissingWizard(player))?;
        let opponent = state
            .wizard(player.opponent())
            .ok_or(RuntimeError::MissingWizard(player.opponent()))?
            .position;

        Ok(Self {
            player,
            state,
            env,
            config,
            wizard,
            position: own.position,
            opponent,
            distance: own.position.chebyshev(opponent),
        })
    }

    pub fn hp(&self) -> u32 {
        self.wizard.hp()
    }

    /// The catalog entry for `name`, if it exists and is still unused.
    pub fn usable_spell(&self, name: &str) -> Option<&'a SpellDefinition> {
        self.env
            .spells
            .by_name(name)
            .filter(|spell| !self.wizard.has_used_spell(&spell.name))
    }

    pub fn line_is_clear(&self) -> bool {
        self.state
            .board
            .obstacle_in_path(self.position, self.opponent)
            .is_none()
    }

    /// First preferred offensive spell that reaches the opponent over a
    /// clear line.
    pub fn best_offensive(&self) -> Option<&'a SpellDefinition> {
        if !self.line_is_clear() {
            return None;
        }
        self.config
            .offensive_preference
            .iter()
            .filter_map(|name| self.usable_spell(name))
            .find(|spell| spell.kind.is_offensive() && self.distance <= spell.range)
    }

    /// Shortest range among the preferred offensive spells in the catalog.
    pub fn shortest_offensive_range(&self) -> Option<u32> {
        self.config
            .offensive_preference
            .iter()
            .filter_map(|name| self.env.spells.by_name(name))
            .filter(|spell| spell.kind.is_offensive())
            .map(|spell| spell.range)
            .min()
    }

    /// True when a piece could step onto `cell`.
    pub fn is_free(&self, cell: Position) -> bool {
        self.state.board.check_placement(cell).is_ok()
    }
}
