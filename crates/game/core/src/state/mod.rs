//! Authoritative duel state.
//!
//! Runtime layers query this state freely but mutate it exclusively through
//! [`crate::engine::GameEngine`].

mod common;
mod turn;

pub use common::{Axis, Direction, PieceId, PlayerId, Position};
pub use turn::{GameResult, TurnState};

use crate::board::{Board, BoardError, Piece};
use crate::config::GameConfig;
use crate::unit::{Unit, Wizard};

/// Canonical snapshot of a duel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Base seed for damage rolls. Set once at game start.
    pub game_seed: u64,
    pub board: Board,
    pub turn: TurnState,
    /// Goblins summoned by each side, in summon order.
    rosters: [Vec<PieceId>; 2],
}

impl GameState {
    /// Builds a fresh board with both wizards on their starting cells and
    /// the cursor on player 1's wizard.
    pub fn new(config: &GameConfig, game_seed: u64) -> Result<Self, BoardError> {
        let mut board = Board::new(config.width, config.height);

        for player in PlayerId::ALL {
            let profile = config.profile_of(player);
            let wizard =
                Wizard::new(profile.name.clone(), config.wizard_hp).with_bio(profile.bio.clone());
            board.add_piece(Unit::Wizard(wizard), config.start_of(player), Some(player))?;
        }
        board.set_cursor(config.start_of(PlayerId::One));

        Ok(Self {
            game_seed,
            board,
            turn: TurnState::new(),
            rosters: [Vec::new(), Vec::new()],
        })
    }

    pub fn wizard(&self, player: PlayerId) -> Option<&Piece> {
        self.board.wizard_of(player)
    }

    pub fn goblins(&self, player: PlayerId) -> &[PieceId] {
        &self.rosters[player.index()]
    }

    /// First goblin of `player` that has not acted this turn.
    pub fn ready_goblin(&self, player: PlayerId) -> Option<&Piece> {
        self.goblins(player)
            .iter()
            .filter_map(|id| self.board.piece(*id))
            .find(|piece| {
                piece
                    .unit
                    .as_goblin()
                    .is_some_and(|goblin| !goblin.has_acted())
            })
    }

    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.turn.winner.map(|winner| GameResult {
            winner,
            turns: self.turn.turn_number,
        })
    }

    pub(crate) fn register_goblin(&mut self, player: PlayerId, id: PieceId) {
        self.rosters[player.index()].push(id);
    }

    pub(crate) fn forget_goblin(&mut self, id: PieceId) {
        for roster in &mut self.rosters {
            roster.retain(|goblin| *goblin != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Combatant;

    #[test]
    fn new_state_places_both_wizards() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 7).unwrap();

        let one = state.wizard(PlayerId::One).unwrap();
        let two = state.wizard(PlayerId::Two).unwrap();
        assert_eq!(one.position, Position::new(1, 1));
        assert_eq!(two.position, Position::new(10, 9));
        assert_eq!(one.unit.as_wizard().unwrap().hp(), 8);
        assert_eq!(one.unit.name(), "Zephyr the White");
        assert_eq!(state.board.cursor(), Position::new(1, 1));
        assert_eq!(state.turn.current_player, PlayerId::One);
        assert_eq!(state.turn.turn_number, 1);
        assert!(state.goblins(PlayerId::One).is_empty());
    }

    #[test]
    fn overlapping_starts_are_rejected() {
        let config = GameConfig {
            player_two_start: Some(Position::new(1, 1)),
            ..GameConfig::default()
        };
        assert_eq!(
            GameState::new(&config, 0),
            Err(BoardError::Occupied(Position::new(1, 1)))
        );
    }
}
