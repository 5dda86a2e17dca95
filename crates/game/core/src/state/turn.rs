use super::PlayerId;

/// Turn bookkeeping: whose turn it is and whether the duel has ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub current_player: PlayerId,
    /// Monotonic counter starting at 1; incremented by every end of turn.
    pub turn_number: u32,
    /// Count of accepted actions. Mixed into roll seeds.
    pub nonce: u64,
    /// Set the instant a wizard dies; no further turns run afterwards.
    pub winner: Option<PlayerId>,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            current_player: PlayerId::One,
            turn_number: 1,
            nonce: 0,
            winner: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Final outcome of a finished duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameResult {
    pub winner: PlayerId,
    /// Turn number on which the game ended.
    pub turns: u32,
}
