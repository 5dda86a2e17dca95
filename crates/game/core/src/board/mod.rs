//! Grid model: piece placements, destroyed tiles and the selection cursor.
//!
//! The board is the single source of truth for occupancy. At most one piece
//! stands on a cell; the cursor is tracked separately and may overlap any
//! piece. Coordinates are 1-indexed: `1..=width` by `1..=height`.

mod error;
mod line;

pub use error::{BoardError, MoveError};
pub use line::cells_between;

use std::collections::BTreeSet;

use crate::state::{Axis, Direction, PieceId, PlayerId, Position};
use crate::unit::{Unit, UnitKind};

/// Rendering category of a placement, derived from unit kind and owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceCategory {
    #[strum(serialize = "player1")]
    Player1,
    #[strum(serialize = "player2")]
    Player2,
    #[strum(serialize = "goblin_p1")]
    GoblinP1,
    #[strum(serialize = "goblin_p2")]
    GoblinP2,
    #[strum(serialize = "icewall")]
    IceWall,
}

/// A unit placed on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub id: PieceId,
    pub unit: Unit,
    pub position: Position,
    /// `None` only for obstacles.
    pub owner: Option<PlayerId>,
}

impl Piece {
    pub fn category(&self) -> PieceCategory {
        match (self.unit.kind(), self.owner) {
            (UnitKind::IceWall, _) => PieceCategory::IceWall,
            (UnitKind::Wizard, Some(PlayerId::One)) => PieceCategory::Player1,
            (UnitKind::Wizard, _) => PieceCategory::Player2,
            (UnitKind::Goblin, Some(PlayerId::One)) => PieceCategory::GoblinP1,
            (UnitKind::Goblin, _) => PieceCategory::GoblinP2,
        }
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// True when both pieces have owners and they differ.
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        matches!((self.owner, other.owner), (Some(a), Some(b)) if a != b)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: i32,
    height: i32,
    pieces: Vec<Piece>,
    destroyed: BTreeSet<Position>,
    cursor: Position,
    next_id: u32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pieces: Vec::new(),
            destroyed: BTreeSet::new(),
            cursor: Position::new(1, 1),
            next_id: 1,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn is_valid_position(&self, position: Position) -> bool {
        (1..=self.width).contains(&position.x) && (1..=self.height).contains(&position.y)
    }

    /// Checks that a piece could be placed at `position`.
    pub fn check_placement(&self, position: Position) -> Result<(), BoardError> {
        if !self.is_valid_position(position) {
            return Err(BoardError::OutOfBounds(position));
        }
        if self.is_tile_destroyed(position) {
            return Err(BoardError::DestroyedTile(position));
        }
        if self.piece_at(position).is_some() {
            return Err(BoardError::Occupied(position));
        }
        Ok(())
    }

    /// Places a unit and returns its new id.
    pub fn add_piece(
        &mut self,
        unit: Unit,
        position: Position,
        owner: Option<PlayerId>,
    ) -> Result<PieceId, BoardError> {
        self.check_placement(position)?;

        let id = PieceId(self.next_id);
        self.next_id += 1;

        let mut piece = Piece {
            id,
            unit,
            position,
            owner,
        };
        piece.unit.notify_moved(position);
        self.pieces.push(piece);
        Ok(id)
    }

    /// Moves a piece by one step and returns its new position.
    pub fn move_piece(&mut self, id: PieceId, dx: i32, dy: i32) -> Result<Position, MoveError> {
        if Direction::from_delta(dx, dy).is_none() {
            return Err(MoveError::InvalidStep { dx, dy });
        }

        let index = self.index_of(id).ok_or(MoveError::PieceNotFound(id))?;
        if self.pieces[index].unit.is_obstacle() {
            return Err(MoveError::Immovable(id));
        }

        let target = self.pieces[index].position.offset(dx, dy);
        if !self.is_valid_position(target) {
            return Err(MoveError::OutOfBounds(target));
        }
        if self.is_tile_destroyed(target) {
            return Err(MoveError::DestroyedTile(target));
        }
        if self
            .pieces
            .iter()
            .any(|piece| piece.id != id && piece.position == target)
        {
            return Err(MoveError::Occupied(target));
        }

        let piece = &mut self.pieces[index];
        piece.position = target;
        piece.unit.notify_moved(target);
        Ok(target)
    }

    /// First Ice Wall strictly between `from` and `to`, nearest to `from`.
    pub fn obstacle_in_path(&self, from: Position, to: Position) -> Option<&Piece> {
        cells_between(from, to).into_iter().find_map(|cell| {
            self.piece_at(cell)
                .filter(|piece| piece.category() == PieceCategory::IceWall)
        })
    }

    /// First neighbour owned by the other side, scanning in [`Direction::ALL`]
    /// order. Obstacles are never enemies.
    pub fn adjacent_enemy(&self, id: PieceId) -> Option<&Piece> {
        let piece = self.piece(id)?;
        Direction::ALL.into_iter().find_map(|dir| {
            let (dx, dy) = dir.delta();
            self.piece_at(piece.position.offset(dx, dy))
                .filter(|neighbour| neighbour.is_enemy_of(piece))
        })
    }

    /// Marks a tile as permanently impassable. Returns false if it already was.
    pub fn destroy_tile(&mut self, position: Position) -> bool {
        self.destroyed.insert(position)
    }

    pub fn is_tile_destroyed(&self, position: Position) -> bool {
        self.destroyed.contains(&position)
    }

    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.index_of(id)?;
        Some(self.pieces.remove(index))
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|piece| piece.id == id)
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.position == position)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// The wizard owned by `player`, if still on the board.
    pub fn wizard_of(&self, player: PlayerId) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|piece| piece.unit.kind() == UnitKind::Wizard && piece.is_owned_by(player))
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Shifts the cursor along one axis. Moves that would leave the board
    /// are ignored and return false.
    pub fn alter_cursor(&mut self, axis: Axis, delta: i32) -> bool {
        let target = match axis {
            Axis::X => self.cursor.offset(delta, 0),
            Axis::Y => self.cursor.offset(0, delta),
        };
        self.set_cursor(target)
    }

    pub fn set_cursor(&mut self, position: Position) -> bool {
        if !self.is_valid_position(position) {
            return false;
        }
        self.cursor = position;
        true
    }

    fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.id == id)
    }
}
