//! Interfaces to the rendering, audio and dialog host.
//!
//! The session never draws, plays sound or reads devices itself. It describes
//! what happened as an [`Effect`] and awaits the host; an awaited call returns
//! once the presentation has finished, which is the only completion signal
//! the session relies on.

use async_trait::async_trait;
use game_core::{
    GameResult, GameState, PieceCategory, PieceId, PlayerId, Position, SpellEffect,
};
use serde::{Deserialize, Serialize};

/// One entry of a piece menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Digit that selects the entry.
    pub key: u8,
    pub label: String,
    /// Spell entries already cast by this wizard render as `[USED]`.
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuView {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// Contents of the examine dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamineCard {
    pub name: String,
    pub bio: Vec<String>,
    pub hp: u32,
    pub max_hp: u32,
    pub shield: u32,
    pub used_spells: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Banner {
    Turn { player: PlayerId, turn: u32 },
    Victory(GameResult),
}

/// Something the render sink should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Full redraw, e.g. at session start.
    Board,
    Placed {
        piece: PieceId,
        category: PieceCategory,
        at: Position,
    },
    Moved {
        piece: PieceId,
        from: Position,
        to: Position,
    },
    Cursor(Position),
    Menu(MenuView),
    MenuClosed,
    Targeting {
        spell: String,
        origin: Position,
        range: u32,
    },
    /// A projectile leaving the caster.
    SpellCast {
        effect: SpellEffect,
        from: Position,
        to: Position,
    },
    Impact {
        effect: SpellEffect,
        at: Position,
        damage: u32,
    },
    /// Melee blow between adjacent pieces.
    Strike {
        attacker: PieceId,
        at: Position,
        damage: u32,
    },
    Shielded {
        piece: PieceId,
        amount: u32,
    },
    WallShattered {
        piece: PieceId,
        at: Position,
    },
    TileDestroyed(Position),
    Death {
        piece: PieceId,
        at: Position,
    },
    Paused(bool),
}

/// Named sound cues. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum AudioCue {
    Click,
    Error,
    Step,
    Spell(SpellEffect),
    Impact,
    Death,
    Victory,
}

#[async_trait]
pub trait RenderSink: Send + Sync {
    /// Presents `effect`; returns once the presentation has finished.
    async fn present(&self, effect: Effect, state: &GameState);
}

pub trait AudioSink: Send + Sync {
    fn cue(&self, cue: AudioCue);
}

#[async_trait]
pub trait DialogHost: Send + Sync {
    /// Shows a banner; returns when it may be dismissed.
    async fn banner(&self, banner: Banner);

    async fn examine(&self, card: ExamineCard);

    /// Yes/no prompt offered after a move lands next to an enemy. The
    /// session applies its own timeout and treats expiry as "no".
    async fn confirm_attack(&self, attacker: PieceId, defender: PieceId) -> bool;
}

/// Everything a session needs from its front end.
pub trait Host: RenderSink + AudioSink + DialogHost {}

impl<T> Host for T where T: RenderSink + AudioSink + DialogHost {}
