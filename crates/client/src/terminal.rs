//! Plain-text host: draws the board on stdout and reads answers from the
//! shared stdin reader.
use std::fmt::Write as _;

use async_trait::async_trait;
use game_core::{GameState, PieceCategory, PieceId, Position};
use runtime::{AudioCue, AudioSink, Banner, DialogHost, Effect, ExamineCard, RenderSink};
use tokio::sync::{Mutex, mpsc};

pub struct TerminalHost {
    answers: Mutex<mpsc::Receiver<bool>>,
}

impl TerminalHost {
    pub fn new(answers: mpsc::Receiver<bool>) -> Self {
        Self {
            answers: Mutex::new(answers),
        }
    }

    /// Prints `question` and waits for a y/n line. A closed stdin counts as
    /// "no".
    pub async fn ask(&self, question: &str) -> bool {
        let mut answers = self.answers.lock().await;
        while answers.try_recv().is_ok() {}
        println!("{question} (y/n)");
        answers.recv().await.unwrap_or(false)
    }
}

fn glyph(category: PieceCategory) -> char {
    match category {
        PieceCategory::Player1 => '1',
        PieceCategory::Player2 => '2',
        PieceCategory::GoblinP1 => 'g',
        PieceCategory::GoblinP2 => 'G',
        PieceCategory::IceWall => '#',
    }
}

/// ASCII board, one row per line. The cursor cell is bracketed.
pub fn draw_board(state: &GameState) -> String {
    let board = &state.board;
    let cursor = board.cursor();
    let mut out = String::new();

    for y in 1..=board.height() {
        for x in 1..=board.width() {
            let at = Position::new(x, y);
            let cell = match board.piece_at(at) {
                Some(piece) => glyph(piece.category()),
                None if board.is_tile_destroyed(at) => 'x',
                None => '.',
            };
            if at == cursor {
                let _ = write!(out, "[{cell}]");
            } else {
                let _ = write!(out, " {cell} ");
            }
        }
        out.push('\n');
    }
    out
}

fn describe(effect: &Effect) -> Option<String> {
    let line = match effect {
        Effect::Board | Effect::Cursor(_) | Effect::MenuClosed | Effect::Placed { .. } => {
            return None;
        }
        Effect::Moved { piece, from, to } => format!("{piece} moves {from} -> {to}"),
        Effect::Menu(menu) => {
            let mut text = format!("== {} ==", menu.title);
            for item in &menu.items {
                let used = if item.used { " [USED]" } else { "" };
                let _ = write!(text, "\n  {}. {}{used}", item.key, item.label);
            }
            text.push_str("\n  k. Back");
            text
        }
        Effect::Targeting {
            spell,
            origin,
            range,
        } => format!("{spell}: pick a target within {range} of {origin}, s to cast, k to cancel"),
        Effect::SpellCast { effect, from, to } => format!("{effect} flies {from} -> {to}"),
        Effect::Impact { effect, at, damage } => format!("{effect} hits {at} for {damage}"),
        Effect::Strike {
            attacker,
            at,
            damage,
        } => format!("{attacker} strikes {at} for {damage}"),
        Effect::Shielded { piece, amount } => format!("{piece} raises a shield of {amount}"),
        Effect::WallShattered { at, .. } => format!("the ice wall at {at} shatters"),
        Effect::TileDestroyed(at) => format!("the ground at {at} is blasted away"),
        Effect::Death { piece, at } => format!("{piece} falls at {at}"),
        Effect::Paused(true) => "-- paused (p to resume) --".to_owned(),
        Effect::Paused(false) => "-- resumed --".to_owned(),
    };
    Some(line)
}

/// Effects after which the board is worth redrawing.
fn redraws(effect: &Effect) -> bool {
    matches!(
        effect,
        Effect::Board
            | Effect::Cursor(_)
            | Effect::Moved { .. }
            | Effect::Placed { .. }
            | Effect::WallShattered { .. }
            | Effect::TileDestroyed(_)
            | Effect::Death { .. }
    )
}

#[async_trait]
impl RenderSink for TerminalHost {
    async fn present(&self, effect: Effect, state: &GameState) {
        if let Some(line) = describe(&effect) {
            println!("{line}");
        }
        if redraws(&effect) {
            print!("{}", draw_board(state));
        }
    }
}

impl AudioSink for TerminalHost {
    fn cue(&self, cue: AudioCue) {
        tracing::trace!(%cue, "audio cue");
        if cue == AudioCue::Error {
            println!("(not allowed)");
        }
    }
}

#[async_trait]
impl DialogHost for TerminalHost {
    async fn banner(&self, banner: Banner) {
        match banner {
            Banner::Turn { player, turn } => println!("\n*** {player}'s Turn (turn {turn}) ***"),
            Banner::Victory(result) => {
                println!("\n*** {} wins after {} turns! ***", result.winner, result.turns);
            }
        }
    }

    async fn examine(&self, card: ExamineCard) {
        println!("-- {} --", card.name);
        for line in &card.bio {
            println!("  {line}");
        }
        println!("  HP: {}/{}  Shield: {}", card.hp, card.max_hp, card.shield);
        if !card.used_spells.is_empty() {
            println!("  Used: {}", card.used_spells.join(", "));
        }
    }

    async fn confirm_attack(&self, attacker: PieceId, defender: PieceId) -> bool {
        self.ask(&format!("{attacker} is next to {defender}. Attack?"))
            .await
    }
}
