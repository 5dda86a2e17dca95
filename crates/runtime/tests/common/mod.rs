//! Shared fixtures for session tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use game_core::{
    Combatant, Direction, FixedRng, GameConfig, GameState, PieceId, PlayerId, Position,
};
use runtime::{
    AudioCue, AudioSink, Banner, DialogHost, Effect, ExamineCard, GameSession, Input, RenderSink,
    RuntimeConfig, Step,
};

/// Host that records everything and answers prompts from a script.
#[derive(Default)]
pub struct RecordingHost {
    pub effects: Mutex<Vec<Effect>>,
    pub cues: Mutex<Vec<AudioCue>>,
    pub banners: Mutex<Vec<Banner>>,
    pub cards: Mutex<Vec<ExamineCard>>,
    answers: Mutex<VecDeque<bool>>,
    /// Never answer the attack prompt.
    hang_prompt: bool,
}

impl RecordingHost {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self {
            hang_prompt: true,
            ..Self::default()
        }
    }

    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues.lock().unwrap().clone()
    }

    pub fn banners(&self) -> Vec<Banner> {
        self.banners.lock().unwrap().clone()
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects.lock().unwrap().clone()
    }

    pub fn error_count(&self) -> usize {
        self.cues().iter().filter(|c| **c == AudioCue::Error).count()
    }
}

#[async_trait]
impl RenderSink for RecordingHost {
    async fn present(&self, effect: Effect, _state: &GameState) {
        self.effects.lock().unwrap().push(effect);
    }
}

impl AudioSink for RecordingHost {
    fn cue(&self, cue: AudioCue) {
        self.cues.lock().unwrap().push(cue);
    }
}

#[async_trait]
impl DialogHost for RecordingHost {
    async fn banner(&self, banner: Banner) {
        self.banners.lock().unwrap().push(banner);
    }

    async fn examine(&self, card: ExamineCard) {
        self.cards.lock().unwrap().push(card);
    }

    async fn confirm_attack(&self, _attacker: PieceId, _defender: PieceId) -> bool {
        if self.hang_prompt {
            std::future::pending::<()>().await;
        }
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

pub fn config_with(one: Position, two: Position) -> GameConfig {
    GameConfig {
        player_one_start: Some(one),
        player_two_start: Some(two),
        ..GameConfig::default()
    }
}

/// Two human players, no delays, pinned dice.
pub fn session(config: GameConfig, host: RecordingHost, roll: u32) -> GameSession<RecordingHost> {
    GameSession::builder(host)
        .game_config(config)
        .runtime_config(RuntimeConfig::headless(7))
        .rng(FixedRng(roll))
        .build()
        .unwrap()
}

pub async fn press(session: &mut GameSession<RecordingHost>, inputs: &[Input]) -> Step {
    let mut step = Step::Continue;
    for input in inputs {
        step = session.handle_input(*input).await.unwrap();
    }
    step
}

pub async fn repeat(
    session: &mut GameSession<RecordingHost>,
    direction: Direction,
    times: usize,
) -> Step {
    let inputs = vec![Input::Direction(direction); times];
    press(session, &inputs).await
}

/// Open the current wizard's spell list and pick the spell bound to `key`.
pub async fn pick_spell(session: &mut GameSession<RecordingHost>, key: u8) {
    press(session, &[Input::Confirm, Input::Select(1), Input::Select(key)]).await;
}

pub fn hp(session: &GameSession<RecordingHost>, player: PlayerId) -> u32 {
    session
        .state()
        .wizard(player)
        .and_then(|piece| piece.unit.as_combatant())
        .map(|unit| unit.hp())
        .unwrap_or(0)
}

pub fn has_used(session: &GameSession<RecordingHost>, player: PlayerId, spell: &str) -> bool {
    session
        .state()
        .wizard(player)
        .and_then(|piece| piece.unit.as_wizard())
        .is_some_and(|wizard| wizard.has_used_spell(spell))
}
