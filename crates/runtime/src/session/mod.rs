//! Turn controller.
//!
//! [`GameSession`] owns the authoritative [`GameState`], the current
//! interaction [`Mode`] and the host. Inputs are handled one at a time: each
//! call to [`GameSession::handle_input`] runs the whole pipeline it triggers
//! (presentation included) before returning, so nothing else can interleave.
//! Computer-controlled turns run inside the same call once the human's turn
//! hands over.

mod menu;
mod mode;
mod pipeline;

pub use menu::{MenuEntry, examine_card, root_menu, spell_menu};
pub use mode::{Input, MenuPage, Mode, Step, Targeting};

use std::time::Duration;

use game_core::{
    Action, ActionResult, ExecuteError, GameConfig, GameEngine, GameEnv,
    GameError, GameResult, GameState, PcgRng, PieceId, PlayerId, Position, RngOracle,
    SpellCatalog, TurnError,
};
use tokio::sync::mpsc;

use crate::api::{
    ActionProvider, AudioCue, Effect, Host, InputError, Result, RuntimeError,
};
use crate::config::RuntimeConfig;
use crate::events::{ActionEvent, EventBus, SessionEvent};
use crate::providers::DuelAi;

/// One duel between two wizards.
pub struct GameSession<H: Host> {
    config: GameConfig,
    spells: SpellCatalog,
    runtime: RuntimeConfig,
    rng: Box<dyn RngOracle>,
    ai: Box<dyn ActionProvider>,
    host: H,
    events: EventBus,
    state: GameState,
    mode: Mode,
    paused: bool,
    /// Set whenever a banner or dialog held the session; inputs queued in
    /// the meantime are discarded by [`GameSession::run`].
    gated: bool,
}

impl<H: Host> GameSession<H> {
    pub fn builder(host: H) -> SessionBuilder<H> {
        SessionBuilder::new(host)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn spells(&self) -> &SpellCatalog {
        &self.spells
    }

    pub fn runtime_config(&self) -> &RuntimeConfig {
        &self.runtime
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.turn.current_player
    }

    /// Shows the opening banner and plays the first turn if it belongs to
    /// the AI.
    pub async fn start(&mut self) -> Result<Step> {
        tracing::info!(seed = self.state.game_seed, "duel started");
        self.events.publish(SessionEvent::Started {
            seed: self.state.game_seed,
        });
        self.host.present(Effect::Board, &self.state).await;

        self.begin_turn().await;
        self.drive_ai().await?;
        Ok(self.step())
    }

    /// Throws the current board away and sets up a fresh duel. Call
    /// [`GameSession::start`] afterwards.
    pub fn restart(&mut self, game_seed: u64) -> Result<()> {
        self.state = GameState::new(&self.config, game_seed).map_err(RuntimeError::InitialState)?;
        self.paused = false;
        self.gated = false;
        self.set_mode(Mode::Idle);

        tracing::info!(seed = game_seed, "duel restarted");
        self.events
            .publish(SessionEvent::Restarted { seed: game_seed });
        Ok(())
    }

    /// Feeds inputs until the duel ends.
    ///
    /// Inputs that queued up while a banner, dialog or animation held the
    /// session are dropped rather than replayed.
    pub async fn run(&mut self, inputs: &mut mpsc::Receiver<Input>) -> Result<GameResult> {
        if let Step::Finished(result) = self.start().await? {
            return Ok(result);
        }

        while let Some(input) = inputs.recv().await {
            self.gated = false;
            let step = self.handle_input(input).await?;

            if self.gated {
                let mut dropped = 0usize;
                while inputs.try_recv().is_ok() {
                    dropped += 1;
                }
                if dropped > 0 {
                    tracing::trace!(dropped, "discarded input received while gated");
                }
            }

            if let Step::Finished(result) = step {
                return Ok(result);
            }
        }

        Err(RuntimeError::InputClosed)
    }

    /// Handles one input edge and everything it triggers.
    pub async fn handle_input(&mut self, input: Input) -> Result<Step> {
        if let Mode::GameOver(result) = self.mode {
            return Ok(Step::Finished(result));
        }
        if input == Input::TogglePause {
            self.toggle_pause().await;
            return Ok(Step::Continue);
        }
        if self.paused {
            tracing::trace!(?input, "ignored while paused");
            return Ok(Step::Continue);
        }
        if self.runtime.is_ai(self.current_player()) {
            tracing::trace!(?input, "ignored during AI turn");
            return Ok(Step::Continue);
        }

        match (self.mode.clone(), input) {
            (Mode::Idle, Input::Direction(direction)) => {
                let (dx, dy) = direction.delta();
                self.move_cursor(self.state.board.cursor().offset(dx, dy))
                    .await;
            }
            (Mode::Idle, Input::Confirm) => self.select_at_cursor().await,

            (Mode::PieceSelected { piece, page }, Input::Select(key)) => {
                self.choose(piece, page, key).await?;
            }
            (Mode::PieceSelected { piece, page }, Input::Cancel) => match page {
                MenuPage::Spells => self.open_menu(piece, MenuPage::Root).await,
                MenuPage::Root => self.back_to_idle().await,
            },

            (Mode::Movement { piece }, Input::Direction(direction)) => {
                self.move_pipeline(piece, direction, false).await?;
            }
            (Mode::Movement { .. }, Input::Cancel) => self.back_to_idle().await,

            (Mode::Targeting(targeting), Input::Direction(direction)) => {
                let (dx, dy) = direction.delta();
                let next = self.state.board.cursor().offset(dx, dy);
                if targeting.allows(next) {
                    self.move_cursor(next).await;
                }
            }
            (Mode::Targeting(targeting), Input::Confirm) => {
                let target = self.state.board.cursor();
                self.cast_pipeline(targeting.caster, &targeting.spell, Some(target))
                    .await?;
            }
            (Mode::Targeting(targeting), Input::Cancel) => {
                tracing::debug!(spell = %targeting.spell, "targeting cancelled");
                self.back_to_idle().await;
            }

            (mode, input) => {
                tracing::trace!(mode = mode.name(), ?input, "input has no meaning here");
            }
        }

        self.drive_ai().await?;
        Ok(self.step())
    }

    fn step(&self) -> Step {
        match self.mode {
            Mode::GameOver(result) => Step::Finished(result),
            _ => Step::Continue,
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::trace!(from = self.mode.name(), to = mode.name(), "mode change");
            self.events
                .publish(SessionEvent::ModeChanged(mode.name().to_owned()));
        }
        self.mode = mode;
    }

    async fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.gated = true;
        self.host.cue(AudioCue::Click);
        self.host
            .present(Effect::Paused(self.paused), &self.state)
            .await;
        self.events.publish(SessionEvent::Paused(self.paused));
    }

    async fn move_cursor(&mut self, to: Position) {
        if self.state.board.set_cursor(to) {
            self.host.present(Effect::Cursor(to), &self.state).await;
        }
    }

    async fn back_to_idle(&mut self) {
        if matches!(self.mode, Mode::PieceSelected { .. }) {
            self.host.present(Effect::MenuClosed, &self.state).await;
        }
        self.set_mode(Mode::Idle);
    }

    async fn select_at_cursor(&mut self) {
        let cursor = self.state.board.cursor();
        let current = self.current_player();

        let piece = match self.state.board.piece_at(cursor) {
            None => Err(InputError::EmptyCell(cursor)),
            Some(piece) if !piece.is_owned_by(current) => Err(TurnError::NotYourPiece {
                piece: piece.id,
                current,
            }
            .into()),
            Some(piece)
                if piece
                    .unit
                    .as_goblin()
                    .is_some_and(|goblin| goblin.has_acted()) =>
            {
                Err(TurnError::AlreadyActed(piece.id).into())
            }
            Some(piece) => Ok(piece.id),
        };

        match piece {
            Ok(piece) => {
                self.host.cue(AudioCue::Click);
                self.open_menu(piece, MenuPage::Root).await;
            }
            Err(error) => self.reject(&error),
        }
    }

    async fn open_menu(&mut self, piece: PieceId, page: MenuPage) {
        let Some(selected) = self.state.board.piece(piece) else {
            tracing::warn!(%piece, "selected piece vanished");
            self.set_mode(Mode::Idle);
            return;
        };
        let view = match page {
            MenuPage::Root => root_menu(selected),
            MenuPage::Spells => spell_menu(selected, &self.spells),
        };
        self.host.present(Effect::Menu(view), &self.state).await;
        self.set_mode(Mode::PieceSelected { piece, page });
    }

    async fn choose(&mut self, piece: PieceId, page: MenuPage, key: u8) -> Result<()> {
        let Some(selected) = self.state.board.piece(piece) else {
            tracing::warn!(%piece, "selected piece vanished");
            self.set_mode(Mode::Idle);
            return Ok(());
        };

        match page {
            MenuPage::Root => {
                let Some(entry) = MenuEntry::from_key(&selected.unit, key) else {
                    self.reject(&InputError::UnknownEntry(key));
                    return Ok(());
                };
                self.host.cue(AudioCue::Click);
                self.choose_entry(piece, entry).await;
            }
            MenuPage::Spells => self.choose_spell(piece, key).await?,
        }
        Ok(())
    }

    async fn choose_entry(&mut self, piece: PieceId, entry: MenuEntry) {
        match entry {
            MenuEntry::CastSpell => {
                if self
                    .state
                    .board
                    .piece(piece)
                    .is_some_and(|p| p.unit.as_wizard().is_some())
                {
                    self.open_menu(piece, MenuPage::Spells).await;
                } else {
                    self.reject(&InputError::NotACaster(piece));
                }
            }
            MenuEntry::Move => {
                self.host.present(Effect::MenuClosed, &self.state).await;
                self.set_mode(Mode::Movement { piece });
            }
            MenuEntry::Examine => {
                if let Some(card) = self.state.board.piece(piece).and_then(examine_card) {
                    self.gated = true;
                    self.host.examine(card).await;
                }
            }
            MenuEntry::ControlGoblin => {
                let player = self.current_player();
                match self.state.ready_goblin(player).map(|g| (g.id, g.position)) {
                    Some((goblin, at)) => {
                        self.host.present(Effect::MenuClosed, &self.state).await;
                        self.move_cursor(at).await;
                        self.set_mode(Mode::Movement { piece: goblin });
                    }
                    None => self.reject(&InputError::NoGoblinReady(player)),
                }
            }
        }
    }

    async fn choose_spell(&mut self, caster: PieceId, key: u8) -> Result<()> {
        let Some(spell) = self.spells.by_key(key).cloned() else {
            self.reject(&InputError::UnknownEntry(key));
            return Ok(());
        };
        let Some(piece) = self.state.board.piece(caster) else {
            tracing::warn!(%caster, "caster vanished");
            self.set_mode(Mode::Idle);
            return Ok(());
        };
        let origin = piece.position;
        if piece
            .unit
            .as_wizard()
            .is_some_and(|wizard| wizard.has_used_spell(&spell.name))
        {
            self.reject(&InputError::SpellUsed(spell.name));
            return Ok(());
        }

        self.host.cue(AudioCue::Click);
        self.host.present(Effect::MenuClosed, &self.state).await;

        if spell.kind.needs_target() {
            self.move_cursor(origin).await;
            self.host
                .present(
                    Effect::Targeting {
                        spell: spell.name.clone(),
                        origin,
                        range: spell.range,
                    },
                    &self.state,
                )
                .await;
            self.set_mode(Mode::Targeting(Targeting {
                spell: spell.name,
                caster,
                origin,
                range: spell.range,
            }));
        } else {
            self.cast_pipeline(caster, &spell.name, None).await?;
        }
        Ok(())
    }

    /// Runs engine actions with the session's environment.
    fn execute(&mut self, action: &Action) -> std::result::Result<ActionResult, ExecuteError> {
        let env = GameEnv::new(&self.config, &self.spells, self.rng.as_ref());
        GameEngine::new(&mut self.state).execute(env, action)
    }

    /// Error cue plus log and event. State and mode stay untouched.
    fn reject(&self, error: &impl GameError) {
        let player = self.current_player();
        let severity = error.severity();
        if severity.is_recoverable() {
            tracing::debug!(%player, code = error.error_code(), %error, "action rejected");
        } else {
            tracing::warn!(
                %player,
                code = error.error_code(),
                severity = severity.as_str(),
                %error,
                "action aborted"
            );
        }
        self.host.cue(AudioCue::Error);
        self.events.publish(ActionEvent::Rejected {
            player,
            code: error.error_code().to_owned(),
            message: error.to_string(),
        });
    }

    async fn pace(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`GameSession`].
pub struct SessionBuilder<H: Host> {
    host: H,
    config: GameConfig,
    spells: SpellCatalog,
    runtime: RuntimeConfig,
    rng: Option<Box<dyn RngOracle>>,
    ai: Option<Box<dyn ActionProvider>>,
    events: Option<EventBus>,
}

impl<H: Host> SessionBuilder<H> {
    fn new(host: H) -> Self {
        Self {
            host,
            config: GameConfig::default(),
            spells: SpellCatalog::default(),
            runtime: RuntimeConfig::default(),
            rng: None,
            ai: None,
            events: None,
        }
    }

    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spells(mut self, spells: SpellCatalog) -> Self {
        self.spells = spells;
        self
    }

    pub fn runtime_config(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    /// Override the dice. Defaults to [`PcgRng`].
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Override the computer opponent. Defaults to [`DuelAi`].
    pub fn ai(mut self, ai: impl ActionProvider + 'static) -> Self {
        self.ai = Some(Box::new(ai));
        self
    }

    /// Share an existing bus instead of creating one.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<GameSession<H>> {
        let state = GameState::new(&self.config, self.runtime.game_seed)
            .map_err(RuntimeError::InitialState)?;
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.runtime.event_buffer_size));
        let ai = self
            .ai
            .unwrap_or_else(|| Box::new(DuelAi::new(self.runtime.ai.clone())));

        Ok(GameSession {
            config: self.config,
            spells: self.spells,
            runtime: self.runtime,
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng)),
            ai,
            host: self.host,
            events,
            state,
            mode: Mode::Idle,
            paused: false,
            gated: false,
        })
    }
}
