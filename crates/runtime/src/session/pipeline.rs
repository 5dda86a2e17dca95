//! Per-action stages: engine call, presentation, game-over check, handoff.
//!
//! Every stage is awaited in order. A stage that mutates state runs only
//! after the presentation of the previous one has completed.

use game_core::{
    Action, ActionResult, CastAction, CastOutcome, Casualty, Direction, GameEnv, GameEngine,
    HitReport, Impact, MeleeAction, MoveAction, PieceId, Position, Resolution, SpellEffect,
};

use super::{GameSession, Mode};
use crate::api::{AudioCue, Banner, Decision, Effect, Host, Result, RuntimeError};
use crate::events::{ActionEvent, SessionEvent, TurnEvent};

impl<H: Host> GameSession<H> {
    /// Casts `spell` and, on success, finishes the turn.
    ///
    /// A rejected cast leaves the mode as it was so the player can retry
    /// (another target cell, or another spell). Returns whether the cast
    /// went through.
    pub(super) async fn cast_pipeline(
        &mut self,
        caster: PieceId,
        spell: &str,
        target: Option<Position>,
    ) -> Result<bool> {
        let player = self.current_player();
        let action = Action::from(CastAction::new(caster, spell, target));

        let outcome = match self.execute(&action) {
            Ok(ActionResult::Cast(outcome)) => outcome,
            Ok(other) => {
                tracing::warn!(?other, "cast produced an unexpected result");
                return Ok(false);
            }
            Err(error) => {
                self.reject(&error);
                return Ok(false);
            }
        };

        tracing::debug!(%player, spell, ?target, resolution = ?outcome.resolution, "spell cast");
        self.set_mode(Mode::Idle);
        self.present_cast(&outcome).await;
        self.publish_applied(ActionResult::Cast(outcome));

        self.finish_action().await?;
        Ok(true)
    }

    /// Moves `piece` one step. A landing next to an enemy offers a melee
    /// attack before the turn ends; the AI always accepts.
    pub(super) async fn move_pipeline(
        &mut self,
        piece: PieceId,
        direction: Direction,
        auto_attack: bool,
    ) -> Result<bool> {
        let action = Action::from(MoveAction::new(piece, direction));

        let outcome = match self.execute(&action) {
            Ok(ActionResult::Moved(outcome)) => outcome,
            Ok(other) => {
                tracing::warn!(?other, "move produced an unexpected result");
                return Ok(false);
            }
            Err(error) => {
                self.reject(&error);
                return Ok(false);
            }
        };

        self.set_mode(Mode::Idle);
        self.host.cue(AudioCue::Step);
        self.host
            .present(
                Effect::Moved {
                    piece,
                    from: outcome.from,
                    to: outcome.to,
                },
                &self.state,
            )
            .await;
        self.pace(self.runtime.pacing.movement).await;
        self.state.board.set_cursor(outcome.to);
        let enemy = outcome.adjacent_enemy;
        self.publish_applied(ActionResult::Moved(outcome));

        if let Some(defender) = enemy
            && self.confirm_attack(piece, defender, auto_attack).await
        {
            self.melee(piece, defender).await;
        }

        self.finish_action().await?;
        Ok(true)
    }

    async fn confirm_attack(&mut self, attacker: PieceId, defender: PieceId, auto: bool) -> bool {
        if auto {
            return true;
        }
        self.gated = true;
        let timeout = self.runtime.attack_prompt_timeout;
        match tokio::time::timeout(timeout, self.host.confirm_attack(attacker, defender)).await {
            Ok(answer) => answer,
            Err(_) => {
                tracing::debug!(%attacker, %defender, "attack prompt timed out");
                false
            }
        }
    }

    async fn melee(&mut self, attacker: PieceId, defender: PieceId) {
        let action = Action::from(MeleeAction::new(attacker, defender));
        match self.execute(&action) {
            Ok(ActionResult::Melee(report)) => {
                self.host.cue(AudioCue::Impact);
                self.host
                    .present(
                        Effect::Strike {
                            attacker,
                            at: report.position,
                            damage: report.damage,
                        },
                        &self.state,
                    )
                    .await;
                self.present_casualty(&report).await;
                self.publish_applied(ActionResult::Melee(report));
            }
            Ok(other) => tracing::warn!(?other, "melee produced an unexpected result"),
            Err(error) => self.reject(&error),
        }
    }

    async fn present_cast(&mut self, outcome: &CastOutcome) {
        let effect = outcome.effect;
        self.host.cue(AudioCue::Spell(effect));

        match outcome.resolution {
            Resolution::Shielded { amount } => {
                self.host
                    .present(
                        Effect::Shielded {
                            piece: outcome.caster,
                            amount,
                        },
                        &self.state,
                    )
                    .await;
                self.pace(self.runtime.pacing.self_cast).await;
            }
            Resolution::Offensive { impact, .. } => {
                self.present_flight(effect, outcome.origin, impact.position())
                    .await;
                self.present_impact(effect, impact).await;
            }
            Resolution::WallRaised { wall: piece, at }
            | Resolution::GoblinSummoned { goblin: piece, at } => {
                if let Some(category) = self.state.board.piece(piece).map(|p| p.category()) {
                    self.host
                        .present(
                            Effect::Placed {
                                piece,
                                category,
                                at,
                            },
                            &self.state,
                        )
                        .await;
                }
                self.pace(self.runtime.pacing.placement).await;
            }
        }
    }

    async fn present_flight(&self, effect: SpellEffect, from: Position, to: Position) {
        self.host
            .present(Effect::SpellCast { effect, from, to }, &self.state)
            .await;
    }

    async fn present_impact(&mut self, effect: SpellEffect, impact: Impact) {
        match impact {
            Impact::Unit(report) => {
                self.host.cue(AudioCue::Impact);
                self.host
                    .present(
                        Effect::Impact {
                            effect,
                            at: report.position,
                            damage: report.damage,
                        },
                        &self.state,
                    )
                    .await;
                self.pace(self.runtime.pacing.impact).await;
                self.present_casualty(&report).await;
            }
            Impact::Obstacle { wall, at, .. } => {
                self.host.cue(AudioCue::Impact);
                self.host
                    .present(Effect::WallShattered { piece: wall, at }, &self.state)
                    .await;
                self.pace(self.runtime.pacing.wall_hit).await;
            }
            Impact::Tile { at, .. } => {
                self.host
                    .present(Effect::TileDestroyed(at), &self.state)
                    .await;
                self.pace(self.runtime.pacing.impact).await;
            }
        }
    }

    async fn present_casualty(&self, report: &HitReport) {
        let piece = match report.casualty {
            Some(Casualty::Goblin { id, .. } | Casualty::Wizard { id, .. }) => id,
            None => return,
        };
        tracing::info!(%piece, kind = %report.target_kind, at = %report.position, "piece died");
        self.host.cue(AudioCue::Death);
        self.host
            .present(
                Effect::Death {
                    piece,
                    at: report.position,
                },
                &self.state,
            )
            .await;
    }

    fn publish_applied(&self, result: ActionResult) {
        self.events.publish(ActionEvent::Applied {
            player: self.current_player(),
            nonce: self.state.turn.nonce,
            result,
        });
    }

    /// Game-over check first, turn handoff otherwise.
    async fn finish_action(&mut self) -> Result<()> {
        if let Some(result) = self.state.result() {
            self.finish_game(result).await;
            return Ok(());
        }
        self.end_turn().await
    }

    async fn finish_game(&mut self, result: game_core::GameResult) {
        tracing::info!(winner = %result.winner, turns = result.turns, "duel over");
        self.gated = true;
        self.host.cue(AudioCue::Victory);
        self.host.banner(Banner::Victory(result)).await;
        self.pace(self.runtime.pacing.banner).await;
        self.set_mode(Mode::GameOver(result));
        self.events.publish(SessionEvent::GameEnded(result));
    }

    pub(super) async fn end_turn(&mut self) -> Result<()> {
        let env = GameEnv::new(&self.config, &self.spells, self.rng.as_ref());
        let handoff = GameEngine::new(&mut self.state).end_turn(env)?;

        tracing::info!(
            previous = %handoff.previous,
            next = %handoff.next,
            turn = handoff.turn_number,
            "turn handed over"
        );
        self.events.publish(TurnEvent::Ended {
            player: handoff.previous,
            turn: handoff.turn_number.saturating_sub(1),
        });
        self.set_mode(Mode::Idle);
        self.begin_turn().await;
        Ok(())
    }

    /// Turn banner, then the cursor jumps to the new player's wizard.
    pub(super) async fn begin_turn(&mut self) {
        let player = self.current_player();
        let turn = self.state.turn.turn_number;

        self.gated = true;
        self.host.banner(Banner::Turn { player, turn }).await;
        self.pace(self.runtime.pacing.banner).await;
        self.events.publish(TurnEvent::Started { player, turn });

        match self.state.wizard(player).map(|piece| piece.position) {
            Some(at) => self.move_cursor(at).await,
            None => tracing::warn!(%player, "no wizard to hand the cursor to"),
        }
    }

    /// Plays AI turns until a human is up or the duel is over.
    ///
    /// Only an all-AI duel can keep passing without a human ever getting the
    /// turn; after `ai_pass_limit` idle turns in a row it gives up with
    /// [`RuntimeError::Stalled`].
    pub(super) async fn drive_ai(&mut self) -> Result<()> {
        let mut passes = 0u32;
        while !self.state.is_over()
            && !matches!(self.mode, Mode::GameOver(_))
            && self.runtime.is_ai(self.current_player())
        {
            if self.ai_turn().await? {
                passes = 0;
                continue;
            }
            passes += 1;
            if passes >= self.runtime.ai_pass_limit {
                tracing::warn!(passes, turn = self.state.turn.turn_number, "AI duel stalled");
                return Err(RuntimeError::Stalled { passes });
            }
        }
        Ok(())
    }

    /// One AI turn. Returns whether an action went through.
    async fn ai_turn(&mut self) -> Result<bool> {
        let player = self.current_player();
        self.pace(self.runtime.pacing.ai_thinking).await;

        let decision = {
            let env = GameEnv::new(&self.config, &self.spells, self.rng.as_ref());
            self.ai.decide(player, &self.state, env).await?
        };
        let caster = self
            .state
            .wizard(player)
            .map(|piece| piece.id)
            .ok_or(RuntimeError::MissingWizard(player))?;

        tracing::debug!(%player, ?decision, "AI acting");
        let acted = match decision {
            Decision::CastSelf { spell } => self.cast_pipeline(caster, &spell, None).await?,
            Decision::CastAt { spell, target } => {
                self.cast_pipeline(caster, &spell, Some(target)).await?
            }
            Decision::Move(direction) => self.move_pipeline(caster, direction, true).await?,
            Decision::Pass => false,
        };

        // a pass or a refused action still has to give the turn away
        if !acted && !self.state.is_over() {
            self.end_turn().await?;
        }
        Ok(acted)
    }
}
