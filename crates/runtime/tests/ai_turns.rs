mod common;

use common::{RecordingHost, config_with, has_used, hp, pick_spell};
use game_core::{Direction, FixedRng, GameConfig, PlayerId, Position, SpellCatalog};
use runtime::{GameSession, Input, Pacing, PassProvider, RuntimeConfig, RuntimeError, Step};

fn against_ai(config: GameConfig, roll: u32) -> GameSession<RecordingHost> {
    let runtime = RuntimeConfig {
        ai_players: vec![PlayerId::Two],
        pacing: Pacing::instant(),
        ..RuntimeConfig::headless(11)
    };
    GameSession::builder(RecordingHost::default())
        .game_config(config)
        .runtime_config(runtime)
        .rng(FixedRng(roll))
        .build()
        .unwrap()
}

#[tokio::test]
async fn low_hp_ai_shields_then_returns_control() {
    let mut s = against_ai(GameConfig::default(), 0);
    s.start().await.unwrap();

    // human passes with a shield; the AI (HP 8, at the threshold) answers in kind
    pick_spell(&mut s, 3).await;

    assert!(has_used(&s, PlayerId::Two, SpellCatalog::SHIELD));
    let ai = s.state().wizard(PlayerId::Two).unwrap();
    assert_eq!(ai.unit.as_wizard().unwrap().shield(), 3);
    assert_eq!(s.current_player(), PlayerId::One);
    assert_eq!(s.state().turn.turn_number, 3);
}

#[tokio::test]
async fn healthy_ai_casts_lightning_in_range() {
    let config = GameConfig {
        wizard_hp: 20,
        ..config_with(Position::new(1, 1), Position::new(3, 3))
    };
    let mut s = against_ai(config, 0);
    s.start().await.unwrap();

    pick_spell(&mut s, 3).await;

    // Lightning minimum 3 lands on the shield first
    assert!(has_used(&s, PlayerId::Two, SpellCatalog::LIGHTNING));
    assert_eq!(hp(&s, PlayerId::One), 20);
    let human = s.state().wizard(PlayerId::One).unwrap();
    assert_eq!(human.unit.as_wizard().unwrap().shield(), 0);
}

#[tokio::test]
async fn distant_ai_walks_once_shield_is_spent() {
    let config = GameConfig {
        wizard_hp: 20,
        ..config_with(Position::new(1, 1), Position::new(8, 1))
    };
    let mut s = against_ai(config, 0);
    s.start().await.unwrap();

    // round 1: nothing reaches at distance 7, so the AI shields
    pick_spell(&mut s, 3).await;
    assert!(has_used(&s, PlayerId::Two, SpellCatalog::SHIELD));
    assert_eq!(
        s.state().wizard(PlayerId::Two).unwrap().position,
        Position::new(8, 1)
    );

    // round 2: the human steps down, the AI closes in
    s.handle_input(Input::Confirm).await.unwrap();
    s.handle_input(Input::Select(2)).await.unwrap();
    s.handle_input(Input::Direction(Direction::South)).await.unwrap();

    assert_eq!(
        s.state().wizard(PlayerId::Two).unwrap().position,
        Position::new(7, 1)
    );
    assert_eq!(s.current_player(), PlayerId::One);
}

#[tokio::test]
async fn ai_lethal_spell_finishes_the_duel() {
    let config = config_with(Position::new(1, 1), Position::new(4, 4));
    let mut s = GameSession::builder(RecordingHost::default())
        .game_config(GameConfig {
            wizard_hp: 9,
            ..config
        })
        .runtime_config(RuntimeConfig {
            ai_players: vec![PlayerId::Two],
            pacing: Pacing::instant(),
            ..RuntimeConfig::headless(3)
        })
        .rng(FixedRng(7))
        .build()
        .unwrap();
    s.start().await.unwrap();

    // human wastes the turn on Summon Goblin far from the AI
    pick_spell(&mut s, 6).await;
    let step = s
        .handle_input(Input::Direction(Direction::East))
        .await
        .unwrap();
    assert_eq!(step, Step::Continue);
    let step = s.handle_input(Input::Confirm).await.unwrap();

    // AI at HP 9 skips the shield and Lightning rolls 10
    let Step::Finished(result) = step else {
        panic!("AI should have won");
    };
    assert_eq!(result.winner, PlayerId::Two);
}

#[tokio::test]
async fn ai_as_player_one_moves_first() {
    let runtime = RuntimeConfig {
        ai_players: vec![PlayerId::One],
        pacing: Pacing::instant(),
        ..RuntimeConfig::headless(5)
    };
    let mut s = GameSession::builder(RecordingHost::default())
        .runtime_config(runtime)
        .build()
        .unwrap();

    let step = s.start().await.unwrap();

    assert_eq!(step, Step::Continue);
    assert_eq!(s.current_player(), PlayerId::Two);
    assert!(has_used(&s, PlayerId::One, SpellCatalog::SHIELD));
}

#[tokio::test]
async fn passing_ai_still_hands_the_turn_over() {
    let runtime = RuntimeConfig {
        ai_players: vec![PlayerId::One],
        pacing: Pacing::instant(),
        ..RuntimeConfig::headless(5)
    };
    let mut s = GameSession::builder(RecordingHost::default())
        .runtime_config(runtime)
        .ai(PassProvider)
        .build()
        .unwrap();

    assert_eq!(s.start().await.unwrap(), Step::Continue);
    assert_eq!(s.current_player(), PlayerId::Two);
    assert_eq!(s.state().turn.turn_number, 2);
}

#[tokio::test]
async fn two_idle_ais_stall_instead_of_looping() {
    let runtime = RuntimeConfig {
        ai_players: PlayerId::ALL.to_vec(),
        pacing: Pacing::instant(),
        ai_pass_limit: 4,
        ..RuntimeConfig::headless(5)
    };
    let mut s = GameSession::builder(RecordingHost::default())
        .runtime_config(runtime)
        .ai(PassProvider)
        .build()
        .unwrap();

    let err = s.start().await.unwrap_err();

    assert!(matches!(err, RuntimeError::Stalled { passes: 4 }));
    assert_eq!(s.state().turn.turn_number, 5);
    assert!(!s.state().is_over());
}
