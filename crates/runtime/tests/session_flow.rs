mod common;

use common::{RecordingHost, config_with, has_used, hp, pick_spell, press, repeat, session};
use game_core::{Direction, GameConfig, PlayerId, Position, SpellCatalog, SpellEffect};
use runtime::{
    ActionEvent, AudioCue, Banner, Effect, Event, Input, MenuPage, Mode, SessionEvent, Step,
    Topic,
};

#[tokio::test]
async fn start_shows_first_banner_and_parks_cursor() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);

    let step = s.start().await.unwrap();

    assert_eq!(step, Step::Continue);
    assert_eq!(
        s.host().banners(),
        vec![Banner::Turn {
            player: PlayerId::One,
            turn: 1
        }]
    );
    assert_eq!(s.state().board.cursor(), Position::new(1, 1));
    assert_eq!(s.mode(), &Mode::Idle);
}

#[tokio::test]
async fn magic_bolt_damages_and_hands_over() {
    let config = config_with(Position::new(1, 1), Position::new(1, 5));
    let mut s = session(config, RecordingHost::default(), 2);
    s.start().await.unwrap();

    pick_spell(&mut s, 1).await;
    assert!(matches!(s.mode(), Mode::Targeting(t) if t.spell == SpellCatalog::MAGIC_BOLT));
    repeat(&mut s, Direction::South, 4).await;
    press(&mut s, &[Input::Confirm]).await;

    // FixedRng(2) rolls min + 2 = 3
    assert_eq!(hp(&s, PlayerId::Two), GameConfig::DEFAULT_WIZARD_HP - 3);
    assert!(has_used(&s, PlayerId::One, SpellCatalog::MAGIC_BOLT));
    assert_eq!(s.current_player(), PlayerId::Two);
    assert_eq!(s.state().turn.turn_number, 2);
    assert_eq!(s.mode(), &Mode::Idle);
    assert_eq!(s.state().board.cursor(), Position::new(1, 5));
    assert!(s.host().cues().contains(&AudioCue::Spell(SpellEffect::MagicBolt)));
    assert!(s.host().banners().contains(&Banner::Turn {
        player: PlayerId::Two,
        turn: 2
    }));
}

#[tokio::test]
async fn ice_wall_absorbs_a_later_arrow() {
    let config = config_with(Position::new(5, 1), Position::new(5, 9));
    let mut s = session(config, RecordingHost::default(), 4);
    s.start().await.unwrap();

    // Player 1 raises a wall at (5,5)
    pick_spell(&mut s, 5).await;
    repeat(&mut s, Direction::South, 4).await;
    press(&mut s, &[Input::Confirm]).await;
    assert!(s.state().board.piece_at(Position::new(5, 5)).is_some());

    // Player 2 shields to pass the turn
    pick_spell(&mut s, 3).await;
    assert_eq!(s.current_player(), PlayerId::One);

    // Player 1 shoots straight through the wall's column
    pick_spell(&mut s, 4).await;
    repeat(&mut s, Direction::South, 8).await;
    assert_eq!(s.state().board.cursor(), Position::new(5, 9));
    press(&mut s, &[Input::Confirm]).await;

    assert!(s.state().board.piece_at(Position::new(5, 5)).is_none());
    assert_eq!(hp(&s, PlayerId::Two), GameConfig::DEFAULT_WIZARD_HP);
    assert!(
        s.host()
            .effects()
            .iter()
            .any(|e| matches!(e, Effect::WallShattered { at, .. } if *at == Position::new(5, 5)))
    );
}

#[tokio::test]
async fn occupied_ice_wall_target_keeps_spell_and_mode() {
    let config = config_with(Position::new(1, 1), Position::new(3, 3));
    let mut s = session(config, RecordingHost::default(), 0);
    s.start().await.unwrap();

    pick_spell(&mut s, 5).await;
    repeat(&mut s, Direction::SouthEast, 2).await;
    press(&mut s, &[Input::Confirm]).await;

    assert_eq!(s.host().error_count(), 1);
    assert!(matches!(s.mode(), Mode::Targeting(_)));
    assert!(!has_used(&s, PlayerId::One, SpellCatalog::ICE_WALL));
    assert_eq!(s.current_player(), PlayerId::One);

    // a free cell works on retry
    press(&mut s, &[Input::Direction(Direction::NorthWest), Input::Confirm]).await;
    assert!(has_used(&s, PlayerId::One, SpellCatalog::ICE_WALL));
    assert_eq!(s.current_player(), PlayerId::Two);
}

#[tokio::test]
async fn targeting_rejects_self_and_clamps_cursor_to_range() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    s.start().await.unwrap();

    pick_spell(&mut s, 2).await;
    press(&mut s, &[Input::Confirm]).await;
    assert_eq!(s.host().error_count(), 1);
    assert!(matches!(s.mode(), Mode::Targeting(_)));

    repeat(&mut s, Direction::East, 5).await;
    assert_eq!(s.state().board.cursor(), Position::new(4, 1));
}

#[tokio::test]
async fn cancel_leaves_spell_available() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    s.start().await.unwrap();

    pick_spell(&mut s, 2).await;
    press(&mut s, &[Input::Cancel]).await;

    assert_eq!(s.mode(), &Mode::Idle);
    assert!(!has_used(&s, PlayerId::One, SpellCatalog::LIGHTNING));
    assert_eq!(s.current_player(), PlayerId::One);

    // cancel walks back through the menu pages
    press(&mut s, &[Input::Confirm, Input::Select(1)]).await;
    press(&mut s, &[Input::Cancel]).await;
    assert!(matches!(
        s.mode(),
        Mode::PieceSelected {
            page: MenuPage::Root,
            ..
        }
    ));
    press(&mut s, &[Input::Cancel]).await;
    assert_eq!(s.mode(), &Mode::Idle);
}

#[tokio::test]
async fn used_spell_is_refused_in_the_submenu() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    s.start().await.unwrap();

    pick_spell(&mut s, 3).await;
    pick_spell(&mut s, 3).await;
    assert_eq!(s.current_player(), PlayerId::One);
    assert_eq!(s.host().error_count(), 0);

    pick_spell(&mut s, 3).await;
    assert_eq!(s.host().error_count(), 1);
    assert!(matches!(
        s.mode(),
        Mode::PieceSelected {
            page: MenuPage::Spells,
            ..
        }
    ));

    let last_menu = s
        .host()
        .effects()
        .into_iter()
        .rev()
        .find_map(|e| match e {
            Effect::Menu(menu) => Some(menu),
            _ => None,
        })
        .unwrap();
    let shield = last_menu.items.iter().find(|i| i.key == 3).unwrap();
    assert!(shield.used);
}

#[tokio::test]
async fn opponent_piece_cannot_be_selected() {
    let config = config_with(Position::new(1, 1), Position::new(2, 1));
    let mut s = session(config, RecordingHost::default(), 0);
    let mut actions = s.events().subscribe(Topic::Action);
    s.start().await.unwrap();

    press(&mut s, &[Input::Direction(Direction::East), Input::Confirm]).await;

    assert_eq!(s.mode(), &Mode::Idle);
    assert_eq!(s.host().error_count(), 1);
    match actions.try_recv().unwrap() {
        Event::Action(ActionEvent::Rejected { code, player, .. }) => {
            assert_eq!(code, "TURN_NOT_YOUR_PIECE");
            assert_eq!(player, PlayerId::One);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn confirmed_attack_after_move_strikes() {
    let config = config_with(Position::new(1, 1), Position::new(3, 1));
    let mut s = session(config, RecordingHost::answering(&[true]), 0);
    s.start().await.unwrap();

    press(
        &mut s,
        &[
            Input::Confirm,
            Input::Select(2),
            Input::Direction(Direction::East),
        ],
    )
    .await;

    assert_eq!(
        s.state().wizard(PlayerId::One).unwrap().position,
        Position::new(2, 1)
    );
    // default melee range 1-3 with the minimum roll
    assert_eq!(hp(&s, PlayerId::Two), GameConfig::DEFAULT_WIZARD_HP - 1);
    assert_eq!(s.current_player(), PlayerId::Two);
}

#[tokio::test(start_paused = true)]
async fn unanswered_attack_prompt_counts_as_no() {
    let config = config_with(Position::new(1, 1), Position::new(3, 1));
    let mut s = session(config, RecordingHost::silent(), 0);
    s.start().await.unwrap();

    press(
        &mut s,
        &[
            Input::Confirm,
            Input::Select(2),
            Input::Direction(Direction::East),
        ],
    )
    .await;

    assert_eq!(hp(&s, PlayerId::Two), GameConfig::DEFAULT_WIZARD_HP);
    assert_eq!(s.current_player(), PlayerId::Two);
}

#[tokio::test]
async fn pause_blocks_other_input() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    let mut session_events = s.events().subscribe(Topic::Session);
    s.start().await.unwrap();

    press(&mut s, &[Input::TogglePause, Input::Confirm]).await;
    assert!(s.is_paused());
    assert_eq!(s.mode(), &Mode::Idle);

    press(&mut s, &[Input::TogglePause, Input::Confirm]).await;
    assert!(!s.is_paused());
    assert!(matches!(s.mode(), Mode::PieceSelected { .. }));

    let mut paused = Vec::new();
    while let Ok(event) = session_events.try_recv() {
        if let Event::Session(SessionEvent::Paused(flag)) = event {
            paused.push(flag);
        }
    }
    assert_eq!(paused, vec![true, false]);
}

#[tokio::test]
async fn examine_shows_card_and_keeps_menu_open() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    s.start().await.unwrap();

    press(&mut s, &[Input::Confirm, Input::Select(3)]).await;

    let cards = s.host().cards.lock().unwrap().clone();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Zephyr the White");
    assert_eq!(cards[0].hp, GameConfig::DEFAULT_WIZARD_HP);
    assert!(matches!(s.mode(), Mode::PieceSelected { .. }));
}

#[tokio::test]
async fn summoned_goblin_can_be_controlled_next_turn() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    s.start().await.unwrap();

    pick_spell(&mut s, 6).await;
    press(
        &mut s,
        &[Input::Direction(Direction::SouthEast), Input::Confirm],
    )
    .await;
    let goblin = s.state().goblins(PlayerId::One)[0];
    assert_eq!(
        s.state().board.piece(goblin).unwrap().position,
        Position::new(2, 2)
    );

    // player 2 passes with a shield
    pick_spell(&mut s, 3).await;

    press(
        &mut s,
        &[
            Input::Confirm,
            Input::Select(4),
            Input::Direction(Direction::East),
        ],
    )
    .await;

    let piece = s.state().board.piece(goblin).unwrap();
    assert_eq!(piece.position, Position::new(3, 2));
    assert!(!piece.unit.as_goblin().unwrap().has_acted());
    assert_eq!(s.current_player(), PlayerId::Two);
}

#[tokio::test]
async fn control_goblin_without_goblins_is_refused() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    s.start().await.unwrap();

    press(&mut s, &[Input::Confirm, Input::Select(4)]).await;

    assert_eq!(s.host().error_count(), 1);
    assert!(matches!(s.mode(), Mode::PieceSelected { .. }));
}

#[tokio::test]
async fn lethal_lightning_ends_the_duel() {
    let config = config_with(Position::new(1, 1), Position::new(1, 4));
    let mut s = session(config, RecordingHost::default(), 7);
    let mut session_events = s.events().subscribe(Topic::Session);
    s.start().await.unwrap();

    pick_spell(&mut s, 2).await;
    repeat(&mut s, Direction::South, 3).await;
    let step = press(&mut s, &[Input::Confirm]).await;

    let Step::Finished(result) = step else {
        panic!("duel should be over");
    };
    assert_eq!(result.winner, PlayerId::One);
    assert_eq!(result.turns, 1);
    assert!(s.state().wizard(PlayerId::Two).is_none());
    assert!(s.host().banners().contains(&Banner::Victory(result)));
    assert!(s.host().cues().contains(&AudioCue::Death));

    // nothing moves once the duel is over
    let again = press(&mut s, &[Input::Direction(Direction::East)]).await;
    assert_eq!(again, Step::Finished(result));

    let mut ended = false;
    while let Ok(event) = session_events.try_recv() {
        ended |= event == Event::Session(SessionEvent::GameEnded(result));
    }
    assert!(ended);
}

#[tokio::test]
async fn run_consumes_queued_input_until_victory() {
    let config = config_with(Position::new(1, 1), Position::new(1, 4));
    let mut s = session(config, RecordingHost::default(), 7);

    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    for input in [
        Input::Confirm,
        Input::Select(1),
        Input::Select(2),
        Input::Direction(Direction::South),
        Input::Direction(Direction::South),
        Input::Direction(Direction::South),
        Input::Confirm,
    ] {
        tx.send(input).await.unwrap();
    }

    let result = s.run(&mut rx).await.unwrap();
    assert_eq!(result.winner, PlayerId::One);
}

#[tokio::test]
async fn run_reports_closed_input() {
    let mut s = session(GameConfig::default(), RecordingHost::default(), 0);
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Input>(1);
    drop(tx);

    let err = s.run(&mut rx).await.unwrap_err();
    assert!(matches!(err, runtime::RuntimeError::InputClosed));
}

#[tokio::test]
async fn restart_builds_a_fresh_board() {
    let config = config_with(Position::new(1, 1), Position::new(1, 4));
    let mut s = session(config, RecordingHost::default(), 7);
    s.start().await.unwrap();
    pick_spell(&mut s, 2).await;
    repeat(&mut s, Direction::South, 3).await;
    press(&mut s, &[Input::Confirm]).await;
    assert!(s.state().is_over());

    s.restart(99).unwrap();

    assert!(!s.state().is_over());
    assert_eq!(s.state().game_seed, 99);
    assert_eq!(s.mode(), &Mode::Idle);
    assert_eq!(hp(&s, PlayerId::Two), GameConfig::DEFAULT_WIZARD_HP);
}
