//! Full sessions driven through the public `Game` API with a controlled clock

use glam::Vec2;
use quantum_shot::consts::CANNON_Y;
use quantum_shot::persistence::{FileStore, MemoryStore};
use quantum_shot::sim::{GamePhase, PhysicsMode, ScoringEngine, ToolKind};
use quantum_shot::{Game, GameEvent, Tuning};

const FRAME_MS: f64 = 16.0;

fn new_game(now: f64) -> Game {
    Game::new(2024, Tuning::default(), Box::new(MemoryStore::new()), now)
}

/// Run frames until `until_ms`, returning the clock and collected events
fn run_until(game: &mut Game, mut now: f64, until_ms: f64) -> (f64, Vec<GameEvent>) {
    let mut events = Vec::new();
    while now < until_ms {
        now += FRAME_MS;
        events.extend(game.frame(now));
    }
    (now, events)
}

fn accuracy_of(events: &[GameEvent]) -> Option<u8> {
    events.iter().find_map(|e| match e {
        GameEvent::EvaluationComplete { accuracy, .. } => Some(*accuracy),
        _ => None,
    })
}

#[test]
fn classical_straight_shot_clears_level_one() {
    let mut game = new_game(0.0);
    assert_eq!(game.toggle_mode(0.0), PhysicsMode::Classical);
    let (now, _) = run_until(&mut game, 0.0, 9_000.0);

    let events = game.fire(now);
    let accuracy = accuracy_of(&events).expect("settled scene evaluates on fire");
    assert!(accuracy >= 10, "accuracy {accuracy}");
    assert!(game.can_advance());
    assert_eq!(game.state().score, accuracy as u64 * 10);
}

#[test]
fn repulsor_in_the_way_misses_raised_target() {
    let mut game = new_game(0.0);
    assert!(game.select_level(2, 0.0));
    assert_eq!(game.state().mode, PhysicsMode::Wave);
    game.drop_new_tool(ToolKind::Repulsor, Vec2::new(400.0, CANNON_Y), 0.0);

    let (now, _) = run_until(&mut game, 0.0, 9_000.0);
    let accuracy = accuracy_of(&game.fire(now)).expect("settled scene evaluates on fire");
    assert!(accuracy <= 5, "accuracy {accuracy}");
    assert!(!game.can_advance());
}

#[test]
fn fire_after_long_idle_has_no_delay() {
    let mut game = new_game(1_000.0);
    game.drop_new_tool(ToolKind::Attractor, Vec2::new(500.0, 250.0), 1_000.0);
    let (now, _) = run_until(&mut game, 1_000.0, 9_100.0);

    let events = game.fire(now);
    assert!(matches!(events[0], GameEvent::Fired { delay_ms, .. } if delay_ms == 0.0));
    assert!(accuracy_of(&events).is_some());
    assert_eq!(game.state().phase, GamePhase::Result);
}

#[test]
fn fire_right_after_drag_waits_full_window() {
    let mut game = new_game(0.0);
    let id = game
        .drop_new_tool(ToolKind::Attractor, Vec2::new(500.0, 250.0), 0.0)
        .unwrap();
    let (now, _) = run_until(&mut game, 0.0, 20_000.0);

    assert_eq!(game.start_drag(Vec2::new(500.0, 250.0)), Some(id));
    game.move_drag(Vec2::new(520.0, 180.0));
    game.end_drag(now);

    let events = game.fire(now);
    assert!(matches!(events[0], GameEvent::Fired { delay_ms, .. } if delay_ms == 8_000.0));
    assert_eq!(game.state().phase, GamePhase::Fired);

    // Particles keep moving while the evaluation is pending
    let ticks_before = game.simulator().time_ticks();
    let (later, events) = run_until(&mut game, now, now + 7_900.0);
    assert!(accuracy_of(&events).is_none());
    assert!(game.simulator().time_ticks() > ticks_before);

    let (_, events) = run_until(&mut game, later, now + 8_100.0);
    assert_eq!(events.len(), 1);
    assert!(accuracy_of(&events).is_some());
    assert_eq!(game.state().phase, GamePhase::Result);
}

#[test]
fn rearming_fires_only_the_latest_commitment() {
    let mut engine = ScoringEngine::new(8_000.0, 0.0);
    let first = engine.arm(0.0);
    let second = engine.arm(4_000.0);
    assert_eq!(second.due_ms, 8_000.0);

    let mut fired = Vec::new();
    let mut now = 0.0;
    while now < 20_000.0 {
        now += FRAME_MS;
        fired.extend(engine.poll(now));
    }
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].ticket, second.ticket);
    assert_ne!(fired[0].ticket, first.ticket);
}

#[test]
fn streak_across_levels_then_leaderboard() {
    let mut game = new_game(0.0);
    game.set_player_name("Ada");
    game.toggle_mode(0.0);

    let (now, _) = run_until(&mut game, 0.0, 9_000.0);
    let events = game.fire(now);
    let first_score = game.state().score;
    assert!(first_score > 0);
    assert!(events.contains(&GameEvent::ScoreSaved { rank: 1 }));

    // Advance keeps the score as a streak bonus
    assert!(game.advance(now).is_none());
    assert_eq!(game.state().level, 2);
    assert_eq!(game.state().score, first_score);
    assert_eq!(game.state().mode, PhysicsMode::Classical);

    // Straight line misses the raised target: no advance, retry zeroes the score
    let (now, _) = run_until(&mut game, now, now + 9_000.0);
    game.fire(now);
    assert_eq!(game.state().last_accuracy, Some(0));
    assert_eq!(game.state().score, first_score);
    assert!(!game.can_advance());
    assert!(game.retry());
    assert_eq!(game.state().score, 0);
    assert_eq!(game.leaderboard().best_for("Ada"), Some(first_score));
}

#[test]
fn leaderboard_and_name_survive_restart() {
    let dir = std::env::temp_dir().join(format!("quantum_shot_session_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let score = {
        let mut game = Game::new(7, Tuning::default(), Box::new(FileStore::new(&dir)), 0.0);
        assert!(game.settings().player_name.is_none());
        game.set_player_name("Grace");
        game.toggle_mode(0.0);
        let (now, _) = run_until(&mut game, 0.0, 9_000.0);
        game.fire(now);
        game.state().score
    };
    assert!(score > 0);

    let game = Game::new(8, Tuning::default(), Box::new(FileStore::new(&dir)), 0.0);
    assert_eq!(game.settings().player_name.as_deref(), Some("Grace"));
    assert_eq!(game.leaderboard().best_for("Grace"), Some(score));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_leaderboard_starts_empty() {
    use quantum_shot::persistence::RecordStore;

    let mut store = MemoryStore::new();
    store.set("quantum_leaderboard", "not json at all").unwrap();
    let game = Game::new(1, Tuning::default(), Box::new(store), 0.0);
    assert!(game.leaderboard().is_empty());
}
