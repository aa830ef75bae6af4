//! Quantum Shot headless runner
//!
//! Plays one scripted session per physics mode on level 1 and logs the
//! outcome. A graphical front-end drives `Game` the same way: one `frame`
//! per display refresh plus input calls in between.

use glam::Vec2;
use quantum_shot::consts::CANNON_Y;
use quantum_shot::persistence::MemoryStore;
use quantum_shot::sim::{GamePhase, ToolKind};
use quantum_shot::{Game, GameEvent, Tuning, platform};

/// Simulated frame interval (60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    platform::init_logging();
    log::info!("Quantum Shot (headless) starting...");

    let tuning = match std::env::var("QUANTUM_SHOT_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path).map(|s| Tuning::from_json(&s)) {
            Ok(Ok(tuning)) => tuning,
            Ok(Err(e)) => {
                log::warn!("Bad tuning file {}: {}", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let persistent = std::env::args().any(|a| a == "--save");
    let store: Box<dyn quantum_shot::persistence::RecordStore> = if persistent {
        platform::default_store()
    } else {
        Box::new(MemoryStore::new())
    };

    let mut now = platform::now_ms();
    let mut game = Game::new(now.to_bits(), tuning, store, now);
    if game.settings().player_name.is_none() {
        game.set_player_name("headless");
    }

    for classical in [false, true] {
        if classical {
            game.toggle_mode(now);
        }
        // A small nudge upward before the target; moved once to exercise drag
        let anchor = Vec2::new(600.0, CANNON_Y - 80.0);
        if let Some(id) = game.drop_new_tool(ToolKind::Attractor, anchor, now) {
            game.start_drag(anchor);
            game.move_drag(Vec2::new(640.0, CANNON_Y - 120.0));
            game.end_drag(now);
            log::info!("Attractor #{} placed", id);
        }

        let mut events = game.fire(now);
        while game.state().phase == GamePhase::Fired {
            now += FRAME_MS;
            events.extend(game.frame(now));
        }

        for event in &events {
            if let GameEvent::EvaluationComplete { accuracy, score } = event {
                println!(
                    "{:>9}: accuracy {:>3}%  score {}",
                    game.state().mode.as_str(),
                    accuracy,
                    score
                );
            }
        }
        game.clear_tools(now);
    }

    if let Some(best) = game.leaderboard().top_score() {
        println!("Best on leaderboard: {}", best);
    }
}
