//! Game progression controller
//!
//! Owns the tool collection and the single `GameState`, drives the simulator
//! once per frame and turns scoring results into phase transitions:
//!
//! ```text
//! PLANNING --fire--> FIRED --evaluation--> RESULT
//! RESULT --retry--> PLANNING            (score reset, tools kept)
//! RESULT --advance--> PLANNING          (next level, tools cleared, score kept)
//! any --mode toggle / level select--> PLANNING (score reset)
//! ```
//!
//! Every entry point takes the caller's clock reading in milliseconds.

use glam::Vec2;
use crate::consts::ADVANCE_MIN_ACCURACY;
use crate::highscores::Leaderboard;
use crate::level::{self, LevelConfig};
use crate::persistence::RecordStore;
use crate::platform;
use crate::render::RenderSnapshot;
use crate::settings::Settings;
use crate::sim::{
    GamePhase, PhysicsMode, PlacedTool, ScoringEngine, Simulator, SnapGuides, TickInput, ToolKind,
    evaluate, resolve_position,
};
use crate::tuning::Tuning;

/// Session-wide game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Running score
    pub score: u64,
    /// Completed evaluations this session
    pub attempts: u32,
    /// Accuracy (%) of the last evaluation, cleared on leaving RESULT
    pub last_accuracy: Option<u8>,
    pub phase: GamePhase,
    pub mode: PhysicsMode,
    /// Current level id
    pub level: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            attempts: 0,
            last_accuracy: None,
            phase: GamePhase::Planning,
            mode: PhysicsMode::Wave,
            level: level::LEVELS[0].id,
        }
    }
}

/// Notable things that happened during a call
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Fire accepted; evaluation due after `delay_ms`
    Fired { ticket: u64, delay_ms: f64 },
    /// Evaluation ran and the phase moved to RESULT
    EvaluationComplete { accuracy: u8, score: u64 },
    /// Running score written to the leaderboard
    ScoreSaved { rank: usize },
    /// Final level cleared; show the leaderboard
    ShowLeaderboard,
}

/// The game controller
pub struct Game {
    state: GameState,
    tools: Vec<PlacedTool>,
    next_tool_id: u32,
    selected: Option<u32>,
    dragging: Option<u32>,
    guides: SnapGuides,
    sim: Simulator,
    scoring: ScoringEngine,
    tuning: Tuning,
    settings: Settings,
    leaderboard: Leaderboard,
    store: Box<dyn RecordStore>,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn RecordStore>, now_ms: f64) -> Self {
        let state = GameState::default();
        let settings = Settings::load(store.as_ref());
        let leaderboard = Leaderboard::load(store.as_ref());
        Self {
            sim: Simulator::new(seed, state.mode, tuning.clone()),
            scoring: ScoringEngine::new(tuning.observation_window_ms, now_ms),
            state,
            tools: Vec::new(),
            next_tool_id: 1,
            selected: None,
            dragging: None,
            guides: SnapGuides::default(),
            tuning,
            settings,
            leaderboard,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tools(&self) -> &[PlacedTool] {
        &self.tools
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn level_config(&self) -> &'static LevelConfig {
        level::level(self.state.level)
    }

    pub fn target(&self) -> Vec2 {
        self.level_config().target()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            particles: self.sim.particles(),
            tools: &self.tools,
            phase: self.state.phase,
            mode: self.state.mode,
            target: self.target(),
            hit_radius: self.tuning.hit_radius,
            guides: self.guides,
            selected: self.selected,
            dragging: self.dragging,
        }
    }

    /// Set and persist the player name. Blank names are rejected.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        if !self.settings.set_player_name(name) {
            return false;
        }
        if let Err(e) = self.settings.save(self.store.as_mut()) {
            log::warn!("Failed to save settings: {}", e);
        }
        true
    }

    // === Frame loop ===

    /// Advance one display frame
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.state.phase.is_simulating() {
            let input = TickInput {
                tools: &self.tools,
                dragging: self.dragging,
            };
            self.sim.tick(&input);
        }

        let mut events = Vec::new();
        if self.state.phase == GamePhase::Fired && self.scoring.poll(now_ms).is_some() {
            self.complete_evaluation(&mut events);
        }
        events
    }

    // === Input surface ===

    /// Pointer down. Grabs the topmost tool under the pointer, or clears the selection.
    pub fn start_drag(&mut self, pos: Vec2) -> Option<u32> {
        if self.state.phase != GamePhase::Planning {
            return None;
        }
        let hit = self.tools.iter().rev().find(|t| t.hit_test(pos)).map(|t| t.id);
        self.selected = hit;
        self.dragging = hit;
        hit
    }

    /// Pointer move. Repositions the dragged tool through the snap resolver.
    pub fn move_drag(&mut self, pos: Vec2) {
        let Some(id) = self.dragging else {
            self.guides = SnapGuides::default();
            return;
        };
        let (snapped, guides) = resolve_position(pos, Some(id), &self.tools);
        if let Some(tool) = self.tools.iter_mut().find(|t| t.id == id) {
            tool.pos = snapped;
        }
        self.guides = guides;
    }

    /// Pointer up
    pub fn end_drag(&mut self, now_ms: f64) {
        if self.dragging.take().is_some() {
            self.scoring.touch(now_ms);
        }
        self.guides = SnapGuides::default();
    }

    /// Place a new tool from the toolbox. Returns its id.
    pub fn drop_new_tool(&mut self, kind: ToolKind, pos: Vec2, now_ms: f64) -> Option<u32> {
        if self.state.phase != GamePhase::Planning {
            return None;
        }
        let (snapped, _) = resolve_position(pos, None, &self.tools);
        let id = self.next_tool_id;
        self.next_tool_id += 1;
        self.tools.push(PlacedTool::new(id, kind, snapped));
        self.selected = Some(id);
        self.scoring.touch(now_ms);
        log::debug!("Placed {} #{} at ({}, {})", kind.as_str(), id, snapped.x, snapped.y);
        Some(id)
    }

    /// Place a tool named by the input layer; unknown names are ignored
    pub fn drop_tool_named(&mut self, name: &str, pos: Vec2, now_ms: f64) -> Option<u32> {
        let Some(kind) = ToolKind::parse(name) else {
            log::debug!("Ignoring unknown tool '{}'", name);
            return None;
        };
        self.drop_new_tool(kind, pos, now_ms)
    }

    pub fn delete_tool(&mut self, id: u32, now_ms: f64) -> bool {
        if self.state.phase != GamePhase::Planning {
            return false;
        }
        let before = self.tools.len();
        self.tools.retain(|t| t.id != id);
        if self.tools.len() == before {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.dragging == Some(id) {
            self.dragging = None;
            self.guides = SnapGuides::default();
        }
        self.scoring.touch(now_ms);
        log::debug!("Deleted tool #{}", id);
        true
    }

    /// Remove every tool and restart the level (same as retry)
    pub fn clear_tools(&mut self, now_ms: f64) -> bool {
        if self.state.phase == GamePhase::Fired {
            return false;
        }
        self.tools.clear();
        self.selected = None;
        self.dragging = None;
        self.guides = SnapGuides::default();
        self.scoring.touch(now_ms);
        self.reset_run();
        true
    }

    // === Phase transitions ===

    /// Commit the current layout. Evaluates immediately if the scene has
    /// already been settled for a full observation window.
    pub fn fire(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase != GamePhase::Planning {
            return events;
        }
        self.end_drag(now_ms);

        let delay_ms = self.scoring.remaining_delay(now_ms);
        let armed = self.scoring.arm(now_ms);
        self.state.phase = GamePhase::Fired;
        log::info!("Fired (evaluation #{} in {:.0} ms)", armed.ticket, delay_ms);
        events.push(GameEvent::Fired {
            ticket: armed.ticket,
            delay_ms,
        });

        if self.scoring.poll(now_ms).is_some() {
            self.complete_evaluation(&mut events);
        }
        events
    }

    /// RESULT -> PLANNING on the same level. Score resets, tools stay.
    pub fn retry(&mut self) -> bool {
        if self.state.phase != GamePhase::Result {
            return false;
        }
        self.reset_run();
        true
    }

    pub fn can_advance(&self) -> bool {
        self.state.phase == GamePhase::Result
            && self
                .state
                .last_accuracy
                .is_some_and(|a| a >= ADVANCE_MIN_ACCURACY)
    }

    /// RESULT -> next level with the running score kept as a streak.
    /// On the final level this asks for the leaderboard instead.
    pub fn advance(&mut self, now_ms: f64) -> Option<GameEvent> {
        if !self.can_advance() {
            return None;
        }
        if level::is_final(self.state.level) {
            log::info!("Final level cleared with score {}", self.state.score);
            return Some(GameEvent::ShowLeaderboard);
        }
        let next = level::next_level(self.state.level)?;

        log::info!("Advancing to level {} (score {})", next.id, self.state.score);
        self.state.level = next.id;
        self.state.phase = GamePhase::Planning;
        self.state.last_accuracy = None;
        self.clear_layout();
        self.invalidate_scene(now_ms);
        None
    }

    /// Jump to a level. Score resets and tools are cleared.
    pub fn select_level(&mut self, id: u32, now_ms: f64) -> bool {
        if !level::LEVELS.iter().any(|l| l.id == id) {
            return false;
        }
        log::info!("Level {} selected", id);
        self.state.level = id;
        self.reset_run();
        self.clear_layout();
        self.invalidate_scene(now_ms);
        true
    }

    /// Switch physics rules. Score resets, tools stay.
    pub fn toggle_mode(&mut self, now_ms: f64) -> PhysicsMode {
        self.state.mode = self.state.mode.toggled();
        log::info!("Physics mode: {}", self.state.mode.as_str());
        self.reset_run();
        self.dragging = None;
        self.guides = SnapGuides::default();
        self.invalidate_scene(now_ms);
        self.state.mode
    }

    // === Internals ===

    fn complete_evaluation(&mut self, events: &mut Vec<GameEvent>) {
        let accuracy = evaluate(
            self.sim.particles(),
            self.target(),
            self.tuning.hit_radius,
            self.tuning.min_sample,
        );
        let gained = accuracy as u64 * self.tuning.points_per_percent * self.state.level as u64;

        self.state.score += gained;
        self.state.attempts += 1;
        self.state.last_accuracy = Some(accuracy);
        self.state.phase = GamePhase::Result;
        log::info!(
            "Evaluation: {}% accuracy over {} particles, +{} (score {})",
            accuracy,
            self.sim.particles().len(),
            gained,
            self.state.score
        );
        events.push(GameEvent::EvaluationComplete {
            accuracy,
            score: self.state.score,
        });

        if self.state.score > 0 {
            if let Some(rank) = self.save_score() {
                events.push(GameEvent::ScoreSaved { rank });
            }
        }
    }

    fn save_score(&mut self) -> Option<usize> {
        let name = self.settings.player_name.clone()?;
        let rank = self
            .leaderboard
            .record(&name, self.state.score, &platform::today())?;
        if let Err(e) = self.leaderboard.save(self.store.as_mut()) {
            log::warn!("Failed to save leaderboard: {}", e);
        }
        Some(rank)
    }

    /// Back to PLANNING with score and accuracy cleared
    fn reset_run(&mut self) {
        self.scoring.cancel();
        self.state.phase = GamePhase::Planning;
        self.state.last_accuracy = None;
        self.state.score = 0;
    }

    fn clear_layout(&mut self) {
        self.tools.clear();
        self.selected = None;
        self.dragging = None;
        self.guides = SnapGuides::default();
    }

    /// Throw away the particle set and any pending evaluation
    fn invalidate_scene(&mut self, now_ms: f64) {
        self.scoring.cancel();
        self.scoring.touch(now_ms);
        self.sim.reset(self.state.mode);
    }
}
