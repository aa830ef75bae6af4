//! Delayed, time-compensated scoring
//!
//! Firing arms a single pending evaluation whose deadline is shortened by
//! however long the scene has already been left untouched. The deadline is
//! polled by the frame loop rather than blocking, so particles keep moving
//! while it is pending.

use glam::Vec2;

use super::state::Particle;

/// A scheduled evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEvaluation {
    /// Unique per arm; a stale ticket can never be returned by `poll`
    pub ticket: u64,
    /// Clock reading (ms) at which the evaluation is due
    pub due_ms: f64,
}

/// Tracks the last scene interaction and at most one pending evaluation
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    window_ms: f64,
    last_interaction_ms: f64,
    pending: Option<PendingEvaluation>,
    next_ticket: u64,
}

impl ScoringEngine {
    pub fn new(window_ms: f64, now_ms: f64) -> Self {
        Self {
            window_ms,
            last_interaction_ms: now_ms,
            pending: None,
            next_ticket: 1,
        }
    }

    /// Record that the player disturbed the scene
    pub fn touch(&mut self, now_ms: f64) {
        self.last_interaction_ms = now_ms;
    }

    pub fn last_interaction_ms(&self) -> f64 {
        self.last_interaction_ms
    }

    pub fn pending(&self) -> Option<PendingEvaluation> {
        self.pending
    }

    /// Observation time still owed before the scene counts as settled
    pub fn remaining_delay(&self, now_ms: f64) -> f64 {
        (self.window_ms - (now_ms - self.last_interaction_ms)).max(0.0)
    }

    /// Schedule an evaluation, replacing (and cancelling) any pending one
    pub fn arm(&mut self, now_ms: f64) -> PendingEvaluation {
        if let Some(stale) = self.cancel() {
            log::info!("Re-armed: cancelled evaluation #{}", stale.ticket);
        }

        let evaluation = PendingEvaluation {
            ticket: self.next_ticket,
            due_ms: now_ms + self.remaining_delay(now_ms),
        };
        self.next_ticket += 1;
        self.pending = Some(evaluation);
        evaluation
    }

    /// Drop the pending evaluation, if any
    pub fn cancel(&mut self) -> Option<PendingEvaluation> {
        self.pending.take()
    }

    /// Take the pending evaluation once its deadline has passed
    pub fn poll(&mut self, now_ms: f64) -> Option<PendingEvaluation> {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => self.pending.take(),
            _ => None,
        }
    }
}

/// Percentage of live particles within `hit_radius` of the target.
///
/// Always in [0, 100]; fewer than `min_sample` particles scores 0.
pub fn evaluate(particles: &[Particle], target: Vec2, hit_radius: f32, min_sample: usize) -> u8 {
    let total = particles.len();
    if total < min_sample.max(1) {
        return 0;
    }

    let hits = particles
        .iter()
        .filter(|p| p.pos.distance(target) <= hit_radius)
        .count();

    let accuracy = (hits as f64 / total as f64 * 100.0).round();
    if accuracy.is_finite() {
        accuracy.clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            age: 0,
            max_life: 600,
            hue: 0.0,
        }
    }

    #[test]
    fn test_fresh_interaction_gets_full_window() {
        let mut engine = ScoringEngine::new(8000.0, 0.0);
        engine.touch(10_000.0);
        let armed = engine.arm(10_000.0);
        assert_eq!(armed.due_ms, 18_000.0);
        assert!(engine.poll(17_999.0).is_none());
        assert_eq!(engine.poll(18_000.0), Some(armed));
    }

    #[test]
    fn test_settled_scene_is_due_immediately() {
        let mut engine = ScoringEngine::new(8000.0, 0.0);
        engine.touch(1_000.0);
        assert_eq!(engine.remaining_delay(9_500.0), 0.0);
        let armed = engine.arm(9_500.0);
        assert_eq!(armed.due_ms, 9_500.0);
        assert!(engine.poll(9_500.0).is_some());
    }

    #[test]
    fn test_partial_compensation() {
        let mut engine = ScoringEngine::new(8000.0, 0.0);
        engine.touch(2_000.0);
        assert_eq!(engine.remaining_delay(5_000.0), 5_000.0);
    }

    #[test]
    fn test_rearm_cancels_prior() {
        let mut engine = ScoringEngine::new(8000.0, 0.0);
        let first = engine.arm(0.0);
        let second = engine.arm(100.0);
        assert_ne!(first.ticket, second.ticket);

        // Only the newest ticket ever fires, and only once
        assert_eq!(engine.poll(50_000.0), Some(second));
        assert!(engine.poll(60_000.0).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut engine = ScoringEngine::new(8000.0, 0.0);
        engine.arm(0.0);
        assert!(engine.cancel().is_some());
        assert!(engine.cancel().is_none());
        assert!(engine.poll(1e9).is_none());
    }

    #[test]
    fn test_evaluate_counts_hits() {
        let target = Vec2::new(850.0, 300.0);
        let mut particles: Vec<Particle> =
            (0..6).map(|i| at(850.0 + i as f32 * 5.0, 300.0)).collect();
        particles.extend((0..4).map(|_| at(100.0, 100.0)));
        assert_eq!(evaluate(&particles, target, 50.0, 5), 60);
    }

    #[test]
    fn test_evaluate_hit_radius_is_inclusive() {
        let target = Vec2::new(0.0, 0.0);
        let particles: Vec<Particle> = (0..5).map(|_| at(50.0, 0.0)).collect();
        assert_eq!(evaluate(&particles, target, 50.0, 5), 100);
    }

    #[test]
    fn test_evaluate_small_sample_is_zero() {
        let target = Vec2::new(10.0, 10.0);
        let particles: Vec<Particle> = (0..4).map(|_| at(10.0, 10.0)).collect();
        assert_eq!(evaluate(&particles, target, 50.0, 5), 0);
        assert_eq!(evaluate(&[], target, 50.0, 0), 0);
    }

    #[test]
    fn test_evaluate_rounds() {
        let target = Vec2::ZERO;
        let mut particles: Vec<Particle> = (0..2).map(|_| at(0.0, 0.0)).collect();
        particles.extend((0..1).map(|_| at(500.0, 0.0)));
        // 2/3 -> 66.67 -> 67
        assert_eq!(evaluate(&particles, target, 50.0, 3), 67);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn accuracy_is_a_percentage(
                points in prop::collection::vec((-200.0f32..1200.0, -200.0f32..800.0), 0..200),
                tx in 0.0f32..1000.0,
                ty in 0.0f32..600.0,
            ) {
                let particles: Vec<Particle> = points.iter().map(|&(x, y)| at(x, y)).collect();
                let accuracy = evaluate(&particles, Vec2::new(tx, ty), 50.0, 5);
                prop_assert!(accuracy <= 100);
                if particles.len() < 5 {
                    prop_assert_eq!(accuracy, 0);
                }
            }

            #[test]
            fn remaining_delay_is_bounded(
                last in 0.0f64..1e6,
                elapsed in 0.0f64..1e5,
            ) {
                let mut engine = ScoringEngine::new(8000.0, 0.0);
                engine.touch(last);
                let delay = engine.remaining_delay(last + elapsed);
                prop_assert!((0.0..=8000.0).contains(&delay));
                if elapsed >= 8001.0 {
                    prop_assert_eq!(delay, 0.0);
                }
            }
        }
    }
}
