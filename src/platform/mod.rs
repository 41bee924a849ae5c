//! Host environment abstraction
//!
//! The game never touches the clock, the input devices or the HUD directly.
//! It asks a [`Host`] for them, so the same driver runs in the browser
//! ([`BrowserHost`], wasm only) and headless ([`ManualHost`]).

use std::collections::VecDeque;

use glam::Vec2;

use crate::highscores::ScoreEntry;
use crate::sim::{GameState, JumpOutcome, SignalColor};

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::BrowserHost;

/// A player input, already translated into game terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Freeze the light (click, tap, space)
    Commit,
    /// Pointer moved, in canvas coordinates
    Aim(Vec2),
    /// Start over after game over
    Restart,
    /// Attract mode on/off
    ToggleDemo,
}

/// What the HUD shows
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub score: u32,
    /// 1-based
    pub round: u32,
    pub total_rounds: u32,
    pub successful_rounds: u32,
    pub signal: SignalColor,
    pub committed: bool,
    pub last_outcome: Option<JumpOutcome>,
    pub game_over: bool,
    pub demo: bool,
    /// Board for the current round count, filled in at game over
    pub leaderboard: Vec<ScoreEntry>,
}

impl Panel {
    pub fn from_state(state: &GameState, demo: bool, leaderboard: &[ScoreEntry]) -> Self {
        Self {
            score: state.score,
            round: state.current_round,
            total_rounds: state.config.total_rounds,
            successful_rounds: state.successful_rounds,
            signal: state.signal.current(),
            committed: state.committed,
            last_outcome: state.last_outcome,
            game_over: state.is_game_over(),
            demo,
            leaderboard: leaderboard.to_vec(),
        }
    }

    /// Short status line
    pub fn status(&self) -> String {
        if self.game_over {
            return format!(
                "Game over: {} points, {}/{} hurdles cleared",
                self.score, self.successful_rounds, self.total_rounds
            );
        }
        match self.last_outcome {
            Some(JumpOutcome::Perfect { points, .. }) => format!("Perfect jump! +{points}"),
            Some(JumpOutcome::Good { points, .. }) => format!("Good jump +{points}"),
            Some(JumpOutcome::Fail(_)) => "Stumbled!".to_string(),
            None => format!("Round {} of {}", self.round, self.total_rounds),
        }
    }
}

/// The injected environment
pub trait Host {
    /// Monotonic milliseconds
    fn now(&self) -> f64;

    /// Inputs received since the last call, oldest first
    fn drain_input(&mut self) -> Vec<InputEvent>;

    /// Publish the HUD state
    fn update_panel(&mut self, panel: &Panel);
}

/// Host driven by hand: a settable clock and a queue of scripted inputs.
/// Used by the native binary and by tests.
#[derive(Debug, Default)]
pub struct ManualHost {
    now_ms: f64,
    queue: VecDeque<InputEvent>,
    /// Most recent panel the game published
    pub panel: Option<Panel>,
    /// Number of panel updates received
    pub panel_updates: u32,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }
}

impl Host for ManualHost {
    fn now(&self) -> f64 {
        self.now_ms
    }

    fn drain_input(&mut self) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }

    fn update_panel(&mut self, panel: &Panel) {
        self.panel = Some(panel.clone());
        self.panel_updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimConfig;

    #[test]
    fn test_manual_host_queue_drains_in_order() {
        let mut host = ManualHost::new();
        host.push(InputEvent::Aim(Vec2::new(1.0, 2.0)));
        host.push(InputEvent::Commit);
        assert_eq!(
            host.drain_input(),
            vec![InputEvent::Aim(Vec2::new(1.0, 2.0)), InputEvent::Commit]
        );
        assert!(host.drain_input().is_empty());
    }

    #[test]
    fn test_manual_clock() {
        let mut host = ManualHost::new();
        host.set_time(100.0);
        host.advance(16.5);
        assert_eq!(host.now(), 116.5);
    }

    #[test]
    fn test_panel_mirrors_state() {
        let state = GameState::new(
            3,
            SimConfig {
                total_rounds: 7,
                arrows_enabled: false,
            },
        );
        let panel = Panel::from_state(&state, true, &[]);
        assert_eq!(panel.round, 1);
        assert_eq!(panel.total_rounds, 7);
        assert_eq!(panel.signal, SignalColor::Red);
        assert!(panel.demo);
        assert!(!panel.game_over);
        assert_eq!(panel.status(), "Round 1 of 7");
    }

    #[test]
    fn test_status_after_jump() {
        let state = GameState::new(3, SimConfig::default());
        let mut panel = Panel::from_state(&state, false, &[]);
        panel.last_outcome = Some(crate::sim::judge(true, SignalColor::Green));
        assert_eq!(panel.status(), "Perfect jump! +15");
        panel.game_over = true;
        panel.score = 15;
        assert!(panel.status().starts_with("Game over: 15 points"));
    }
}
