//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::ArcSegment;
use super::arrow::Arrow;
use super::dog::Dog;
use super::effects::Effects;
use super::hurdle::Hurdle;
use super::signal::{SignalColor, TrafficLight};
use crate::consts::*;
use crate::normalize_angle;

/// Whole-game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal until a restart input
    GameOver,
}

/// Why a jump failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    /// The player never froze the light this round
    NoCommit,
    /// Frozen on the stop colour
    StopSignal,
}

/// Result of judging a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpOutcome {
    /// Best go colour
    Perfect { color: SignalColor, points: u32 },
    /// Any other go colour
    Good { color: SignalColor, points: u32 },
    Fail(FailReason),
}

impl JumpOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, JumpOutcome::Fail(_))
    }

    pub fn points(&self) -> u32 {
        match self {
            JumpOutcome::Perfect { points, .. } | JumpOutcome::Good { points, .. } => *points,
            JumpOutcome::Fail(_) => 0,
        }
    }
}

/// Judge a jump from the commit flag and the colour the light shows
pub fn judge(committed: bool, color: SignalColor) -> JumpOutcome {
    if !committed {
        return JumpOutcome::Fail(FailReason::NoCommit);
    }
    if !color.is_go() {
        return JumpOutcome::Fail(FailReason::StopSignal);
    }
    let points = color.points();
    if color == SignalColor::best_go() {
        JumpOutcome::Perfect { color, points }
    } else {
        JumpOutcome::Good { color, points }
    }
}

/// Where the current round is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Hurdle approaching, light cycling, commit accepted
    Approaching,
    /// Jump judged; waiting for the dog to finish jumping, recovering and returning
    Settling(JumpOutcome),
}

/// Something the collaborators care about (sound, scores, effects)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Committed { color: SignalColor },
    JumpJudged { round: u32, outcome: JumpOutcome },
    ShieldBlock { at: Vec2 },
    ArrowImpact { penalty: u32 },
    RoundAdvanced { round: u32 },
    GameOver {
        score: u32,
        successful_rounds: u32,
        total_rounds: u32,
        demo: bool,
    },
    Restarted,
}

/// Simulation options chosen outside the sim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub total_rounds: u32,
    pub arrows_enabled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            arrows_enabled: true,
        }
    }
}

/// The dog's shield
#[derive(Debug, Clone)]
pub struct Shield {
    /// Facing angle (radians, canvas space)
    pub theta: f32,
}

impl Default for Shield {
    fn default() -> Self {
        // Face the incoming arrows (from the right)
        Self { theta: 0.0 }
    }
}

impl Shield {
    /// Face toward a pointer position
    pub fn face_toward(&mut self, center: Vec2, pointer: Vec2) {
        let delta = pointer - center;
        if delta.length_squared() > f32::EPSILON {
            self.theta = normalize_angle(delta.y.atan2(delta.x));
        }
    }

    /// The drawn shield
    pub fn visual_arc(&self, center: Vec2) -> ArcSegment {
        ArcSegment::new(center, SHIELD_RADIUS, self.theta, SHIELD_ARC_WIDTH)
    }

    /// The forgiving hit zone
    pub fn hit_arc(&self, center: Vec2) -> ArcSegment {
        ArcSegment::new(center, SHIELD_HIT_RADIUS, self.theta, SHIELD_HIT_ARC_WIDTH)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub config: SimConfig,
    pub phase: GamePhase,
    pub round_phase: RoundPhase,
    /// Current round (1-based)
    pub current_round: u32,
    pub successful_rounds: u32,
    pub score: u32,
    /// The player froze the light this round
    pub committed: bool,
    /// Current scroll speed of terrain and hurdle
    pub terrain_speed: f32,
    /// Accumulated world scroll, for parallax
    pub terrain_offset: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Bumped on every round change and restart; stale completions are ignored
    pub round_epoch: u32,
    /// Outcome of the most recent judged jump
    pub last_outcome: Option<JumpOutcome>,
    /// Last tick ran in demo mode
    pub demo: bool,
    /// Ticks spent in game over
    pub game_over_ticks: u32,
    pub dog: Dog,
    pub hurdle: Hurdle,
    pub signal: TrafficLight,
    pub shield: Shield,
    /// Live arrows, in spawn order
    pub arrows: Vec<Arrow>,
    /// Visual particles (not gameplay-affecting)
    pub effects: Effects,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Host time of the latest tick
    pub(crate) now_ms: Option<f64>,
    pub(crate) arrow_cooldown: u32,
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64, config: SimConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let signal = TrafficLight::new(&mut rng);
        let config = SimConfig {
            total_rounds: config.total_rounds.clamp(1, MAX_TOTAL_ROUNDS),
            ..config
        };

        Self {
            seed,
            rng,
            config,
            phase: GamePhase::Playing,
            round_phase: RoundPhase::Approaching,
            current_round: 1,
            successful_rounds: 0,
            score: 0,
            committed: false,
            terrain_speed: BASE_TERRAIN_SPEED,
            terrain_offset: 0.0,
            time_ticks: 0,
            round_epoch: 0,
            last_outcome: None,
            demo: false,
            game_over_ticks: 0,
            dog: Dog::new(DOG_START_X, DOG_GROUND_Y),
            hurdle: Hurdle::default(),
            signal,
            shield: Shield::default(),
            arrows: Vec::new(),
            effects: Effects::new(seed, CANVAS_HEIGHT),
            events: Vec::new(),
            now_ms: None,
            arrow_cooldown: ARROW_SPAWN_INTERVAL_TICKS,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.config.total_rounds
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear per-round flags and bring the next hurdle in
    pub(crate) fn begin_round(&mut self) {
        self.round_epoch = self.round_epoch.wrapping_add(1);
        self.round_phase = RoundPhase::Approaching;
        self.committed = false;
        self.terrain_speed = BASE_TERRAIN_SPEED;
        self.signal.regenerate(&mut self.rng, self.now_ms);
        self.hurdle.respawn();
        self.dog.reset(DOG_START_X);
    }

    /// Start a fresh game with the same config. In-flight round completions
    /// from the previous game are invalidated through the epoch.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.current_round = 1;
        self.successful_rounds = 0;
        self.score = 0;
        self.terrain_offset = 0.0;
        self.last_outcome = None;
        self.game_over_ticks = 0;
        self.arrows.clear();
        self.effects.clear();
        self.shield = Shield::default();
        self.arrow_cooldown = ARROW_SPAWN_INTERVAL_TICKS;
        self.begin_round();
        self.events.push(GameEvent::Restarted);
    }

    /// Change the round count; takes effect through a restart
    pub fn set_total_rounds(&mut self, total_rounds: u32) {
        self.config.total_rounds = total_rounds.clamp(1, MAX_TOTAL_ROUNDS);
        self.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_table() {
        assert_eq!(
            judge(false, SignalColor::Green),
            JumpOutcome::Fail(FailReason::NoCommit)
        );
        assert_eq!(
            judge(true, SignalColor::Red),
            JumpOutcome::Fail(FailReason::StopSignal)
        );
        assert_eq!(
            judge(true, SignalColor::Green),
            JumpOutcome::Perfect {
                color: SignalColor::Green,
                points: 15,
            }
        );
        assert_eq!(
            judge(true, SignalColor::Orange),
            JumpOutcome::Good {
                color: SignalColor::Orange,
                points: 5,
            }
        );
        assert_eq!(judge(true, SignalColor::Yellow).points(), 10);
    }

    #[test]
    fn test_no_commit_always_fails() {
        for color in [
            SignalColor::Red,
            SignalColor::Orange,
            SignalColor::Yellow,
            SignalColor::Green,
        ] {
            assert!(!judge(false, color).is_success());
        }
    }

    #[test]
    fn test_shield_faces_pointer() {
        let mut shield = Shield::default();
        shield.face_toward(Vec2::new(100.0, 300.0), Vec2::new(100.0, 200.0));
        assert!((shield.theta + std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        // Pointer on the dog leaves the facing alone
        shield.face_toward(Vec2::new(100.0, 300.0), Vec2::new(100.0, 300.0));
        assert!((shield.theta + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_hit_zone_is_larger_than_drawn_shield() {
        let shield = Shield::default();
        let visual = shield.visual_arc(Vec2::ZERO);
        let hit = shield.hit_arc(Vec2::ZERO);
        assert!(hit.radius > visual.radius);
        assert!(hit.arc_width > visual.arc_width);
    }

    #[test]
    fn test_new_game_clamps_rounds() {
        let state = GameState::new(
            1,
            SimConfig {
                total_rounds: 0,
                arrows_enabled: false,
            },
        );
        assert_eq!(state.config.total_rounds, 1);
        assert!(state.is_final_round());
    }

    #[test]
    fn test_restart_bumps_epoch_and_resets_counters() {
        let mut state = GameState::new(1, SimConfig::default());
        state.score = 40;
        state.current_round = 3;
        state.phase = GamePhase::GameOver;
        let epoch = state.round_epoch;

        state.restart();
        assert_ne!(state.round_epoch, epoch);
        assert_eq!(state.score, 0);
        assert_eq!(state.current_round, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }
}
