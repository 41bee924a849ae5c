//! Fixed timestep simulation tick
//!
//! One call per animation frame. Round transitions are evaluated here against
//! the dog's completion predicates, so there are no timers to re-arm and a
//! round can only be completed once per epoch.

use glam::Vec2;
use rand::Rng;

use super::arrow::Arrow;
use super::collision::{body_hit, shield_contact};
use super::signal::SignalColor;
use super::state::{GameEvent, GamePhase, GameState, JumpOutcome, RoundPhase, judge};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Host clock (ms); drives the traffic light
    pub now_ms: f64,
    /// Pointer position in canvas space; the shield turns toward it
    pub pointer: Option<Vec2>,
    /// Freeze the light and speed up (click/tap/space)
    pub commit: bool,
    /// Start over after game over
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub demo_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.now_ms = Some(input.now_ms);
    state.demo = input.demo_mode;

    let mut input = input.clone();
    if input.demo_mode {
        demo_input(state, &mut input);
    }
    let input = &input;

    if input.restart && state.is_game_over() {
        state.restart();
    }

    state.time_ticks += 1;
    state.effects.update();

    if state.phase == GamePhase::GameOver {
        // Light and hurdle stay frozen; the dog finishes whatever it was doing
        state.game_over_ticks = state.game_over_ticks.saturating_add(1);
        state.dog.update();
        return;
    }

    if input.commit && state.round_phase == RoundPhase::Approaching && !state.committed {
        state.signal.stop();
        state.committed = true;
        state.terrain_speed = COMMITTED_TERRAIN_SPEED;
        state.events.push(GameEvent::Committed {
            color: state.signal.current(),
        });
    }

    if let Some(pointer) = input.pointer {
        let center = state.dog.center();
        state.shield.face_toward(center, pointer);
    }

    state.dog.update();

    // The hurdle waits while the dog picks itself up, and hurries off while it walks back
    if !state.dog.is_in_recovery() {
        let speed = if state.dog.is_in_return_state() {
            RETURN_TERRAIN_SPEED
        } else {
            state.terrain_speed
        };
        state.hurdle.advance(speed);
        state.terrain_offset += speed;
    }

    state.signal.update(input.now_ms);

    update_arrows(state);

    if state.round_phase == RoundPhase::Approaching
        && state.dog.is_idle()
        && state.hurdle.x() - state.dog.x() < JUMP_DETECTION_DISTANCE
    {
        trigger_jump(state);
    }

    if matches!(state.round_phase, RoundPhase::Settling(_)) {
        let epoch = state.round_epoch;
        complete_round(state, epoch);
    }
}

/// Judge the jump against the light and launch the matching animation
fn trigger_jump(state: &mut GameState) {
    let outcome = judge(state.committed, state.signal.current());
    let target_x = state.hurdle.x() + JUMP_LANDING_OFFSET;

    match outcome {
        JumpOutcome::Perfect { .. } => state.dog.perfect_jump(target_x),
        JumpOutcome::Good { .. } => state.dog.normal_jump(target_x),
        JumpOutcome::Fail(_) => state.dog.fail_jump(target_x),
    }

    state.signal.stop();
    state.score += outcome.points();
    state.last_outcome = Some(outcome);
    state.round_phase = RoundPhase::Settling(outcome);

    let center = state.dog.center();
    if outcome.is_success() {
        state.effects.success_burst(center);
    } else {
        state
            .effects
            .fail_burst(Vec2::new(center.x, DOG_GROUND_Y + DOG_BODY_HEIGHT));
    }

    state.events.push(GameEvent::JumpJudged {
        round: state.current_round,
        outcome,
    });
}

/// Finish the current round once the dog has settled.
///
/// Returns true if the round was completed by this call. A call carrying an
/// epoch other than the state's current one, or made before the dog is idle,
/// changes nothing.
pub fn complete_round(state: &mut GameState, epoch: u32) -> bool {
    if epoch != state.round_epoch || state.is_game_over() {
        return false;
    }
    let RoundPhase::Settling(outcome) = state.round_phase else {
        return false;
    };
    if !state.dog.is_idle() {
        return false;
    }

    if outcome.is_success() {
        state.successful_rounds += 1;
    }

    if state.is_final_round() {
        end_game(state);
    } else {
        state.current_round += 1;
        state.begin_round();
        state.events.push(GameEvent::RoundAdvanced {
            round: state.current_round,
        });
    }
    true
}

fn end_game(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.round_epoch = state.round_epoch.wrapping_add(1);
    state.game_over_ticks = 0;
    state.arrows.clear();
    state.signal.stop();
    state.effects.set_celebrating(true);
    state.events.push(GameEvent::GameOver {
        score: state.score,
        successful_rounds: state.successful_rounds,
        total_rounds: state.config.total_rounds,
        demo: state.demo,
    });
}

/// Spawn, move and collide arrows
fn update_arrows(state: &mut GameState) {
    if state.config.arrows_enabled {
        state.arrow_cooldown = state.arrow_cooldown.saturating_sub(1);
        if state.arrow_cooldown == 0 {
            state.arrow_cooldown = ARROW_SPAWN_INTERVAL_TICKS;
            if state.rng.random_bool(ARROW_SPAWN_CHANCE) {
                spawn_arrow(state);
            }
        }
    }

    let center = state.dog.center();
    let hit_arc = state.shield.hit_arc(center);
    let dog_bounds = state.dog.bounds();

    let mut blocked = Vec::new();
    let mut impacts = Vec::new();

    state.arrows.retain_mut(|arrow| {
        arrow.update();
        let bounds = arrow.bounds();

        // Shield first: an arrow inside the shield never reaches the body
        if let Some(contact) = shield_contact(&hit_arc, &bounds) {
            blocked.push(contact.point);
            return false;
        }
        if body_hit(&dog_bounds, &bounds) {
            impacts.push(arrow.pos());
            return false;
        }
        !arrow.is_expired() && !arrow.is_out_of_bounds()
    });

    for at in blocked {
        state.effects.success_burst(at);
        state.events.push(GameEvent::ShieldBlock { at });
    }
    for at in impacts {
        state.score = state.score.saturating_sub(ARROW_HIT_PENALTY);
        state.effects.fail_burst(at);
        state.events.push(GameEvent::ArrowImpact {
            penalty: ARROW_HIT_PENALTY,
        });
    }
}

/// Direct shots fly in from the right edge; arced shots drop out of the sky
fn spawn_arrow(state: &mut GameState) {
    let direct_shot = state.rng.random_bool(ARROW_DIRECT_SHOT_CHANCE);
    let origin = if direct_shot {
        Vec2::new(
            CANVAS_WIDTH + ARROW_LENGTH,
            state.rng.random_range(40.0..CANVAS_HEIGHT * 0.5),
        )
    } else {
        Vec2::new(
            state.rng.random_range(CANVAS_WIDTH * 0.5..CANVAS_WIDTH),
            -ARROW_LENGTH,
        )
    };

    let jitter = Vec2::new(
        state.rng.random_range(-ARROW_AIM_JITTER..ARROW_AIM_JITTER),
        state.rng.random_range(-ARROW_AIM_JITTER..ARROW_AIM_JITTER),
    );
    let target = state.dog.center() + jitter;
    let speed = state.rng.random_range(ARROW_MIN_SPEED..ARROW_MAX_SPEED);

    let id = state.next_entity_id();
    state
        .arrows
        .push(Arrow::new(id, origin, target, speed, direct_shot));
}

/// Demo mode: wait for the best colour, guard against the nearest arrow
fn demo_input(state: &GameState, input: &mut TickInput) {
    if state.is_game_over() {
        input.restart = state.game_over_ticks >= DEMO_RESTART_TICKS;
        return;
    }

    if state.round_phase == RoundPhase::Approaching
        && !state.committed
        && state.signal.current() == SignalColor::best_go()
    {
        input.commit = true;
    }

    let center = state.dog.center();
    let nearest = state.arrows.iter().min_by(|a, b| {
        a.pos()
            .distance_squared(center)
            .partial_cmp(&b.pos().distance_squared(center))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(arrow) = nearest {
        input.pointer = Some(arrow.pos());
    }
}
