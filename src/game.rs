//! Frame driver
//!
//! Owns the simulation and its three collaborators. Each animation frame it
//! pulls input from the host, runs fixed-step ticks, hands the events the
//! ticks raised to audio and the score store, and publishes the HUD panel.
//! Collaborator failures are logged and never reach the simulation.

use log::{debug, info, warn};

use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;
use crate::highscores::{ScoreEntry, ScoreSink};
use crate::platform::{Host, InputEvent, Panel};
use crate::render::{self, DogAnimation, Surface};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, JumpOutcome, TickInput, tick};

pub struct Game<H: Host, A: SoundSink, S: ScoreSink> {
    state: GameState,
    settings: Settings,
    host: H,
    audio: A,
    scores: S,
    animation: DogAnimation,
    accumulator: f32,
    /// Host time of the previous frame
    last_time: Option<f64>,
    input: TickInput,
    demo: bool,
    /// Board for the finished game's round count
    leaderboard: Vec<ScoreEntry>,
}

impl<H: Host, A: SoundSink, S: ScoreSink> Game<H, A, S> {
    pub fn new(seed: u64, settings: Settings, host: H, mut audio: A, scores: S) -> Self {
        audio.set_volume(settings.effective_volume());
        let state = GameState::new(seed, settings.sim_config());
        info!(
            "Game initialized with seed {seed}: {} rounds, arrows {}",
            state.config.total_rounds,
            if state.config.arrows_enabled { "on" } else { "off" }
        );
        Self {
            state,
            settings,
            host,
            audio,
            scores,
            animation: DogAnimation::new(seed),
            accumulator: 0.0,
            last_time: None,
            input: TickInput::default(),
            demo: false,
            leaderboard: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    /// One animation frame: timing from the host clock
    pub fn frame(&mut self) {
        let now = self.host.now();
        let dt = match self.last_time {
            Some(last) => ((now - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(now);

        self.update(dt, now);
        let panel = Panel::from_state(&self.state, self.demo, &self.leaderboard);
        self.host.update_panel(&panel);
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32, now_ms: f64) {
        for event in self.host.drain_input() {
            self.handle_input(event);
        }
        self.input.now_ms = now_ms;
        self.input.demo_mode = self.demo;

        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.animation.update(&self.state.dog);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.commit = false;
            self.input.restart = false;

            self.dispatch_events();
        }

        // Drop backlog the substep cap could not consume
        self.accumulator = self.accumulator.min(SIM_DT);
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            // Commit doubles as "play again" on the game-over screen
            InputEvent::Commit if self.state.is_game_over() => self.input.restart = true,
            InputEvent::Commit => self.input.commit = true,
            InputEvent::Aim(pos) => self.input.pointer = Some(pos),
            InputEvent::Restart => self.input.restart = true,
            InputEvent::ToggleDemo => self.set_demo(!self.demo),
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Committed { color } => debug!("Committed on {}", color.as_str()),
                GameEvent::JumpJudged { round, outcome } => {
                    debug!("Round {round} judged: {outcome:?}");
                    self.audio.play(match outcome {
                        JumpOutcome::Perfect { .. } => SoundEffect::PerfectJump,
                        JumpOutcome::Good { .. } => SoundEffect::GoodJump,
                        JumpOutcome::Fail(_) => SoundEffect::FailJump,
                    });
                }
                GameEvent::ShieldBlock { .. } => self.audio.play(SoundEffect::ShieldBlock),
                GameEvent::ArrowImpact { penalty } => {
                    debug!("Arrow hit, -{penalty}");
                    self.audio.play(SoundEffect::ArrowImpact);
                }
                GameEvent::RoundAdvanced { round } => {
                    info!("Round {round} of {}", self.state.config.total_rounds);
                }
                GameEvent::GameOver {
                    score,
                    successful_rounds,
                    total_rounds,
                    demo,
                } => {
                    info!(
                        "Game over: {score} points, {successful_rounds}/{total_rounds} hurdles cleared"
                    );
                    self.audio.play(SoundEffect::GameOver);
                    if !demo {
                        let name = self.settings.player_name.clone();
                        if let Err(e) = self.scores.add_score(&name, score, total_rounds) {
                            warn!("Score not saved: {e}");
                        }
                    }
                    self.leaderboard = self.scores.top_scores(total_rounds);
                }
                GameEvent::Restarted => {
                    info!("Game restarted");
                    self.leaderboard.clear();
                }
            }
        }
    }

    /// Start over right away, whatever the phase
    pub fn restart(&mut self) {
        self.state.restart();
        self.accumulator = 0.0;
        self.input.commit = false;
        self.input.restart = false;
        self.dispatch_events();
    }

    /// Change the round count (clamped) and start a new game with it
    pub fn set_total_rounds(&mut self, total_rounds: u32) {
        self.settings.set_total_rounds(total_rounds);
        self.settings.save();
        self.state.set_total_rounds(self.settings.total_rounds);
        self.accumulator = 0.0;
        self.dispatch_events();
    }

    /// Change who scores are filed under and start a new game
    pub fn set_player_name(&mut self, name: &str) {
        self.settings.set_player_name(name);
        self.settings.save();
        info!("Playing as {}", self.settings.player_name);
        self.restart();
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.settings.set_master_volume(volume);
        self.settings.save();
        self.audio.set_volume(self.settings.effective_volume());
    }

    /// Returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.settings.save();
        self.audio.set_volume(self.settings.effective_volume());
        self.settings.muted
    }

    pub fn set_demo(&mut self, demo: bool) {
        if self.demo != demo {
            info!("Demo mode: {demo}");
        }
        self.demo = demo;
    }

    /// Draw the current state
    pub fn draw<Su: Surface + ?Sized>(&self, surface: &mut Su) {
        render::draw_frame(surface, &self.state, &self.animation);
    }
}
