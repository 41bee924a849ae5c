//! Sound cues
//!
//! The game reports discrete events as [`SoundEffect`]s to a [`SoundSink`].
//! On the web the sink is a Web Audio synthesizer (procedural, no sample
//! files); natively it only logs.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Jump on the best colour
    PerfectJump,
    /// Jump on any other go colour
    GoodJump,
    /// Stumble over the hurdle
    FailJump,
    GameOver,
    /// Arrow hit the dog
    ArrowImpact,
    /// Arrow stopped by the shield
    ShieldBlock,
}

impl SoundEffect {
    /// Stable cue name
    pub fn key(self) -> &'static str {
        match self {
            SoundEffect::PerfectJump => "perfect_jump",
            SoundEffect::GoodJump => "good_jump",
            SoundEffect::FailJump => "fail_jump",
            SoundEffect::GameOver => "game_over",
            SoundEffect::ArrowImpact => "arrow_impact",
            SoundEffect::ShieldBlock => "shield_block",
        }
    }
}

/// The audio collaborator. Playback is fire-and-forget.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);

    /// Output volume, 0.0 (silent) - 1.0
    fn set_volume(&mut self, _volume: f32) {}
}

/// Sink that only logs the cue (native builds, headless runs)
#[derive(Debug, Default)]
pub struct SilentAudio;

impl SoundSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sound: {}", effect.key());
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, SoundSink};

    /// Web Audio synthesizer
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Volume with mute already applied
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short arpeggio, one note every `step` seconds
        fn arpeggio(
            &self,
            ctx: &AudioContext,
            vol: f32,
            notes: &[f32],
            step: f64,
            length: f64,
            osc_type: OscillatorType,
        ) {
            for (i, freq) in notes.iter().enumerate() {
                let delay = i as f64 * step;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + length)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + length + 0.05).ok();
                }
            }
        }

        /// Rising chirp into a bright chord
        fn play_perfect_jump(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(
                ctx,
                vol * 0.3,
                &[523.0, 659.0, 784.0, 1047.0],
                0.06,
                0.2,
                OscillatorType::Triangle,
            );
        }

        /// Single springy boing
        fn play_good_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Tumbling thud
        fn play_fail_jump(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.frequency().set_value_at_time(220.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(70.0, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.4).ok();
            }

            // Landing thump
            if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
                let t = t + 0.25;
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }

        /// Closing fanfare
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(
                ctx,
                vol * 0.3,
                &[400.0, 500.0, 600.0, 800.0],
                0.12,
                0.4,
                OscillatorType::Triangle,
            );
        }

        /// Sharp thwack
        fn play_arrow_impact(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Metallic clang
        fn play_shield_block(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.frequency().set_value_at_time(900.0, t).ok();
                osc.frequency().set_value_at_time(700.0, t + 0.04).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.2).ok();
            }

            // Ring
            if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::PerfectJump => self.play_perfect_jump(ctx, vol),
                SoundEffect::GoodJump => self.play_good_jump(ctx, vol),
                SoundEffect::FailJump => self.play_fail_jump(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::ArrowImpact => self.play_arrow_impact(ctx, vol),
                SoundEffect::ShieldBlock => self.play_shield_block(ctx, vol),
            }
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        let all = [
            SoundEffect::PerfectJump,
            SoundEffect::GoodJump,
            SoundEffect::FailJump,
            SoundEffect::GameOver,
            SoundEffect::ArrowImpact,
            SoundEffect::ShieldBlock,
        ];
        let keys: Vec<&str> = all.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec![
                "perfect_jump",
                "good_jump",
                "fail_jump",
                "game_over",
                "arrow_impact",
                "shield_block"
            ]
        );
    }
}
