//! Traffic light sequencer
//!
//! Each round shows `Red, <go colours shuffled>, Red`, one entry per
//! `SIGNAL_INTERVAL_MS`. The player's commit input freezes the light; the
//! colour it froze on decides the jump.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::SIGNAL_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalColor {
    Red,
    Orange,
    Yellow,
    Green,
}

impl SignalColor {
    /// Colours that allow a jump
    pub const GO: [SignalColor; 3] = [
        SignalColor::Yellow,
        SignalColor::Orange,
        SignalColor::Green,
    ];

    pub fn points(self) -> u32 {
        match self {
            SignalColor::Red => 0,
            SignalColor::Orange => 5,
            SignalColor::Yellow => 10,
            SignalColor::Green => 15,
        }
    }

    pub fn is_go(self) -> bool {
        self != SignalColor::Red
    }

    /// The go colour worth the most points
    pub fn best_go() -> SignalColor {
        Self::GO
            .into_iter()
            .max_by_key(|c| c.points())
            .unwrap_or(SignalColor::Green)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalColor::Red => "red",
            SignalColor::Orange => "orange",
            SignalColor::Yellow => "yellow",
            SignalColor::Green => "green",
        }
    }
}

/// Build a fresh round sequence: stop, shuffled go colours, stop
pub fn generate_sequence<R: Rng + ?Sized>(rng: &mut R) -> Vec<SignalColor> {
    let mut middle = SignalColor::GO;
    middle.shuffle(rng);

    let mut sequence = Vec::with_capacity(middle.len() + 2);
    sequence.push(SignalColor::Red);
    sequence.extend(middle);
    sequence.push(SignalColor::Red);
    sequence
}

#[derive(Debug, Clone)]
pub struct TrafficLight {
    sequence: Vec<SignalColor>,
    index: usize,
    /// Host timestamp (ms) of the last colour change; `None` until first tick
    last_change_ms: Option<f64>,
    interval_ms: f64,
    stopped: bool,
}

impl TrafficLight {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_sequence(generate_sequence(rng))
    }

    pub fn with_sequence(sequence: Vec<SignalColor>) -> Self {
        Self {
            sequence,
            index: 0,
            last_change_ms: None,
            interval_ms: SIGNAL_INTERVAL_MS,
            stopped: false,
        }
    }

    /// New sequence for the next round, timed from `now_ms`
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: Option<f64>) {
        self.sequence = generate_sequence(rng);
        self.index = 0;
        self.last_change_ms = now_ms;
        self.stopped = false;
    }

    pub fn sequence(&self) -> &[SignalColor] {
        &self.sequence
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> SignalColor {
        self.sequence
            .get(self.index)
            .copied()
            .unwrap_or(SignalColor::Red)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Holding on the last entry
    pub fn is_finished(&self) -> bool {
        self.index + 1 >= self.sequence.len()
    }

    /// Freeze on the current colour
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Advance if the interval has elapsed. Returns true on a colour change.
    pub fn update(&mut self, now_ms: f64) -> bool {
        if self.stopped {
            return false;
        }

        let last = *self.last_change_ms.get_or_insert(now_ms);
        if now_ms - last < self.interval_ms || self.is_finished() {
            return false;
        }

        self.index += 1;
        self.last_change_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_points_are_distinct_for_go_colors() {
        let mut points: Vec<u32> = SignalColor::GO.iter().map(|c| c.points()).collect();
        points.sort_unstable();
        points.dedup();
        assert_eq!(points.len(), SignalColor::GO.len());
        assert!(points.iter().all(|&p| p > 0));
        assert_eq!(SignalColor::Red.points(), 0);
        assert_eq!(SignalColor::best_go(), SignalColor::Green);
    }

    #[test]
    fn test_advances_on_interval_and_holds_at_end() {
        let mut light = TrafficLight::with_sequence(vec![
            SignalColor::Red,
            SignalColor::Green,
            SignalColor::Yellow,
            SignalColor::Orange,
            SignalColor::Red,
        ]);

        assert!(!light.update(0.0));
        assert!(!light.update(999.0));
        assert!(light.update(1000.0));
        assert_eq!(light.current(), SignalColor::Green);

        let mut t = 1000.0;
        for _ in 0..10 {
            t += 1000.0;
            light.update(t);
        }
        assert_eq!(light.index(), 4);
        assert_eq!(light.current(), SignalColor::Red);
        assert!(light.is_finished());
    }

    #[test]
    fn test_stop_freezes_color() {
        let mut light = TrafficLight::with_sequence(vec![
            SignalColor::Red,
            SignalColor::Orange,
            SignalColor::Green,
            SignalColor::Yellow,
            SignalColor::Red,
        ]);
        light.update(0.0);
        light.update(1000.0);
        light.stop();
        assert!(!light.update(5000.0));
        assert_eq!(light.current(), SignalColor::Orange);
    }

    #[test]
    fn test_regenerate_resets_index_and_stop() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut light = TrafficLight::new(&mut rng);
        light.update(0.0);
        light.update(1000.0);
        light.stop();
        light.regenerate(&mut rng, Some(2000.0));
        assert_eq!(light.index(), 0);
        assert!(!light.is_stopped());
        assert!(!light.update(2500.0));
        assert!(light.update(3000.0));
    }

    proptest! {
        #[test]
        fn prop_sequence_bracketed_by_red(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let seq = generate_sequence(&mut rng);
            prop_assert_eq!(seq.len(), SignalColor::GO.len() + 2);
            prop_assert_eq!(seq[0], SignalColor::Red);
            prop_assert_eq!(seq[seq.len() - 1], SignalColor::Red);

            let mut interior: Vec<SignalColor> = seq[1..seq.len() - 1].to_vec();
            let mut expected = SignalColor::GO.to_vec();
            interior.sort_by_key(|c| c.points());
            expected.sort_by_key(|c| c.points());
            prop_assert_eq!(interior, expected);
        }
    }
}
