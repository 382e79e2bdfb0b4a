//! Feedback tones
//!
//! Every sound is a single oscillator: a frequency, a duration and a waveform.
//! Game events map to tones here; on the web they are synthesized with the
//! Web Audio API. Nothing in here can fail the game.

use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A fire-and-forget tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub waveform: Waveform,
}

impl Tone {
    pub const fn new(frequency_hz: f32, duration_ms: u32, waveform: Waveform) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            waveform,
        }
    }

    /// Shield raised - rising buzz
    pub const SHIELD: Tone = Tone::new(800.0, 300, Waveform::Sawtooth);
    /// Asteroid hit - low square thud
    pub const HIT: Tone = Tone::new(150.0, 200, Waveform::Square);
    /// Orb collected - short bright blip
    pub const ORB: Tone = Tone::new(1000.0, 100, Waveform::Triangle);
}

/// Gain applied to every tone before volume scaling
pub const TONE_GAIN: f32 = 0.5;

/// The tone (if any) that accompanies an event
pub fn cue_for(event: &GameEvent) -> Option<Tone> {
    match event {
        GameEvent::ShieldRaised => Some(Tone::SHIELD),
        GameEvent::AsteroidHit { .. } => Some(Tone::HIT),
        GameEvent::OrbCollected { .. } => Some(Tone::ORB),
        GameEvent::GameOver { .. } => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{TONE_GAIN, Tone, Waveform, cue_for};
    use crate::sim::GameEvent;

    impl From<Waveform> for OscillatorType {
        fn from(waveform: Waveform) -> Self {
            match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context or without an output device
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                muted: false,
            }
        }

        pub fn toggle_muted(&mut self) -> bool {
            self.muted = !self.muted;
            self.muted
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { TONE_GAIN }
        }

        /// Play whatever cue belongs to `event`
        pub fn play_event(&self, event: &GameEvent) {
            if let Some(tone) = cue_for(event) {
                self.play(tone);
            }
        }

        /// Start a tone now; the oscillator stops itself after the duration
        pub fn play(&self, tone: Tone) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, tone) else {
                log::debug!("Could not build oscillator for {:?}", tone);
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol, t).ok();
            osc.start().ok();
            osc.stop_with_when(t + f64::from(tone.duration_ms) / 1000.0)
                .ok();
        }

        /// Create an oscillator routed through a gain node to the output
        fn create_osc(&self, ctx: &AudioContext, tone: Tone) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(tone.waveform.into());
            osc.frequency().set_value(tone.frequency_hz);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_cues() {
        assert_eq!(cue_for(&GameEvent::ShieldRaised), Some(Tone::SHIELD));
        assert_eq!(
            cue_for(&GameEvent::AsteroidHit { lives_left: 2 }),
            Some(Tone::HIT)
        );
        assert_eq!(
            cue_for(&GameEvent::OrbCollected { score: 10 }),
            Some(Tone::ORB)
        );
        assert_eq!(cue_for(&GameEvent::GameOver { score: 10 }), None);
    }

    #[test]
    fn test_tone_table() {
        assert_eq!(Tone::SHIELD.frequency_hz, 800.0);
        assert_eq!(Tone::SHIELD.duration_ms, 300);
        assert_eq!(Tone::HIT.waveform, Waveform::Square);
        assert_eq!(Tone::ORB.duration_ms, 100);
        assert_eq!(Tone::ORB.waveform, Waveform::Triangle);
    }
}
