//! Visual scene and effect execution
//!
//! [`Scene`] holds what the cup area currently shows. [`EffectRunner`]
//! applies effects to it and forwards sound and speech to their players,
//! logging and dropping any failure.

use crate::config::MachineConfig;
use crate::effects::audio::{AudioPlayer, Silent, TerminalBell};
use crate::effects::particles::{Bounds, ParticleField, ParticleFrame, ParticleKind};
use crate::effects::pour::PourGradient;
use crate::effects::speech::{Captions, Speech, Unsupported};
use crate::effects::Effect;
use crate::error;
use crate::models::SizeId;
use rand::{rngs::SmallRng, SeedableRng};
use std::io;
use std::time::Instant;

/// Everything drawn in and around the cup
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub cup_size: Option<SizeId>,
    pub pour: Option<PourGradient>,
    /// Steam or ice drops above the cup
    pub vapor: Option<(ParticleField, Instant)>,
    pub confetti: Option<(ParticleField, Instant)>,
    pub blush: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the confetti burst once it has run its course
    pub fn expire(&mut self, now: Instant) {
        if let Some((field, started)) = &self.confetti {
            if field.is_finished(now.saturating_duration_since(*started)) {
                self.confetti = None;
            }
        }
    }

    pub fn vapor_frames(&self, now: Instant) -> Vec<ParticleFrame> {
        self.vapor
            .as_ref()
            .map(|(field, started)| field.sample(now.saturating_duration_since(*started)))
            .unwrap_or_default()
    }

    pub fn confetti_frames(&self, now: Instant) -> Vec<ParticleFrame> {
        self.confetti
            .as_ref()
            .map(|(field, started)| field.sample(now.saturating_duration_since(*started)))
            .unwrap_or_default()
    }

    fn clear_cup(&mut self) {
        self.pour = None;
        self.vapor = None;
        self.blush = false;
    }
}

/// Executes effects against a [`Scene`]
pub struct EffectRunner {
    audio: Box<dyn AudioPlayer + Send>,
    speech: Box<dyn Speech + Send>,
    rng: SmallRng,
    viewport: Bounds,
}

impl EffectRunner {
    pub fn new(audio: Box<dyn AudioPlayer + Send>, speech: Box<dyn Speech + Send>) -> Self {
        Self {
            audio,
            speech,
            rng: SmallRng::from_entropy(),
            viewport: Bounds::new(80, 24),
        }
    }

    /// Players chosen by the configuration
    pub fn from_config(config: &MachineConfig) -> Self {
        let audio: Box<dyn AudioPlayer + Send> = if config.sound_enabled {
            Box::new(TerminalBell::new(io::stdout(), config.muted_cues.clone()))
        } else {
            Box::new(Silent)
        };
        let speech: Box<dyn Speech + Send> = if config.speech_enabled {
            Box::new(Captions::default())
        } else {
            Box::new(Unsupported)
        };
        Self::new(audio, speech)
    }

    /// Use a fixed seed so particle layouts are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Confetti is spread across this area
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Bounds::new(width, height);
    }

    pub fn caption(&self) -> Option<&str> {
        self.speech.caption()
    }

    pub fn run(&mut self, effect: Effect, scene: &mut Scene, now: Instant) {
        match effect {
            Effect::Sound(cue) => error::swallow("sound", self.audio.play(cue)),
            Effect::Speak(text) => error::swallow("speech", self.speech.speak(&text)),
            Effect::ResizeCup(size) => scene.cup_size = Some(size),
            Effect::Pour { color, width, height } => {
                scene.pour = Some(PourGradient::new(color, width, height));
            }
            Effect::Particles(kind) => {
                let bounds = match kind {
                    ParticleKind::Confetti => self.viewport,
                    _ => {
                        let (w, h) = scene.cup_size.unwrap_or(SizeId::M).size().cells();
                        Bounds::new(w, h / 2)
                    }
                };
                let field = ParticleField::spawn(kind, bounds, &mut self.rng);
                match kind {
                    ParticleKind::Confetti => scene.confetti = Some((field, now)),
                    _ => scene.vapor = Some((field, now)),
                }
            }
            Effect::Blush => scene.blush = true,
            Effect::ClearCup => scene.clear_cup(),
        }
    }

    pub fn run_all(&mut self, effects: Vec<Effect>, scene: &mut Scene, now: Instant) {
        for effect in effects {
            self.run(effect, scene, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::audio::AudioCue;
    use crate::util::color::Rgb;
    use crate::{BrewError, Result};

    struct Broken;

    impl AudioPlayer for Broken {
        fn play(&mut self, _cue: AudioCue) -> Result<()> {
            Err(BrewError::EffectError("asset missing".to_string()))
        }
    }

    fn runner() -> EffectRunner {
        EffectRunner::new(Box::new(Broken), Box::new(Unsupported)).with_seed(9)
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut scene = Scene::new();
        let mut runner = runner();
        let now = Instant::now();
        runner.run(Effect::Sound(AudioCue::Pour), &mut scene, now);
        runner.run(Effect::Speak("hello".to_string()), &mut scene, now);
        runner.run(Effect::Blush, &mut scene, now);
        assert!(scene.blush);
    }

    #[test]
    fn test_pour_and_clear() {
        let mut scene = Scene::new();
        let mut runner = runner();
        let now = Instant::now();
        runner.run_all(
            vec![
                Effect::ResizeCup(SizeId::L),
                Effect::Pour { color: Rgb(1, 2, 3), width: 110, height: 160 },
                Effect::Particles(ParticleKind::Steam),
            ],
            &mut scene,
            now,
        );
        assert_eq!(scene.cup_size, Some(SizeId::L));
        assert!(scene.pour.is_some());
        assert!(scene.vapor.is_some());

        runner.run(Effect::ClearCup, &mut scene, now);
        assert!(scene.pour.is_none());
        assert!(scene.vapor.is_none());
        assert!(!scene.blush);
    }

    #[test]
    fn test_confetti_expires_from_scene() {
        let mut scene = Scene::new();
        let mut runner = runner();
        let now = Instant::now();
        runner.run(Effect::Particles(ParticleKind::Confetti), &mut scene, now);
        assert!(scene.confetti.is_some());
        scene.expire(now + crate::effects::particles::CONFETTI_LIFETIME);
        assert!(scene.confetti.is_none());
    }
}
