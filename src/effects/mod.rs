//! Cosmetic effects module
//!
//! The state machine emits [`Effect`] values; the presentation layer runs
//! them through an [`EffectRunner`]. No effect can fail a transition.

pub mod audio;
pub mod particles;
pub mod pour;
pub mod scene;
pub mod speech;

use crate::models::SizeId;
use crate::util::color::Rgb;

// Re-export commonly used types
pub use audio::{AudioCue, AudioPlayer, Silent, TerminalBell};
pub use particles::{Bounds, ParticleField, ParticleKind};
pub use pour::PourGradient;
pub use scene::{EffectRunner, Scene};
pub use speech::{Captions, Speech, Unsupported};

/// A side effect requested by a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Sound(AudioCue),
    Speak(String),
    /// Scale the cup to a catalog size
    ResizeCup(SizeId),
    /// Fill the cup with a gradient of `color`, sized in pixels
    Pour { color: Rgb, width: u16, height: u16 },
    Particles(ParticleKind),
    Blush,
    /// Hide cup, pour, particles and blush
    ClearCup,
}
