//! Particle effects: steam, ice drops and confetti
//!
//! Each particle gets a randomized start point, displacement vector,
//! rotation, color and timing when it is created. One animation function
//! ([`ParticleField::sample`]) moves every particle along its own vector,
//! so no per-particle animation state is ever allocated after spawn.
//! Coordinates are terminal cells. Steam and ice are relative to the
//! cup mouth with negative `y` above it; confetti is relative to the frame.

use crate::util::color::Rgb;
use rand::Rng;
use std::time::Duration;

/// Particle effect variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Steam,
    IceDrops,
    Confetti,
}

impl ParticleKind {
    /// Number of particles spawned for this kind
    pub fn count(self) -> usize {
        match self {
            ParticleKind::Steam => 8,
            ParticleKind::IceDrops => 5,
            ParticleKind::Confetti => 150,
        }
    }

    /// Whether the animation repeats until cleared
    pub fn loops(self) -> bool {
        !matches!(self, ParticleKind::Confetti)
    }

    fn glyph(self) -> char {
        match self {
            ParticleKind::Steam => '~',
            ParticleKind::IceDrops => '°',
            ParticleKind::Confetti => '•',
        }
    }
}

/// How long a confetti burst stays on screen
pub const CONFETTI_LIFETIME: Duration = Duration::from_secs(5);

/// Area particles are spawned into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: f32::from(width),
            height: f32::from(height),
        }
    }
}

/// One particle with its motion fixed at creation
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub origin: (f32, f32),
    pub displacement: (f32, f32),
    /// Total rotation over one run, in degrees
    pub rotation: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub delay: Duration,
    pub duration: Duration,
}

/// A particle's position at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x: f32,
    pub y: f32,
    pub glyph: char,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    pub kind: ParticleKind,
    pub particles: Vec<Particle>,
}

const STEAM_COLOR: Rgb = Rgb(0xe8, 0xe8, 0xe8);
const ICE_COLOR: Rgb = Rgb(0xb8, 0xe2, 0xf2);

fn secs(rng: &mut impl Rng, low: f32, high: f32) -> Duration {
    Duration::from_secs_f32(rng.gen_range(low..high))
}

impl ParticleField {
    /// Spawn a field of `kind` inside `bounds`
    pub fn spawn(kind: ParticleKind, bounds: Bounds, rng: &mut impl Rng) -> Self {
        let particles = (0..kind.count())
            .map(|_| match kind {
                ParticleKind::Steam => Particle {
                    origin: (
                        rng.gen_range(0.0..bounds.width.max(1.0)),
                        -rng.gen_range(0.0..(bounds.height / 2.0).max(1.0)),
                    ),
                    displacement: (rng.gen_range(-1.0..1.0), -bounds.height),
                    rotation: 0.0,
                    color: STEAM_COLOR,
                    opacity: rng.gen_range(0.3..0.8),
                    delay: secs(rng, 0.0, 2.0),
                    duration: Duration::from_secs(2),
                },
                ParticleKind::IceDrops => Particle {
                    origin: (
                        rng.gen_range(0.0..bounds.width.max(1.0)),
                        -rng.gen_range(0.0..(bounds.height / 2.0).max(1.0)),
                    ),
                    displacement: (0.0, bounds.height / 2.0),
                    rotation: 0.0,
                    color: ICE_COLOR,
                    opacity: 1.0,
                    delay: secs(rng, 0.0, 0.5),
                    duration: Duration::from_millis(1200),
                },
                ParticleKind::Confetti => Particle {
                    origin: (rng.gen_range(0.0..bounds.width.max(1.0)), -1.0),
                    displacement: (rng.gen_range(-10.0..10.0), bounds.height + 10.0),
                    rotation: rng.gen_range(0.0..720.0),
                    color: Rgb::from_hsl(rng.gen_range(0.0..360.0), 0.8, 0.6),
                    opacity: rng.gen_range(0.3..1.0),
                    delay: Duration::ZERO,
                    duration: secs(rng, 2.0, 5.0),
                },
            })
            .collect();

        Self { kind, particles }
    }

    /// Whether a non-looping field has finished by `elapsed`
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        !self.kind.loops() && elapsed >= CONFETTI_LIFETIME
    }

    /// Positions of all visible particles `elapsed` after spawn
    pub fn sample(&self, elapsed: Duration) -> Vec<ParticleFrame> {
        if self.is_finished(elapsed) {
            return Vec::new();
        }
        self.particles
            .iter()
            .filter_map(|p| {
                let t = elapsed.checked_sub(p.delay)?;
                let run = p.duration.as_secs_f32().max(f32::EPSILON);
                let mut progress = t.as_secs_f32() / run;
                if self.kind.loops() {
                    progress = progress.fract();
                } else if progress >= 1.0 {
                    return None;
                }
                Some(ParticleFrame {
                    x: p.origin.0 + p.displacement.0 * progress,
                    y: p.origin.1 + p.displacement.1 * progress,
                    glyph: self.kind.glyph(),
                    color: p.color.lerp(Rgb(0, 0, 0), (1.0 - p.opacity) * 0.5),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_counts() {
        let mut rng = SmallRng::seed_from_u64(7);
        let bounds = Bounds::new(80, 24);
        for kind in [ParticleKind::Steam, ParticleKind::IceDrops, ParticleKind::Confetti] {
            assert_eq!(ParticleField::spawn(kind, bounds, &mut rng).particles.len(), kind.count());
        }
    }

    #[test]
    fn test_confetti_spawns_inside_viewport() {
        let mut rng = SmallRng::seed_from_u64(42);
        let bounds = Bounds::new(80, 24);
        let field = ParticleField::spawn(ParticleKind::Confetti, bounds, &mut rng);
        for p in &field.particles {
            assert!(p.origin.0 >= 0.0 && p.origin.0 < 80.0);
            assert_eq!(p.origin.1, -1.0);
            assert!(p.displacement.0.abs() <= 10.0);
            assert!(p.duration >= Duration::from_secs(2) && p.duration <= Duration::from_secs(5));
        }
    }

    #[test]
    fn test_confetti_expires() {
        let mut rng = SmallRng::seed_from_u64(1);
        let field = ParticleField::spawn(ParticleKind::Confetti, Bounds::new(40, 20), &mut rng);
        assert!(!field.sample(Duration::from_millis(100)).is_empty());
        assert!(field.sample(CONFETTI_LIFETIME).is_empty());
        assert!(field.is_finished(CONFETTI_LIFETIME));
    }

    #[test]
    fn test_steam_loops() {
        let mut rng = SmallRng::seed_from_u64(3);
        let field = ParticleField::spawn(ParticleKind::Steam, Bounds::new(9, 13), &mut rng);
        assert!(!field.is_finished(Duration::from_secs(60)));
        assert_eq!(field.sample(Duration::from_secs(60)).len(), ParticleKind::Steam.count());
    }
}
