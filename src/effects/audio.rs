//! Audio cues
//!
//! Cues are fire-and-forget. A player reports failures as
//! [`BrewError::EffectError`] and the caller swallows them.

use crate::{BrewError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Identifier of a sound the machine can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    Select,
    Clink,
    Steam,
    Pour,
    IceDrop,
    Reward,
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AudioCue::Select => "select",
            AudioCue::Clink => "clink",
            AudioCue::Steam => "steam",
            AudioCue::Pour => "pour",
            AudioCue::IceDrop => "ice_drop",
            AudioCue::Reward => "reward",
        };
        f.write_str(name)
    }
}

/// Plays audio cues
pub trait AudioPlayer {
    fn play(&mut self, cue: AudioCue) -> Result<()>;
}

/// Rings the terminal bell for each cue
pub struct TerminalBell<W: Write> {
    out: W,
    muted: Vec<AudioCue>,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, muted: Vec<AudioCue>) -> Self {
        Self { out, muted }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioPlayer for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) -> Result<()> {
        if self.muted.contains(&cue) {
            return Err(BrewError::EffectError(format!("no sound asset for cue {}", cue)));
        }
        self.out
            .write_all(b"\x07")
            .and_then(|_| self.out.flush())
            .map_err(|e| BrewError::EffectError(format!("bell for cue {} failed: {}", cue, e)))
    }
}

/// Player used when sound is disabled
#[derive(Debug, Default)]
pub struct Silent;

impl AudioPlayer for Silent {
    fn play(&mut self, _cue: AudioCue) -> Result<()> {
        Ok(())
    }
}
