//! Speech synthesis
//!
//! Terminals cannot speak, so speech is either unsupported or shown as
//! a caption line.

use crate::{BrewError, Result};

pub trait Speech {
    /// Say `text`, best effort
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Most recent utterance, for on-screen display
    fn caption(&self) -> Option<&str> {
        None
    }
}

/// No speech engine available
#[derive(Debug, Default)]
pub struct Unsupported;

impl Speech for Unsupported {
    fn speak(&mut self, _text: &str) -> Result<()> {
        Err(BrewError::EffectError("speech synthesis unsupported".to_string()))
    }
}

/// Renders utterances as captions
#[derive(Debug, Default)]
pub struct Captions {
    last: Option<String>,
}

impl Speech for Captions {
    fn speak(&mut self, text: &str) -> Result<()> {
        self.last = Some(text.to_string());
        Ok(())
    }

    fn caption(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
