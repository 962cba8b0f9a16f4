//! Configuration management module
//!
//! Handles loading, saving, and validation of the machine's timings
//! and effect preferences.

use crate::effects::audio::AudioCue;
use crate::{BrewError, Result, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Machine configuration. Durations are stored as human-readable
/// strings such as `"500ms"` or `"2s"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Delay between launch and the name prompt
    pub startup_delay: String,
    /// Length of the brew countdown in whole seconds
    pub brew_seconds: u32,
    /// Pause between serving and the reward prompt
    pub serve_delay: String,
    /// Pause between the reward and the next cycle
    pub reset_delay: String,
    /// Time between characters of a typed message
    pub reveal_interval: String,
    /// Type greeting and serve messages character by character
    pub typed_reveal: bool,
    pub sound_enabled: bool,
    pub speech_enabled: bool,
    /// Cues treated as missing assets
    pub muted_cues: Vec<AudioCue>,
}

/// Validated durations derived from a [`MachineConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub startup_delay: Duration,
    pub brew_seconds: u32,
    pub tick: Duration,
    pub serve_delay: Duration,
    pub reset_delay: Duration,
    pub reveal_interval: Duration,
    pub typed_reveal: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            startup_delay: "500ms".to_string(),
            brew_seconds: 10,
            serve_delay: "2s".to_string(),
            reset_delay: "3s".to_string(),
            reveal_interval: "50ms".to_string(),
            typed_reveal: true,
            sound_enabled: true,
            speech_enabled: false,
            muted_cues: Vec::new(),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        MachineConfig::default()
            .timings()
            .unwrap_or(Timings {
                startup_delay: Duration::from_millis(500),
                brew_seconds: 10,
                tick: Duration::from_secs(1),
                serve_delay: Duration::from_secs(2),
                reset_delay: Duration::from_secs(3),
                reveal_interval: Duration::from_millis(50),
                typed_reveal: true,
            })
    }
}

const MAX_STARTUP_DELAY: Duration = Duration::from_secs(10);
const MAX_STEP_DELAY: Duration = Duration::from_secs(30);
const MAX_BREW_SECONDS: u32 = 60;
const MIN_REVEAL_INTERVAL: Duration = Duration::from_millis(1);
const MAX_REVEAL_INTERVAL: Duration = Duration::from_secs(1);

fn parse_delay(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim()).map_err(|e| {
        BrewError::ConfigError(format!("Invalid duration for {}: {:?} ({})", field, value, e))
    })
}

fn check_max(field: &str, value: Duration, max: Duration) -> Result<()> {
    if value > max {
        return Err(BrewError::ConfigError(format!(
            "{} too long: {} (max: {})",
            field,
            humantime::format_duration(value),
            humantime::format_duration(max)
        )));
    }
    Ok(())
}

impl MachineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and range-check every timing
    pub fn timings(&self) -> Result<Timings> {
        let startup_delay = parse_delay("startup_delay", &self.startup_delay)?;
        check_max("startup_delay", startup_delay, MAX_STARTUP_DELAY)?;

        if self.brew_seconds == 0 {
            return Err(BrewError::ConfigError(
                "brew_seconds must be greater than 0".to_string(),
            ));
        }
        if self.brew_seconds > MAX_BREW_SECONDS {
            return Err(BrewError::ConfigError(format!(
                "brew_seconds too large: {} (max: {})",
                self.brew_seconds, MAX_BREW_SECONDS
            )));
        }

        let serve_delay = parse_delay("serve_delay", &self.serve_delay)?;
        check_max("serve_delay", serve_delay, MAX_STEP_DELAY)?;

        let reset_delay = parse_delay("reset_delay", &self.reset_delay)?;
        check_max("reset_delay", reset_delay, MAX_STEP_DELAY)?;

        let reveal_interval = parse_delay("reveal_interval", &self.reveal_interval)?;
        if reveal_interval < MIN_REVEAL_INTERVAL {
            return Err(BrewError::ConfigError(
                "reveal_interval must be at least 1ms".to_string(),
            ));
        }
        check_max("reveal_interval", reveal_interval, MAX_REVEAL_INTERVAL)?;

        Ok(Timings {
            startup_delay,
            brew_seconds: self.brew_seconds,
            tick: Duration::from_secs(1),
            serve_delay,
            reset_delay,
            reveal_interval,
            typed_reveal: self.typed_reveal,
        })
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.timings().map(|_| ())
    }

    pub fn with_brew_seconds(mut self, seconds: u32) -> Self {
        self.brew_seconds = seconds;
        self
    }

    pub fn with_startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = humantime::format_duration(delay).to_string();
        self
    }

    pub fn with_serve_delay(mut self, delay: Duration) -> Self {
        self.serve_delay = humantime::format_duration(delay).to_string();
        self
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = humantime::format_duration(delay).to_string();
        self
    }

    pub fn with_reveal_interval(mut self, interval: Duration) -> Self {
        self.reveal_interval = humantime::format_duration(interval).to_string();
        self
    }

    pub fn with_typed_reveal(mut self, typed: bool) -> Self {
        self.typed_reveal = typed;
        self
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn with_speech(mut self, enabled: bool) -> Self {
        self.speech_enabled = enabled;
        self
    }

    pub fn with_muted_cue(mut self, cue: AudioCue) -> Self {
        if !self.muted_cues.contains(&cue) {
            self.muted_cues.push(cue);
        }
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            BrewError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            BrewError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BrewError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            BrewError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/brewbot/brewbot.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            BrewError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
