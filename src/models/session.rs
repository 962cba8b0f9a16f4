//! Customer session
//!
//! Selections for the current cycle plus the affection level, which
//! survives every cycle reset.

use crate::models::catalog::{DrinkId, SizeId, Temperature};

/// Affection added by each reward
pub const AFFECTION_STEP: u8 = 10;
/// Affection saturates here
pub const AFFECTION_MAX: u8 = 100;

/// Mutable record of the customer's selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub customer_name: String,
    pub selected_drink: Option<DrinkId>,
    pub selected_size: Option<SizeId>,
    pub selected_temperature: Option<Temperature>,
    /// Cumulative level in [0, 100]
    pub affection_level: u8,
    /// Reward already given this cycle
    pub reward_claimed: bool,
    pub cups_served: u32,
}

/// Congratulatory band for an affection level.
///
/// Bands are half-open: `[50, 80)`, `[80, 100)` and exactly `100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffectionBand {
    Warming,
    Falling,
    Devoted,
}

impl AffectionBand {
    pub fn for_level(level: u8) -> Option<Self> {
        match level {
            0..=49 => None,
            50..=79 => Some(AffectionBand::Warming),
            80..=99 => Some(AffectionBand::Falling),
            _ => Some(AffectionBand::Devoted),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one reward step, saturating at [`AFFECTION_MAX`]
    pub fn add_affection(&mut self) -> u8 {
        self.affection_level = self
            .affection_level
            .saturating_add(AFFECTION_STEP)
            .min(AFFECTION_MAX);
        self.affection_level
    }

    pub fn affection_band(&self) -> Option<AffectionBand> {
        AffectionBand::for_level(self.affection_level)
    }

    /// Forget the per-cycle selections, keeping name and affection
    pub fn clear_cycle(&mut self) {
        self.selected_drink = None;
        self.selected_size = None;
        self.selected_temperature = None;
        self.reward_claimed = false;
    }

    /// Whether the chosen drink is served iced
    pub fn is_iced(&self) -> bool {
        let drink_iced = self.selected_drink.map(|d| d.drink().iced).unwrap_or(false);
        let temp_iced = self.selected_temperature.map(Temperature::is_iced).unwrap_or(false);
        drink_iced || temp_iced
    }

    /// Affection as a 0.0 to 1.0 ratio for gauges
    pub fn affection_ratio(&self) -> f64 {
        f64::from(self.affection_level) / f64::from(AFFECTION_MAX)
    }
}
