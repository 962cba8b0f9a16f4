//! Interaction state machine
//!
//! [`transition`] is the whole transition table as a pure function: given
//! the current state, a trigger and the session it returns the next state
//! and the selection change to apply, or `None` when the trigger does not
//! belong to the current state. [`Controller`] applies the result, drives
//! the timers and queues effects.

pub mod controller;
pub mod panels;
pub mod phrases;

use crate::models::{DrinkId, Session, SizeId, Temperature};
use std::fmt;

pub use controller::Controller;
pub use panels::{Panels, Region};

/// Phase of the interaction flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MachineState {
    /// Just launched, waiting out the startup delay
    #[default]
    Idle,
    AwaitingName,
    SelectingDrink,
    SelectingSize,
    SelectingTemperature,
    ReadyToBrew,
    /// Countdown running
    Brewing,
    /// Cup poured, reward prompt pending
    Served,
    AwaitingReward,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MachineState::Idle => "idle",
            MachineState::AwaitingName => "awaiting name",
            MachineState::SelectingDrink => "selecting drink",
            MachineState::SelectingSize => "selecting size",
            MachineState::SelectingTemperature => "selecting temperature",
            MachineState::ReadyToBrew => "ready to brew",
            MachineState::Brewing => "brewing",
            MachineState::Served => "served",
            MachineState::AwaitingReward => "awaiting reward",
        };
        f.write_str(name)
    }
}

/// Input or timer event that may move the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    StartupElapsed,
    NameSubmitted(String),
    DrinkChosen(DrinkId),
    SizeChosen(SizeId),
    TemperatureChosen(Temperature),
    BrewRequested,
    CountdownFinished,
    ServeDelayElapsed,
    RewardGiven,
    ResetElapsed,
}

impl Trigger {
    /// Triggers only a timer may raise
    pub fn is_timer(&self) -> bool {
        matches!(
            self,
            Trigger::StartupElapsed
                | Trigger::CountdownFinished
                | Trigger::ServeDelayElapsed
                | Trigger::ResetElapsed
        )
    }
}

/// Change to the session made by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDiff {
    None,
    Name(String),
    Drink(DrinkId),
    Size(SizeId),
    Temperature(Temperature),
    /// One more cup brewed
    Served,
    /// Affection step plus the one-shot reward flag
    Reward,
    /// Clear drink, size and temperature for the next cycle
    ClearCycle,
}

/// Outcome of an accepted trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub to: MachineState,
    pub diff: SelectionDiff,
}

impl Step {
    fn to(to: MachineState, diff: SelectionDiff) -> Option<Self> {
        Some(Self { to, diff })
    }
}

impl SelectionDiff {
    /// Apply this change to `session`
    pub fn apply(&self, session: &mut Session) {
        match self {
            SelectionDiff::None => {}
            SelectionDiff::Name(name) => session.customer_name = name.clone(),
            SelectionDiff::Drink(id) => session.selected_drink = Some(*id),
            SelectionDiff::Size(id) => session.selected_size = Some(*id),
            SelectionDiff::Temperature(t) => session.selected_temperature = Some(*t),
            SelectionDiff::Served => session.cups_served = session.cups_served.saturating_add(1),
            SelectionDiff::Reward => {
                session.add_affection();
                session.reward_claimed = true;
            }
            SelectionDiff::ClearCycle => session.clear_cycle(),
        }
    }
}

/// The transition table. Returns `None` for any trigger that is not
/// valid in `state`, including an empty name and a second reward.
pub fn transition(state: MachineState, trigger: &Trigger, session: &Session) -> Option<Step> {
    use MachineState as S;

    match (state, trigger) {
        (S::Idle, Trigger::StartupElapsed) => Step::to(S::AwaitingName, SelectionDiff::None),
        (S::AwaitingName, Trigger::NameSubmitted(raw)) => {
            let name = raw.trim();
            if name.is_empty() {
                None
            } else {
                Step::to(S::SelectingDrink, SelectionDiff::Name(name.to_string()))
            }
        }
        (S::SelectingDrink, Trigger::DrinkChosen(id)) => {
            Step::to(S::SelectingSize, SelectionDiff::Drink(*id))
        }
        (S::SelectingSize, Trigger::SizeChosen(id)) => {
            Step::to(S::SelectingTemperature, SelectionDiff::Size(*id))
        }
        (S::SelectingTemperature, Trigger::TemperatureChosen(t)) => {
            Step::to(S::ReadyToBrew, SelectionDiff::Temperature(*t))
        }
        (S::ReadyToBrew, Trigger::BrewRequested) => Step::to(S::Brewing, SelectionDiff::None),
        (S::Brewing, Trigger::CountdownFinished) => Step::to(S::Served, SelectionDiff::Served),
        (S::Served, Trigger::ServeDelayElapsed) => Step::to(S::AwaitingReward, SelectionDiff::None),
        (S::AwaitingReward, Trigger::RewardGiven) if !session.reward_claimed => {
            Step::to(S::AwaitingReward, SelectionDiff::Reward)
        }
        (S::AwaitingReward, Trigger::ResetElapsed) if session.reward_claimed => {
            Step::to(S::SelectingDrink, SelectionDiff::ClearCycle)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_table() {
        let mut session = Session::new();
        let script = [
            (MachineState::Idle, Trigger::StartupElapsed, MachineState::AwaitingName),
            (
                MachineState::AwaitingName,
                Trigger::NameSubmitted("  Ada ".to_string()),
                MachineState::SelectingDrink,
            ),
            (
                MachineState::SelectingDrink,
                Trigger::DrinkChosen(DrinkId::Mocha),
                MachineState::SelectingSize,
            ),
            (
                MachineState::SelectingSize,
                Trigger::SizeChosen(SizeId::S),
                MachineState::SelectingTemperature,
            ),
            (
                MachineState::SelectingTemperature,
                Trigger::TemperatureChosen(Temperature::Cold),
                MachineState::ReadyToBrew,
            ),
            (MachineState::ReadyToBrew, Trigger::BrewRequested, MachineState::Brewing),
            (MachineState::Brewing, Trigger::CountdownFinished, MachineState::Served),
            (MachineState::Served, Trigger::ServeDelayElapsed, MachineState::AwaitingReward),
            (MachineState::AwaitingReward, Trigger::RewardGiven, MachineState::AwaitingReward),
            (MachineState::AwaitingReward, Trigger::ResetElapsed, MachineState::SelectingDrink),
        ];

        for (from, trigger, to) in script {
            let step = transition(from, &trigger, &session)
                .unwrap_or_else(|| panic!("{:?} rejected in {}", trigger, from));
            assert_eq!(step.to, to);
            step.diff.apply(&mut session);
        }

        assert_eq!(session.customer_name, "Ada");
        assert_eq!(session.affection_level, 10);
        assert_eq!(session.cups_served, 1);
        assert!(session.selected_drink.is_none());
    }

    #[test]
    fn test_timer_triggers() {
        assert!(Trigger::StartupElapsed.is_timer());
        assert!(Trigger::CountdownFinished.is_timer());
        assert!(Trigger::ServeDelayElapsed.is_timer());
        assert!(Trigger::ResetElapsed.is_timer());
        assert!(!Trigger::BrewRequested.is_timer());
        assert!(!Trigger::RewardGiven.is_timer());
    }

    #[test]
    fn test_blank_name_rejected() {
        let session = Session::new();
        for name in ["", "   ", "\t\n"] {
            let trigger = Trigger::NameSubmitted(name.to_string());
            assert!(transition(MachineState::AwaitingName, &trigger, &session).is_none());
        }
    }

    #[test]
    fn test_second_reward_rejected() {
        let mut session = Session::new();
        session.reward_claimed = true;
        let second = transition(MachineState::AwaitingReward, &Trigger::RewardGiven, &session);
        assert!(second.is_none());
    }

    #[test]
    fn test_reset_requires_reward() {
        let session = Session::new();
        let early = transition(MachineState::AwaitingReward, &Trigger::ResetElapsed, &session);
        assert!(early.is_none());
    }

    #[test]
    fn test_out_of_state_triggers_rejected() {
        let session = Session::new();
        let triggers = [
            Trigger::DrinkChosen(DrinkId::Latte),
            Trigger::SizeChosen(SizeId::M),
            Trigger::TemperatureChosen(Temperature::Hot),
            Trigger::BrewRequested,
            Trigger::RewardGiven,
        ];
        for trigger in &triggers {
            assert!(transition(MachineState::Idle, trigger, &session).is_none());
            assert!(transition(MachineState::AwaitingName, trigger, &session).is_none());
            assert!(transition(MachineState::Brewing, trigger, &session).is_none());
        }
        assert!(transition(
            MachineState::SelectingSize,
            &Trigger::DrinkChosen(DrinkId::Latte),
            &session
        )
        .is_none());
    }
}
