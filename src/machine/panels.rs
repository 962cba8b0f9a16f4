//! Panel visibility and interactivity
//!
//! Entering a state first withdraws every region, then grants only the
//! regions that state allows. Nothing from an earlier state can stay
//! interactive by accident.

use crate::machine::MachineState;
use std::collections::BTreeSet;

/// A UI region the machine can show or accept input on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    NamePrompt,
    DrinkGrid,
    SizeOptions,
    TemperatureOptions,
    BrewButton,
    Timer,
    Cup,
    CupLabel,
    RewardHotspot,
    ThankYou,
}

/// Regions visible and interactive in `state`
pub fn layout(state: MachineState, reward_claimed: bool) -> (&'static [Region], &'static [Region]) {
    use Region::*;

    match state {
        MachineState::Idle => (&[], &[]),
        MachineState::AwaitingName => (&[NamePrompt], &[NamePrompt]),
        MachineState::SelectingDrink => (&[DrinkGrid], &[DrinkGrid]),
        MachineState::SelectingSize => (&[DrinkGrid, SizeOptions], &[SizeOptions]),
        MachineState::SelectingTemperature => (
            &[DrinkGrid, SizeOptions, TemperatureOptions],
            &[TemperatureOptions],
        ),
        MachineState::ReadyToBrew => (
            &[DrinkGrid, SizeOptions, TemperatureOptions, BrewButton],
            &[BrewButton],
        ),
        MachineState::Brewing => (&[Timer], &[]),
        MachineState::Served => (&[Cup, CupLabel], &[]),
        MachineState::AwaitingReward if reward_claimed => (&[Cup, CupLabel, ThankYou], &[]),
        MachineState::AwaitingReward => (&[Cup, CupLabel, RewardHotspot], &[RewardHotspot]),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panels {
    visible: BTreeSet<Region>,
    interactive: BTreeSet<Region>,
}

impl Panels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Withdraw everything
    pub fn reset(&mut self) {
        self.visible.clear();
        self.interactive.clear();
    }

    /// Reset, then grant exactly what `state` allows
    pub fn enter(&mut self, state: MachineState, reward_claimed: bool) {
        self.reset();
        let (visible, interactive) = layout(state, reward_claimed);
        self.visible.extend(visible.iter().copied());
        self.interactive.extend(interactive.iter().copied());
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.contains(&region)
    }

    pub fn is_interactive(&self, region: Region) -> bool {
        self.interactive.contains(&region)
    }

    pub fn visible(&self) -> impl Iterator<Item = Region> + '_ {
        self.visible.iter().copied()
    }

    pub fn interactive(&self) -> impl Iterator<Item = Region> + '_ {
        self.interactive.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_regions_are_visible() {
        let states = [
            MachineState::Idle,
            MachineState::AwaitingName,
            MachineState::SelectingDrink,
            MachineState::SelectingSize,
            MachineState::SelectingTemperature,
            MachineState::ReadyToBrew,
            MachineState::Brewing,
            MachineState::Served,
            MachineState::AwaitingReward,
        ];
        for state in states {
            for claimed in [false, true] {
                let (visible, interactive) = layout(state, claimed);
                for region in interactive {
                    assert!(visible.contains(region), "{:?} hidden in {}", region, state);
                }
                assert!(interactive.len() <= 1);
            }
        }
    }

    #[test]
    fn test_enter_withdraws_previous_regions() {
        let mut panels = Panels::new();
        panels.enter(MachineState::ReadyToBrew, false);
        assert!(panels.is_interactive(Region::BrewButton));
        assert!(panels.is_visible(Region::DrinkGrid));
        assert!(!panels.is_interactive(Region::DrinkGrid));

        panels.enter(MachineState::Brewing, false);
        assert_eq!(panels.visible().collect::<Vec<_>>(), vec![Region::Timer]);
        assert_eq!(panels.interactive().count(), 0);
    }

    #[test]
    fn test_claimed_reward_disables_hotspot() {
        let mut panels = Panels::new();
        panels.enter(MachineState::AwaitingReward, false);
        assert!(panels.is_interactive(Region::RewardHotspot));

        panels.enter(MachineState::AwaitingReward, true);
        assert!(!panels.is_visible(Region::RewardHotspot));
        assert!(!panels.is_interactive(Region::RewardHotspot));
        assert!(panels.is_visible(Region::ThankYou));
    }
}
