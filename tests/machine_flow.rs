use brewbot::config::Timings;
use brewbot::effects::{AudioCue, Effect, ParticleKind};
use brewbot::machine::{phrases, Controller, MachineState, Region, Trigger};
use brewbot::models::{DrinkId, SizeId, Temperature};
use brewbot::timing::{ManualScheduler, Scheduler};
use std::time::Duration;

fn controller() -> Controller<ManualScheduler> {
    controller_with(Timings::default())
}

fn controller_with(timings: Timings) -> Controller<ManualScheduler> {
    let mut controller = Controller::manual(timings);
    controller.start();
    controller
}

fn at_drink_selection(name: &str) -> Controller<ManualScheduler> {
    drink_selection_with(Timings::default(), name)
}

fn drink_selection_with(timings: Timings, name: &str) -> Controller<ManualScheduler> {
    let mut controller = controller_with(timings);
    controller.advance(Duration::from_millis(500));
    assert_eq!(controller.state(), MachineState::AwaitingName);
    assert!(controller.submit_name(name));
    controller
}

#[test]
fn test_out_of_state_triggers_change_nothing() {
    let mut controller = controller();
    let session = controller.session().clone();

    let stray = [
        Trigger::NameSubmitted("Ada".to_string()),
        Trigger::DrinkChosen(DrinkId::Latte),
        Trigger::SizeChosen(SizeId::L),
        Trigger::TemperatureChosen(Temperature::Cold),
        Trigger::BrewRequested,
        Trigger::CountdownFinished,
        Trigger::ServeDelayElapsed,
        Trigger::RewardGiven,
        Trigger::ResetElapsed,
    ];
    for trigger in stray {
        assert!(!controller.apply(trigger));
        assert_eq!(controller.state(), MachineState::Idle);
        assert_eq!(controller.session(), &session);
    }

    let mut controller = at_drink_selection("Ada");
    let session = controller.session().clone();
    assert!(!controller.brew());
    assert!(!controller.choose_size(SizeId::S));
    assert!(!controller.give_reward());
    assert_eq!(controller.state(), MachineState::SelectingDrink);
    assert_eq!(controller.session(), &session);
}

#[test]
fn test_blank_name_never_advances() {
    let mut controller = controller();
    controller.advance(Duration::from_millis(500));

    for name in ["", " ", "\t  \n"] {
        assert!(!controller.submit_name(name));
        assert_eq!(controller.state(), MachineState::AwaitingName);
        assert_eq!(controller.session().customer_name, "");
    }
}

#[test]
fn test_selections_recorded_exactly() {
    let mut controller = at_drink_selection("Grace");
    let before = controller.session().clone();

    assert!(controller.choose_drink(DrinkId::ColdBrew));
    assert!(controller.choose_size(SizeId::XL));
    assert!(controller.choose_temperature(Temperature::Cold));
    assert_eq!(controller.state(), MachineState::ReadyToBrew);

    let session = controller.session();
    assert_eq!(session.selected_drink, Some(DrinkId::ColdBrew));
    assert_eq!(session.selected_size, Some(SizeId::XL));
    assert_eq!(session.selected_temperature, Some(Temperature::Cold));
    assert_eq!(session.customer_name, before.customer_name);
    assert_eq!(session.affection_level, before.affection_level);
    assert_eq!(session.reward_claimed, before.reward_claimed);
    assert_eq!(session.cups_served, before.cups_served);
}

#[test]
fn test_full_cycle_returns_to_drink_selection() {
    let mut controller = at_drink_selection("Ada");

    assert!(controller.choose_drink(DrinkId::Espresso));
    assert!(controller.choose_size(SizeId::M));
    assert!(controller.choose_temperature(Temperature::Hot));
    assert!(controller.brew());
    assert_eq!(controller.state(), MachineState::Brewing);

    controller.advance(Duration::from_secs(9));
    assert_eq!(controller.state(), MachineState::Brewing);
    assert_eq!(controller.countdown_remaining(), 1);
    controller.advance(Duration::from_secs(1));
    assert_eq!(controller.state(), MachineState::Served);
    assert_eq!(controller.session().cups_served, 1);

    controller.advance(Duration::from_secs(2));
    assert_eq!(controller.state(), MachineState::AwaitingReward);

    assert!(controller.give_reward());
    assert!(controller.session().reward_claimed);
    controller.advance(Duration::from_secs(3));

    let session = controller.session();
    assert_eq!(controller.state(), MachineState::SelectingDrink);
    assert_eq!(session.selected_drink, None);
    assert_eq!(session.selected_size, None);
    assert_eq!(session.selected_temperature, None);
    assert!(!session.reward_claimed);
    assert_eq!(session.affection_level, 10);
    assert_eq!(session.customer_name, "Ada");
}

#[test]
fn test_second_reward_ignored_during_reset_window() {
    let mut controller = at_drink_selection("Ada");
    controller.choose_drink(DrinkId::Latte);
    controller.choose_size(SizeId::S);
    controller.choose_temperature(Temperature::Hot);
    controller.brew();
    controller.advance(Duration::from_secs(12));
    assert_eq!(controller.state(), MachineState::AwaitingReward);

    assert!(controller.give_reward());
    controller.advance(Duration::from_secs(1));
    assert!(!controller.give_reward());
    assert_eq!(controller.session().affection_level, 10);
    assert!(controller.panels().is_visible(Region::ThankYou));
    assert!(!controller.panels().is_interactive(Region::RewardHotspot));
}

#[test]
fn test_panels_follow_state() {
    let mut controller = controller();
    assert_eq!(controller.panels().visible().count(), 0);

    controller.advance(Duration::from_millis(500));
    assert!(controller.panels().is_interactive(Region::NamePrompt));

    controller.submit_name("Ada");
    assert!(!controller.panels().is_visible(Region::NamePrompt));
    assert!(controller.panels().is_interactive(Region::DrinkGrid));

    controller.choose_drink(DrinkId::Mocha);
    assert!(controller.panels().is_visible(Region::DrinkGrid));
    assert!(!controller.panels().is_interactive(Region::DrinkGrid));
    assert!(controller.panels().is_interactive(Region::SizeOptions));

    controller.choose_size(SizeId::L);
    controller.choose_temperature(Temperature::Hot);
    let interactive: Vec<Region> = controller.panels().interactive().collect();
    assert_eq!(interactive, vec![Region::BrewButton]);

    controller.brew();
    let visible: Vec<Region> = controller.panels().visible().collect();
    assert_eq!(visible, vec![Region::Timer]);
    assert_eq!(controller.panels().interactive().count(), 0);

    controller.advance(Duration::from_secs(10));
    assert!(controller.panels().is_visible(Region::Cup));
    assert!(controller.panels().is_visible(Region::CupLabel));
    assert_eq!(controller.panels().interactive().count(), 0);

    controller.advance(Duration::from_secs(2));
    assert!(controller.panels().is_interactive(Region::RewardHotspot));
}

#[test]
fn test_greeting_is_typed_out() {
    let mut controller = at_drink_selection("Ada");
    assert!(controller.is_typing());
    assert_eq!(controller.message(), "H");

    controller.advance(Duration::from_secs(5));
    assert!(!controller.is_typing());
    assert_eq!(controller.message(), "Hello, Ada! What can I brew for you today?");
}

#[test]
fn test_timer_triggers_cannot_be_applied_directly() {
    let mut controller = controller();
    assert!(!controller.apply(Trigger::StartupElapsed));
    assert_eq!(controller.state(), MachineState::Idle);

    let mut controller = at_drink_selection("Ada");
    controller.choose_drink(DrinkId::Espresso);
    controller.choose_size(SizeId::M);
    controller.choose_temperature(Temperature::Hot);
    controller.brew();
    controller.advance(Duration::from_secs(3));

    for trigger in [
        Trigger::CountdownFinished,
        Trigger::ServeDelayElapsed,
        Trigger::ResetElapsed,
        Trigger::StartupElapsed,
    ] {
        assert!(!controller.apply(trigger));
    }
    assert_eq!(controller.state(), MachineState::Brewing);
    assert_eq!(controller.countdown_remaining(), 7);
    assert_eq!(controller.session().cups_served, 0);
    assert_eq!(controller.scheduler().active_count(), 1);

    controller.advance(Duration::from_secs(7));
    assert_eq!(controller.state(), MachineState::Served);
    assert_eq!(controller.countdown_remaining(), 0);
}

#[test]
fn test_selection_effects() {
    let mut controller = controller();
    controller.advance(Duration::from_millis(500));
    controller.drain_effects();

    controller.submit_name("Ada");
    let effects = controller.drain_effects();
    assert!(effects.contains(&Effect::Speak(phrases::greeting("Ada"))));

    controller.choose_drink(DrinkId::Latte);
    assert!(!controller
        .drain_effects()
        .iter()
        .any(|e| matches!(e, Effect::ResizeCup(_))));

    controller.choose_size(SizeId::L);
    assert_eq!(
        controller.drain_effects(),
        vec![Effect::Sound(AudioCue::Select), Effect::ResizeCup(SizeId::L)]
    );
}

#[test]
fn test_serve_message_is_typed_and_spoken() {
    let timings = Timings {
        reveal_interval: Duration::from_millis(10),
        ..Timings::default()
    };
    let mut controller = drink_selection_with(timings, "Ada");
    controller.choose_drink(DrinkId::Mocha);
    controller.choose_size(SizeId::S);
    controller.choose_temperature(Temperature::Hot);
    controller.brew();
    controller.drain_effects();

    controller.advance(Duration::from_secs(10));
    assert_eq!(controller.state(), MachineState::Served);
    assert!(controller.is_typing());
    assert_eq!(controller.message(), "H");
    assert!(controller
        .drain_effects()
        .contains(&Effect::Speak(phrases::served("Ada"))));

    controller.advance(Duration::from_secs(1));
    assert_eq!(controller.state(), MachineState::Served);
    assert!(!controller.is_typing());
    assert_eq!(controller.message(), phrases::served("Ada"));
}

#[test]
fn test_reward_and_reset_effects() {
    let mut controller = at_drink_selection("Ada");
    controller.choose_drink(DrinkId::Americano);
    controller.choose_size(SizeId::M);
    controller.choose_temperature(Temperature::Hot);
    controller.brew();
    controller.advance(Duration::from_secs(12));
    assert_eq!(controller.state(), MachineState::AwaitingReward);
    controller.drain_effects();

    assert!(controller.give_reward());
    assert_eq!(
        controller.drain_effects(),
        vec![
            Effect::Blush,
            Effect::Sound(AudioCue::Reward),
            Effect::Particles(ParticleKind::Confetti),
        ]
    );

    controller.advance(Duration::from_secs(3));
    assert_eq!(controller.state(), MachineState::SelectingDrink);
    assert_eq!(
        controller.drain_effects(),
        vec![Effect::ClearCup, Effect::Speak(phrases::greeting("Ada"))]
    );
}
