use brewbot::config::Timings;
use brewbot::machine::{phrases, Controller, MachineState};
use brewbot::models::{AffectionBand, DrinkId, SizeId, Temperature};
use brewbot::timing::ManualScheduler;
use std::time::Duration;

fn ready_controller() -> Controller<ManualScheduler> {
    let mut controller = Controller::manual(Timings::default());
    controller.start();
    controller.advance(Duration::from_millis(500));
    controller.submit_name("Ada");
    controller
}

/// One order from drink selection through the reward
fn serve_and_reward(controller: &mut Controller<ManualScheduler>) {
    assert_eq!(controller.state(), MachineState::SelectingDrink);
    controller.choose_drink(DrinkId::Americano);
    controller.choose_size(SizeId::S);
    controller.choose_temperature(Temperature::Hot);
    controller.brew();
    controller.advance(Duration::from_secs(12));
    assert!(controller.give_reward());
}

#[test]
fn test_affection_after_n_rewards() {
    let mut controller = ready_controller();
    for n in 1..=12u32 {
        serve_and_reward(&mut controller);
        assert_eq!(
            u32::from(controller.session().affection_level),
            (10 * n).min(100)
        );
        controller.advance(Duration::from_secs(3));
    }
    assert_eq!(controller.session().cups_served, 12);
}

#[test]
fn test_reward_message_follows_band() {
    let mut controller = ready_controller();
    let mut messages = Vec::new();
    for _ in 0..10 {
        serve_and_reward(&mut controller);
        messages.push(controller.message().to_string());
        controller.advance(Duration::from_secs(3));
    }

    for message in &messages[..4] {
        assert_eq!(message, phrases::REWARD_RECEIVED);
    }
    for message in &messages[4..7] {
        assert_eq!(message, phrases::affection(AffectionBand::Warming));
    }
    for message in &messages[7..9] {
        assert_eq!(message, phrases::affection(AffectionBand::Falling));
    }
    assert_eq!(messages[9], phrases::affection(AffectionBand::Devoted));
}

#[test]
fn test_band_edges() {
    let cases = [
        (40, None),
        (49, None),
        (50, Some(AffectionBand::Warming)),
        (79, Some(AffectionBand::Warming)),
        (80, Some(AffectionBand::Falling)),
        (99, Some(AffectionBand::Falling)),
        (100, Some(AffectionBand::Devoted)),
    ];
    for (level, band) in cases {
        assert_eq!(AffectionBand::for_level(level), band, "level {}", level);
    }
}
