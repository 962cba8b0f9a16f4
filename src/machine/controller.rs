//! Machine controller
//!
//! Owns the session, the current state, the panel table and every timer.
//! All input and timer events go through [`Controller::apply`] or
//! [`Controller::on_timer`], one at a time. Effects requested along the
//! way are queued for the presentation layer to drain.

use crate::config::Timings;
use crate::effects::{AudioCue, Effect, ParticleKind};
use crate::machine::panels::Panels;
use crate::machine::{phrases, transition, MachineState, Trigger};
use crate::models::{DrinkId, Session, SizeId, Temperature};
use crate::timing::{
    BrewTimer, CountdownTick, ManualScheduler, Scheduler, TimerEvent, TimerFired, TimerHandle,
    TypedReveal,
};
use std::time::Duration;
use tracing::{debug, info};

pub struct Controller<S: Scheduler> {
    state: MachineState,
    session: Session,
    panels: Panels,
    timings: Timings,
    brew_timer: BrewTimer,
    reveal: TypedReveal,
    startup: Option<TimerHandle>,
    serve_delay: Option<TimerHandle>,
    reset: Option<TimerHandle>,
    effects: Vec<Effect>,
    scheduler: S,
}

impl<S: Scheduler> Controller<S> {
    pub fn new(timings: Timings, scheduler: S) -> Self {
        Self {
            state: MachineState::Idle,
            session: Session::new(),
            panels: Panels::new(),
            timings,
            brew_timer: BrewTimer::new(),
            reveal: TypedReveal::new(),
            startup: None,
            serve_delay: None,
            reset: None,
            effects: Vec::new(),
            scheduler,
        }
    }

    /// Arm the startup delay. Only meaningful once, while idle.
    pub fn start(&mut self) {
        if self.state == MachineState::Idle && self.startup.is_none() {
            self.startup = Some(
                self.scheduler
                    .schedule(self.timings.startup_delay, TimerEvent::Startup),
            );
        }
    }

    /// Feed a user trigger to the machine. Returns whether it was accepted;
    /// a rejected trigger changes nothing. Timer triggers are always
    /// rejected here and only arrive through [`Controller::on_timer`].
    pub fn apply(&mut self, trigger: Trigger) -> bool {
        if trigger.is_timer() {
            debug!(state = %self.state, ?trigger, "timer trigger from outside ignored");
            return false;
        }
        self.fire(trigger)
    }

    fn fire(&mut self, trigger: Trigger) -> bool {
        let Some(step) = transition(self.state, &trigger, &self.session) else {
            debug!(state = %self.state, ?trigger, "trigger ignored");
            return false;
        };

        let from = self.state;
        if from == MachineState::Brewing {
            self.brew_timer.cancel(&mut self.scheduler);
        }
        step.diff.apply(&mut self.session);
        self.state = step.to;
        self.panels.enter(self.state, self.session.reward_claimed);
        debug!(from = %from, to = %self.state, "state changed");

        self.on_enter(from);
        true
    }

    pub fn submit_name(&mut self, name: &str) -> bool {
        self.apply(Trigger::NameSubmitted(name.to_string()))
    }

    pub fn choose_drink(&mut self, drink: DrinkId) -> bool {
        self.apply(Trigger::DrinkChosen(drink))
    }

    pub fn choose_size(&mut self, size: SizeId) -> bool {
        self.apply(Trigger::SizeChosen(size))
    }

    pub fn choose_temperature(&mut self, temperature: Temperature) -> bool {
        self.apply(Trigger::TemperatureChosen(temperature))
    }

    pub fn brew(&mut self) -> bool {
        self.apply(Trigger::BrewRequested)
    }

    pub fn give_reward(&mut self) -> bool {
        self.apply(Trigger::RewardGiven)
    }

    /// Handle a timer firing. Firings from cancelled or superseded
    /// timers are dropped.
    pub fn on_timer(&mut self, fired: TimerFired) {
        match fired.event {
            TimerEvent::Startup => {
                if self.startup == Some(fired.handle) {
                    self.startup = None;
                    self.fire(Trigger::StartupElapsed);
                }
            }
            TimerEvent::CountdownTick => {
                match self.brew_timer.on_tick(&mut self.scheduler, fired.handle) {
                    CountdownTick::Finished => {
                        self.fire(Trigger::CountdownFinished);
                    }
                    CountdownTick::Remaining(left) => debug!(left, "brewing"),
                    CountdownTick::Idle => {}
                }
            }
            TimerEvent::ServeDelay => {
                if self.serve_delay == Some(fired.handle) {
                    self.serve_delay = None;
                    self.fire(Trigger::ServeDelayElapsed);
                }
            }
            TimerEvent::Reset => {
                if self.reset == Some(fired.handle) {
                    self.reset = None;
                    self.fire(Trigger::ResetElapsed);
                }
            }
            TimerEvent::RevealStep => self.reveal.on_step(&mut self.scheduler, fired.handle),
        }
    }

    fn on_enter(&mut self, from: MachineState) {
        match self.state {
            MachineState::Idle => {}
            MachineState::AwaitingName => self.say(phrases::WAITING_NAME, false),
            MachineState::SelectingDrink => {
                if from == MachineState::AwaitingReward {
                    self.effects.push(Effect::ClearCup);
                } else {
                    self.effects.push(Effect::Sound(AudioCue::Select));
                    info!(customer = %self.session.customer_name, "customer greeted");
                }
                let greeting = phrases::greeting(&self.session.customer_name);
                self.effects.push(Effect::Speak(greeting.clone()));
                self.say(&greeting, true);
            }
            MachineState::SelectingSize => {
                self.effects.push(Effect::Sound(AudioCue::Select));
                if let Some(drink) = self.session.selected_drink {
                    self.say(&phrases::drink_selected(drink), false);
                }
            }
            MachineState::SelectingTemperature => {
                self.effects.push(Effect::Sound(AudioCue::Select));
                if let Some(size) = self.session.selected_size {
                    self.effects.push(Effect::ResizeCup(size));
                    self.say(&phrases::size_selected(size), false);
                }
            }
            MachineState::ReadyToBrew => {
                self.effects.push(Effect::Sound(AudioCue::Select));
                if let Some(temperature) = self.session.selected_temperature {
                    self.say(&phrases::temperature_selected(temperature), false);
                }
            }
            MachineState::Brewing => {
                self.effects.push(Effect::Sound(AudioCue::Select));
                self.effects.push(Effect::Sound(AudioCue::Clink));
                if !self.session.is_iced() {
                    self.effects.push(Effect::Sound(AudioCue::Steam));
                }
                self.brew_timer.start(
                    &mut self.scheduler,
                    self.timings.brew_seconds,
                    self.timings.tick,
                );
                info!(drink = ?self.session.selected_drink, "brew started");
                self.say(phrases::BREWING, false);
            }
            MachineState::Served => self.serve(),
            MachineState::AwaitingReward if from == MachineState::Served => {
                self.say(phrases::REWARD_READY, false);
            }
            MachineState::AwaitingReward => self.reward(),
        }
    }

    fn serve(&mut self) {
        let selection = (self.session.selected_drink, self.session.selected_size);
        if let (Some(drink), Some(size)) = selection {
            let size = size.size();
            self.effects.push(Effect::Pour {
                color: drink.drink().color,
                width: size.width,
                height: size.height,
            });
        }
        self.effects.push(Effect::Sound(AudioCue::Pour));
        if self.session.is_iced() {
            self.effects.push(Effect::Particles(ParticleKind::IceDrops));
            self.effects.push(Effect::Sound(AudioCue::IceDrop));
        } else {
            self.effects.push(Effect::Particles(ParticleKind::Steam));
        }

        let message = phrases::served(&self.session.customer_name);
        self.effects.push(Effect::Speak(message.clone()));
        self.say(&message, true);
        info!(cups = self.session.cups_served, "cup served");

        self.serve_delay = Some(
            self.scheduler
                .schedule(self.timings.serve_delay, TimerEvent::ServeDelay),
        );
    }

    fn reward(&mut self) {
        self.effects.push(Effect::Blush);
        self.effects.push(Effect::Sound(AudioCue::Reward));
        self.effects.push(Effect::Particles(ParticleKind::Confetti));

        match self.session.affection_band() {
            Some(band) => self.say(phrases::affection(band), false),
            None => self.say(phrases::REWARD_RECEIVED, false),
        }
        info!(affection = self.session.affection_level, "reward received");

        // Fires unconditionally; the hotspot is already disabled.
        self.reset = Some(
            self.scheduler
                .schedule(self.timings.reset_delay, TimerEvent::Reset),
        );
    }

    fn say(&mut self, text: &str, typed: bool) {
        if typed && self.timings.typed_reveal {
            self.reveal
                .start(&mut self.scheduler, text, self.timings.reveal_interval);
        } else {
            self.reveal.show(&mut self.scheduler, text);
        }
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    /// Status message as currently revealed
    pub fn message(&self) -> &str {
        self.reveal.visible()
    }

    pub fn is_typing(&self) -> bool {
        self.reveal.is_typing()
    }

    /// Seconds left on the brew countdown
    pub fn countdown_remaining(&self) -> u32 {
        self.brew_timer.remaining()
    }

    /// Take every effect queued since the last call
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl Controller<ManualScheduler> {
    /// Controller on a virtual clock
    pub fn manual(timings: Timings) -> Self {
        Self::new(timings, ManualScheduler::new())
    }

    /// Advance the virtual clock by `by`, delivering every timer that
    /// comes due, including timers scheduled along the way.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.on_timer(fired);
        }
        self.scheduler.set_now(until);
    }
}
