//! Main application loop
//!
//! Owns the terminal, the controller and the effect runner. Each pass
//! feeds due timer firings to the controller, runs the effects it
//! queued, redraws, then waits up to one tick for a key.

use crate::{
    app::{
        input::{key_to_action, KeyAction},
        screens::{MachineScreen, MachineView},
        tui::Tui,
    },
    config::MachineConfig,
    effects::{EffectRunner, Scene},
    machine::Controller,
    timing::{TimerFired, TokioScheduler},
    BrewError, Result,
};
use std::io;
use std::time::Instant;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::info;

/// Timer firings buffered between frames
const TIMER_BUFFER: usize = 64;

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    controller: Controller<TokioScheduler>,
    timer_rx: mpsc::Receiver<TimerFired>,
    screen: MachineScreen,
    scene: Scene,
    runner: EffectRunner,
    should_quit: bool,
}

impl App {
    /// Create a new application instance. Must be called inside a tokio runtime.
    pub fn new(config: &MachineConfig) -> Result<Self> {
        let timings = config.timings()?;
        let (scheduler, timer_rx) = TokioScheduler::new(TIMER_BUFFER);
        Ok(Self {
            tui: Tui::new().map_err(|e| BrewError::TuiError(e.to_string()))?,
            controller: Controller::new(timings, scheduler),
            timer_rx,
            screen: MachineScreen::new(),
            scene: Scene::new(),
            runner: EffectRunner::from_config(config),
            should_quit: false,
        })
    }

    /// Initialize the TUI and arm the startup delay
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| BrewError::TuiError(e.to_string()))?;
        self.controller.start();
        info!("machine started");
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.should_quit {
            loop {
                match self.timer_rx.try_recv() {
                    Ok(fired) => self.controller.on_timer(fired),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        return Err(BrewError::SchedulerError("timer channel closed".to_string()))
                    }
                }
            }
            self.flush_effects()?;
            self.draw()?;
            self.handle_events()?;
        }
        info!(cups = self.controller.session().cups_served, "machine stopped");
        Ok(())
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }

    fn flush_effects(&mut self) -> io::Result<()> {
        let effects = self.controller.drain_effects();
        if effects.is_empty() {
            return Ok(());
        }
        let area = self.tui.size()?;
        self.runner.set_viewport(area.width, area.height);
        self.runner.run_all(effects, &mut self.scene, Instant::now());
        Ok(())
    }

    /// Draw the current frame
    fn draw(&mut self) -> io::Result<()> {
        let now = Instant::now();
        self.scene.expire(now);
        self.screen.sync(self.controller.state());

        let view = MachineView {
            state: self.controller.state(),
            session: self.controller.session(),
            panels: self.controller.panels(),
            message: self.controller.message(),
            typing: self.controller.is_typing(),
            countdown: self.controller.countdown_remaining(),
            scene: &self.scene,
            caption: self.runner.caption(),
            vapor: self.scene.vapor_frames(now),
            confetti: self.scene.confetti_frames(now),
        };
        let screen = &self.screen;
        self.tui.draw(|f| screen.render(f, &view))
    }

    /// Handle keyboard events and update state
    fn handle_events(&mut self) -> Result<()> {
        let Some(key) = self.tui.handle_events()? else {
            return Ok(());
        };
        let state = self.controller.state();
        match key_to_action(key, state) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
            action => {
                if let Some(trigger) = self.screen.handle_action(action, self.controller.panels()) {
                    self.controller.apply(trigger);
                }
            }
        }
        Ok(())
    }
}
