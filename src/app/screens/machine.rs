//! Coffee machine screen
//!
//! Renders whatever the controller's panel table says is visible and
//! keeps the selection cursors. Key actions become triggers only for
//! the region that is currently interactive.

use crate::app::input::KeyAction;
use crate::app::screens::cup::{CupWidget, ParticleLayer};
use crate::effects::particles::ParticleFrame;
use crate::effects::Scene;
use crate::machine::{MachineState, Panels, Region, Trigger};
use crate::models::{Session, SizeId, Temperature, DRINKS, SIZES};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

/// Drinks per row in the drink grid
const GRID_COLUMNS: usize = 5;
/// Longest accepted customer name
const MAX_NAME_LEN: usize = 24;

/// Everything the screen needs for one frame
pub struct MachineView<'a> {
    pub state: MachineState,
    pub session: &'a Session,
    pub panels: &'a Panels,
    pub message: &'a str,
    pub typing: bool,
    pub countdown: u32,
    pub scene: &'a Scene,
    pub caption: Option<&'a str>,
    pub vapor: Vec<ParticleFrame>,
    pub confetti: Vec<ParticleFrame>,
}

/// Cursor and text-entry state of the machine screen
#[derive(Debug, Default)]
pub struct MachineScreen {
    name_input: String,
    drink_cursor: usize,
    size_cursor: usize,
    temperature_cursor: usize,
    last_state: MachineState,
}

fn step(cursor: usize, len: usize, forward: bool, by: usize) -> usize {
    if forward {
        (cursor + by) % len
    } else {
        (cursor + len - by % len) % len
    }
}

impl MachineScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track state changes; the name prompt opens empty
    pub fn sync(&mut self, state: MachineState) {
        if state != self.last_state && state == MachineState::AwaitingName {
            self.name_input.clear();
        }
        self.last_state = state;
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn drink_cursor(&self) -> usize {
        self.drink_cursor
    }

    /// Apply a key action, returning the trigger it produces, if any
    pub fn handle_action(&mut self, action: KeyAction, panels: &Panels) -> Option<Trigger> {
        if panels.is_interactive(Region::NamePrompt) {
            return match action {
                KeyAction::Char(c) => {
                    if self.name_input.chars().count() < MAX_NAME_LEN {
                        self.name_input.push(c);
                    }
                    None
                }
                KeyAction::Backspace => {
                    self.name_input.pop();
                    None
                }
                KeyAction::Select => Some(Trigger::NameSubmitted(self.name_input.clone())),
                _ => None,
            };
        }

        if panels.is_interactive(Region::DrinkGrid) {
            let len = DRINKS.len();
            let cursor = self.drink_cursor;
            match action {
                KeyAction::Left => self.drink_cursor = step(cursor, len, false, 1),
                KeyAction::Right => self.drink_cursor = step(cursor, len, true, 1),
                KeyAction::Up => self.drink_cursor = step(cursor, len, false, GRID_COLUMNS),
                KeyAction::Down => self.drink_cursor = step(cursor, len, true, GRID_COLUMNS),
                KeyAction::Select => return Some(Trigger::DrinkChosen(DRINKS[cursor].id)),
                _ => {}
            }
            return None;
        }

        if panels.is_interactive(Region::SizeOptions) {
            let len = SIZES.len();
            let cursor = self.size_cursor;
            match action {
                KeyAction::Left | KeyAction::Up => self.size_cursor = step(cursor, len, false, 1),
                KeyAction::Right | KeyAction::Down => self.size_cursor = step(cursor, len, true, 1),
                KeyAction::Select => return Some(Trigger::SizeChosen(SIZES[cursor].id)),
                _ => {}
            }
            return None;
        }

        if panels.is_interactive(Region::TemperatureOptions) {
            let len = Temperature::ALL.len();
            match action {
                KeyAction::Left | KeyAction::Up => {
                    self.temperature_cursor = step(self.temperature_cursor, len, false, 1)
                }
                KeyAction::Right | KeyAction::Down => {
                    self.temperature_cursor = step(self.temperature_cursor, len, true, 1)
                }
                KeyAction::Select => {
                    return Some(Trigger::TemperatureChosen(
                        Temperature::ALL[self.temperature_cursor],
                    ))
                }
                _ => {}
            }
            return None;
        }

        if panels.is_interactive(Region::BrewButton)
            && matches!(action, KeyAction::Select | KeyAction::Brew)
        {
            return Some(Trigger::BrewRequested);
        }

        if panels.is_interactive(Region::RewardHotspot)
            && matches!(action, KeyAction::Select | KeyAction::Reward)
        {
            return Some(Trigger::RewardGiven);
        }

        None
    }

    /// Render the machine screen
    pub fn render(&self, f: &mut Frame, view: &MachineView) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Status message
                Constraint::Min(12),   // Controls and cup
                Constraint::Length(3), // Affection gauge
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], view);
        self.render_message(f, chunks[1], view);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        self.render_controls(f, body[0], view);
        self.render_cup(f, body[1], view);

        self.render_affection(f, chunks[3], view);
        self.render_help(f, chunks[4], view);

        if !view.confetti.is_empty() {
            f.render_widget(ParticleLayer { frames: &view.confetti }, size);
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect, view: &MachineView) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "BREWBOT",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   cups served: {}", view.session.cups_served)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(title, area);
    }

    fn render_message(&self, f: &mut Frame, area: Rect, view: &MachineView) {
        let mut spans = vec![Span::styled(
            view.message.to_string(),
            Style::default().fg(Color::White),
        )];
        if view.typing {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
        if let Some(caption) = view.caption {
            spans.push(Span::styled(
                format!("   🔊 {}", caption),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let message = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Barista"));
        f.render_widget(message, area);
    }

    fn render_controls(&self, f: &mut Frame, area: Rect, view: &MachineView) {
        let panels = view.panels;
        let mut lines: Vec<Line> = Vec::new();

        if panels.is_visible(Region::NamePrompt) {
            lines.push(Line::from("Your name:"));
            lines.push(Line::from(Span::styled(
                format!("> {}▌", self.name_input),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
        }

        if panels.is_visible(Region::DrinkGrid) {
            let active = panels.is_interactive(Region::DrinkGrid);
            lines.push(Line::from("Drink:"));
            for row in DRINKS.chunks(GRID_COLUMNS).enumerate() {
                let (r, drinks) = row;
                let spans: Vec<Span> = drinks
                    .iter()
                    .enumerate()
                    .map(|(c, drink)| {
                        let index = r * GRID_COLUMNS + c;
                        let chosen = view.session.selected_drink == Some(drink.id);
                        let style = option_style(active && index == self.drink_cursor, chosen);
                        Span::styled(format!(" {} {:<12}", drink.icon, drink.display_name), style)
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
        }

        if panels.is_visible(Region::SizeOptions) {
            let active = panels.is_interactive(Region::SizeOptions);
            let mut spans = vec![Span::raw("Size: ")];
            for (i, size) in SIZES.iter().enumerate() {
                let chosen = view.session.selected_size == Some(size.id);
                spans.push(Span::styled(
                    format!(" {} ", size.label),
                    option_style(active && i == self.size_cursor, chosen),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        if panels.is_visible(Region::TemperatureOptions) {
            let active = panels.is_interactive(Region::TemperatureOptions);
            let mut spans = vec![Span::raw("Temperature: ")];
            for (i, temperature) in Temperature::ALL.iter().enumerate() {
                let chosen = view.session.selected_temperature == Some(*temperature);
                spans.push(Span::styled(
                    format!(" {} {} ", temperature.icon(), temperature.label()),
                    option_style(active && i == self.temperature_cursor, chosen),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        if panels.is_visible(Region::BrewButton) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " [ BREW ] ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        if panels.is_visible(Region::Timer) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {:>2}s", view.countdown),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
        }

        let controls = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Order")
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(controls, area);
    }

    fn render_cup(&self, f: &mut Frame, area: Rect, view: &MachineView) {
        let block = Block::default().borders(Borders::ALL).title("Cup");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let panels = view.panels;
        if !panels.is_visible(Region::Cup) {
            return;
        }
        f.render_widget(Clear, inner);

        let label = if panels.is_visible(Region::CupLabel) {
            Some(view.session.customer_name.as_str())
        } else {
            None
        };
        let cup_size = view.scene.cup_size.unwrap_or(SizeId::M);
        let cup_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        f.render_widget(
            CupWidget {
                size: cup_size,
                pour: view.scene.pour.as_ref(),
                label,
                blush: view.scene.blush,
                vapor: &view.vapor,
            },
            cup_area,
        );

        let footer = Rect {
            y: inner.bottom().saturating_sub(1),
            height: inner.height.min(1),
            ..inner
        };
        if panels.is_visible(Region::ThankYou) {
            f.render_widget(
                Paragraph::new("Thank you! ❤")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)),
                footer,
            );
        } else if panels.is_interactive(Region::RewardHotspot) {
            f.render_widget(
                Paragraph::new("💋 press Enter to pay with a kiss")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Magenta)),
                footer,
            );
        }
    }

    fn render_affection(&self, f: &mut Frame, area: Rect, view: &MachineView) {
        let gauge = Gauge::default()
            .block(Block::default().title("Affection").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::LightRed))
            .ratio(view.session.affection_ratio())
            .label(format!("{}%", view.session.affection_level));
        f.render_widget(gauge, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, view: &MachineView) {
        let key = |k: &'static str| {
            Span::styled(k, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        };
        let spans = match view.state {
            MachineState::AwaitingName => vec![
                Span::raw("Type your name  "),
                key("Enter"),
                Span::raw(" Submit  "),
                key("Esc"),
                Span::raw(" Quit"),
            ],
            MachineState::SelectingDrink
            | MachineState::SelectingSize
            | MachineState::SelectingTemperature => vec![
                key("←↑↓→"),
                Span::raw(" Navigate  "),
                key("Enter"),
                Span::raw(" Choose  "),
                key("Q"),
                Span::raw(" Quit"),
            ],
            MachineState::ReadyToBrew => vec![
                key("Enter/B"),
                Span::raw(" Brew  "),
                key("Q"),
                Span::raw(" Quit"),
            ],
            MachineState::AwaitingReward if view.panels.is_interactive(Region::RewardHotspot) => {
                vec![key("Enter/K"), Span::raw(" Kiss  "), key("Q"), Span::raw(" Quit")]
            }
            _ => vec![key("Q"), Span::raw(" Quit")],
        };

        let help = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, area);
    }
}

fn option_style(highlighted: bool, chosen: bool) -> Style {
    if highlighted {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else if chosen {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}
