//! TUI application module
//!
//! Terminal handling, key mapping and the machine screen.

pub mod app;
pub mod input;
pub mod screens;
pub mod tui;

pub use app::App;
pub use input::{key_to_action, KeyAction};
pub use screens::{MachineScreen, MachineView};
pub use tui::Tui;
