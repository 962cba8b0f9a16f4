//! Screen components

pub mod cup;
pub mod machine;

pub use cup::{CupWidget, ParticleLayer};
pub use machine::{MachineScreen, MachineView};
