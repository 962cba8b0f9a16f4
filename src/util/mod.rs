//! Utility functions module
//!
//! Contains color helpers and logging setup.

pub mod color;
pub mod logging;

// Re-export commonly used functions
pub use color::{Rgb, CUP_BACKGROUND};
pub use logging::{init_logging, log_file_path};
