//! Data models module
//!
//! Contains the fixed drink and size catalogs and the mutable
//! customer session.

pub mod catalog;
pub mod session;

// Re-export commonly used types
pub use catalog::{Drink, DrinkId, Size, SizeId, Temperature, DRINKS, SIZES};
pub use crate::util::color::Rgb;
pub use session::{AffectionBand, Session, AFFECTION_MAX, AFFECTION_STEP};
