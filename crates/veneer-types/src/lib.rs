//! Foundation types shared by every veneer crate.
//!
//! Colors, geometry, pointer input events, configuration and the error
//! enum. Nothing in here knows about layout files or live controls.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;

pub use color::Color;
pub use error::{Result, VeneerError};
pub use geometry::{Point, Size};
pub use input::PointerEvent;
