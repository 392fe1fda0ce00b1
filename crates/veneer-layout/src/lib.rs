//! Declarative window layouts.
//!
//! A [`LayoutDefinition`] describes a host window by name: overrides for
//! controls the host already has, per-state artwork for buttons, and
//! buttons the host should create. The [`codec`] module reads and writes
//! the XML form; [`editor`] and [`paths`] hold the model-level helpers a
//! layout editor needs. Nothing here touches a live window.

pub mod codec;
pub mod editor;
pub mod model;
pub mod paths;
pub mod style;

pub use codec::{from_xml_str, load, save, to_xml_string, try_load};
pub use model::{
    ButtonVisuals, DynamicButtonDefinition, FormLayout, ImageButtonDefinition, LayoutAction,
    LayoutControl, LayoutDefinition, VisualState,
};
pub use style::{ContentAlignment, ControlType, FontLayout, FontStyle, ImageLayout, SizeMode};
