//! Editing helpers over a [`LayoutDefinition`].
//!
//! These are the model-level operations a layout editor performs; they
//! never touch a live host.

use veneer_types::{Point, Size};

use crate::model::{DynamicButtonDefinition, ImageButtonDefinition, LayoutDefinition, VisualState};
use crate::paths;

/// Placement given to a freshly added dynamic button.
pub const NEW_BUTTON_LOCATION: Point = Point::new(32, 32);
/// Size given to a freshly added dynamic button.
pub const NEW_BUTTON_SIZE: Size = Size::new(120, 32);
pub const NEW_BUTTON_ACTION: &str = "OpenUrl";
pub const NEW_BUTTON_ARGUMENT: &str = "https://example.com";

/// First `DynamicButton{n}` (n from 1) not already used by a dynamic
/// button, compared case-insensitively.
pub fn generate_dynamic_button_name(def: &LayoutDefinition) -> String {
    (1u32..)
        .map(|n| format!("DynamicButton{n}"))
        .find(|name| {
            !def.dynamic_buttons
                .iter()
                .any(|b| b.name().eq_ignore_ascii_case(name))
        })
        .unwrap_or_default()
}

/// Append a new dynamic button with editor defaults and return it.
pub fn add_dynamic_button(def: &mut LayoutDefinition) -> &mut DynamicButtonDefinition {
    let mut button = DynamicButtonDefinition::new(generate_dynamic_button_name(def));
    button.location = NEW_BUTTON_LOCATION;
    button.size = NEW_BUTTON_SIZE;
    button.action = Some(NEW_BUTTON_ACTION.to_string());
    button.argument = Some(NEW_BUTTON_ARGUMENT.to_string());
    log::debug!("Adding dynamic button {}", button.name());
    def.dynamic_buttons.push(button);
    let last = def.dynamic_buttons.len() - 1;
    &mut def.dynamic_buttons[last]
}

/// Remove the first dynamic button named `name` (case-insensitive).
pub fn remove_dynamic_button(def: &mut LayoutDefinition, name: &str) -> Option<DynamicButtonDefinition> {
    let index = def
        .dynamic_buttons
        .iter()
        .position(|b| b.name().eq_ignore_ascii_case(name))?;
    Some(def.dynamic_buttons.remove(index))
}

/// Find a skin by target, checking existing-control skins before dynamic
/// buttons. Case-insensitive.
pub fn find_button_by_target<'a>(def: &'a LayoutDefinition, target: &str) -> Option<&'a ImageButtonDefinition> {
    def.image_buttons
        .iter()
        .find(|b| b.target.eq_ignore_ascii_case(target))
        .or_else(|| {
            def.dynamic_buttons
                .iter()
                .map(|d| &d.button)
                .find(|b| b.target.eq_ignore_ascii_case(target))
        })
}

/// Rewrite every stored asset reference in canonical form: `/`
/// separators, relative to the asset directory when possible. Returns the
/// number of references changed.
pub fn normalize_asset_paths(def: &mut LayoutDefinition) -> usize {
    let base = paths::asset_base_directory(def);
    let mut changed = 0;
    let mut fix = |slot: &mut Option<String>| {
        if let Some(value) = slot.as_mut() {
            let normalized = paths::normalize_asset_path(value, Some(&base));
            if normalized != *value {
                *value = normalized;
                changed += 1;
            }
        }
    };

    fix(&mut def.form.background_image);
    fix(&mut def.form.icon);
    for control in &mut def.controls {
        fix(&mut control.background_image);
        fix(&mut control.image);
    }
    let buttons = def
        .image_buttons
        .iter_mut()
        .chain(def.dynamic_buttons.iter_mut().map(|d| &mut d.button));
    for button in buttons {
        for state in VisualState::ALL {
            let mut value = button.visuals.get(state).map(str::to_string);
            fix(&mut value);
            button.visuals.set(state, value);
        }
    }
    changed
}
