//! The runtime context a host queries after binding.
//!
//! Holds every name, skin, action and toggle state recorded while a layout
//! was applied. All operations are in-memory lookups plus the requested
//! visual transition; none perform I/O.

use std::collections::HashMap;

use veneer_layout::{LayoutAction, VisualState};
use veneer_types::PointerEvent;

use crate::host::{ControlId, HostWindow};
use crate::skin_set::SkinImageSet;

/// Window-lifetime state produced by [`crate::binder::apply`].
#[derive(Debug, Default)]
pub struct RuntimeContext {
    /// Case-folded control name to id; first registration wins.
    controls: HashMap<String, ControlId>,
    /// Case-folded skin name to the control carrying it; first wins.
    skin_names: HashMap<String, ControlId>,
    skins: HashMap<ControlId, SkinImageSet>,
    actions: HashMap<ControlId, LayoutAction>,
    toggles: HashMap<ControlId, bool>,
    blink_targets: Vec<ControlId>,
}

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl RuntimeContext {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Registration (binder side) --

    pub(crate) fn register_control(&mut self, name: &str, id: ControlId) {
        self.controls.entry(key(name)).or_insert(id);
    }

    /// Attach `skin` to `id`. `initial_toggle` seeds the checked state of
    /// checkable buttons.
    pub(crate) fn register_skin(
        &mut self,
        name: &str,
        id: ControlId,
        skin: SkinImageSet,
        initial_toggle: Option<bool>,
    ) {
        self.skin_names.entry(key(name)).or_insert(id);
        self.skins.insert(id, skin);
        if let Some(checked) = initial_toggle {
            self.toggles.insert(id, checked);
        }
    }

    pub(crate) fn register_action(&mut self, id: ControlId, action: LayoutAction) {
        self.actions.insert(id, action);
    }

    pub(crate) fn register_blink(&mut self, id: ControlId) {
        if !self.blink_targets.contains(&id) {
            self.blink_targets.push(id);
        }
    }

    // -- Queries --

    /// Control registered under `name`, compared case-insensitively.
    pub fn control_id(&self, name: &str) -> Option<ControlId> {
        self.controls.get(&key(name)).copied()
    }

    pub fn skin(&self, id: ControlId) -> Option<&SkinImageSet> {
        self.skins.get(&id)
    }

    pub fn skin_by_name(&self, name: &str) -> Option<&SkinImageSet> {
        self.skin_names
            .get(&key(name))
            .and_then(|id| self.skins.get(id))
    }

    /// Tracked checked state, if the control has one yet.
    pub fn toggle_value(&self, id: ControlId) -> Option<bool> {
        self.toggles.get(&id).copied()
    }

    /// Action bound to a synthesized button.
    pub fn try_get_action(&self, id: ControlId) -> Option<&LayoutAction> {
        self.actions.get(&id)
    }

    /// Controls whose layout asked for host-driven blinking.
    pub fn blink_targets(&self) -> &[ControlId] {
        &self.blink_targets
    }

    /// Number of skinned controls.
    pub fn skin_count(&self) -> usize {
        self.skins.len()
    }

    // -- Transitions --

    /// Show `state` on a skinned control.
    ///
    /// Returns `false` when the control has no skin or no image for that
    /// state. A successful `Checked`/`Unchecked` also updates the tracked
    /// toggle value.
    pub fn set_state(&mut self, host: &mut dyn HostWindow, id: ControlId, state: VisualState) -> bool {
        let Some(skin) = self.skins.get(&id) else {
            return false;
        };
        let Some(control) = host.control_mut(id) else {
            return false;
        };
        let applied = skin.apply(control, state);
        if applied {
            match state {
                VisualState::Checked => {
                    self.toggles.insert(id, true);
                },
                VisualState::Unchecked => {
                    self.toggles.insert(id, false);
                },
                _ => {},
            }
        }
        applied
    }

    /// [`set_state`](Self::set_state) by registered name.
    pub fn set_state_by_name(&mut self, host: &mut dyn HostWindow, name: &str, state: VisualState) -> bool {
        match self.control_id(name) {
            Some(id) => self.set_state(host, id, state),
            None => false,
        }
    }

    /// Flip the checked value and show it, falling back to `Normal` when
    /// the matching image is missing. `false` only for unskinned controls.
    pub fn toggle_state(&mut self, host: &mut dyn HostWindow, id: ControlId) -> bool {
        if !self.skins.contains_key(&id) {
            return false;
        }
        let checked = !self.toggles.get(&id).copied().unwrap_or(false);
        self.show_toggle(host, id, checked);
        true
    }

    /// Set the checked value and show it, falling back to `Normal`.
    pub fn set_toggle_state(&mut self, host: &mut dyn HostWindow, id: ControlId, checked: bool) -> bool {
        if !self.skins.contains_key(&id) {
            return false;
        }
        self.show_toggle(host, id, checked);
        true
    }

    fn show_toggle(&mut self, host: &mut dyn HostWindow, id: ControlId, checked: bool) {
        self.toggles.insert(id, checked);
        let state = if checked {
            VisualState::Checked
        } else {
            VisualState::Unchecked
        };
        if !self.set_state(host, id, state) {
            self.set_state(host, id, VisualState::Normal);
        }
    }

    /// One blink step driven by the host's timer.
    ///
    /// Requires an explicit `Blink` image. Shows `Normal` when `flag` is
    /// set and `Blink` otherwise, then flips `flag`.
    pub fn try_blink(&mut self, host: &mut dyn HostWindow, id: ControlId, flag: &mut bool) -> bool {
        let has_blink = self
            .skins
            .get(&id)
            .is_some_and(|s| s.slot(VisualState::Blink).is_some());
        if !has_blink {
            return false;
        }
        let state = if *flag {
            VisualState::Normal
        } else {
            VisualState::Blink
        };
        self.set_state(host, id, state);
        *flag = !*flag;
        true
    }

    /// Standard pointer transitions for a skinned button.
    ///
    /// Enter and release show `Hover`, leave shows `Normal`, press shows
    /// `Pressed`. A click returns the bound action when it has a name.
    pub fn handle_pointer(
        &mut self,
        host: &mut dyn HostWindow,
        id: ControlId,
        event: PointerEvent,
    ) -> Option<LayoutAction> {
        let state = match event {
            PointerEvent::Enter | PointerEvent::Release => VisualState::Hover,
            PointerEvent::Leave => VisualState::Normal,
            PointerEvent::Press => VisualState::Pressed,
            PointerEvent::Click => {
                return self
                    .try_get_action(id)
                    .filter(|a| !a.is_empty())
                    .cloned();
            },
        };
        if !self.set_state(host, id, state) {
            log::trace!("No {state:?} image for {id:?}");
        }
        None
    }
}
