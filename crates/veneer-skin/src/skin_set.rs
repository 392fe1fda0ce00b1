//! Per-control artwork keyed by visual state.

use std::path::Path;

use veneer_layout::{ButtonVisuals, VisualState};

use crate::artwork::{ImageLoader, SkinImage, load_asset};
use crate::host::Control;

/// Resolved images for one skinned control, one optional slot per state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinImageSet {
    slots: [Option<SkinImage>; 7],
}

impl SkinImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every slot of `visuals` relative to `base`. Missing or broken
    /// files leave their slot empty.
    pub fn load(visuals: &ButtonVisuals, base: &Path, loader: &dyn ImageLoader) -> Self {
        let mut set = Self::new();
        for state in VisualState::ALL {
            set.slots[state.index()] = load_asset(loader, base, visuals.get(state));
        }
        set
    }

    pub fn with(mut self, state: VisualState, image: SkinImage) -> Self {
        self.slots[state.index()] = Some(image);
        self
    }

    /// The image stored in exactly this slot.
    pub fn slot(&self, state: VisualState) -> Option<&SkinImage> {
        self.slots[state.index()].as_ref()
    }

    /// Image to show for `state`.
    ///
    /// `Normal` falls back to the first available slot in state order, so
    /// a control with any artwork is never left blank. Every other state
    /// returns its own slot only.
    pub fn get_image(&self, state: VisualState) -> Option<&SkinImage> {
        match state {
            VisualState::Normal => self.slots.iter().flatten().next(),
            other => self.slot(other),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Show `state` on `control`. Returns `false` and leaves the control
    /// untouched when there is no image for it.
    pub fn apply(&self, control: &mut Control, state: VisualState) -> bool {
        match self.get_image(state) {
            Some(img) => {
                control.set_background_image(img.clone());
                true
            },
            None => false,
        }
    }
}
