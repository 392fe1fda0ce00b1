//! Layout data model.
//!
//! Plain records describing a window, its existing controls and the
//! buttons to skin or create. Optional fields use `Option` so that "unset"
//! (leave the host's value alone) stays distinct from an explicit value.

use std::path::PathBuf;

use serde::Serialize;

use veneer_types::{Color, Point, Size};

use crate::style::{ContentAlignment, ControlType, FontLayout, ImageLayout, SizeMode};

/// Client size editors show for a form that does not set one.
pub const EDITOR_DEFAULT_CLIENT_SIZE: Size = Size::new(960, 540);

/// Root of a layout document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutDefinition {
    /// Asset folder, relative to the layout file unless rooted.
    pub asset_directory: Option<String>,
    /// Where the layout was loaded from or last saved to.
    pub source_path: Option<PathBuf>,
    pub form: FormLayout,
    pub controls: Vec<LayoutControl>,
    /// Skins for controls that already exist in the host.
    pub image_buttons: Vec<ImageButtonDefinition>,
    /// Buttons synthesized at bind time.
    pub dynamic_buttons: Vec<DynamicButtonDefinition>,
}

impl LayoutDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the document carries no controls or buttons.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty() && self.image_buttons.is_empty() && self.dynamic_buttons.is_empty()
    }
}

/// Window-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormLayout {
    /// `Size::EMPTY` means unset.
    pub client_size: Size,
    pub background_image: Option<String>,
    pub icon: Option<String>,
    /// `None` means no transparency key.
    pub transparency_key: Option<Color>,
    pub caption: Option<String>,
    pub show_icon: Option<bool>,
}

impl FormLayout {
    /// Client size as an editor displays it.
    pub fn display_client_size(&self) -> Size {
        if self.client_size.is_empty() {
            EDITOR_DEFAULT_CLIENT_SIZE
        } else {
            self.client_size
        }
    }

    /// Show-icon flag as an editor displays it (absent means shown).
    pub fn show_icon_or_default(&self) -> bool {
        self.show_icon.unwrap_or(true)
    }
}

/// Overrides for a control that already exists in the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutControl {
    /// Join key into the host tree.
    pub name: String,
    pub control_type: ControlType,
    pub location: Point,
    /// `Size::EMPTY` keeps the host size.
    pub size: Size,
    pub visible: Option<bool>,
    pub enabled: Option<bool>,
    pub auto_size: Option<bool>,
    pub text: Option<String>,
    pub fore_color: Option<Color>,
    pub back_color: Option<Color>,
    pub font: Option<FontLayout>,
    pub background_image: Option<String>,
    /// Foreground image of an image surface.
    pub image: Option<String>,
    pub text_align: Option<ContentAlignment>,
    pub size_mode: Option<SizeMode>,
    pub url: Option<String>,
    pub cursor: Option<String>,
    pub background_layout: Option<ImageLayout>,
}

impl LayoutControl {
    pub fn new(name: impl Into<String>, control_type: ControlType) -> Self {
        Self {
            name: name.into(),
            control_type,
            ..Self::default()
        }
    }
}

/// One of the seven per-state artwork slots of a skinned button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VisualState {
    Normal,
    Hover,
    Pressed,
    Disabled,
    Checked,
    Unchecked,
    Blink,
}

impl VisualState {
    /// Slot order, which is also the `Normal` fallback priority.
    pub const ALL: [Self; 7] = [
        Self::Normal,
        Self::Hover,
        Self::Pressed,
        Self::Disabled,
        Self::Checked,
        Self::Unchecked,
        Self::Blink,
    ];

    /// Attribute name used for this slot in layout files.
    pub const fn attr(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hover => "hover",
            Self::Pressed => "pressed",
            Self::Disabled => "disabled",
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
            Self::Blink => "blink",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Hover => 1,
            Self::Pressed => 2,
            Self::Disabled => 3,
            Self::Checked => 4,
            Self::Unchecked => 5,
            Self::Blink => 6,
        }
    }
}

/// Image path per visual state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ButtonVisuals {
    pub normal: Option<String>,
    pub hover: Option<String>,
    pub pressed: Option<String>,
    pub disabled: Option<String>,
    pub checked: Option<String>,
    pub unchecked: Option<String>,
    pub blink: Option<String>,
}

impl ButtonVisuals {
    pub fn get(&self, state: VisualState) -> Option<&str> {
        self.slot(state).as_deref()
    }

    pub fn set(&mut self, state: VisualState, path: Option<String>) {
        *self.slot_mut(state) = path;
    }

    /// Set slots in state order.
    pub fn iter(&self) -> impl Iterator<Item = (VisualState, &str)> {
        VisualState::ALL
            .into_iter()
            .filter_map(|s| self.get(s).map(|p| (s, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&self, state: VisualState) -> &Option<String> {
        match state {
            VisualState::Normal => &self.normal,
            VisualState::Hover => &self.hover,
            VisualState::Pressed => &self.pressed,
            VisualState::Disabled => &self.disabled,
            VisualState::Checked => &self.checked,
            VisualState::Unchecked => &self.unchecked,
            VisualState::Blink => &self.blink,
        }
    }

    fn slot_mut(&mut self, state: VisualState) -> &mut Option<String> {
        match state {
            VisualState::Normal => &mut self.normal,
            VisualState::Hover => &mut self.hover,
            VisualState::Pressed => &mut self.pressed,
            VisualState::Disabled => &mut self.disabled,
            VisualState::Checked => &mut self.checked,
            VisualState::Unchecked => &mut self.unchecked,
            VisualState::Blink => &mut self.blink,
        }
    }
}

/// Skin for a control that already exists in the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageButtonDefinition {
    /// Join key; for dynamic buttons also the synthesized control name.
    pub target: String,
    pub visuals: ButtonVisuals,
    /// Starts with a tracked checked/unchecked state of `false`.
    pub checkable: bool,
    /// The host drives a blink animation for this control.
    pub use_blink_state: bool,
}

impl ImageButtonDefinition {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}

/// A button created from the layout alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicButtonDefinition {
    pub button: ImageButtonDefinition,
    pub location: Point,
    pub size: Size,
    pub action: Option<String>,
    pub argument: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    pub size_mode: Option<SizeMode>,
    pub background_layout: Option<ImageLayout>,
}

impl Default for DynamicButtonDefinition {
    fn default() -> Self {
        Self {
            button: ImageButtonDefinition::default(),
            location: Point::ORIGIN,
            size: Size::EMPTY,
            action: None,
            argument: None,
            visible: true,
            enabled: true,
            size_mode: None,
            background_layout: None,
        }
    }
}

impl DynamicButtonDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            button: ImageButtonDefinition::new(name),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.button.target
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.button.target = name.into();
    }

    /// The `(action, argument)` pair bound to this button.
    pub fn layout_action(&self) -> LayoutAction {
        LayoutAction::new(
            self.action.clone().unwrap_or_default(),
            self.argument.clone().unwrap_or_default(),
        )
    }
}

/// A host command name plus its string payload.
///
/// The name is an opaque token; only the host interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LayoutAction {
    name: String,
    argument: String,
}

impl LayoutAction {
    pub fn new(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: argument.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    /// True when the name is blank.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }
}
