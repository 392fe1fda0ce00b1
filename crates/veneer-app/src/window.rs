//! The launcher window: a compiled-in control tree plus the layout bound
//! on top of it.

use std::path::Path;

use veneer_layout::VisualState;
use veneer_skin::{
    Control, ControlId, FsImageLoader, HostWindow, ImageLoader, MemoryHost, RuntimeContext,
    SkinImage, binder,
};
use veneer_types::config::VeneerConfig;
use veneer_types::{PointerEvent, Size};

use crate::actions::HostCommand;

pub const START_BUTTON: &str = "picStart";
pub const EXIT_BUTTON: &str = "picExit";
pub const OPTIONS_BUTTON: &str = "picOptions";
pub const WINDOW_MODE_BUTTON: &str = "picWindowMode";
pub const MINIMIZE_BUTTON: &str = "picMinimize";
pub const NEWS_BROWSER: &str = "webNews";
pub const COPYRIGHT_LABEL: &str = "lblCopyright";

/// Artwork the window falls back to when no layout skins a button.
struct BuiltinArt {
    start: [SkinImage; 3],
    window_mode_on: SkinImage,
    window_mode_off: SkinImage,
}

impl BuiltinArt {
    fn new() -> Self {
        let frame = |name: &str| SkinImage::blank(format!("builtin/{name}.png"), 1, 1);
        Self {
            start: [frame("start_1"), frame("start_2"), frame("start_3")],
            window_mode_on: frame("windowmode"),
            window_mode_off: frame("windowmode_uncheck"),
        }
    }
}

/// What the window has done in response to commands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WindowEvents {
    pub started: u32,
    pub options_shown: u32,
    pub minimized: bool,
    pub closed: bool,
    pub opened: Vec<String>,
    pub messages: Vec<String>,
}

pub struct LauncherWindow {
    pub host: MemoryHost,
    pub ctx: Option<RuntimeContext>,
    pub config: VeneerConfig,
    pub window_mode: bool,
    pub events: WindowEvents,
    blink: bool,
    layout_blink: bool,
    start_hovered: bool,
    art: BuiltinArt,
}

impl LauncherWindow {
    /// Build the window with its compiled-in controls and look.
    pub fn new(config: VeneerConfig) -> Self {
        let size = Size::new(config.client_width, config.client_height);
        let mut host = MemoryHost::new(&config.window_title, size);
        let art = BuiltinArt::new();
        build_controls(&mut host, &art);
        Self {
            host,
            ctx: None,
            config,
            window_mode: true,
            events: WindowEvents::default(),
            blink: false,
            layout_blink: false,
            start_hovered: false,
            art,
        }
    }

    /// Drop the current layout and bind the configured one from disk.
    ///
    /// Any failure leaves the window in its compiled-in state.
    pub fn reload(&mut self) {
        self.reload_with(&FsImageLoader);
    }

    pub fn reload_with(&mut self, loader: &dyn ImageLoader) {
        if let Some(ctx) = self.ctx.take() {
            binder::teardown(&mut self.host, ctx);
        }
        let path = self.config.layout_path.clone();
        match binder::apply_file(&mut self.host, &path, loader) {
            Ok(ctx) => self.ctx = ctx,
            Err(e) => log::warn!("Layout {} not applied: {e}", path.display()),
        }
    }

    /// Bind a layout file other than the configured one.
    pub fn load_layout(&mut self, path: &Path, loader: &dyn ImageLoader) {
        self.config.layout_path = path.to_path_buf();
        self.reload_with(loader);
    }

    pub fn id(&self, name: &str) -> Option<ControlId> {
        self.host.find(name)
    }

    /// Route one pointer event to `id`.
    pub fn pointer(&mut self, id: ControlId, event: PointerEvent) {
        if self.is_start(id) {
            self.start_pointer(id, event);
            return;
        }
        let action = match self.ctx.as_mut() {
            Some(ctx) if ctx.skin(id).is_some() || ctx.try_get_action(id).is_some() => {
                ctx.handle_pointer(&mut self.host, id, event)
            },
            _ => None,
        };
        if let Some(action) = action {
            if let Some(cmd) = HostCommand::parse(&action) {
                self.execute(cmd, Some(id));
            }
            return;
        }
        if event == PointerEvent::Click {
            self.builtin_click(id);
        }
    }

    fn is_start(&self, id: ControlId) -> bool {
        self.host.control(id).is_some_and(|c| c.name == START_BUTTON)
    }

    fn start_pointer(&mut self, id: ControlId, event: PointerEvent) {
        let (state, frame) = match event {
            PointerEvent::Enter | PointerEvent::Release => {
                self.start_hovered = true;
                (VisualState::Hover, 1)
            },
            PointerEvent::Leave => {
                self.start_hovered = false;
                (VisualState::Normal, 0)
            },
            PointerEvent::Press => (VisualState::Pressed, 2),
            PointerEvent::Click => {
                self.execute(HostCommand::Start, Some(id));
                return;
            },
        };
        let skinned = self
            .ctx
            .as_mut()
            .is_some_and(|ctx| ctx.set_state(&mut self.host, id, state));
        if !skinned {
            self.show_builtin(id, self.art.start[frame].clone());
        }
    }

    fn builtin_click(&mut self, id: ControlId) {
        let Some(name) = self.host.control(id).map(|c| c.name.clone()) else {
            return;
        };
        let cmd = match name.as_str() {
            EXIT_BUTTON => HostCommand::Exit,
            OPTIONS_BUTTON => HostCommand::ShowOptions,
            WINDOW_MODE_BUTTON => HostCommand::ToggleWindowMode,
            MINIMIZE_BUTTON => HostCommand::Minimize,
            _ => return,
        };
        self.execute(cmd, Some(id));
    }

    /// Carry out a command. `source` is the control that triggered it.
    pub fn execute(&mut self, cmd: HostCommand, source: Option<ControlId>) {
        log::info!("Command: {cmd:?}");
        match cmd {
            HostCommand::Start => self.events.started += 1,
            HostCommand::Exit => self.events.closed = true,
            HostCommand::ShowOptions => self.events.options_shown += 1,
            HostCommand::ToggleWindowMode => self.toggle_window_mode(),
            HostCommand::ToggleState => {
                if let (Some(ctx), Some(id)) = (self.ctx.as_mut(), source) {
                    ctx.toggle_state(&mut self.host, id);
                }
            },
            HostCommand::Minimize => self.events.minimized = true,
            HostCommand::OpenUrl(target)
            | HostCommand::Run(target)
            | HostCommand::OpenFolder(target) => {
                if !target.is_empty() {
                    self.events.opened.push(target);
                }
            },
            HostCommand::Message(text) => self.events.messages.push(text),
        }
    }

    fn toggle_window_mode(&mut self) {
        self.window_mode = !self.window_mode;
        let Some(id) = self.id(WINDOW_MODE_BUTTON) else {
            return;
        };
        let checked = self.window_mode;
        let skinned = self
            .ctx
            .as_mut()
            .is_some_and(|ctx| ctx.set_toggle_state(&mut self.host, id, checked));
        if !skinned {
            let art = if checked {
                self.art.window_mode_on.clone()
            } else {
                self.art.window_mode_off.clone()
            };
            self.show_builtin(id, art);
        }
    }

    /// One tick of the blink timer.
    ///
    /// The start button blinks with its layout art when it has a blink
    /// image and with the compiled-in frames otherwise. Other controls
    /// blink only when their layout asks for it.
    pub fn blink_tick(&mut self) {
        let start = self.id(START_BUTTON);
        let others: Vec<ControlId> = self
            .ctx
            .as_ref()
            .map(|ctx| ctx.blink_targets().to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter(|id| Some(*id) != start)
            .collect();
        if let Some(ctx) = self.ctx.as_mut()
            && !others.is_empty()
        {
            for id in others {
                let mut flag = self.layout_blink;
                ctx.try_blink(&mut self.host, id, &mut flag);
            }
            self.layout_blink = !self.layout_blink;
        }

        let Some(id) = start else {
            return;
        };
        if self.start_hovered || self.try_blink(id) {
            return;
        }
        let frame = if self.blink { 1 } else { 0 };
        self.show_builtin(id, self.art.start[frame].clone());
        self.blink = !self.blink;
    }

    fn try_blink(&mut self, id: ControlId) -> bool {
        match self.ctx.as_mut() {
            Some(ctx) => ctx.try_blink(&mut self.host, id, &mut self.blink),
            None => false,
        }
    }

    fn show_builtin(&mut self, id: ControlId, art: SkinImage) {
        if let Some(control) = self.host.control_mut(id) {
            control.set_background_image(art);
        }
    }
}

fn build_controls(host: &mut MemoryHost, art: &BuiltinArt) {
    let root = host.root();
    let mut start = Control::image_surface(START_BUTTON).at(380, 440).sized(200, 60);
    start.set_background_image(art.start[0].clone());
    let mut window_mode = Control::image_surface(WINDOW_MODE_BUTTON).at(20, 500).sized(24, 24);
    window_mode.set_background_image(art.window_mode_on.clone());

    let controls = [
        start,
        Control::image_surface(EXIT_BUTTON).at(920, 8).sized(32, 32),
        Control::image_surface(OPTIONS_BUTTON).at(880, 8).sized(32, 32),
        window_mode,
        Control::image_surface(MINIMIZE_BUTTON).at(840, 8).sized(32, 32),
        Control::browser(NEWS_BROWSER).at(20, 60).sized(560, 360),
        Control::label(COPYRIGHT_LABEL).at(20, 530).sized(300, 12),
    ];
    for control in controls {
        let name = control.name.clone();
        if let Err(e) = host.attach(root, control) {
            log::warn!("Could not create '{name}': {e}");
        }
    }
}
