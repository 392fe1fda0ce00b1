//! The host window contract.
//!
//! A host is a tree of named controls under one window. The binder only
//! needs name lookup, a capability tag per control, and the ability to
//! attach, raise, subscribe and later detach the controls it synthesizes.
//! [`MemoryHost`] is a complete in-memory implementation.

mod memory;

pub use memory::MemoryHost;

use veneer_layout::{ContentAlignment, FontLayout, ImageLayout, SizeMode};
use veneer_types::{Color, Point, Result, Size};

use crate::artwork::SkinImage;

/// Stable handle of a control inside one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u64);

/// What a control can display. Drives which layout fields apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Label,
    ImageSurface,
    EmbeddedBrowser,
    Container,
    Generic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelProps {
    pub text: String,
    pub auto_size: bool,
    pub fore_color: Color,
    /// `None` is the host's default font.
    pub font: Option<FontLayout>,
    pub text_align: ContentAlignment,
}

impl Default for LabelProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            auto_size: false,
            fore_color: Color::BLACK,
            font: None,
            text_align: ContentAlignment::TopLeft,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSurfaceProps {
    pub size_mode: SizeMode,
    pub background_layout: ImageLayout,
    /// Skinned artwork is shown here.
    pub background_image: Option<SkinImage>,
    pub image: Option<SkinImage>,
}

impl Default for ImageSurfaceProps {
    fn default() -> Self {
        Self {
            size_mode: SizeMode::Normal,
            background_layout: ImageLayout::None,
            background_image: None,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserProps {
    pub url: Option<String>,
}

/// Kind-specific state of a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Label(LabelProps),
    ImageSurface(ImageSurfaceProps),
    EmbeddedBrowser(BrowserProps),
    Container,
    Generic,
}

impl ControlKind {
    pub fn capability(&self) -> Capability {
        match self {
            Self::Label(_) => Capability::Label,
            Self::ImageSurface(_) => Capability::ImageSurface,
            Self::EmbeddedBrowser(_) => Capability::EmbeddedBrowser,
            Self::Container => Capability::Container,
            Self::Generic => Capability::Generic,
        }
    }
}

/// One control in a host tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub name: String,
    pub location: Point,
    pub size: Size,
    pub visible: bool,
    pub enabled: bool,
    /// `None` inherits from the parent.
    pub back_color: Option<Color>,
    /// Pointer cursor name; `None` is the host default.
    pub cursor: Option<String>,
    pub kind: ControlKind,
}

impl Control {
    pub fn new(name: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            name: name.into(),
            location: Point::ORIGIN,
            size: Size::EMPTY,
            visible: true,
            enabled: true,
            back_color: None,
            cursor: None,
            kind,
        }
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::new(name, ControlKind::Label(LabelProps::default()))
    }

    pub fn image_surface(name: impl Into<String>) -> Self {
        Self::new(name, ControlKind::ImageSurface(ImageSurfaceProps::default()))
    }

    pub fn browser(name: impl Into<String>) -> Self {
        Self::new(name, ControlKind::EmbeddedBrowser(BrowserProps::default()))
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self::new(name, ControlKind::Container)
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self::new(name, ControlKind::Generic)
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.location = Point::new(x, y);
        self
    }

    pub fn sized(mut self, width: i32, height: i32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn capability(&self) -> Capability {
        self.kind.capability()
    }

    pub fn as_label(&self) -> Option<&LabelProps> {
        match &self.kind {
            ControlKind::Label(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_label_mut(&mut self) -> Option<&mut LabelProps> {
        match &mut self.kind {
            ControlKind::Label(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_image_surface(&self) -> Option<&ImageSurfaceProps> {
        match &self.kind {
            ControlKind::ImageSurface(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_image_surface_mut(&mut self) -> Option<&mut ImageSurfaceProps> {
        match &mut self.kind {
            ControlKind::ImageSurface(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_browser_mut(&mut self) -> Option<&mut BrowserProps> {
        match &mut self.kind {
            ControlKind::EmbeddedBrowser(p) => Some(p),
            _ => None,
        }
    }

    /// Background artwork of an image surface.
    pub fn background_image(&self) -> Option<&SkinImage> {
        self.as_image_surface()
            .and_then(|p| p.background_image.as_ref())
    }

    /// Show `img` as background. Only image surfaces accept it.
    pub fn set_background_image(&mut self, img: SkinImage) -> bool {
        match self.as_image_surface_mut() {
            Some(p) => {
                p.background_image = Some(img);
                true
            },
            None => false,
        }
    }
}

/// Window-level state the binder may override.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub client_size: Size,
    pub background_image: Option<SkinImage>,
    pub caption: String,
    pub transparency_key: Option<Color>,
    pub icon: Option<SkinImage>,
    pub show_icon: bool,
}

impl FormState {
    pub fn new(caption: impl Into<String>, client_size: Size) -> Self {
        Self {
            client_size,
            background_image: None,
            caption: caption.into(),
            transparency_key: None,
            icon: None,
            show_icon: true,
        }
    }
}

/// A live window whose controls a layout can be bound to.
pub trait HostWindow {
    fn form(&self) -> &FormState;

    fn form_mut(&mut self) -> &mut FormState;

    /// The window's own control. Every other control descends from it.
    fn root(&self) -> ControlId;

    /// Direct children of `id`, front to back.
    fn children(&self, id: ControlId) -> Vec<ControlId>;

    fn control(&self, id: ControlId) -> Option<&Control>;

    fn control_mut(&mut self, id: ControlId) -> Option<&mut Control>;

    /// Add `control` under `parent`, at the back of the paint order.
    fn attach(&mut self, parent: ControlId, control: Control) -> Result<ControlId>;

    /// Move `id` to the front of its parent's paint order.
    fn bring_to_front(&mut self, id: ControlId) -> Result<()>;

    /// Remove `id` and its subtree, returning the control.
    fn detach(&mut self, id: ControlId) -> Result<Control>;

    /// Remember `id` as synthesized from a layout.
    fn register_dynamic(&mut self, id: ControlId);

    /// Forget and return every control passed to `register_dynamic`.
    fn take_dynamic(&mut self) -> Vec<ControlId>;

    /// Start routing pointer events for `id` to the runtime context.
    fn subscribe_pointer(&mut self, id: ControlId) -> Result<()>;

    fn unsubscribe_pointer(&mut self, id: ControlId);

    /// Every control in the tree, root first, depth-first.
    fn walk(&self) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// First descendant of the root named exactly `name`.
    fn find(&self, name: &str) -> Option<ControlId> {
        let root = self.root();
        self.walk()
            .into_iter()
            .filter(|id| *id != root)
            .find(|id| self.control(*id).is_some_and(|c| c.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_follows_kind() {
        assert_eq!(Control::label("a").capability(), Capability::Label);
        assert_eq!(
            Control::image_surface("a").capability(),
            Capability::ImageSurface
        );
        assert_eq!(
            Control::browser("a").capability(),
            Capability::EmbeddedBrowser
        );
        assert_eq!(Control::container("a").capability(), Capability::Container);
        assert_eq!(Control::generic("a").capability(), Capability::Generic);
    }

    #[test]
    fn background_only_on_image_surfaces() {
        let img = SkinImage::blank("a.png", 1, 1);
        let mut label = Control::label("lbl");
        assert!(!label.set_background_image(img.clone()));
        assert!(label.background_image().is_none());

        let mut pic = Control::image_surface("pic");
        assert!(pic.set_background_image(img.clone()));
        assert_eq!(pic.background_image(), Some(&img));
    }

    #[test]
    fn builder_helpers() {
        let c = Control::image_surface("btn").at(3, 4).sized(10, 20).disabled();
        assert_eq!(c.location, Point::new(3, 4));
        assert_eq!(c.size, Size::new(10, 20));
        assert!(!c.enabled);
        assert!(c.visible);
    }

    #[test]
    fn find_is_exact_and_first() {
        let mut host = MemoryHost::new("Main", Size::new(100, 100));
        let root = host.root();
        let panel = host.attach(root, Control::container("panel")).unwrap();
        let inner = host.attach(panel, Control::label("Title")).unwrap();
        host.attach(root, Control::label("Title")).unwrap();
        assert_eq!(host.find("Title"), Some(inner));
        assert_eq!(host.find("title"), None);
        assert_eq!(host.find("Main"), None);
        assert_eq!(host.walk().len(), 4);
    }
}
