//! Binding a layout to a live host window.
//!
//! [`apply`] matches layout entries to host controls by name, overrides the
//! fields the layout sets, synthesizes dynamic buttons and returns the
//! [`RuntimeContext`] the host drives afterwards. Binding never fails: a
//! missing control, a capability mismatch or an unreadable image skips that
//! one entry and the rest proceed.

use std::path::Path;

use veneer_layout::{
    DynamicButtonDefinition, FormLayout, ImageButtonDefinition, ImageLayout, LayoutControl,
    LayoutDefinition, SizeMode, VisualState, codec, paths,
};
use veneer_types::{Color, Result};

use crate::artwork::{ImageLoader, load_asset};
use crate::context::RuntimeContext;
use crate::host::{Capability, Control, ControlId, HostWindow};
use crate::skin_set::SkinImageSet;

/// Cursor shown over synthesized buttons.
pub const DYNAMIC_BUTTON_CURSOR: &str = "Hand";

/// Size mode of a dynamic button whose layout sets none.
pub const DEFAULT_DYNAMIC_SIZE_MODE: SizeMode = SizeMode::StretchImage;

/// Name given to the `index`-th dynamic button when its layout name is blank.
pub fn fallback_button_name(index: usize) -> String {
    format!("dynamicButton{index}")
}

/// Apply `def`, loaded from `layout_path`, to `host`.
pub fn apply(
    host: &mut dyn HostWindow,
    def: &LayoutDefinition,
    layout_path: &Path,
    loader: &dyn ImageLoader,
) -> RuntimeContext {
    let mut ctx = RuntimeContext::new();
    let base = paths::runtime_asset_directory(layout_path, def.asset_directory.as_deref());
    log::debug!("Binding {} with assets from {}", layout_path.display(), base.display());

    for id in host.walk() {
        if let Some(control) = host.control(id) {
            let name = control.name.clone();
            ctx.register_control(&name, id);
        }
    }

    apply_form(host, &def.form, &base, loader);

    let mut bound = 0usize;
    for entry in &def.controls {
        if apply_control(host, &mut ctx, entry, &base, loader) {
            bound += 1;
        }
    }

    let mut skinned = 0usize;
    for button in &def.image_buttons {
        if bind_image_button(host, &mut ctx, button, &base, loader) {
            skinned += 1;
        }
    }

    let mut created = 0usize;
    for (index, button) in def.dynamic_buttons.iter().enumerate() {
        if create_dynamic_button(host, &mut ctx, index, button, &base, loader) {
            created += 1;
        }
    }

    log::info!(
        "Applied layout {}: {bound}/{} controls, {skinned}/{} image buttons, {created}/{} dynamic buttons",
        layout_path.display(),
        def.controls.len(),
        def.image_buttons.len(),
        def.dynamic_buttons.len(),
    );
    ctx
}

/// Read the layout at `layout_path` and apply it.
///
/// `Ok(None)` when the file does not exist, leaving the host untouched.
/// Read and XML syntax failures are returned as `Err`, also before any
/// change to the host.
pub fn apply_file(
    host: &mut dyn HostWindow,
    layout_path: &Path,
    loader: &dyn ImageLoader,
) -> Result<Option<RuntimeContext>> {
    if !layout_path.is_file() {
        log::info!("No layout at {} -- keeping built-in look", layout_path.display());
        return Ok(None);
    }
    let def = codec::try_load(layout_path)?;
    Ok(Some(apply(host, &def, layout_path, loader)))
}

/// Detach every control synthesized by the previous binding and drop the
/// context with all its images. Returns the number of controls removed.
pub fn teardown(host: &mut dyn HostWindow, ctx: RuntimeContext) -> usize {
    let mut removed = 0;
    for id in host.take_dynamic() {
        host.unsubscribe_pointer(id);
        match host.detach(id) {
            Ok(control) => {
                log::debug!("Removed dynamic button '{}'", control.name);
                removed += 1;
            },
            Err(e) => log::warn!("Could not remove dynamic control {id:?}: {e}"),
        }
    }
    drop(ctx);
    removed
}

/// Replace a previous binding with a fresh one.
pub fn reapply(
    host: &mut dyn HostWindow,
    previous: Option<RuntimeContext>,
    def: &LayoutDefinition,
    layout_path: &Path,
    loader: &dyn ImageLoader,
) -> RuntimeContext {
    if let Some(ctx) = previous {
        let removed = teardown(host, ctx);
        log::debug!("Tore down previous layout ({removed} dynamic controls)");
    }
    apply(host, def, layout_path, loader)
}

// -- Form --

fn apply_form(host: &mut dyn HostWindow, form: &FormLayout, base: &Path, loader: &dyn ImageLoader) {
    let background = load_asset(loader, base, form.background_image.as_deref());
    let icon = load_asset(loader, base, form.icon.as_deref());
    let state = host.form_mut();

    if !form.client_size.is_empty() {
        state.client_size = form.client_size;
    }
    if let Some(img) = background {
        state.background_image = Some(img);
    }
    if let Some(caption) = form.caption.as_deref()
        && !caption.trim().is_empty()
    {
        state.caption = caption.to_string();
    }
    if let Some(key) = form.transparency_key {
        state.transparency_key = Some(key);
    }
    if let Some(img) = icon {
        state.icon = Some(img);
    }
    if let Some(show) = form.show_icon {
        state.show_icon = show;
    }
}

// -- Static controls --

fn apply_control(
    host: &mut dyn HostWindow,
    ctx: &mut RuntimeContext,
    entry: &LayoutControl,
    base: &Path,
    loader: &dyn ImageLoader,
) -> bool {
    if entry.name.trim().is_empty() {
        return false;
    }
    let Some(id) = host.find(&entry.name) else {
        log::debug!("Layout control '{}' not found in host -- skipped", entry.name);
        return false;
    };
    let Some(control) = host.control_mut(id) else {
        return false;
    };
    apply_control_properties(control, entry, base, loader);
    ctx.register_control(&entry.name, id);
    true
}

/// Override the fields `entry` sets on `control`. Kind-specific fields are
/// ignored on controls without the matching capability.
pub fn apply_control_properties(
    control: &mut Control,
    entry: &LayoutControl,
    base: &Path,
    loader: &dyn ImageLoader,
) {
    control.location = entry.location;
    if !entry.size.is_empty() {
        control.size = entry.size;
    }
    if let Some(visible) = entry.visible {
        control.visible = visible;
    }
    if let Some(enabled) = entry.enabled {
        control.enabled = enabled;
    }
    if let Some(cursor) = entry.cursor.as_deref().filter(|c| !c.is_empty()) {
        control.cursor = Some(cursor.to_string());
    }

    match control.capability() {
        Capability::Label => {
            if let Some(color) = entry.back_color {
                control.back_color = Some(color);
            }
            let Some(label) = control.as_label_mut() else {
                return;
            };
            if let Some(auto) = entry.auto_size {
                label.auto_size = auto;
            }
            if let Some(text) = entry.text.as_deref().filter(|t| !t.is_empty()) {
                label.text = text.to_string();
            }
            if let Some(color) = entry.fore_color {
                label.fore_color = color;
            }
            if let Some(font) = entry.font.as_ref().and_then(|f| f.effective()) {
                label.font = Some(font);
            }
            if let Some(align) = entry.text_align {
                label.text_align = align;
            }
        },
        Capability::ImageSurface => {
            let background = load_asset(loader, base, entry.background_image.as_deref());
            let image = load_asset(loader, base, entry.image.as_deref());
            let Some(surface) = control.as_image_surface_mut() else {
                return;
            };
            if let Some(mode) = entry.size_mode {
                surface.size_mode = mode;
            }
            if let Some(layout) = entry.background_layout {
                surface.background_layout = layout;
            }
            if let Some(img) = background {
                surface.background_image = Some(img);
            }
            if let Some(img) = image {
                surface.image = Some(img);
            }
        },
        Capability::EmbeddedBrowser => {
            if let Some(url) = entry.url.as_deref().filter(|u| !u.trim().is_empty())
                && let Some(browser) = control.as_browser_mut()
            {
                browser.url = Some(url.to_string());
            }
        },
        Capability::Container | Capability::Generic => {},
    }
}

// -- Image buttons --

fn bind_image_button(
    host: &mut dyn HostWindow,
    ctx: &mut RuntimeContext,
    button: &ImageButtonDefinition,
    base: &Path,
    loader: &dyn ImageLoader,
) -> bool {
    let target = button.target.trim();
    if target.is_empty() {
        return false;
    }
    let Some(id) = host.find(&button.target) else {
        log::debug!("Image button target '{target}' not found in host -- skipped");
        return false;
    };
    let enabled = match host.control(id) {
        Some(c) if c.capability() == Capability::ImageSurface => c.enabled,
        _ => {
            log::debug!("Image button target '{target}' is not an image surface -- skipped");
            return false;
        },
    };

    let skin = SkinImageSet::load(&button.visuals, base, loader);
    let toggle = button.checkable.then_some(false);
    ctx.register_skin(&button.target, id, skin, toggle);
    if button.use_blink_state {
        ctx.register_blink(id);
    }

    if enabled || !ctx.set_state(host, id, VisualState::Disabled) {
        ctx.set_state(host, id, VisualState::Normal);
    }
    true
}

// -- Dynamic buttons --

fn create_dynamic_button(
    host: &mut dyn HostWindow,
    ctx: &mut RuntimeContext,
    index: usize,
    def: &DynamicButtonDefinition,
    base: &Path,
    loader: &dyn ImageLoader,
) -> bool {
    let name = if def.name().trim().is_empty() {
        fallback_button_name(index)
    } else {
        def.name().to_string()
    };

    let mut control = Control::image_surface(name.as_str());
    control.location = def.location;
    control.size = def.size;
    control.visible = def.visible;
    control.enabled = def.enabled;
    control.back_color = Some(Color::TRANSPARENT);
    control.cursor = Some(DYNAMIC_BUTTON_CURSOR.to_string());

    let skin = SkinImageSet::load(&def.button.visuals, base, loader);
    if let Some(surface) = control.as_image_surface_mut() {
        surface.size_mode = def.size_mode.unwrap_or(DEFAULT_DYNAMIC_SIZE_MODE);
        surface.background_layout = def.background_layout.unwrap_or(ImageLayout::None);
    }
    skin.apply(&mut control, VisualState::Normal);

    let root = host.root();
    let id = match host.attach(root, control) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("Could not create dynamic button '{name}': {e}");
            return false;
        },
    };
    raise_and_subscribe(host, id, &name);

    ctx.register_control(&name, id);
    let toggle = def.button.checkable.then_some(false);
    ctx.register_skin(&name, id, skin, toggle);
    ctx.register_action(id, def.layout_action());
    if def.button.use_blink_state {
        ctx.register_blink(id);
    }
    ctx.set_state(host, id, VisualState::Normal);
    log::debug!("Created dynamic button '{name}'");
    true
}

fn raise_and_subscribe(host: &mut dyn HostWindow, id: ControlId, name: &str) {
    if let Err(e) = host.bring_to_front(id) {
        log::warn!("Could not raise dynamic button '{name}': {e}");
    }
    host.register_dynamic(id);
    if let Err(e) = host.subscribe_pointer(id) {
        log::warn!("Could not route pointer events to '{name}': {e}");
    }
}

#[cfg(test)]
mod tests {
    use veneer_layout::{ContentAlignment, ControlType, FontLayout, FontStyle};
    use veneer_types::{Point, Size};

    use super::*;
    use crate::artwork::MemoryImageLoader;
    use crate::host::{ControlKind, MemoryHost};

    const LAYOUT: &str = "/skins/main.layout.xml";

    fn host() -> MemoryHost {
        let mut h = MemoryHost::new("Main", Size::new(640, 480));
        let root = h.root();
        h.attach(root, Control::label("lblTitle")).unwrap();
        h.attach(root, Control::image_surface("picLogo")).unwrap();
        h.attach(root, Control::browser("webNews")).unwrap();
        h
    }

    // -- Control properties --

    #[test]
    fn label_fields_apply_only_when_set() {
        let mut c = Control::label("lbl").sized(40, 10);
        let mut entry = LayoutControl::new("lbl", ControlType::Label);
        entry.location = Point::new(5, 6);
        entry.text = Some("Hello".into());
        entry.fore_color = Some(Color::rgb(1, 2, 3));
        entry.font = Some(FontLayout::new("Tahoma", 9.0, FontStyle::BOLD));
        entry.text_align = Some(ContentAlignment::MiddleCenter);
        apply_control_properties(&mut c, &entry, Path::new("/"), &MemoryImageLoader::new());

        assert_eq!(c.location, Point::new(5, 6));
        assert_eq!(c.size, Size::new(40, 10));
        assert!(c.visible);
        let label = c.as_label().unwrap();
        assert_eq!(label.text, "Hello");
        assert_eq!(label.fore_color, Color::rgb(1, 2, 3));
        assert_eq!(label.font.as_ref().map(|f| f.family.as_str()), Some("Tahoma"));
        assert_eq!(label.text_align, ContentAlignment::MiddleCenter);
        assert!(!label.auto_size);
    }

    #[test]
    fn wrong_capability_fields_are_ignored() {
        let mut c = Control::image_surface("pic");
        let mut entry = LayoutControl::new("pic", ControlType::Label);
        entry.text = Some("ignored".into());
        entry.back_color = Some(Color::WHITE);
        entry.url = Some("https://example.com".into());
        apply_control_properties(&mut c, &entry, Path::new("/"), &MemoryImageLoader::new());
        assert_eq!(c.back_color, None);
        assert!(c.as_label().is_none());
    }

    #[test]
    fn image_surface_loads_images() {
        let mut loader = MemoryImageLoader::new();
        let bg = loader.insert("/skins/bg.png");
        let mut c = Control::image_surface("pic");
        let mut entry = LayoutControl::new("pic", ControlType::PictureBox);
        entry.background_image = Some("bg.png".into());
        entry.image = Some("missing.png".into());
        entry.size_mode = Some(SizeMode::Zoom);
        apply_control_properties(&mut c, &entry, Path::new("/skins"), &loader);
        let surface = c.as_image_surface().unwrap();
        assert_eq!(surface.background_image.as_ref(), Some(&bg));
        assert!(surface.image.is_none());
        assert_eq!(surface.size_mode, SizeMode::Zoom);
        assert_eq!(surface.background_layout, ImageLayout::None);
    }

    #[test]
    fn blank_font_family_keeps_host_font() {
        let mut c = Control::label("lbl");
        let mut entry = LayoutControl::new("lbl", ControlType::Label);
        entry.font = Some(FontLayout::new(" ", 12.0, FontStyle::empty()));
        apply_control_properties(&mut c, &entry, Path::new("/"), &MemoryImageLoader::new());
        assert!(c.as_label().unwrap().font.is_none());
    }

    // -- Apply --

    #[test]
    fn form_settings_only_when_set() {
        let mut h = host();
        let mut def = LayoutDefinition::new();
        def.form.caption = Some("   ".into());
        def.form.background_image = Some("nope.png".into());
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        assert_eq!(h.form().caption, "Main");
        assert_eq!(h.form().client_size, Size::new(640, 480));
        assert!(h.form().background_image.is_none());
        assert!(h.form().show_icon);

        def.form.caption = Some("Skinned".into());
        def.form.client_size = Size::new(300, 200);
        def.form.show_icon = Some(false);
        def.form.transparency_key = Some(Color::rgb(255, 0, 255));
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        assert_eq!(h.form().caption, "Skinned");
        assert_eq!(h.form().client_size, Size::new(300, 200));
        assert!(!h.form().show_icon);
        assert_eq!(h.form().transparency_key, Some(Color::rgb(255, 0, 255)));
    }

    #[test]
    fn form_icon_applied_and_kept_on_bad_decode() {
        let mut loader = MemoryImageLoader::new();
        let icon = loader.insert("/skins/app.ico");
        loader.insert_broken("/skins/broken.ico");
        let mut h = host();
        let mut def = LayoutDefinition::new();
        def.form.icon = Some("app.ico".into());
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &loader);
        assert_eq!(h.form().icon.as_ref(), Some(&icon));

        def.form.icon = Some("broken.ico".into());
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &loader);
        assert_eq!(h.form().icon.as_ref(), Some(&icon));

        def.form.icon = Some("missing.ico".into());
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &loader);
        assert_eq!(h.form().icon.as_ref(), Some(&icon));
    }

    #[test]
    fn browser_url_applied_when_set() {
        let mut h = host();
        let mut def = LayoutDefinition::new();
        let mut entry = LayoutControl::new("webNews", ControlType::WebBrowser);
        entry.url = Some("https://news.example.com/".into());
        def.controls.push(entry);
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        let url = |h: &MemoryHost| match &h.get("webNews").unwrap().kind {
            ControlKind::EmbeddedBrowser(b) => b.url.clone(),
            _ => None,
        };
        assert_eq!(url(&h).as_deref(), Some("https://news.example.com/"));

        def.controls[0].url = Some("   ".into());
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        assert_eq!(url(&h).as_deref(), Some("https://news.example.com/"));

        def.controls[0].url = None;
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        assert_eq!(url(&h).as_deref(), Some("https://news.example.com/"));
    }

    #[test]
    fn whole_tree_is_registered() {
        let mut h = host();
        let ctx = apply(&mut h, &LayoutDefinition::new(), Path::new(LAYOUT), &MemoryImageLoader::new());
        assert_eq!(ctx.control_id("main"), Some(h.root()));
        assert!(ctx.control_id("LBLTITLE").is_some());
        assert!(ctx.control_id("webNews").is_some());
    }

    #[test]
    fn image_button_on_label_is_skipped() {
        let mut loader = MemoryImageLoader::new();
        loader.insert("/skins/n.png");
        let mut h = host();
        let mut def = LayoutDefinition::new();
        let mut button = ImageButtonDefinition::new("lblTitle");
        button.visuals.normal = Some("n.png".into());
        def.image_buttons.push(button);
        let ctx = apply(&mut h, &def, Path::new(LAYOUT), &loader);
        assert_eq!(ctx.skin_count(), 0);
    }

    #[test]
    fn disabled_image_button_prefers_disabled_art() {
        let mut loader = MemoryImageLoader::new();
        loader.insert("/skins/n.png");
        let disabled = loader.insert("/skins/d.png");
        let mut h = host();
        let root = h.root();
        h.attach(root, Control::image_surface("picPlay").disabled()).unwrap();
        let mut def = LayoutDefinition::new();
        let mut button = ImageButtonDefinition::new("picPlay");
        button.visuals.normal = Some("n.png".into());
        button.visuals.disabled = Some("d.png".into());
        def.image_buttons.push(button);
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &loader);
        assert_eq!(h.get("picPlay").unwrap().background_image(), Some(&disabled));
    }

    #[test]
    fn disabled_image_button_falls_back_to_normal() {
        let mut loader = MemoryImageLoader::new();
        let normal = loader.insert("/skins/n.png");
        let mut h = host();
        let root = h.root();
        h.attach(root, Control::image_surface("picPlay").disabled()).unwrap();
        let mut def = LayoutDefinition::new();
        let mut button = ImageButtonDefinition::new("picPlay");
        button.visuals.normal = Some("n.png".into());
        def.image_buttons.push(button);
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &loader);
        assert_eq!(h.get("picPlay").unwrap().background_image(), Some(&normal));
    }

    #[test]
    fn checkable_buttons_start_unchecked() {
        let mut h = host();
        let mut def = LayoutDefinition::new();
        let mut button = ImageButtonDefinition::new("picLogo");
        button.checkable = true;
        def.image_buttons.push(button);
        let mut dynamic = DynamicButtonDefinition::new("btnMute");
        dynamic.button.checkable = true;
        def.dynamic_buttons.push(dynamic);
        def.dynamic_buttons.push(DynamicButtonDefinition::new("btnPlain"));

        let ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        let logo = ctx.control_id("picLogo").unwrap();
        let mute = ctx.control_id("btnMute").unwrap();
        let plain = ctx.control_id("btnPlain").unwrap();
        assert_eq!(ctx.toggle_value(logo), Some(false));
        assert_eq!(ctx.toggle_value(mute), Some(false));
        assert_eq!(ctx.toggle_value(plain), None);
    }

    #[test]
    fn dynamic_button_defaults() {
        let mut h = host();
        let mut def = LayoutDefinition::new();
        let mut button = DynamicButtonDefinition::new("btnGo");
        button.enabled = false;
        def.dynamic_buttons.push(button);
        let _ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());

        let c = h.get("btnGo").unwrap();
        assert!(!c.enabled);
        assert!(c.visible);
        assert_eq!(c.back_color, Some(Color::TRANSPARENT));
        assert_eq!(c.cursor.as_deref(), Some(DYNAMIC_BUTTON_CURSOR));
        let surface = c.as_image_surface().unwrap();
        assert_eq!(surface.size_mode, SizeMode::StretchImage);
        assert_eq!(surface.background_layout, ImageLayout::None);
    }

    #[test]
    fn dynamic_buttons_stack_in_front() {
        let mut h = host();
        let mut def = LayoutDefinition::new();
        def.dynamic_buttons.push(DynamicButtonDefinition::new("first"));
        def.dynamic_buttons.push(DynamicButtonDefinition::new("second"));
        let ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        let first = ctx.control_id("first").unwrap();
        let second = ctx.control_id("second").unwrap();
        let order = h.children(h.root());
        assert_eq!(&order[..2], &[second, first]);
        assert!(h.is_subscribed(first) && h.is_subscribed(second));
        assert_eq!(h.dynamic_controls(), &[first, second]);
    }

    #[test]
    fn blink_targets_follow_layout_flag() {
        let mut h = host();
        let mut def = LayoutDefinition::new();
        let mut logo = ImageButtonDefinition::new("picLogo");
        logo.use_blink_state = true;
        def.image_buttons.push(logo);
        def.dynamic_buttons.push(DynamicButtonDefinition::new("btnGo"));
        let ctx = apply(&mut h, &def, Path::new(LAYOUT), &MemoryImageLoader::new());
        assert_eq!(ctx.blink_targets(), &[ctx.control_id("picLogo").unwrap()]);
    }

    #[test]
    fn missing_layout_file_is_not_applied() {
        let mut h = host();
        let ctx = apply_file(&mut h, Path::new("/nonexistent/veneer/layout.xml"), &MemoryImageLoader::new())
            .unwrap();
        assert!(ctx.is_none());
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn fallback_names_are_positional() {
        assert_eq!(fallback_button_name(0), "dynamicButton0");
        assert_eq!(fallback_button_name(7), "dynamicButton7");
    }
}
