//! [`LayoutDefinition`] to XML.
//!
//! Only set fields are written, so an absent optional never comes back as
//! an explicit default after a load/save cycle.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use veneer_types::{Point, Result, Size, VeneerError};

use super::attr::bool_text;
use super::ROOT_ELEMENT;
use crate::model::{
    DynamicButtonDefinition, FormLayout, ImageButtonDefinition, LayoutControl, LayoutDefinition,
};

pub(crate) fn write(def: &LayoutDefinition) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    if let Some(base) = non_empty(&def.asset_directory) {
        root.push_attribute(("basePath", base));
    }
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Empty(form_element(&def.form)))?;
    for control in &def.controls {
        writer.write_event(Event::Empty(control_element(control)))?;
    }
    for button in &def.image_buttons {
        writer.write_event(Event::Empty(image_button_element(button)))?;
    }
    for button in &def.dynamic_buttons {
        writer.write_event(Event::Empty(dynamic_button_element(button)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| VeneerError::Layout(format!("encoded layout: {e}")))
}

fn form_element(form: &FormLayout) -> BytesStart<'static> {
    let mut e = BytesStart::new("form");
    if !form.client_size.is_empty() {
        push_size(&mut e, form.client_size);
    }
    push_opt(&mut e, "background", &form.background_image);
    push_opt(&mut e, "icon", &form.icon);
    if let Some(key) = form.transparency_key {
        e.push_attribute(("transparency", key.to_hex().as_str()));
    }
    push_opt(&mut e, "caption", &form.caption);
    push_flag(&mut e, "showIcon", form.show_icon);
    e
}

fn control_element(c: &LayoutControl) -> BytesStart<'static> {
    let mut e = BytesStart::new("control");
    e.push_attribute(("name", c.name.as_str()));
    e.push_attribute(("type", c.control_type.name()));
    push_point(&mut e, c.location);
    push_size(&mut e, c.size);
    push_flag(&mut e, "visible", c.visible);
    push_flag(&mut e, "enabled", c.enabled);
    push_flag(&mut e, "autoSize", c.auto_size);
    push_opt(&mut e, "text", &c.text);
    if let Some(color) = c.fore_color {
        e.push_attribute(("foreColor", color.to_hex().as_str()));
    }
    if let Some(color) = c.back_color {
        e.push_attribute(("backColor", color.to_hex().as_str()));
    }
    if let Some(font) = &c.font {
        e.push_attribute(("font", font.to_attr().as_str()));
    }
    push_opt(&mut e, "background", &c.background_image);
    push_opt(&mut e, "image", &c.image);
    if let Some(align) = c.text_align {
        e.push_attribute(("textAlign", align.name()));
    }
    if let Some(mode) = c.size_mode {
        e.push_attribute(("sizeMode", mode.name()));
    }
    push_opt(&mut e, "url", &c.url);
    push_opt(&mut e, "cursor", &c.cursor);
    if let Some(layout) = c.background_layout {
        e.push_attribute(("backgroundLayout", layout.name()));
    }
    e
}

/// Checkable skins are written as `<toggleButton>`.
fn image_button_element(b: &ImageButtonDefinition) -> BytesStart<'static> {
    let tag = if b.checkable {
        "toggleButton"
    } else {
        "imageButton"
    };
    let mut e = BytesStart::new(tag);
    e.push_attribute(("target", b.target.as_str()));
    push_button_common(&mut e, b);
    e
}

fn dynamic_button_element(d: &DynamicButtonDefinition) -> BytesStart<'static> {
    let mut e = BytesStart::new("dynamicButton");
    e.push_attribute(("name", d.name()));
    push_point(&mut e, d.location);
    push_size(&mut e, d.size);
    push_opt(&mut e, "action", &d.action);
    push_opt(&mut e, "argument", &d.argument);
    if !d.visible {
        e.push_attribute(("visible", "false"));
    }
    if !d.enabled {
        e.push_attribute(("enabled", "false"));
    }
    if let Some(mode) = d.size_mode {
        e.push_attribute(("sizeMode", mode.name()));
    }
    if let Some(layout) = d.background_layout {
        e.push_attribute(("backgroundLayout", layout.name()));
    }
    if d.button.checkable {
        e.push_attribute(("checkable", "true"));
    }
    push_button_common(&mut e, &d.button);
    e
}

fn push_button_common(e: &mut BytesStart<'static>, b: &ImageButtonDefinition) {
    for (state, path) in b.visuals.iter() {
        if !path.is_empty() {
            e.push_attribute((state.attr(), path));
        }
    }
    if b.use_blink_state {
        e.push_attribute(("useBlinkState", "true"));
    }
}

fn push_point(e: &mut BytesStart<'static>, p: Point) {
    e.push_attribute(("x", p.x.to_string().as_str()));
    e.push_attribute(("y", p.y.to_string().as_str()));
}

fn push_size(e: &mut BytesStart<'static>, s: Size) {
    e.push_attribute(("width", s.width.to_string().as_str()));
    e.push_attribute(("height", s.height.to_string().as_str()));
}

fn push_opt(e: &mut BytesStart<'static>, key: &str, value: &Option<String>) {
    if let Some(v) = non_empty(value) {
        e.push_attribute((key, v));
    }
}

fn push_flag(e: &mut BytesStart<'static>, key: &str, value: Option<bool>) {
    if let Some(b) = value {
        e.push_attribute((key, bool_text(b)));
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
