//! XML to [`LayoutDefinition`].

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use veneer_types::Result;

use super::attr::Attrs;
use super::ROOT_ELEMENT;
use crate::model::{
    DynamicButtonDefinition, FormLayout, ImageButtonDefinition, LayoutControl, LayoutDefinition,
    VisualState,
};
use crate::style::{ContentAlignment, ControlType, ImageLayout, SizeMode};

/// Parse a layout document.
///
/// Syntax errors fail. A document whose root is not `<layout>` parses to
/// an empty definition. Unknown elements, unknown attributes and anything
/// nested below the root's children are skipped.
pub(crate) fn parse(xml: &str) -> Result<LayoutDefinition> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut def = LayoutDefinition::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if !visit(&mut def, e, depth, &mut seen_root)? {
                    return Ok(LayoutDefinition::new());
                }
                depth += 1;
            },
            Event::Empty(ref e) => {
                if !visit(&mut def, e, depth, &mut seen_root)? {
                    return Ok(LayoutDefinition::new());
                }
            },
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    if !seen_root {
        log::warn!("Layout document has no root element");
    }
    Ok(def)
}

/// Handle one element. Returns `false` when the root is not `<layout>`.
fn visit(
    def: &mut LayoutDefinition,
    e: &BytesStart<'_>,
    depth: usize,
    seen_root: &mut bool,
) -> Result<bool> {
    match depth {
        0 if !*seen_root => {
            *seen_root = true;
            if e.name().as_ref() != ROOT_ELEMENT.as_bytes() {
                log::warn!(
                    "Unexpected layout root <{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                );
                return Ok(false);
            }
            def.asset_directory = Attrs::read(e)?.text("basePath");
        },
        1 => read_child(def, e)?,
        _ => {},
    }
    Ok(true)
}

fn read_child(def: &mut LayoutDefinition, e: &BytesStart<'_>) -> Result<()> {
    match e.name().as_ref() {
        b"form" => def.form = read_form(&Attrs::read(e)?),
        b"control" => def.controls.push(read_control(&Attrs::read(e)?)),
        b"imageButton" => def.image_buttons.push(read_image_button(&Attrs::read(e)?)),
        b"toggleButton" => {
            let mut button = read_image_button(&Attrs::read(e)?);
            button.checkable = true;
            def.image_buttons.push(button);
        },
        b"dynamicButton" => def
            .dynamic_buttons
            .push(read_dynamic_button(&Attrs::read(e)?)),
        other => log::debug!(
            "Skipping unknown layout element <{}>",
            String::from_utf8_lossy(other)
        ),
    }
    Ok(())
}

fn read_form(a: &Attrs) -> FormLayout {
    FormLayout {
        client_size: a.size(),
        background_image: a.text("background"),
        icon: a.text("icon"),
        transparency_key: a.color("transparency"),
        caption: a.text("caption"),
        show_icon: a.flag("showIcon"),
    }
}

fn read_control(a: &Attrs) -> LayoutControl {
    LayoutControl {
        name: a.text("name").unwrap_or_default(),
        control_type: a.raw("type").map(ControlType::parse).unwrap_or_default(),
        location: a.point(),
        size: a.size(),
        visible: a.flag("visible"),
        enabled: a.flag("enabled"),
        auto_size: a.flag("autoSize"),
        text: a.text("text"),
        fore_color: a.color("foreColor"),
        back_color: a.color("backColor"),
        font: a.font("font"),
        background_image: a.text("background"),
        image: a.text("image"),
        text_align: a.parsed("textAlign", ContentAlignment::parse),
        size_mode: a.parsed("sizeMode", SizeMode::parse),
        url: a.text("url"),
        cursor: a.text("cursor"),
        background_layout: a.parsed("backgroundLayout", ImageLayout::parse),
    }
}

fn read_image_button(a: &Attrs) -> ImageButtonDefinition {
    let mut button = ImageButtonDefinition::new(a.text("target").unwrap_or_default());
    read_visuals(a, &mut button);
    button.use_blink_state = a.flag("useBlinkState").unwrap_or(false);
    button
}

fn read_dynamic_button(a: &Attrs) -> DynamicButtonDefinition {
    let mut button = ImageButtonDefinition::new(a.text("name").unwrap_or_default());
    read_visuals(a, &mut button);
    button.use_blink_state = a.flag("useBlinkState").unwrap_or(false);
    button.checkable = a.flag("checkable").unwrap_or(false);
    DynamicButtonDefinition {
        button,
        location: a.point(),
        size: a.size(),
        action: a.text("action"),
        argument: a.text("argument"),
        visible: a.flag("visible").unwrap_or(true),
        enabled: a.flag("enabled").unwrap_or(true),
        size_mode: a.parsed("sizeMode", SizeMode::parse),
        background_layout: a.parsed("backgroundLayout", ImageLayout::parse),
    }
}

fn read_visuals(a: &Attrs, button: &mut ImageButtonDefinition) {
    for state in VisualState::ALL {
        button.visuals.set(state, a.text(state.attr()));
    }
}
