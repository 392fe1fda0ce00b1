//! Attribute access for layout elements.
//!
//! Every accessor is forgiving: a missing attribute is unset, and a
//! malformed value is logged and treated as unset (or zero for integers).

use quick_xml::events::BytesStart;

use veneer_types::{Color, Point, Result, Size, color};

use crate::style::FontLayout;

/// Decoded attributes of one element, in document order.
pub(crate) struct Attrs {
    element: String,
    pairs: Vec<(String, String)>,
}

impl Attrs {
    /// Decode every attribute of `e`. Only syntax errors fail.
    pub(crate) fn read(e: &BytesStart<'_>) -> Result<Self> {
        let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut pairs = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            pairs.push((key, value));
        }
        Ok(Self { element, pairs })
    }

    /// Raw value, present even when empty.
    pub(crate) fn raw(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Non-empty string value.
    pub(crate) fn text(&self, key: &str) -> Option<String> {
        self.raw(key).filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// Integer value; absent or malformed reads as zero.
    pub(crate) fn int(&self, key: &str) -> i32 {
        let Some(value) = self.raw(key).filter(|v| !v.is_empty()) else {
            return 0;
        };
        match value.trim().parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                self.bad(key, value);
                0
            },
        }
    }

    /// `x`/`y` pair.
    pub(crate) fn point(&self) -> Point {
        Point::new(self.int("x"), self.int("y"))
    }

    /// `width`/`height` pair.
    pub(crate) fn size(&self) -> Size {
        Size::new(self.int("width"), self.int("height"))
    }

    /// Tri-state boolean: `true`/`1`/`yes` or `false`/`0`/`no`.
    pub(crate) fn flag(&self, key: &str) -> Option<bool> {
        let value = self.raw(key).filter(|v| !v.is_empty())?;
        match parse_bool(value) {
            Some(b) => Some(b),
            None => {
                self.bad(key, value);
                None
            },
        }
    }

    pub(crate) fn color(&self, key: &str) -> Option<Color> {
        self.parsed(key, color::parse_color)
    }

    pub(crate) fn font(&self, key: &str) -> Option<FontLayout> {
        self.parsed(key, FontLayout::parse)
    }

    /// Apply `parse` to a non-empty value, logging rejects.
    pub(crate) fn parsed<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let value = self.raw(key).filter(|v| !v.is_empty())?;
        let parsed = parse(value);
        if parsed.is_none() {
            self.bad(key, value);
        }
        parsed
    }

    fn bad(&self, key: &str, value: &str) {
        log::warn!(
            "Ignoring malformed {}@{key} value '{value}'",
            self.element
        );
    }
}

/// Case-insensitive boolean words accepted in layout files.
pub fn parse_bool(value: &str) -> Option<bool> {
    let v = value.trim();
    if ["true", "1", "yes"].iter().any(|t| t.eq_ignore_ascii_case(v)) {
        Some(true)
    } else if ["false", "0", "no"].iter().any(|t| t.eq_ignore_ascii_case(v)) {
        Some(false)
    } else {
        None
    }
}

/// Text form of a boolean attribute.
pub(crate) const fn bool_text(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}
