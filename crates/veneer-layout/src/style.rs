//! Enumerated style values and the font description.
//!
//! Every enum parses its layout-file name case-insensitively and prints
//! the canonical spelling back out.

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;

/// Point size used when a font string carries an unparsable size.
pub const DEFAULT_FONT_SIZE: f32 = 8.25;

/// Declared kind of a static layout control (`control@type`).
///
/// Informational for editors; binding dispatches on the live control's
/// capability, not on this tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ControlType {
    #[default]
    Unknown,
    Label,
    PictureBox,
    WebBrowser,
    Panel,
}

impl ControlType {
    pub const ALL: [Self; 5] = [
        Self::Unknown,
        Self::Label,
        Self::PictureBox,
        Self::WebBrowser,
        Self::Panel,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Label => "Label",
            Self::PictureBox => "PictureBox",
            Self::WebBrowser => "WebBrowser",
            Self::Panel => "Panel",
        }
    }

    /// Unrecognized or empty names map to `Unknown`.
    pub fn parse(s: &str) -> Self {
        lookup(&Self::ALL, Self::name, s).unwrap_or_default()
    }
}

/// Text placement inside a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentAlignment {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ContentAlignment {
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "TopLeft",
            Self::TopCenter => "TopCenter",
            Self::TopRight => "TopRight",
            Self::MiddleLeft => "MiddleLeft",
            Self::MiddleCenter => "MiddleCenter",
            Self::MiddleRight => "MiddleRight",
            Self::BottomLeft => "BottomLeft",
            Self::BottomCenter => "BottomCenter",
            Self::BottomRight => "BottomRight",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        lookup(&Self::ALL, Self::name, s)
    }
}

/// How an image-surface control fits its foreground image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeMode {
    Normal,
    StretchImage,
    AutoSize,
    CenterImage,
    Zoom,
}

impl SizeMode {
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::StretchImage,
        Self::AutoSize,
        Self::CenterImage,
        Self::Zoom,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StretchImage => "StretchImage",
            Self::AutoSize => "AutoSize",
            Self::CenterImage => "CenterImage",
            Self::Zoom => "Zoom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        lookup(&Self::ALL, Self::name, s)
    }
}

/// Background image tiling (`backgroundLayout`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ImageLayout {
    #[default]
    None,
    Tile,
    Center,
    Stretch,
    Zoom,
}

impl ImageLayout {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Tile,
        Self::Center,
        Self::Stretch,
        Self::Zoom,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Tile => "Tile",
            Self::Center => "Center",
            Self::Stretch => "Stretch",
            Self::Zoom => "Zoom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        lookup(&Self::ALL, Self::name, s)
    }
}

fn lookup<T: Copy>(all: &[T], name: fn(T) -> &'static str, s: &str) -> Option<T> {
    let s = s.trim();
    all.iter().copied().find(|v| name(*v).eq_ignore_ascii_case(s))
}

bitflags! {
    /// Font style bits; `empty()` is regular weight.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct FontStyle: u8 {
        const BOLD = 0b0001;
        const ITALIC = 0b0010;
        const UNDERLINE = 0b0100;
        const STRIKEOUT = 0b1000;
    }
}

impl FontStyle {
    const NAMES: [(Self, &'static str); 4] = [
        (Self::BOLD, "Bold"),
        (Self::ITALIC, "Italic"),
        (Self::UNDERLINE, "Underline"),
        (Self::STRIKEOUT, "Strikeout"),
    ];

    /// Parse a single style token (`Bold`, `regular`, ...).
    fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("Regular") {
            return Some(Self::empty());
        }
        Self::NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(token))
            .map(|(f, _)| *f)
    }

    /// Combine every recognized token; unknown tokens are ignored.
    pub fn parse_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        tokens
            .into_iter()
            .flat_map(|t| t.split(['|', ' ']))
            .filter(|t| !t.trim().is_empty())
            .filter_map(|t| {
                let parsed = Self::parse_token(t);
                if parsed.is_none() {
                    log::warn!("Ignoring unknown font style '{}'", t.trim());
                }
                parsed
            })
            .fold(Self::empty(), |acc, f| acc | f)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Regular");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Font description, stored in layout files as `Family,Size,Style`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontLayout {
    pub family: String,
    pub size: f32,
    pub style: FontStyle,
}

impl FontLayout {
    pub fn new(family: impl Into<String>, size: f32, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            size,
            style,
        }
    }

    /// Parse `Family,Size[,Style[, Style...]]`.
    ///
    /// Fewer than two parts yields `None`. A bad size falls back to
    /// [`DEFAULT_FONT_SIZE`].
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',');
        let family = parts.next()?.trim();
        let size_text = parts.next()?.trim();
        let size = match size_text.parse::<f32>() {
            Ok(s) if s.is_finite() => s,
            _ => {
                log::warn!("Bad font size '{size_text}' -- using {DEFAULT_FONT_SIZE}");
                DEFAULT_FONT_SIZE
            },
        };
        let style = FontStyle::parse_tokens(parts);
        Some(Self::new(family, size, style))
    }

    /// Encode as the layout-file attribute value.
    pub fn to_attr(&self) -> String {
        format!("{},{},{}", self.family, self.size, self.style)
    }

    /// The font a host should actually use, or `None` to keep its own.
    ///
    /// A blank family means "host default"; a non-positive size becomes
    /// [`DEFAULT_FONT_SIZE`].
    pub fn effective(&self) -> Option<Self> {
        if self.family.trim().is_empty() {
            return None;
        }
        let size = if self.size > 0.0 {
            self.size
        } else {
            DEFAULT_FONT_SIZE
        };
        Some(Self::new(self.family.trim(), size, self.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_type_parse_ignores_case() {
        assert_eq!(ControlType::parse("label"), ControlType::Label);
        assert_eq!(ControlType::parse("PICTUREBOX"), ControlType::PictureBox);
        assert_eq!(ControlType::parse("Slider"), ControlType::Unknown);
        assert_eq!(ControlType::parse(""), ControlType::Unknown);
    }

    #[test]
    fn enum_names_roundtrip() {
        for a in ContentAlignment::ALL {
            assert_eq!(ContentAlignment::parse(a.name()), Some(a));
        }
        for m in SizeMode::ALL {
            assert_eq!(SizeMode::parse(m.name()), Some(m));
        }
        for l in ImageLayout::ALL {
            assert_eq!(ImageLayout::parse(l.name()), Some(l));
        }
    }

    #[test]
    fn unknown_enum_values_rejected() {
        assert_eq!(SizeMode::parse("Fill"), None);
        assert_eq!(ImageLayout::parse("Mosaic"), None);
        assert_eq!(ContentAlignment::parse("Centre"), None);
    }

    #[test]
    fn font_parse_full() {
        let f = FontLayout::parse("Tahoma,9.75,Bold").unwrap();
        assert_eq!(f.family, "Tahoma");
        assert!((f.size - 9.75).abs() < f32::EPSILON);
        assert_eq!(f.style, FontStyle::BOLD);
    }

    #[test]
    fn font_parse_combined_style() {
        let f = FontLayout::parse("Arial,12,Bold, Italic").unwrap();
        assert_eq!(f.style, FontStyle::BOLD | FontStyle::ITALIC);
        let g = FontLayout::parse("Arial,12,underline|strikeout").unwrap();
        assert_eq!(g.style, FontStyle::UNDERLINE | FontStyle::STRIKEOUT);
    }

    #[test]
    fn font_parse_without_style_is_regular() {
        let f = FontLayout::parse("Verdana,10").unwrap();
        assert!(f.style.is_empty());
    }

    #[test]
    fn font_parse_needs_two_parts() {
        assert!(FontLayout::parse("Verdana").is_none());
        assert!(FontLayout::parse("").is_none());
    }

    #[test]
    fn font_bad_size_uses_default() {
        let f = FontLayout::parse("Verdana,huge,Bold").unwrap();
        assert!((f.size - DEFAULT_FONT_SIZE).abs() < f32::EPSILON);
        assert_eq!(f.style, FontStyle::BOLD);
    }

    #[test]
    fn font_attr_roundtrip() {
        let f = FontLayout::new("Segoe UI", 11.5, FontStyle::BOLD | FontStyle::UNDERLINE);
        assert_eq!(f.to_attr(), "Segoe UI,11.5,Bold, Underline");
        assert_eq!(FontLayout::parse(&f.to_attr()), Some(f));
    }

    #[test]
    fn regular_style_text() {
        assert_eq!(FontStyle::empty().to_string(), "Regular");
        let f = FontLayout::new("Arial", 8.0, FontStyle::empty());
        assert_eq!(f.to_attr(), "Arial,8,Regular");
    }

    #[test]
    fn effective_font_rules() {
        assert!(FontLayout::new("  ", 10.0, FontStyle::BOLD).effective().is_none());
        let f = FontLayout::new("Arial", 0.0, FontStyle::empty())
            .effective()
            .unwrap();
        assert!((f.size - DEFAULT_FONT_SIZE).abs() < f32::EPSILON);
    }
}
