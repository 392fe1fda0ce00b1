//! Layout file codec.
//!
//! The document is a `<layout>` root carrying an optional `basePath`, with
//! `form`, `control`, `imageButton`, `toggleButton` and `dynamicButton`
//! children. Nearly all data lives in attributes.
//!
//! [`load`] never fails: a missing or unreadable file becomes an empty
//! definition so the host can still reach a usable state. [`try_load`]
//! exposes the underlying error for tools that want to report it.

mod attr;
mod reader;
mod writer;

use std::path::Path;

use veneer_types::Result;

use crate::model::LayoutDefinition;

pub use attr::parse_bool;

/// Name of the document element.
pub const ROOT_ELEMENT: &str = "layout";

/// Parse a layout document from text.
pub fn from_xml_str(xml: &str) -> Result<LayoutDefinition> {
    reader::parse(xml)
}

/// Encode a layout document. Unset fields are omitted.
pub fn to_xml_string(def: &LayoutDefinition) -> Result<String> {
    writer::write(def)
}

/// Load a layout file, reporting read and syntax errors.
///
/// A missing file is not an error: it yields an empty definition with no
/// source path.
pub fn try_load(path: &Path) -> Result<LayoutDefinition> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No layout at {} -- using defaults", path.display());
            return Ok(LayoutDefinition::new());
        },
        Err(e) => return Err(e.into()),
    };
    let mut def = from_xml_str(&text)?;
    def.source_path = Some(path.to_path_buf());
    log::debug!(
        "Loaded layout {} ({} controls, {} image buttons, {} dynamic buttons)",
        path.display(),
        def.controls.len(),
        def.image_buttons.len(),
        def.dynamic_buttons.len()
    );
    Ok(def)
}

/// Load a layout file, degrading every failure to an empty definition.
///
/// The source path is kept whenever the file exists, so a later save goes
/// back to the same place.
pub fn load(path: &Path) -> LayoutDefinition {
    match try_load(path) {
        Ok(def) => def,
        Err(e) => {
            log::warn!("Failed to load layout {}: {e}", path.display());
            LayoutDefinition {
                source_path: Some(path.to_path_buf()),
                ..LayoutDefinition::new()
            }
        },
    }
}

/// Write `def` to `path`, creating the parent directory if needed.
///
/// On success `def.source_path` is updated to `path`.
pub fn save(def: &mut LayoutDefinition, path: &Path) -> Result<()> {
    let xml = to_xml_string(def)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, xml)?;
    def.source_path = Some(path.to_path_buf());
    log::info!("Saved layout to {}", path.display());
    Ok(())
}
