//! Asset path resolution.
//!
//! Layout files store asset references relative to an asset directory,
//! with `/` separators regardless of platform. Backslashes written by
//! older tools are accepted on input.

use std::path::{Component, Path, PathBuf};

use crate::model::LayoutDefinition;

/// Directory containing the layout file, or the working directory for an
/// unsaved layout.
pub fn layout_directory(def: &LayoutDefinition) -> PathBuf {
    match def.source_path.as_deref().and_then(Path::parent) {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Asset directory as an editor sees it.
///
/// A rooted `asset_directory` is used as is; a relative one is joined to
/// the layout directory. Existence is not checked.
pub fn asset_base_directory(def: &LayoutDefinition) -> PathBuf {
    let layout_dir = layout_directory(def);
    match def.asset_directory.as_deref().filter(|d| !d.is_empty()) {
        Some(dir) => layout_dir.join(separators(dir)),
        None => layout_dir,
    }
}

/// Asset directory used when binding a layout loaded from `layout_path`.
///
/// The layout's own directory, replaced by `<dir>/<asset_dir>` only when
/// that directory exists.
pub fn runtime_asset_directory(layout_path: &Path, asset_dir: Option<&str>) -> PathBuf {
    let base = layout_path.parent().unwrap_or(Path::new("")).to_path_buf();
    if let Some(dir) = asset_dir.filter(|d| !d.is_empty()) {
        let candidate = base.join(separators(dir));
        if candidate.is_dir() {
            return candidate;
        }
        log::debug!(
            "Asset directory {} not found -- using {}",
            candidate.display(),
            base.display()
        );
    }
    base
}

/// Resolve an asset reference against `base`. Empty references resolve to
/// nothing; rooted ones are returned unchanged.
pub fn resolve_asset_path(base: &Path, value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        return None;
    }
    Some(base.join(separators(value)))
}

/// Path of `target` relative to `base`, joined with `/`.
///
/// `None` when the two share no leading component (e.g. different drives)
/// or are the same path.
pub fn make_relative(base: &Path, target: &Path) -> Option<String> {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();
    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 || (common == target.len() && common == base.len()) {
        return None;
    }
    let parts: Vec<String> = std::iter::repeat_n("..".to_string(), base.len() - common)
        .chain(
            target[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect();
    Some(parts.join("/"))
}

/// Canonical stored form of an asset reference.
///
/// Rooted paths become relative to `base` when possible; everything else
/// just has its separators normalized to `/`.
pub fn normalize_asset_path(value: &str, base: Option<&Path>) -> String {
    if value.is_empty() {
        return String::new();
    }
    let path = Path::new(value);
    if path.is_absolute() {
        return base
            .and_then(|b| make_relative(b, path))
            .unwrap_or_else(|| value.to_string());
    }
    value.replace('\\', "/")
}

fn separators(value: &str) -> String {
    value.replace('\\', "/")
}
