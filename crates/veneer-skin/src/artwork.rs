//! Decoded skin artwork and the loaders that produce it.
//!
//! Loaders distinguish an absent resource (`Ok(None)`, expected and silent)
//! from a file that exists but cannot be read or decoded (`Err`).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use veneer_types::{Result, VeneerError};

struct ImageData {
    path: PathBuf,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

/// A decoded RGBA image. Cloning shares the pixel buffer.
#[derive(Clone)]
pub struct SkinImage {
    data: Arc<ImageData>,
}

impl SkinImage {
    /// Wrap raw RGBA pixels. `rgba` must hold `width * height * 4` bytes.
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            data: Arc::new(ImageData {
                path: path.into(),
                width,
                height,
                rgba,
            }),
        }
    }

    /// A fully transparent image, for tests and placeholder artwork.
    pub fn blank(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self::new(path, width, height, vec![0; len])
    }

    /// File the image was decoded from.
    pub fn path(&self) -> &Path {
        &self.data.path
    }

    pub fn width(&self) -> u32 {
        self.data.width
    }

    pub fn height(&self) -> u32 {
        self.data.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.data.rgba
    }

    /// True when both handles share the same decoded buffer.
    pub fn same_as(&self, other: &SkinImage) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for SkinImage {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for SkinImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkinImage")
            .field("path", &self.data.path)
            .field("width", &self.data.width)
            .field("height", &self.data.height)
            .finish()
    }
}

/// Source of decoded artwork.
pub trait ImageLoader {
    /// Decode the image at `path`. A missing file is `Ok(None)`.
    fn load(&self, path: &Path) -> Result<Option<SkinImage>>;
}

/// Decodes image files from disk (PNG, JPEG, GIF, BMP, ICO).
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, path: &Path) -> Result<Option<SkinImage>> {
        if !path.is_file() {
            return Ok(None);
        }
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                log::debug!("Decoded {} ({width}x{height})", path.display());
                Ok(Some(SkinImage::new(path, width, height, rgba.into_raw())))
            },
            Err(image::ImageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(None)
            },
            Err(e) => Err(VeneerError::Image(format!("{}: {e}", path.display()))),
        }
    }
}

/// Loader serving pre-registered images by path.
#[derive(Debug, Default)]
pub struct MemoryImageLoader {
    images: HashMap<PathBuf, SkinImage>,
    broken: Vec<PathBuf>,
}

impl MemoryImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blank 1x1 image under `path` and return it.
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> SkinImage {
        let path = path.into();
        let img = SkinImage::blank(path.clone(), 1, 1);
        self.images.insert(path, img.clone());
        img
    }

    /// Make `path` behave like a file that exists but fails to decode.
    pub fn insert_broken(&mut self, path: impl Into<PathBuf>) {
        self.broken.push(path.into());
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&self, path: &Path) -> Result<Option<SkinImage>> {
        if self.broken.iter().any(|p| p == path) {
            return Err(VeneerError::Image(format!(
                "{}: unsupported image format",
                path.display()
            )));
        }
        Ok(self.images.get(path).cloned())
    }
}

/// Resolve `value` against `base` and load it, treating every failure as
/// an absent image.
pub fn load_asset(loader: &dyn ImageLoader, base: &Path, value: Option<&str>) -> Option<SkinImage> {
    let path = veneer_layout::paths::resolve_asset_path(base, value?)?;
    match loader.load(&path) {
        Ok(Some(img)) => Some(img),
        Ok(None) => {
            log::debug!("Asset {} not found", path.display());
            None
        },
        Err(e) => {
            log::warn!("Ignoring unreadable asset: {e}");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, w: u32, h: u32) {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn fs_loader_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("go.png");
        write_png(&path, 4, 3);
        let img = FsImageLoader.load(&path).unwrap().unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
        assert_eq!(img.rgba().len(), 4 * 3 * 4);
        assert_eq!(&img.rgba()[..4], &[10, 20, 30, 255]);
        assert_eq!(img.path(), path.as_path());
    }

    #[test]
    fn fs_loader_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsImageLoader.load(&dir.path().join("nope.png")).unwrap().is_none());
    }

    #[test]
    fn fs_loader_garbage_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        let err = FsImageLoader.load(&path).unwrap_err();
        assert!(format!("{err}").contains("image error"));
    }

    #[test]
    fn clones_share_pixels() {
        let a = SkinImage::blank("a.png", 2, 2);
        let b = a.clone();
        let c = SkinImage::blank("a.png", 2, 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn load_asset_swallows_failures() {
        let mut loader = MemoryImageLoader::new();
        let ok = loader.insert("/skin/ok.png");
        loader.insert_broken("/skin/bad.png");
        let base = Path::new("/skin");
        assert_eq!(load_asset(&loader, base, Some("ok.png")), Some(ok));
        assert_eq!(load_asset(&loader, base, Some("bad.png")), None);
        assert_eq!(load_asset(&loader, base, Some("missing.png")), None);
        assert_eq!(load_asset(&loader, base, None), None);
        assert_eq!(load_asset(&loader, base, Some("")), None);
    }
}
