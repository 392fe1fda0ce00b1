//! Absolute-positioning geometry.

use serde::Serialize;

/// A position in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Self = Self::new(0, 0);
}

/// A width/height pair. The all-zero size is the "unset" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const EMPTY: Self = Self::new(0, 0);

    /// True for the zero-area sentinel (both dimensions zero).
    pub const fn is_empty(self) -> bool {
        self.width == 0 && self.height == 0
    }
}
