//! Runtime skinning for veneer layouts.
//!
//! [`binder::apply`] binds a [`veneer_layout::LayoutDefinition`] to a live
//! [`HostWindow`] and returns a [`RuntimeContext`]. The host then forwards
//! pointer events and timer ticks to the context, which swaps the artwork
//! of each skinned control between its visual states.

pub mod artwork;
pub mod binder;
pub mod context;
pub mod host;
pub mod skin_set;

pub use artwork::{FsImageLoader, ImageLoader, MemoryImageLoader, SkinImage};
pub use binder::{apply, apply_file, reapply, teardown};
pub use context::RuntimeContext;
pub use host::{Capability, Control, ControlId, ControlKind, FormState, HostWindow, MemoryHost};
pub use skin_set::SkinImageSet;
