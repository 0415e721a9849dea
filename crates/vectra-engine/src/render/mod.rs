//! Renderer-facing types.
//!
//! [`Graphics`](crate::graphics::Graphics) converts its command list into
//! [`RenderData`] batches; a [`RenderTarget`] consumes them together with a
//! [`Transform`]. Renderers keep per-object resources in [`RenderCache`] slots.
//!
//! Convention:
//! - user space is top-left origin, +Y down (same as pixel space)
//! - colours crossing this boundary are straight-alpha `0xAARRGGBB`

mod cache;
mod data;
mod surface_target;
mod target;
mod transform;

pub use cache::RenderCache;
pub(crate) use data::Cursor;
pub use data::{LineData, RenderData, SolidData, TriangleData};
pub use surface_target::{FrameStats, SurfaceTarget};
pub use target::{FontId, RenderTarget, TextData, TextList, Tile};
pub use transform::{BlendMode, ColorTransform, Mask, Transform};
