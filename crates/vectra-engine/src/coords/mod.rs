//! Geometric value types shared by styles, paths, surfaces and renderers.
//!
//! Canonical spaces:
//! - user (object) space: `f32` points, origin top-left, +X right, +Y down
//! - pixel space: integer [`Rect`]s addressing surface buffers

mod matrix;
mod matrix3d;
mod point;
mod rect;
mod scale9;

pub use matrix::{GRADIENT_BOX_SIZE, Matrix};
pub use matrix3d::Matrix3D;
pub use point::UserPoint;
pub use rect::Rect;
pub(crate) use rect::saturate_i32;
pub use scale9::{Bounds, Scale9};
