//! Path encoding.
//!
//! Two representations:
//! - [`Path`]: byte-sized commands plus a flat `f32` operand stream
//! - [`TrianglePath`]: a pre-tessellated mesh with optional UV(T) data

mod command;
mod error;
mod triangles;
mod vector;

pub use command::{PathCommand, WindingRule};
pub use error::PathError;
pub use triangles::{TriangleCulling, TrianglePath, UvtDim};
pub use vector::{Path, Segments};
