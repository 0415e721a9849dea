//! Style descriptors: how subsequent path geometry is painted.
//!
//! Scope:
//! - fills (solid, gradient, bitmap)
//! - strokes, each owning the fill used for its outline
//!
//! Descriptors are plain values; build them with the `with_*` methods and
//! hand them to [`Graphics`](crate::graphics::Graphics).

mod bitmap;
mod gradient;
mod solid;
mod stroke;

pub use bitmap::BitmapFill;
pub use gradient::{GradStop, GradientFill, GradientType, InterpolationMethod, SpreadMethod};
pub use solid::{SolidFill, pack_argb};
pub use stroke::{MAX_THICKNESS, Stroke, StrokeCaps, StrokeJoints, StrokeScaleMode};

/// Paint source for enclosed path area.
///
/// "No fill" is `Option::<Fill>::None` rather than a variant, so renderers
/// never receive an end-fill to dispatch on.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(SolidFill),
    Gradient(GradientFill),
    Bitmap(BitmapFill),
}

impl Fill {
    #[inline]
    pub fn solid(rgb: u32, alpha: f32) -> Self {
        Fill::Solid(SolidFill::new(rgb, alpha))
    }

    /// True when the fill cannot paint anything (e.g. a gradient without stops).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        match self {
            Fill::Solid(_) | Fill::Bitmap(_) => false,
            Fill::Gradient(g) => g.is_degenerate(),
        }
    }

    /// Conservative opacity test: bitmaps are treated as potentially translucent
    /// unless their format carries no alpha channel.
    pub fn is_opaque(&self) -> bool {
        match self {
            Fill::Solid(s) => s.is_opaque(),
            Fill::Gradient(g) => g.is_opaque(),
            Fill::Bitmap(b) => b
                .surface
                .try_borrow()
                .map(|s| !s.format().has_alpha())
                .unwrap_or(false),
        }
    }
}

impl From<SolidFill> for Fill {
    fn from(fill: SolidFill) -> Self {
        Fill::Solid(fill)
    }
}

impl From<GradientFill> for Fill {
    fn from(fill: GradientFill) -> Self {
        Fill::Gradient(fill)
    }
}

impl From<BitmapFill> for Fill {
    fn from(fill: BitmapFill) -> Self {
        Fill::Bitmap(fill)
    }
}
