use super::{Fill, SolidFill};

/// Line end style.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum StrokeCaps {
    None,
    #[default]
    Round,
    Square,
}

/// Line corner style.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum StrokeJoints {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// How thickness reacts to the object's transform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum StrokeScaleMode {
    #[default]
    Normal,
    None,
    Vertical,
    Horizontal,
}

/// Largest accepted stroke thickness.
pub const MAX_THICKNESS: f64 = 255.0;

/// Outline style. Owns the fill used to paint the outline.
///
/// A stroke without a fill (or with a NaN thickness) is a "clear" stroke:
/// recording it ends outline painting for subsequent paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub fill: Option<Fill>,
    pub thickness: f64,
    pub pixel_hinting: bool,
    pub scale_mode: StrokeScaleMode,
    pub caps: StrokeCaps,
    pub joints: StrokeJoints,
    pub miter_limit: f64,
}

impl Stroke {
    /// Creates a stroke painted with `fill`. Thickness is clamped to
    /// [0, [`MAX_THICKNESS`]]; NaN is kept and marks the stroke as clear.
    pub fn new(thickness: f64, fill: Fill) -> Self {
        let thickness = if thickness.is_nan() { thickness } else { thickness.clamp(0.0, MAX_THICKNESS) };
        Self {
            fill: Some(fill),
            thickness,
            pixel_hinting: false,
            scale_mode: StrokeScaleMode::default(),
            caps: StrokeCaps::default(),
            joints: StrokeJoints::default(),
            miter_limit: 3.0,
        }
    }

    #[inline]
    pub fn solid(thickness: f64, rgb: u32, alpha: f32) -> Self {
        Self::new(thickness, Fill::Solid(SolidFill::new(rgb, alpha)))
    }

    /// The "no outline" stroke.
    pub fn clear() -> Self {
        Self {
            fill: None,
            ..Self::solid(0.0, 0, 1.0)
        }
    }

    #[inline]
    pub fn is_clear(&self) -> bool {
        self.fill.is_none() || self.thickness.is_nan()
    }

    pub fn with_caps(mut self, caps: StrokeCaps) -> Self {
        self.caps = caps;
        self
    }

    pub fn with_joints(mut self, joints: StrokeJoints) -> Self {
        self.joints = joints;
        self
    }

    pub fn with_scale_mode(mut self, scale_mode: StrokeScaleMode) -> Self {
        self.scale_mode = scale_mode;
        self
    }

    /// Miter limit, kept at 1 or above.
    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit.max(1.0);
        self
    }

    pub fn with_pixel_hinting(mut self, pixel_hinting: bool) -> Self {
        self.pixel_hinting = pixel_hinting;
        self
    }
}
