use crate::coords::{Matrix, Matrix3D, Rect, Scale9, UserPoint};

/// How a drawable is composited onto what is below it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Add,
}

/// Per-channel colour scale and offset, applied to straight (non-premultiplied)
/// 0..=255 channel values: `c' = clamp(c * scale + offset)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorTransform {
    pub red_scale: f64,
    pub red_offset: f64,
    pub green_scale: f64,
    pub green_offset: f64,
    pub blue_scale: f64,
    pub blue_offset: f64,
    pub alpha_scale: f64,
    pub alpha_offset: f64,
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorTransform {
    pub const fn identity() -> Self {
        Self {
            red_scale: 1.0,
            red_offset: 0.0,
            green_scale: 1.0,
            green_offset: 0.0,
            blue_scale: 1.0,
            blue_offset: 0.0,
            alpha_scale: 1.0,
            alpha_offset: 0.0,
        }
    }

    /// Alpha-only transform.
    pub const fn alpha(alpha: f64) -> Self {
        let mut t = Self::identity();
        t.alpha_scale = alpha;
        t
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Returns a transform that applies `self` first and then `next`.
    pub fn concat(&self, next: &ColorTransform) -> ColorTransform {
        ColorTransform {
            red_scale: self.red_scale * next.red_scale,
            red_offset: self.red_offset * next.red_scale + next.red_offset,
            green_scale: self.green_scale * next.green_scale,
            green_offset: self.green_offset * next.green_scale + next.green_offset,
            blue_scale: self.blue_scale * next.blue_scale,
            blue_offset: self.blue_offset * next.blue_scale + next.blue_offset,
            alpha_scale: self.alpha_scale * next.alpha_scale,
            alpha_offset: self.alpha_offset * next.alpha_scale + next.alpha_offset,
        }
    }

    /// Transforms a `0xAARRGGBB` colour.
    pub fn apply_argb(&self, argb: u32) -> u32 {
        let [a, r, g, b] = argb.to_be_bytes();
        u32::from_be_bytes([
            channel(a, self.alpha_scale, self.alpha_offset),
            channel(r, self.red_scale, self.red_offset),
            channel(g, self.green_scale, self.green_offset),
            channel(b, self.blue_scale, self.blue_offset),
        ])
    }
}

#[inline]
fn channel(c: u8, scale: f64, offset: f64) -> u8 {
    let v = f64::from(c) * scale + offset;
    // NaN maps to 0.
    if v >= 0.0 { v.round().min(255.0) as u8 } else { 0 }
}

/// Opaque mask slot. Renderers that support masking attach their own state;
/// the core never inspects it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mask {
    _opaque: (),
}

impl Mask {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything a renderer needs to place one drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub matrix3d: Matrix3D,
    pub matrix: Matrix,
    pub scale9: Scale9,

    pub alpha: f64,
    pub blend_mode: BlendMode,
    pub color_transform: ColorTransform,

    pub clip_rect: Option<Rect>,
    pub mask: Option<Mask>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix3d: Matrix3D::identity(),
            matrix: Matrix::identity(),
            scale9: Scale9::inactive(),
            alpha: 1.0,
            blend_mode: BlendMode::Normal,
            color_transform: ColorTransform::identity(),
            clip_rect: None,
            mask: None,
        }
    }
}

impl Transform {
    #[inline]
    pub fn from_matrix(matrix: Matrix) -> Self {
        Self { matrix, ..Self::default() }
    }

    /// True when geometry prepared under `self` cannot be reused under
    /// `other`.
    ///
    /// A pure 2D translation keeps the space; any change to the linear part,
    /// the 3D matrix or the scale-9 grid does not. Colour, alpha and clipping
    /// never affect geometry.
    pub fn different_space(&self, other: &Transform) -> bool {
        let (m, o) = (&self.matrix, &other.matrix);
        m.a != o.a
            || m.b != o.b
            || m.c != o.c
            || m.d != o.d
            || self.matrix3d != other.matrix3d
            || self.scale9 != other.scale9
            || (!self.matrix3d.is_identity() && (m.tx != o.tx || m.ty != o.ty))
    }

    /// Maps a user-space point through the 2D matrix and then the 3D one.
    pub fn apply(&self, x: f32, y: f32) -> UserPoint {
        let (x, y) = self.matrix.apply(f64::from(x), f64::from(y));
        let (x, y) = if self.matrix3d.is_identity() {
            (x, y)
        } else {
            let (x, y, _) = self.matrix3d.transform_point(x, y, 0.0);
            (x, y)
        };
        UserPoint::new(x as f32, y as f32)
    }
}
