use super::UserPoint;

/// Gradient space spans [-819.2, 819.2] on both axes before the gradient matrix applies.
pub const GRADIENT_BOX_SIZE: f64 = 1638.4;

/// 2D affine transform.
///
/// Maps `(x, y)` to `(a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    #[inline]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    #[inline]
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Matrix that maps the unit gradient box onto a `width × height` box at
    /// `(tx, ty)`, rotated by `rotation` radians.
    pub fn gradient_box(width: f64, height: f64, rotation: f64, tx: f64, ty: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self::new(
            cos * width / GRADIENT_BOX_SIZE,
            sin * height / GRADIENT_BOX_SIZE,
            -sin * width / GRADIENT_BOX_SIZE,
            cos * height / GRADIENT_BOX_SIZE,
            tx + width / 2.0,
            ty + height / 2.0,
        )
    }

    /// Returns `self` followed by `next`.
    pub fn concat(&self, next: &Matrix) -> Matrix {
        Matrix::new(
            self.a * next.a + self.b * next.c,
            self.a * next.b + self.b * next.d,
            self.c * next.a + self.d * next.c,
            self.c * next.b + self.d * next.d,
            self.tx * next.a + self.ty * next.c + next.tx,
            self.tx * next.b + self.ty * next.d + next.ty,
        )
    }

    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Matrix {
        self.concat(&Matrix::translation(dx, dy))
    }

    #[inline]
    pub fn scale(&self, sx: f64, sy: f64) -> Matrix {
        self.concat(&Matrix::scaling(sx, sy))
    }

    #[inline]
    pub fn rotate(&self, radians: f64) -> Matrix {
        self.concat(&Matrix::rotation(radians))
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Matrix::new(
            self.d * inv,
            -self.b * inv,
            -self.c * inv,
            self.a * inv,
            (self.c * self.ty - self.d * self.tx) * inv,
            (self.b * self.tx - self.a * self.ty) * inv,
        ))
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    #[inline]
    pub fn apply_point(&self, p: UserPoint) -> UserPoint {
        let (x, y) = self.apply(p.x as f64, p.y as f64);
        UserPoint::new(x as f32, y as f32)
    }
}
