use super::Matrix;

/// 4×4 projective transform, column-major (`raw[col * 4 + row]`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix3D {
    pub raw: [f64; 16],
}

impl Default for Matrix3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3D {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            raw: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::identity();
        m.raw[12] = x;
        m.raw[13] = y;
        m.raw[14] = z;
        m
    }

    /// Lifts a 2D affine transform into the z = 0 plane.
    pub fn from_matrix(m: &Matrix) -> Self {
        let mut out = Self::identity();
        out.raw[0] = m.a;
        out.raw[1] = m.b;
        out.raw[4] = m.c;
        out.raw[5] = m.d;
        out.raw[12] = m.tx;
        out.raw[13] = m.ty;
        out
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.raw[col * 4 + row]
    }

    /// Returns a matrix that applies `self` first and then `next`.
    pub fn append(&self, next: &Matrix3D) -> Matrix3D {
        let mut raw = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                raw[col * 4 + row] = (0..4).map(|k| next.at(row, k) * self.at(k, col)).sum();
            }
        }
        Matrix3D { raw }
    }

    /// Transforms a point, applying the perspective divide when `w` is neither 0 nor 1.
    pub fn transform_point(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let m = &self.raw;
        let tx = m[0] * x + m[4] * y + m[8] * z + m[12];
        let ty = m[1] * x + m[5] * y + m[9] * z + m[13];
        let tz = m[2] * x + m[6] * y + m[10] * z + m[14];
        let w = m[3] * x + m[7] * y + m[11] * z + m[15];
        if w != 0.0 && w != 1.0 {
            (tx / w, ty / w, tz / w)
        } else {
            (tx, ty, tz)
        }
    }
}
