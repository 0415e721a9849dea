/// Nine-slice scaling grid.
///
/// When active, the inner rectangle `[x0, x1] × [y0, y1]` (object space)
/// absorbs all of the scaling; the border bands outside it keep their size,
/// unless the scaled object is too small to hold them, in which case the
/// borders shrink proportionally and the centre collapses.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Scale9 {
    pub active: bool,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Object-space bounds used when mapping through a [`Scale9`] grid.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl Scale9 {
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { active: true, x0, y0, x1, y1 }
    }

    #[inline]
    pub const fn inactive() -> Self {
        Self { active: false, x0: 0.0, y0: 0.0, x1: 0.0, y1: 0.0 }
    }

    /// Maps an object-space point to scaled space for an object with the
    /// given `bounds` drawn at scale `(sx, sy)`.
    pub fn map(&self, x: f64, y: f64, bounds: Bounds, sx: f64, sy: f64) -> (f64, f64) {
        if !self.active {
            return (x * sx, y * sy);
        }
        (
            map_axis(x, bounds.x0, bounds.x1, self.x0, self.x1, sx),
            map_axis(y, bounds.y0, bounds.y1, self.y0, self.y1, sy),
        )
    }
}

fn map_axis(v: f64, b0: f64, b1: f64, g0: f64, g1: f64, scale: f64) -> f64 {
    let total = (b1 - b0) * scale;
    let left = (g0 - b0).max(0.0);
    let right = (b1 - g1).max(0.0);
    let borders = left + right;

    let k = if borders > 0.0 && total < borders {
        (total / borders).max(0.0)
    } else {
        1.0
    };
    let mid = if g1 > g0 {
        (total - borders * k).max(0.0) / (g1 - g0)
    } else {
        0.0
    };

    let origin = b0 * scale;
    if v <= g0 {
        origin + (v - b0) * k
    } else if v >= g1 {
        origin + total - (b1 - v) * k
    } else {
        origin + left * k + (v - g0) * mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_is_plain_scale() {
        let s = Scale9::inactive();
        assert_eq!(s.map(3.0, 4.0, Bounds::new(0.0, 0.0, 10.0, 10.0), 2.0, 3.0), (6.0, 12.0));
    }

    #[test]
    fn borders_keep_their_size() {
        let s = Scale9::new(10.0, 10.0, 90.0, 90.0);
        let b = Bounds::new(0.0, 0.0, 100.0, 100.0);

        // 4× wider: the left border still spans 10 units, the right edge lands at 400.
        assert_eq!(s.map(10.0, 0.0, b, 4.0, 1.0).0, 10.0);
        assert_eq!(s.map(100.0, 0.0, b, 4.0, 1.0).0, 400.0);
        assert_eq!(s.map(90.0, 0.0, b, 4.0, 1.0).0, 390.0);
        // Centre of the grid maps to the centre of the scaled object.
        assert_eq!(s.map(50.0, 0.0, b, 4.0, 1.0).0, 200.0);
    }

    #[test]
    fn borders_shrink_when_too_small() {
        let s = Scale9::new(10.0, 10.0, 90.0, 90.0);
        let b = Bounds::new(0.0, 0.0, 100.0, 100.0);
        // Scaled width 10 cannot hold 20 units of border: both halve, centre vanishes.
        assert_eq!(s.map(10.0, 0.0, b, 0.1, 1.0).0, 5.0);
        assert_eq!(s.map(50.0, 0.0, b, 0.1, 1.0).0, 5.0);
        assert_eq!(s.map(100.0, 0.0, b, 0.1, 1.0).0, 10.0);
    }
}
