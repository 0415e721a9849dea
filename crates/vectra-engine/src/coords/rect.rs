/// Integer rectangle in pixel space (top-left origin).
///
/// Width and height may be zero or negative; such rectangles are empty and
/// never propagate anything beyond "no area" through [`intersect`](Rect::intersect).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(w: i32, h: i32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Exclusive right edge, saturated to the `i32` range.
    #[inline]
    pub const fn x1(self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge, saturated to the `i32` range.
    #[inline]
    pub const fn y1(self) -> i32 {
        self.y.saturating_add(self.h)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Half-open containment: [x, x1) × [y, y1).
    #[inline]
    pub const fn contains(self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.x1() && py < self.y1()
    }

    /// Returns true when `other` lies entirely inside `self`.
    ///
    /// Empty rectangles are contained as long as their origin is inside the
    /// closed bounds of `self`.
    #[inline]
    pub const fn contains_rect(self, other: Rect) -> bool {
        other.w >= 0
            && other.h >= 0
            && other.x >= self.x
            && other.y >= self.y
            && other.x1() <= self.x1()
            && other.y1() <= self.y1()
    }

    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.w, self.h)
    }

    /// Intersection of two rectangles.
    ///
    /// Always defined. Disjoint inputs produce a rectangle with `w <= 0` or
    /// `h <= 0`; callers test the result with [`is_empty`](Rect::is_empty).
    /// Edges past the `i32` range are clamped to it.
    #[inline]
    pub fn intersect(self, other: Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.x1().min(other.x1());
        let y1 = self.y1().min(other.y1());
        Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

/// Clamps a widened coordinate back into the `i32` range.
#[inline]
pub(crate) fn saturate_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i32, y: i32, w: i32, h: i32) -> Rect { Rect::new(x, y, w, h) }

    // ── edges ─────────────────────────────────────────────────────────────

    #[test]
    fn far_edges() {
        let rect = r(3, 4, 10, 20);
        assert_eq!(rect.x1(), 13);
        assert_eq!(rect.y1(), 24);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0, 0, 10, 10).contains(0, 0));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0, 0, 10, 10).contains(10, 10));
        assert!(r(0, 0, 10, 10).contains(9, 9));
    }

    #[test]
    fn contains_rect_rejects_overhang() {
        let bounds = r(0, 0, 8, 8);
        assert!(bounds.contains_rect(r(0, 0, 8, 8)));
        assert!(bounds.contains_rect(r(2, 2, 0, 0)));
        assert!(!bounds.contains_rect(r(4, 4, 5, 1)));
        assert!(!bounds.contains_rect(r(-1, 0, 2, 2)));
        assert!(!bounds.contains_rect(r(1, 1, -1, 2)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        assert_eq!(r(0, 0, 10, 10).intersect(r(5, 5, 10, 10)), r(5, 5, 5, 5));
    }

    #[test]
    fn intersect_is_commutative() {
        let cases = [
            (r(0, 0, 10, 10), r(5, 5, 10, 10)),
            (r(-4, 2, 3, 30), r(0, 0, 8, 8)),
            (r(1, 1, 1, 1), r(1, 1, 1, 1)),
            (r(0, 0, 5, 5), r(20, 20, 5, 5)),
        ];
        for (a, b) in cases {
            assert_eq!(a.intersect(b), b.intersect(a));
        }
    }

    #[test]
    fn intersect_with_self_is_identity() {
        for rect in [r(0, 0, 1, 1), r(-7, 3, 40, 2), r(100, 100, 9, 9)] {
            assert_eq!(rect.intersect(rect), rect);
        }
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let i = r(0, 0, 5, 5).intersect(r(20, 20, 5, 5));
        assert!(i.w <= 0 || i.h <= 0);
        assert!(i.is_empty());
    }

    #[test]
    fn intersect_touching_edge_is_empty() {
        let i = r(0, 0, 10, 10).intersect(r(10, 0, 10, 10));
        assert_eq!(i.w, 0);
        assert!(i.is_empty());
    }

    // ── extremes ──────────────────────────────────────────────────────────

    #[test]
    fn edges_saturate_at_i32_limits() {
        assert_eq!(r(i32::MAX - 1, 0, 10, 10).x1(), i32::MAX);
        assert_eq!(r(0, i32::MIN, 0, -5).y1(), i32::MIN);
        assert_eq!(r(i32::MAX, 0, 1, 1).translate(5, 0).x, i32::MAX);
    }

    #[test]
    fn intersect_near_limits_never_overflows() {
        let far = r(i32::MAX - 1, 0, 10, 10);
        let near = r(0, 0, 4, 4);
        assert!(far.intersect(near).is_empty());
        assert_eq!(far.intersect(near), near.intersect(far));

        let low = r(i32::MIN, i32::MIN, 3, 3);
        assert!(low.intersect(near).is_empty());

        let huge = r(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        let edge = r(i32::MAX - 2, i32::MAX - 2, 8, 8);
        assert!(huge.intersect(edge).is_empty());

        let overlap = r(i32::MAX - 4, 0, 100, 4).intersect(r(i32::MAX - 2, 0, 100, 4));
        assert_eq!(overlap, r(i32::MAX - 2, 0, 2, 4));
    }

    #[test]
    fn contains_rect_near_limits() {
        let bounds = r(0, 0, 8, 8);
        assert!(!bounds.contains_rect(r(i32::MAX - 1, 0, 10, 1)));
        assert!(r(i32::MAX - 4, 0, 10, 10).contains_rect(r(i32::MAX - 2, 0, 2, 2)));
    }
}
