use core::ops::{Add, Mul, Sub};

/// 2D point in user (object) space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UserPoint {
    pub x: f32,
    pub y: f32,
}

impl UserPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    #[inline]
    pub fn normalized(self) -> Option<UserPoint> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(UserPoint::new(self.x / len, self.y / len))
        } else {
            None
        }
    }
}

impl Add for UserPoint {
    type Output = UserPoint;
    #[inline]
    fn add(self, rhs: UserPoint) -> UserPoint {
        UserPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for UserPoint {
    type Output = UserPoint;
    #[inline]
    fn sub(self, rhs: UserPoint) -> UserPoint {
        UserPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for UserPoint {
    type Output = UserPoint;
    #[inline]
    fn mul(self, rhs: f32) -> UserPoint {
        UserPoint::new(self.x * rhs, self.y * rhs)
    }
}
