use bytemuck::NoUninit;

use crate::coords::UserPoint;

/// Byte-sized path command tag.
///
/// Operand counts are fixed per tag (see [`operand_count`](PathCommand::operand_count)):
///
/// | tag              | operands                       |
/// |------------------|--------------------------------|
/// | `NoOp`           | none                           |
/// | `MoveTo`         | `x, y`                         |
/// | `LineTo`         | `x, y`                         |
/// | `CurveTo`        | `c1x, c1y, c2x, c2y, x, y`     |
/// | `WideMoveTo`     | `0, 0, x, y`                   |
/// | `WideLineTo`     | `0, 0, x, y`                   |
/// | `CloseDirection` | `dx, dy` (unit vector)         |
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, NoUninit)]
pub enum PathCommand {
    NoOp = 0,
    MoveTo = 1,
    LineTo = 2,
    CurveTo = 3,
    WideMoveTo = 4,
    WideLineTo = 5,
    /// Only emitted into line batches: the direction of a loop's first
    /// segment, so the seam can be joined instead of capped.
    CloseDirection = 6,
}

impl PathCommand {
    #[inline]
    pub const fn from_u8(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => PathCommand::NoOp,
            1 => PathCommand::MoveTo,
            2 => PathCommand::LineTo,
            3 => PathCommand::CurveTo,
            4 => PathCommand::WideMoveTo,
            5 => PathCommand::WideLineTo,
            6 => PathCommand::CloseDirection,
            _ => return None,
        })
    }

    #[inline]
    pub const fn operand_count(self) -> usize {
        match self {
            PathCommand::NoOp => 0,
            PathCommand::MoveTo | PathCommand::LineTo | PathCommand::CloseDirection => 2,
            PathCommand::WideMoveTo | PathCommand::WideLineTo => 4,
            PathCommand::CurveTo => 6,
        }
    }

    #[inline]
    pub const fn is_move(self) -> bool {
        matches!(self, PathCommand::MoveTo | PathCommand::WideMoveTo)
    }

    /// True for commands that draw a segment from the pen.
    #[inline]
    pub const fn is_segment(self) -> bool {
        matches!(
            self,
            PathCommand::LineTo | PathCommand::WideLineTo | PathCommand::CurveTo
        )
    }

    /// Pen position after this command, given its operands.
    #[inline]
    pub fn end_point(self, operands: &[f32]) -> Option<UserPoint> {
        match self {
            PathCommand::NoOp | PathCommand::CloseDirection => None,
            _ => {
                let n = operands.len();
                debug_assert_eq!(n, self.operand_count());
                Some(UserPoint::new(operands[n - 2], operands[n - 1]))
            }
        }
    }

    /// The point the segment leaves the pen towards, used for start tangents.
    ///
    /// For curves this is the first control point.
    #[inline]
    pub fn first_control(self, operands: &[f32]) -> Option<UserPoint> {
        match self {
            PathCommand::CurveTo => Some(UserPoint::new(operands[0], operands[1])),
            PathCommand::LineTo | PathCommand::WideLineTo => self.end_point(operands),
            _ => None,
        }
    }
}

/// Fill rule for self-intersecting paths.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum WindingRule {
    #[default]
    OddEven,
    NonZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_u8() {
        for tag in 0..=6u8 {
            let cmd = PathCommand::from_u8(tag).unwrap();
            assert_eq!(cmd as u8, tag);
        }
        assert_eq!(PathCommand::from_u8(7), None);
    }

    #[test]
    fn operand_counts() {
        assert_eq!(PathCommand::NoOp.operand_count(), 0);
        assert_eq!(PathCommand::MoveTo.operand_count(), 2);
        assert_eq!(PathCommand::LineTo.operand_count(), 2);
        assert_eq!(PathCommand::WideLineTo.operand_count(), 4);
        assert_eq!(PathCommand::WideMoveTo.operand_count(), 4);
        assert_eq!(PathCommand::CurveTo.operand_count(), 6);
        assert_eq!(PathCommand::CloseDirection.operand_count(), 2);
    }

    #[test]
    fn wide_end_point_skips_padding() {
        let p = PathCommand::WideLineTo.end_point(&[0.0, 0.0, 3.0, 4.0]);
        assert_eq!(p, Some(UserPoint::new(3.0, 4.0)));
    }
}
