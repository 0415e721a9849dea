use std::fmt;

use crate::coords::Rect;

/// Surface lock contract violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// `lock` (or a pixel write) while a lock is outstanding.
    AlreadyLocked,
    /// `unlock` without a matching `lock`.
    NotLocked,
    /// Lock region not inside `[0, width) × [0, height)`.
    RegionOutOfBounds { region: Rect, width: u32, height: u32 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::AlreadyLocked => f.write_str("surface is already locked"),
            SurfaceError::NotLocked => f.write_str("surface is not locked"),
            SurfaceError::RegionOutOfBounds { region, width, height } => write!(
                f,
                "lock region ({}, {}, {}x{}) outside {width}x{height} surface",
                region.x, region.y, region.w, region.h
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}
