//! Pixel surfaces.
//!
//! A surface owns a row-aligned 32-bit pixel buffer. Access goes through a
//! scoped lock ([`Surface::lock`] / [`Surface::unlock`]); format conversion
//! happens in [`Surface::blit`].
//!
//! Lock state is a usage contract, not a synchronization primitive: surfaces
//! are `!Send` and callers serialize access themselves.

mod error;
mod format;
mod rgba;
mod lock;
mod simple;

use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::Rect;
use crate::render::RenderCache;

pub use error::SurfaceError;
pub use format::PixelFormat;
pub use lock::{LockFlags, SurfaceData};
pub use simple::{SimpleSurface, SurfaceInit};

/// Shared handle to a surface, used where several owners reference one
/// buffer (bitmap fills, blit tiles).
pub type SurfaceRef = Rc<RefCell<dyn Surface>>;

/// Pixel surface contract.
///
/// Lock state machine: `Unlocked --lock--> Locked(flags) --unlock--> Unlocked`.
/// Locking a locked surface fails with [`SurfaceError::AlreadyLocked`].
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn format(&self) -> PixelFormat;

    /// `(0, 0, width, height)`.
    fn bounds(&self) -> Rect {
        Rect::from_size(
            i32::try_from(self.width()).unwrap_or(i32::MAX),
            i32::try_from(self.height()).unwrap_or(i32::MAX),
        )
    }

    /// Copies `src_rect` of `src` to `(dx, dy)` in this surface.
    ///
    /// The source rect is clipped to the source bounds and the result to the
    /// destination bounds; a fully clipped blit does nothing. Pixels are
    /// re-encoded when the formats differ (opaque sources produce alpha
    /// `0xFF`). Fails only if either surface is locked.
    fn blit(&mut self, src: &mut dyn Surface, src_rect: Rect, dx: i32, dy: i32) -> Result<(), SurfaceError>;

    /// Locks `rect` for the access in `flags` and returns a view of it.
    fn lock(&mut self, rect: Rect, flags: LockFlags) -> Result<SurfaceData<'_>, SurfaceError>;

    /// Ends the current lock. A write lock invalidates the texture cache.
    fn unlock(&mut self) -> Result<(), SurfaceError>;

    fn is_locked(&self) -> bool;

    /// Renderer cache slot (e.g. an uploaded texture).
    fn texture(&self) -> &RenderCache;
    fn texture_mut(&mut self) -> &mut RenderCache;
}
