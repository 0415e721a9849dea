use core::ops::BitOr;

/// Access requested by [`Surface::lock`](super::Surface::lock).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LockFlags(u32);

impl LockFlags {
    pub const READ: LockFlags = LockFlags(0x0001);
    pub const WRITE: LockFlags = LockFlags(0x0002);
    pub const READ_WRITE: LockFlags = LockFlags(0x0003);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: LockFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_write(self) -> bool {
        self.contains(Self::WRITE)
    }
}

impl BitOr for LockFlags {
    type Output = LockFlags;
    #[inline]
    fn bitor(self, rhs: LockFlags) -> LockFlags {
        LockFlags(self.0 | rhs.0)
    }
}

/// View into a locked surface region.
///
/// `bytes` starts at the region's top-left pixel and ends after the last
/// pixel of its bottom row; consecutive rows are `stride` bytes apart.
/// Row writes are only available when the lock requested
/// [`WRITE`](LockFlags::WRITE).
#[derive(Debug)]
pub struct SurfaceData<'a> {
    bytes: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
    bytes_per_pixel: usize,
    flags: LockFlags,
}

impl<'a> SurfaceData<'a> {
    pub(crate) fn new(
        bytes: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        bytes_per_pixel: usize,
        flags: LockFlags,
    ) -> Self {
        Self { bytes, width, height, stride, bytes_per_pixel, flags }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn flags(&self) -> LockFlags {
        self.flags
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &*self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> Option<&mut [u8]> {
        if self.flags.is_write() { Some(&mut *self.bytes) } else { None }
    }

    #[inline]
    fn row_range(&self, y: u32) -> Option<core::ops::Range<usize>> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        Some(start..start + self.width as usize * self.bytes_per_pixel)
    }

    /// Pixel bytes of row `y` within the region.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let range = self.row_range(y)?;
        Some(&self.bytes[range])
    }

    /// Mutable pixel bytes of row `y`; `None` for read-only locks.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if !self.flags.is_write() {
            return None;
        }
        let range = self.row_range(y)?;
        Some(&mut self.bytes[range])
    }
}
