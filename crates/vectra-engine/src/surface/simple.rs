use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::{Rect, saturate_i32};
use crate::render::RenderCache;

use super::{LockFlags, PixelFormat, Surface, SurfaceData, SurfaceError, SurfaceRef};

/// Construction parameters for [`SimpleSurface`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceInit {
    pub format: PixelFormat,

    /// Row alignment in bytes. The stride is rounded up to a multiple of it;
    /// 0 is treated as 1.
    pub byte_align: usize,
}

impl Default for SurfaceInit {
    fn default() -> Self {
        Self {
            format: PixelFormat::Argb,
            byte_align: 4,
        }
    }
}

/// In-memory surface owning a zero-initialized, row-aligned pixel buffer.
///
/// Invariants:
/// - `stride >= width * bytes_per_pixel` and `stride % byte_align == 0`
/// - `buffer.len() == stride * height`
pub struct SimpleSurface {
    width: u32,
    height: u32,
    format: PixelFormat,
    stride: usize,
    buffer: Vec<u8>,
    lock: Option<LockFlags>,
    texture: RenderCache,
}

impl SimpleSurface {
    /// Creates a surface with 4-byte row alignment.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self::with_init(width, height, SurfaceInit { format, ..SurfaceInit::default() })
    }

    pub fn with_init(width: u32, height: u32, init: SurfaceInit) -> Self {
        debug_assert!(
            width <= i32::MAX as u32 && height <= i32::MAX as u32,
            "surface dimensions must fit pixel-space rects"
        );
        let align = init.byte_align.max(1);
        let row_bytes = width as usize * init.format.bytes_per_pixel();
        let stride = row_bytes.div_ceil(align) * align;

        Self {
            width,
            height,
            format: init.format,
            stride,
            buffer: vec![0; stride * height as usize],
            lock: None,
            texture: RenderCache::new(),
        }
    }

    /// Moves the surface behind a shared handle, e.g. for bitmap fills.
    pub fn into_shared(self) -> SurfaceRef {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whole buffer including row padding.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * self.format.bytes_per_pixel()
    }

    /// Pixel at `(x, y)` as `0xAARRGGBB`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let px: [u8; 4] = self.buffer[i..i + 4].try_into().ok()?;
        Some(self.format.decode(px))
    }

    /// Writes one pixel. Writes outside the surface are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, argb: u32) -> Result<(), SurfaceError> {
        self.ensure_unlocked()?;
        if x >= self.width || y >= self.height {
            return Ok(());
        }
        let i = self.offset(x, y);
        self.buffer[i..i + 4].copy_from_slice(&self.format.encode(argb));
        self.invalidate_texture();
        Ok(())
    }

    /// Fills every pixel with `argb`. Row padding is left untouched.
    pub fn fill(&mut self, argb: u32) -> Result<(), SurfaceError> {
        self.ensure_unlocked()?;
        let px = self.format.encode(argb);
        let row_bytes = self.width as usize * self.format.bytes_per_pixel();
        if row_bytes > 0 {
            for row in self.buffer.chunks_exact_mut(self.stride) {
                for dst in bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut row[..row_bytes]) {
                    *dst = px;
                }
            }
        }
        self.invalidate_texture();
        Ok(())
    }

    /// Pixels of row `y` without padding. Callers ensure the surface is unlocked.
    pub(super) fn row_pixels_mut(&mut self, y: u32) -> &mut [[u8; 4]] {
        let start = self.offset(0, y);
        let row_bytes = self.width as usize * self.format.bytes_per_pixel();
        bytemuck::cast_slice_mut(&mut self.buffer[start..start + row_bytes])
    }

    #[inline]
    fn ensure_unlocked(&self) -> Result<(), SurfaceError> {
        if self.lock.is_some() { Err(SurfaceError::AlreadyLocked) } else { Ok(()) }
    }

    fn invalidate_texture(&mut self) {
        if self.texture.invalidate() {
            log::trace!("surface {}x{}: texture cache invalidated", self.width, self.height);
        }
    }

    /// Copies an already-clipped source region into `dest` (inside `self`).
    fn copy_region(&mut self, src: &SurfaceData<'_>, src_format: PixelFormat, dest: Rect) {
        let bpp = self.format.bytes_per_pixel();
        let row_bytes = dest.w as usize * bpp;
        for y in 0..dest.h as u32 {
            let Some(src_row) = src.row(y) else { break };
            let start = self.offset(dest.x as u32, dest.y as u32 + y);
            let dst_row = &mut self.buffer[start..start + row_bytes];
            convert_row(src_row, src_format, dst_row, self.format);
        }
    }
}

/// Copies one row of pixels, re-encoding when the formats differ.
fn convert_row(src: &[u8], src_format: PixelFormat, dst: &mut [u8], dst_format: PixelFormat) {
    debug_assert_eq!(src.len(), dst.len());
    if src_format == dst_format {
        dst.copy_from_slice(src);
        return;
    }
    let src_px: &[[u8; 4]] = bytemuck::cast_slice(src);
    let dst_px: &mut [[u8; 4]] = bytemuck::cast_slice_mut(dst);
    for (d, &s) in dst_px.iter_mut().zip(src_px) {
        *d = src_format.convert(s, dst_format);
    }
}

impl Surface for SimpleSurface {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn blit(&mut self, src: &mut dyn Surface, src_rect: Rect, dx: i32, dy: i32) -> Result<(), SurfaceError> {
        self.ensure_unlocked()?;

        // Clip against the source, shifting the destination by what was cut off.
        // Offsets are widened so far-away destinations clip instead of overflowing.
        let clipped = src_rect.intersect(src.bounds());
        let ox = i64::from(dx) + i64::from(clipped.x) - i64::from(src_rect.x);
        let oy = i64::from(dy) + i64::from(clipped.y) - i64::from(src_rect.y);
        // Then against the destination, shifting the source back.
        let dest = Rect::new(saturate_i32(ox), saturate_i32(oy), clipped.w, clipped.h).intersect(self.bounds());
        if clipped.is_empty() || dest.is_empty() {
            log::trace!("blit of ({}, {}, {}x{}) clipped away", src_rect.x, src_rect.y, src_rect.w, src_rect.h);
            return Ok(());
        }
        let src_region = Rect::new(
            saturate_i32(i64::from(clipped.x) + i64::from(dest.x) - ox),
            saturate_i32(i64::from(clipped.y) + i64::from(dest.y) - oy),
            dest.w,
            dest.h,
        );

        let src_format = src.format();
        {
            let view = src.lock(src_region, LockFlags::READ)?;
            self.copy_region(&view, src_format, dest);
        }
        src.unlock()?;

        self.invalidate_texture();
        Ok(())
    }

    fn lock(&mut self, rect: Rect, flags: LockFlags) -> Result<SurfaceData<'_>, SurfaceError> {
        self.ensure_unlocked()?;
        if !self.bounds().contains_rect(rect) {
            return Err(SurfaceError::RegionOutOfBounds {
                region: rect,
                width: self.width,
                height: self.height,
            });
        }

        let bpp = self.format.bytes_per_pixel();
        let (range, w, h) = if rect.is_empty() {
            (0..0, 0, 0)
        } else {
            let start = self.offset(rect.x as u32, rect.y as u32);
            let end = self.offset(rect.x1() as u32, rect.y1() as u32 - 1);
            (start..end, rect.w as u32, rect.h as u32)
        };
        self.lock = Some(flags);

        Ok(SurfaceData::new(&mut self.buffer[range], w, h, self.stride, bpp, flags))
    }

    fn unlock(&mut self) -> Result<(), SurfaceError> {
        let flags = self.lock.take().ok_or(SurfaceError::NotLocked)?;
        if flags.is_write() {
            self.invalidate_texture();
        }
        Ok(())
    }

    #[inline]
    fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    #[inline]
    fn texture(&self) -> &RenderCache {
        &self.texture
    }

    #[inline]
    fn texture_mut(&mut self) -> &mut RenderCache {
        &mut self.texture
    }
}

impl std::fmt::Debug for SimpleSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("stride", &self.stride)
            .field("locked", &self.lock)
            .field("texture", &self.texture)
            .finish()
    }
}
