use std::f64::consts::FRAC_PI_2;

use crate::coords::{Matrix, Rect, saturate_i32};
use crate::graphics::Graphics;
use crate::surface::{LockFlags, Surface, SurfaceError, SurfaceRef};

use super::{RenderTarget, TextList, Tile, Transform};

/// Counters for the current frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub graphics: usize,
    pub batches: usize,
    /// Display lists whose prepared geometry was reused from the software cache.
    pub cache_hits: usize,
    pub text_runs: usize,
    pub tiles: usize,
}

/// What [`SurfaceTarget`] keeps in a display list's software cache.
#[derive(Debug)]
struct Prepared {
    transform: Transform,
    batches: usize,
}

/// Software render target drawing into a shared surface.
///
/// Tiles are composited directly. Display lists are converted and their
/// prepared form cached per transform space; scan conversion of batches and
/// text belongs to a rasterizing backend, so those calls only update
/// [`FrameStats`].
pub struct SurfaceTarget {
    surface: SurfaceRef,
    viewport: Rect,
    stats: FrameStats,
    in_frame: bool,
}

impl SurfaceTarget {
    pub fn new(surface: SurfaceRef) -> Self {
        let viewport = surface.borrow().bounds();
        Self {
            surface,
            viewport,
            stats: FrameStats::default(),
            in_frame: false,
        }
    }

    #[inline]
    pub fn surface(&self) -> &SurfaceRef {
        &self.surface
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Pixel-aligned copy at unit scale.
    fn blit_direct(
        &self,
        dst: &mut dyn Surface,
        src: &mut dyn Surface,
        tile: &Tile,
        dx: i32,
        dy: i32,
    ) -> Result<(), SurfaceError> {
        let clip = self.viewport.intersect(dst.bounds());
        let placed = Rect::new(dx, dy, tile.rect.w, tile.rect.h).intersect(clip);
        if placed.is_empty() {
            return Ok(());
        }
        let src_rect = Rect::new(
            saturate_i32(i64::from(tile.rect.x) + i64::from(placed.x) - i64::from(dx)),
            saturate_i32(i64::from(tile.rect.y) + i64::from(placed.y) - i64::from(dy)),
            placed.w,
            placed.h,
        );
        dst.blit(src, src_rect, placed.x, placed.y)
    }

    /// Nearest-neighbour resampling through `placement` (tile space to target space).
    fn blit_transformed(
        &self,
        dst: &mut dyn Surface,
        src: &mut dyn Surface,
        tile: &Tile,
        placement: Matrix,
    ) -> Result<(), SurfaceError> {
        let region = tile.rect.intersect(src.bounds());
        let Some(inverse) = placement.invert() else { return Ok(()) };
        if region.is_empty() {
            return Ok(());
        }

        // Copy the source region out so both surfaces are never locked at once.
        let src_format = src.format();
        let pixels: Vec<u32> = {
            let view = src.lock(region, LockFlags::READ)?;
            (0..view.height())
                .filter_map(|y| view.row(y))
                .flat_map(|row| bytemuck::cast_slice::<u8, [u8; 4]>(row).iter().map(|&px| src_format.decode(px)))
                .collect()
        };
        src.unlock()?;

        // Tile-space extent of the readable region.
        let (u0, v0) = (
            f64::from(region.x) - f64::from(tile.rect.x),
            f64::from(region.y) - f64::from(tile.rect.y),
        );
        let (u1, v1) = (u0 + f64::from(region.w), v0 + f64::from(region.h));

        let corners = [(u0, v0), (u1, v0), (u0, v1), (u1, v1)].map(|(u, v)| placement.apply(u, v));
        if corners.iter().any(|(x, y)| x.is_nan() || y.is_nan()) {
            return Ok(());
        }
        let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for (x, y) in corners {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }

        // Clamp the bounding box to the clip in float space so huge placements never overflow.
        let clip = self.viewport.intersect(dst.bounds());
        if clip.is_empty() {
            return Ok(());
        }
        let (cx0, cx1) = (f64::from(clip.x), f64::from(clip.x1()));
        let (cy0, cy1) = (f64::from(clip.y), f64::from(clip.y1()));
        let (bx0, bx1) = (x0.floor().clamp(cx0, cx1) as i32, x1.ceil().clamp(cx0, cx1) as i32);
        let (by0, by1) = (y0.floor().clamp(cy0, cy1) as i32, y1.ceil().clamp(cy0, cy1) as i32);
        let dest = Rect::new(bx0, by0, bx1 - bx0, by1 - by0);
        if dest.is_empty() {
            return Ok(());
        }

        let dst_format = dst.format();
        let row_len = region.w as usize;
        {
            let mut view = dst.lock(dest, LockFlags::WRITE)?;
            for y in 0..dest.h {
                let Some(row) = view.row_mut(y as u32) else { break };
                let out: &mut [[u8; 4]] = bytemuck::cast_slice_mut(row);
                for (x, px) in out.iter_mut().enumerate() {
                    let cx = f64::from(dest.x) + x as f64 + 0.5;
                    let cy = f64::from(dest.y + y) + 0.5;
                    let (u, v) = inverse.apply(cx, cy);
                    if u < u0 || u >= u1 || v < v0 || v >= v1 {
                        continue;
                    }
                    let i = (v - v0).floor() as usize * row_len + (u - u0).floor() as usize;
                    if let Some(&argb) = pixels.get(i) {
                        *px = dst_format.encode(argb);
                    }
                }
            }
        }
        dst.unlock()
    }
}

impl RenderTarget for SurfaceTarget {
    fn width(&self) -> u32 {
        self.surface.borrow().width()
    }

    fn height(&self) -> u32 {
        self.surface.borrow().height()
    }

    fn viewport(&mut self, ox: i32, oy: i32, w: i32, h: i32) {
        self.viewport = Rect::new(ox, oy, w, h);
    }

    fn begin_render(&mut self) {
        debug_assert!(!self.in_frame, "begin_render called twice");
        self.in_frame = true;
        self.stats = FrameStats::default();
    }

    fn render_graphics(&mut self, graphics: &mut Graphics, transform: &Transform) {
        self.stats.graphics += 1;
        if transform.alpha <= 0.0 {
            return;
        }
        let reusable = graphics
            .software_cache()
            .get::<Prepared>()
            .is_some_and(|p| !p.transform.different_space(transform));
        if reusable {
            self.stats.cache_hits += 1;
        } else {
            let batches = graphics.create_render_data().len();
            graphics.software_cache_mut().set(Prepared { transform: transform.clone(), batches });
        }
        if let Some(prepared) = graphics.software_cache().get::<Prepared>() {
            self.stats.batches += prepared.batches;
        }
    }

    fn render_text(&mut self, text: &TextList, _transform: &Transform) {
        self.stats.text_runs += text.len();
    }

    fn blit(&mut self, tile: &Tile, ox: i32, oy: i32, scale: f64, rotation: i32) -> Result<(), SurfaceError> {
        self.stats.tiles += 1;
        // A tile blitted onto its own surface would need two borrows.
        let mut dst = self.surface.try_borrow_mut().map_err(|_| SurfaceError::AlreadyLocked)?;
        let mut src = tile.surface.try_borrow_mut().map_err(|_| SurfaceError::AlreadyLocked)?;

        let quarter = rotation.rem_euclid(4);
        let (vx, vy) = (self.viewport.x, self.viewport.y);
        if quarter == 0 && scale == 1.0 && tile.x0.fract() == 0.0 && tile.y0.fract() == 0.0 {
            let dx = saturate_i32(i64::from(vx) + i64::from(ox) - tile.x0 as i64);
            let dy = saturate_i32(i64::from(vy) + i64::from(oy) - tile.y0 as i64);
            return self.blit_direct(&mut *dst, &mut *src, tile, dx, dy);
        }

        let placement = Matrix::translation(-tile.x0, -tile.y0)
            .scale(scale, scale)
            .rotate(f64::from(quarter) * FRAC_PI_2)
            .translate(f64::from(vx) + f64::from(ox), f64::from(vy) + f64::from(oy));
        self.blit_transformed(&mut *dst, &mut *src, tile, placement)
    }

    fn end_render(&mut self) {
        self.in_frame = false;
        log::debug!(
            "frame: {} graphics ({} batches, {} cached), {} text runs, {} tiles",
            self.stats.graphics,
            self.stats.batches,
            self.stats.cache_hits,
            self.stats.text_runs,
            self.stats.tiles
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextData;
    use crate::surface::{PixelFormat, SimpleSurface};

    fn target(w: u32, h: u32) -> SurfaceTarget {
        SurfaceTarget::new(SimpleSurface::new(w, h, PixelFormat::Argb).into_shared())
    }

    fn tile_2x1() -> Tile {
        let mut s = SimpleSurface::new(2, 1, PixelFormat::Argb);
        s.set_pixel(0, 0, 0xFF0000FF).unwrap();
        s.set_pixel(1, 0, 0xFFFF0000).unwrap();
        Tile::whole(s.into_shared())
    }

    fn pixel(t: &SurfaceTarget, x: u32, y: u32) -> u32 {
        let mut s = t.surface().borrow_mut();
        let view = s.lock(Rect::new(x as i32, y as i32, 1, 1), LockFlags::READ).unwrap();
        let px: [u8; 4] = view.row(0).unwrap().try_into().unwrap();
        drop(view);
        let format = s.format();
        s.unlock().unwrap();
        format.decode(px)
    }

    // ── tiles ─────────────────────────────────────────────────────────────

    #[test]
    fn unit_blit_honours_anchor_and_viewport() {
        let mut t = target(8, 8);
        t.viewport(2, 2, 4, 4);
        t.begin_render();
        t.blit(&tile_2x1().with_anchor(1.0, 0.0), 1, 0, 1.0, 0).unwrap();
        t.end_render();

        // Anchor pixel (1, 0) lands on viewport (1, 0) = surface (3, 2).
        assert_eq!(pixel(&t, 3, 2), 0xFFFF0000);
        assert_eq!(pixel(&t, 2, 2), 0xFF0000FF);
        assert_eq!(t.stats().tiles, 1);
    }

    #[test]
    fn viewport_clips_tiles() {
        let mut t = target(8, 8);
        t.viewport(0, 0, 1, 1);
        t.blit(&tile_2x1(), 0, 0, 1.0, 0).unwrap();
        assert_eq!(pixel(&t, 0, 0), 0xFF0000FF);
        assert_eq!(pixel(&t, 1, 0), 0);
    }

    #[test]
    fn quarter_turn_stands_tile_upright() {
        let mut t = target(4, 4);
        t.blit(&tile_2x1(), 1, 0, 1.0, 1).unwrap();
        // (u, v) -> (-v, u) + (1, 0): the row becomes a column at x = 0.
        assert_eq!(pixel(&t, 0, 0), 0xFF0000FF);
        assert_eq!(pixel(&t, 0, 1), 0xFFFF0000);
        assert_eq!(pixel(&t, 1, 0), 0);
    }

    #[test]
    fn scaled_blit_repeats_pixels() {
        let mut t = target(4, 2);
        t.blit(&tile_2x1(), 0, 0, 2.0, 0).unwrap();
        assert_eq!(pixel(&t, 1, 1), 0xFF0000FF);
        assert_eq!(pixel(&t, 2, 0), 0xFFFF0000);
        assert_eq!(pixel(&t, 3, 1), 0xFFFF0000);
    }

    #[test]
    fn far_away_tiles_clip_to_nothing() {
        let mut t = target(4, 4);
        t.blit(&tile_2x1(), i32::MAX - 1, 0, 1.0, 0).unwrap();
        t.blit(&tile_2x1(), i32::MIN, i32::MIN, 1.0, 0).unwrap();
        t.blit(&tile_2x1(), i32::MAX, 0, 2.0, 1).unwrap();
        t.viewport(i32::MAX - 1, i32::MAX - 1, 4, 4);
        t.blit(&tile_2x1(), i32::MAX, i32::MAX, 1.0, 0).unwrap();
        t.blit(&tile_2x1(), i32::MAX, i32::MAX, 3.0, 2).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(pixel(&t, x, y), 0);
            }
        }
        assert_eq!(t.stats().tiles, 5);
    }

    #[test]
    fn huge_scale_covers_the_target() {
        let mut t = target(2, 2);
        t.blit(&tile_2x1().with_anchor(1.0, 0.0), 0, 0, 1.0e12, 0).unwrap();
        // The anchor pixel is the second one; it spans everything right of x = 0.
        assert_eq!(pixel(&t, 0, 0), 0xFFFF0000);
        assert_eq!(pixel(&t, 1, 1), 0xFFFF0000);
    }

    #[test]
    fn blitting_a_surface_onto_itself_is_refused() {
        let shared = SimpleSurface::new(2, 2, PixelFormat::Argb).into_shared();
        let mut t = SurfaceTarget::new(shared.clone());
        assert_eq!(t.blit(&Tile::whole(shared), 0, 0, 1.0, 0), Err(SurfaceError::AlreadyLocked));
    }

    // ── display lists ─────────────────────────────────────────────────────

    #[test]
    fn prepared_graphics_are_reused_within_a_space() {
        let mut g = Graphics::new();
        g.begin_fill(0xFF0000, 1.0);
        g.draw_rect(0.0, 0.0, 10.0, 10.0);

        let mut t = target(4, 4);
        t.begin_render();
        t.render_graphics(&mut g, &Transform::default());
        t.render_graphics(&mut g, &Transform::from_matrix(Matrix::translation(3.0, 0.0)));
        t.render_graphics(&mut g, &Transform::from_matrix(Matrix::scaling(2.0, 2.0)));
        t.end_render();

        let stats = t.stats();
        assert_eq!(stats.graphics, 3);
        assert_eq!(stats.batches, 3);
        assert_eq!(stats.cache_hits, 1);

        g.line_to(5.0, 5.0);
        assert!(!g.software_cache().is_populated());
    }

    #[test]
    fn text_runs_are_counted() {
        let mut t = target(1, 1);
        t.begin_render();
        t.render_text(&vec![TextData::new("a", 0.0, 0.0), TextData::new("b", 0.0, 0.0)], &Transform::default());
        assert_eq!(t.stats().text_runs, 2);
    }
}
