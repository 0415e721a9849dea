use crate::coords::Rect;
use crate::graphics::Graphics;
use crate::surface::{SurfaceError, SurfaceRef};

use super::Transform;

/// A rectangle of a surface, anchored at `(x0, y0)` (relative to the rect
/// origin) for placement.
#[derive(Clone)]
pub struct Tile {
    pub surface: SurfaceRef,
    pub rect: Rect,
    pub x0: f64,
    pub y0: f64,
}

impl Tile {
    /// Whole-surface tile anchored at its top-left corner.
    pub fn whole(surface: SurfaceRef) -> Self {
        let rect = surface.borrow().bounds();
        Self { surface, rect, x0: 0.0, y0: 0.0 }
    }

    pub fn with_anchor(mut self, x0: f64, y0: f64) -> Self {
        self.x0 = x0;
        self.y0 = y0;
        self
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tile")
            .field("rect", &self.rect)
            .field("x0", &self.x0)
            .field("y0", &self.y0)
            .finish_non_exhaustive()
    }
}

/// Handle to a font owned by the text backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub u32);

/// One run of text. Layout and rasterization belong to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    pub text: String,
    pub font: Option<FontId>,
    /// `0xAARRGGBB`
    pub colour: u32,
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

impl TextData {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            font: None,
            colour: 0xFF00_0000,
            size: 12.0,
            x,
            y,
        }
    }
}

pub type TextList = Vec<TextData>;

/// Destination a frame is drawn into.
///
/// Call order per frame: [`begin_render`](RenderTarget::begin_render), any
/// number of `render_*` / [`blit`](RenderTarget::blit) calls, then
/// [`end_render`](RenderTarget::end_render).
pub trait RenderTarget {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Restricts drawing to `(ox, oy, w, h)`; positions are relative to its origin.
    fn viewport(&mut self, ox: i32, oy: i32, w: i32, h: i32);

    fn begin_render(&mut self);

    /// Draws a display list. Takes `&mut` so the target can convert it and
    /// fill its render caches.
    fn render_graphics(&mut self, graphics: &mut Graphics, transform: &Transform);

    fn render_text(&mut self, text: &TextList, transform: &Transform);

    /// Places `tile` so its anchor lands on `(ox, oy)`, scaled by `scale` and
    /// rotated by `rotation` clockwise quarter turns.
    fn blit(&mut self, tile: &Tile, ox: i32, oy: i32, scale: f64, rotation: i32) -> Result<(), SurfaceError>;

    fn end_render(&mut self);
}
