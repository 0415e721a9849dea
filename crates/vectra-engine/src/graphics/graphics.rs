use std::rc::Rc;

use crate::coords::UserPoint;
use crate::paint::{BitmapFill, GradientFill, SolidFill, Stroke};
use crate::path::{Path, TrianglePath};
use crate::render::{RenderCache, RenderData};

use super::GraphicsData;
use super::convert::{ConvertState, convert};

/// Control-point distance for a quarter ellipse drawn with one cubic.
const KAPPA: f32 = 0.552_284_8;

/// Flash-style display list.
///
/// Style and path calls accumulate [`GraphicsData`] items;
/// [`create_render_data`](Graphics::create_render_data) turns them into
/// [`RenderData`] batches.
///
/// Conversion is incremental:
/// - items before `last_converted` are already reflected in `render_data`
/// - the fill, stroke and open subpath at the cursor are kept in the converter state
/// - drawing never edits a converted item; it starts a new path instead
///
/// Every mutation invalidates both render caches.
pub struct Graphics {
    items: Vec<GraphicsData>,
    render_data: Vec<RenderData>,
    last_converted: usize,
    state: ConvertState,
    pen: Option<UserPoint>,
    software_cache: RenderCache,
    hardware_cache: RenderCache,
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            render_data: Vec::new(),
            last_converted: 0,
            state: ConvertState::default(),
            pen: None,
            software_cache: RenderCache::new(),
            hardware_cache: RenderCache::new(),
        }
    }

    // ── display list ──────────────────────────────────────────────────────

    /// Appends items in order.
    pub fn draw_graphics_data<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<GraphicsData>,
    {
        for item in items {
            let item = item.into();
            if let GraphicsData::Path(path) = &item {
                if let Some(p) = path.current_point() {
                    self.pen = Some(p);
                }
            }
            self.push(item);
        }
    }

    pub fn begin_fill(&mut self, rgb: u32, alpha: f32) {
        self.push(GraphicsData::SolidFill(SolidFill::new(rgb, alpha)));
    }

    pub fn begin_gradient_fill(&mut self, fill: GradientFill) {
        self.push(GraphicsData::GradientFill(fill));
    }

    pub fn begin_bitmap_fill(&mut self, fill: BitmapFill) {
        self.push(GraphicsData::BitmapFill(fill));
    }

    pub fn end_fill(&mut self) {
        self.push(GraphicsData::EndFill);
    }

    pub fn line_style(&mut self, stroke: Stroke) {
        self.push(GraphicsData::Stroke(stroke));
    }

    /// Turns line drawing off for subsequent paths.
    pub fn clear_line_style(&mut self) {
        self.push(GraphicsData::Stroke(Stroke::clear()));
    }

    // ── pen ───────────────────────────────────────────────────────────────

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path_for_append().move_to(x, y);
        self.pen = Some(UserPoint::new(x, y));
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path_for_append().line_to(x, y);
        self.pen = Some(UserPoint::new(x, y));
    }

    /// Quadratic curve through control `(cx, cy)` to anchor `(ax, ay)`.
    pub fn curve_to(&mut self, cx: f32, cy: f32, ax: f32, ay: f32) {
        let from = self.pen.unwrap_or_default();
        self.path_for_append().curve_from(from, cx, cy, ax, ay);
        self.pen = Some(UserPoint::new(ax, ay));
    }

    pub fn cubic_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, ax: f32, ay: f32) {
        self.path_for_append().cubic_curve_to(c1x, c1y, c2x, c2y, ax, ay);
        self.pen = Some(UserPoint::new(ax, ay));
    }

    pub fn wide_move_to(&mut self, x: f32, y: f32) {
        self.path_for_append().wide_move_to(x, y);
        self.pen = Some(UserPoint::new(x, y));
    }

    pub fn wide_line_to(&mut self, x: f32, y: f32) {
        self.path_for_append().wide_line_to(x, y);
        self.pen = Some(UserPoint::new(x, y));
    }

    /// Pen position after the last drawing call, if any.
    #[inline]
    pub fn pen(&self) -> Option<UserPoint> {
        self.pen
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Closed rectangle, clockwise from `(x, y)`.
    pub fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.line_to(x, y);
    }

    pub fn draw_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.draw_ellipse(x - radius, y - radius, radius * 2.0, radius * 2.0);
    }

    /// Ellipse inscribed in `(x, y, w, h)`, four cubic quarters starting at
    /// the rightmost point.
    pub fn draw_ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (rx, ry) = (w / 2.0, h / 2.0);
        let (cx, cy) = (x + rx, y + ry);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);

        self.move_to(cx + rx, cy);
        self.cubic_curve_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        self.cubic_curve_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        self.cubic_curve_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        self.cubic_curve_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
    }

    pub fn draw_triangles(&mut self, triangles: TrianglePath) {
        self.push(GraphicsData::TrianglePath(Rc::new(triangles)));
    }

    // ── conversion ────────────────────────────────────────────────────────

    /// Batches for every item so far.
    ///
    /// Only items added since the previous call are converted; without
    /// intervening mutation this returns the same list without work.
    pub fn create_render_data(&mut self) -> &[RenderData] {
        if self.last_converted < self.items.len() {
            let pending = &self.items[self.last_converted..];
            let emitted = convert(pending, &mut self.state, &mut self.render_data);
            log::debug!(
                "graphics: converted {} items, {} new batches ({} total)",
                pending.len(),
                emitted,
                self.render_data.len()
            );
            self.last_converted = self.items.len();
        }
        &self.render_data
    }

    /// Drops all items, batches, converter state and the pen.
    pub fn clear(&mut self) {
        self.items.clear();
        self.render_data.clear();
        self.last_converted = 0;
        self.state = ConvertState::default();
        self.pen = None;
        self.invalidate_caches();
    }

    #[inline]
    pub fn items(&self) -> &[GraphicsData] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of leading items already reflected in the render data.
    #[inline]
    pub fn converted_len(&self) -> usize {
        self.last_converted
    }

    // ── caches ────────────────────────────────────────────────────────────

    #[inline]
    pub fn software_cache(&self) -> &RenderCache {
        &self.software_cache
    }

    #[inline]
    pub fn software_cache_mut(&mut self) -> &mut RenderCache {
        &mut self.software_cache
    }

    #[inline]
    pub fn hardware_cache(&self) -> &RenderCache {
        &self.hardware_cache
    }

    #[inline]
    pub fn hardware_cache_mut(&mut self) -> &mut RenderCache {
        &mut self.hardware_cache
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn push(&mut self, item: GraphicsData) {
        self.items.push(item);
        self.invalidate_caches();
    }

    fn invalidate_caches(&mut self) {
        let sw = self.software_cache.invalidate();
        let hw = self.hardware_cache.invalidate();
        if sw || hw {
            log::trace!("graphics: render caches invalidated");
        }
    }

    /// The path drawing calls append to.
    ///
    /// Reuses the last item when it is an unconverted path. Otherwise starts
    /// a new one; a new path that does not begin with a move continues the
    /// pen, and the converter carries the open subpath across the seam.
    fn path_for_append(&mut self) -> &mut Path {
        let reusable = self.items.len() > self.last_converted
            && matches!(self.items.last(), Some(GraphicsData::Path(_)));
        if !reusable {
            self.items.push(GraphicsData::Path(Path::new()));
        }
        self.invalidate_caches();

        match self.items.last_mut() {
            Some(GraphicsData::Path(path)) => path,
            _ => unreachable!("last item is a path by construction"),
        }
    }
}

impl std::fmt::Debug for Graphics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graphics")
            .field("items", &self.items.len())
            .field("render_data", &self.render_data.len())
            .field("last_converted", &self.last_converted)
            .field("pen", &self.pen)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Fill;
    use crate::path::PathCommand;

    fn solid(rd: &RenderData) -> &crate::render::SolidData {
        match rd {
            RenderData::Solid(s) => s,
            other => panic!("expected solid batch, got {other:?}"),
        }
    }

    // ── scenario ──────────────────────────────────────────────────────────

    #[test]
    fn red_triangle_becomes_one_closed_solid_batch() {
        let mut g = Graphics::new();
        g.begin_fill(0xFF0000, 1.0);
        g.move_to(0.0, 0.0);
        g.line_to(10.0, 0.0);
        g.line_to(10.0, 10.0);
        g.end_fill();

        let batches = g.create_render_data();
        assert_eq!(batches.len(), 1);
        let s = solid(&batches[0]);
        assert_eq!(s.fill, Fill::solid(0xFF0000, 1.0));
        assert_eq!(
            s.commands(),
            &[PathCommand::MoveTo, PathCommand::LineTo, PathCommand::LineTo, PathCommand::LineTo]
        );
        assert_eq!(s.data(), &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 0.0]);
    }

    // ── incremental conversion ────────────────────────────────────────────

    #[test]
    fn create_render_data_is_idempotent() {
        let mut g = Graphics::new();
        g.begin_fill(1, 1.0);
        g.draw_rect(0.0, 0.0, 4.0, 4.0);

        let first = g.create_render_data().to_vec();
        let ptr = g.create_render_data().as_ptr();
        let second = g.create_render_data();
        assert_eq!(first.as_slice(), second);
        assert_eq!(ptr, second.as_ptr());
        assert_eq!(g.converted_len(), g.len());
    }

    #[test]
    fn drawing_after_conversion_starts_a_new_path() {
        let mut g = Graphics::new();
        g.begin_fill(1, 1.0);
        g.move_to(0.0, 0.0);
        g.line_to(5.0, 0.0);
        assert_eq!(g.create_render_data().len(), 1);

        g.line_to(5.0, 5.0);
        assert_eq!(g.len(), 3);
        let GraphicsData::Path(p) = &g.items()[2] else { panic!("expected path") };
        // The new path continues from the pen instead of restarting there.
        assert_eq!(p.commands(), &[PathCommand::LineTo]);

        let batches = g.create_render_data();
        assert_eq!(batches.len(), 2);
        let s = solid(&batches[1]);
        assert_eq!(s.fill, Fill::solid(1, 1.0));
        assert_eq!(s.commands()[0], PathCommand::MoveTo);
        assert_eq!(&s.data()[..4], &[5.0, 0.0, 5.0, 5.0]);
    }

    #[test]
    fn loop_closed_after_conversion_matches_single_pass() {
        fn draw(g: &mut Graphics, convert_midway: bool) -> Vec<Vec<f32>> {
            g.line_style(Stroke::solid(1.0, 0, 1.0));
            g.move_to(0.0, 0.0);
            g.line_to(10.0, 0.0);
            g.line_to(10.0, 10.0);
            if convert_midway {
                g.create_render_data();
            }
            g.line_to(0.0, 0.0);
            g.create_render_data()
                .iter()
                .filter_map(|rd| match rd {
                    RenderData::Line(l) => Some(l),
                    _ => None,
                })
                .flat_map(|l| l.segments())
                .filter(|(cmd, _)| *cmd == PathCommand::CloseDirection)
                .map(|(_, dir)| dir.to_vec())
                .collect()
        }

        let single = draw(&mut Graphics::new(), false);
        let incremental = draw(&mut Graphics::new(), true);
        assert_eq!(single, vec![vec![1.0, 0.0]]);
        assert_eq!(incremental, single);
    }

    #[test]
    fn quadratic_curve_after_conversion_starts_at_pen() {
        let mut g = Graphics::new();
        g.move_to(0.0, 0.0);
        g.line_to(3.0, 0.0);
        g.create_render_data();
        g.curve_to(3.0, 3.0, 0.0, 3.0);

        let GraphicsData::Path(p) = &g.items()[1] else { panic!("expected path") };
        // First cubic control is two thirds of the way from the pen (3, 0) to (3, 3).
        assert_eq!(&p.data()[..2], &[3.0, 2.0]);
    }

    #[test]
    fn consecutive_drawing_calls_share_one_path() {
        let mut g = Graphics::new();
        g.move_to(1.0, 1.0);
        g.line_to(2.0, 2.0);
        g.curve_to(3.0, 3.0, 4.0, 2.0);
        assert_eq!(g.len(), 1);
        assert_eq!(g.pen(), Some(UserPoint::new(4.0, 2.0)));
    }

    #[test]
    fn line_without_pen_is_a_bare_segment() {
        let mut g = Graphics::new();
        g.line_to(3.0, 4.0);
        let GraphicsData::Path(p) = &g.items()[0] else { panic!("expected path") };
        assert_eq!(p.commands(), &[PathCommand::LineTo]);
    }

    #[test]
    fn style_change_breaks_path_reuse() {
        let mut g = Graphics::new();
        g.move_to(0.0, 0.0);
        g.line_style(Stroke::solid(1.0, 0, 1.0));
        g.line_to(1.0, 0.0);
        assert_eq!(g.len(), 3);
        let GraphicsData::Path(p) = &g.items()[2] else { panic!("expected path") };
        assert_eq!(p.commands(), &[PathCommand::LineTo]);

        // The stroke batch still starts at the pen.
        let batches = g.create_render_data();
        let RenderData::Line(line) = &batches[0] else { panic!("expected line batch") };
        assert_eq!(line.commands(), &[PathCommand::MoveTo, PathCommand::LineTo]);
        assert_eq!(line.data(), &[0.0, 0.0, 1.0, 0.0]);
    }

    // ── caches & clear ────────────────────────────────────────────────────

    #[test]
    fn mutation_invalidates_caches() {
        let mut g = Graphics::new();
        g.software_cache_mut().set(1u32);
        g.hardware_cache_mut().set("gpu");
        g.begin_fill(0, 1.0);
        assert!(!g.software_cache().is_populated());
        assert!(!g.hardware_cache().is_populated());

        g.hardware_cache_mut().set("gpu");
        g.move_to(0.0, 0.0);
        assert!(!g.hardware_cache().is_populated());
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = Graphics::new();
        g.begin_fill(5, 1.0);
        g.draw_circle(0.0, 0.0, 3.0);
        g.create_render_data();
        g.software_cache_mut().set(());

        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.converted_len(), 0);
        assert_eq!(g.pen(), None);
        assert!(!g.software_cache().is_populated());

        // The old fill no longer applies.
        g.draw_rect(0.0, 0.0, 1.0, 1.0);
        assert!(g.create_render_data().is_empty());
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn ellipse_is_four_cubics_ending_at_start() {
        let mut g = Graphics::new();
        g.draw_ellipse(0.0, 0.0, 20.0, 10.0);
        let GraphicsData::Path(p) = &g.items()[0] else { panic!("expected path") };
        assert_eq!(p.len(), 5);
        assert_eq!(p.commands().iter().filter(|&&c| c == PathCommand::CurveTo).count(), 4);
        assert_eq!(p.current_point(), Some(UserPoint::new(20.0, 5.0)));
    }

    #[test]
    fn triangles_and_graphics_data_append_items() {
        let mut g = Graphics::new();
        let mut path = Path::new();
        path.move_to(1.0, 1.0);
        path.line_to(9.0, 9.0);
        g.draw_graphics_data([GraphicsData::from(SolidFill::new(3, 1.0)), path.into()]);
        g.draw_triangles(TrianglePath::from_vertices(vec![0.0; 6], Vec::new()).unwrap());

        assert_eq!(g.len(), 3);
        assert_eq!(g.pen(), Some(UserPoint::new(9.0, 9.0)));
        let batches = g.create_render_data();
        assert!(matches!(batches[0], RenderData::Solid(_)));
        assert!(matches!(batches[1], RenderData::Triangles(_)));
    }
}
