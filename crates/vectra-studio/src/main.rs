use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use vectra_engine::coords::Matrix;
use vectra_engine::graphics::Graphics;
use vectra_engine::logging::{LoggingConfig, init_logging};
use vectra_engine::paint::{BitmapFill, GradientFill, GradientType, SpreadMethod, Stroke, StrokeJoints};
use vectra_engine::path::TrianglePath;
use vectra_engine::render::{RenderData, RenderTarget, TextData, Tile, Transform};
use vectra_engine::stage::{Event, EventType, HeadlessStage, Stage};
use vectra_engine::surface::{PixelFormat, SimpleSurface, SurfaceRef};

const CANVAS_W: u32 = 256;
const CANVAS_H: u32 = 160;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let out = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("vectra-studio.png"));

    let checker = checkerboard(8).context("building checkerboard tile")?;
    let mut scene = build_scene(checker.clone()).context("building display list")?;
    log_batches(scene.create_render_data());

    let canvas = Rc::new(RefCell::new(SimpleSurface::new(CANVAS_W, CANVAS_H, PixelFormat::Argb)));
    canvas
        .borrow_mut()
        .fill(0xFF20_2428)
        .context("clearing canvas")?;
    let shared: SurfaceRef = canvas.clone();
    let mut stage = HeadlessStage::new(shared);

    stage.set_event_handler(Some(Box::new(|ev: &mut Event| {
        log::info!("event {:?} at ({}, {})", ev.kind, ev.win_x, ev.win_y);
    })));
    stage.send(Event::new(EventType::Redraw));

    let target = stage.render_target();
    target.begin_render();
    target.render_graphics(&mut scene, &Transform::default());
    target.render_graphics(&mut scene, &Transform::from_matrix(Matrix::translation(4.0, 4.0)));
    target.render_text(&vec![TextData::new("vectra", 8.0, 150.0)], &Transform::default());

    let tile = Tile::whole(checker);
    for (i, rotation) in (0..4).enumerate() {
        let x = 16 + i as i32 * 40;
        target
            .blit(&tile, x, 16, 1.0 + i as f64 * 0.5, rotation)
            .with_context(|| format!("blitting tile {i}"))?;
    }
    target.end_render();
    stage.flip();
    stage.send(Event::new(EventType::NextFrame));

    let stats = stage.surface_target().stats();
    log::info!(
        "frame {}: {} batches ({} reused), {} tiles",
        stage.frames(),
        stats.batches,
        stats.cache_hits,
        stats.tiles
    );

    write_png(&canvas.borrow(), &out)?;
    log::info!("wrote {}", out.display());
    Ok(())
}

/// Saves `surface` as PNG, whatever extension `out` carries.
fn write_png(surface: &SimpleSurface, out: &Path) -> Result<()> {
    let image: RgbaImage = surface.to_rgba_image();
    image
        .save_with_format(out, ImageFormat::Png)
        .with_context(|| format!("writing {}", out.display()))
}

/// 2×2-cell opaque checkerboard, `cell` pixels per cell.
fn checkerboard(cell: u32) -> Result<SurfaceRef> {
    let mut s = SimpleSurface::new(cell * 2, cell * 2, PixelFormat::Xrgb);
    for y in 0..cell * 2 {
        for x in 0..cell * 2 {
            let light = (x / cell + y / cell) % 2 == 0;
            s.set_pixel(x, y, if light { 0xFFE0E0E0 } else { 0xFF404040 })?;
        }
    }
    Ok(s.into_shared())
}

fn build_scene(bitmap: SurfaceRef) -> Result<Graphics> {
    let mut g = Graphics::new();

    g.begin_fill(0xD03030, 1.0);
    g.draw_rect(10.0, 60.0, 60.0, 40.0);

    let gradient = GradientFill::from_arrays(
        GradientType::Radial,
        &[0xFFFF00, 0x0080FF],
        &[1.0, 0.6],
        &[0, 255],
    )
    .with_matrix(Matrix::gradient_box(60.0, 60.0, 0.0, 80.0, 50.0))
    .with_spread(SpreadMethod::Reflect);
    g.begin_gradient_fill(gradient);
    g.line_style(Stroke::solid(2.0, 0xFFFFFF, 1.0).with_joints(StrokeJoints::Miter));
    g.draw_circle(110.0, 80.0, 30.0);
    g.end_fill();

    g.draw_ellipse(150.0, 60.0, 50.0, 30.0);
    g.clear_line_style();

    g.begin_bitmap_fill(BitmapFill::new(bitmap).with_matrix(Matrix::scaling(0.5, 0.5)));
    g.draw_triangles(
        TrianglePath::from_vertices(
            vec![200.0, 100.0, 250.0, 100.0, 250.0, 150.0, 200.0, 150.0],
            vec![0, 1, 2, 0, 2, 3],
        )
        .context("quad mesh")?,
    );
    g.end_fill();

    Ok(g)
}

fn log_batches(batches: &[RenderData]) {
    for (i, batch) in batches.iter().enumerate() {
        match batch {
            RenderData::Solid(s) => log::info!(
                "#{i} solid: {} commands, {} bytes, opaque={}",
                s.commands().len(),
                s.data_bytes().len(),
                s.fill.is_opaque()
            ),
            RenderData::Line(l) => log::info!(
                "#{i} line: {} commands, thickness {:?}",
                l.commands().len(),
                l.stroke.as_ref().map(|s| s.thickness)
            ),
            RenderData::Triangles(t) => log::info!(
                "#{i} triangles: {} tris, textured={}",
                t.triangles.triangle_count(),
                t.triangles.has_uvt()
            ),
        }
    }
}
