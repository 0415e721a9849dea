use std::rc::Rc;

use crate::paint::{Fill, Stroke};
use crate::render::{Cursor, LineData, RenderData, SolidData, TriangleData};

use super::GraphicsData;

/// Style and pen carried across conversion passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ConvertState {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub cursor: Cursor,
}

/// Batches open during one pass. Opened lazily on the first path, so a style
/// that draws nothing produces nothing.
#[derive(Default)]
struct OpenBatches {
    solid: Option<SolidData>,
    line: Option<LineData>,
}

impl OpenBatches {
    fn close_solid(&mut self, out: &mut Vec<RenderData>) {
        if let Some(mut solid) = self.solid.take() {
            solid.close();
            out.push(RenderData::Solid(solid));
        }
    }

    fn close_line(&mut self, out: &mut Vec<RenderData>) {
        if let Some(mut line) = self.line.take() {
            line.close();
            out.push(RenderData::Line(line));
        }
    }
}

/// Converts `items` in one forward pass, appending batches to `out`.
///
/// Returns the number of batches emitted.
pub(crate) fn convert(items: &[GraphicsData], state: &mut ConvertState, out: &mut Vec<RenderData>) -> usize {
    let before = out.len();
    let mut open = OpenBatches::default();

    for item in items {
        match item {
            GraphicsData::EndFill
            | GraphicsData::SolidFill(_)
            | GraphicsData::GradientFill(_)
            | GraphicsData::BitmapFill(_) => {
                open.close_solid(out);
                state.fill = item.to_fill().flatten();
            }
            GraphicsData::Stroke(stroke) => {
                open.close_line(out);
                state.stroke = (!stroke.is_clear()).then(|| stroke.clone());
            }
            GraphicsData::Path(path) => {
                if path.is_empty() {
                    continue;
                }
                let lead = state.cursor;
                state.cursor.advance_path(path);
                if let Some(fill) = &state.fill {
                    open.solid
                        .get_or_insert_with(|| SolidData::new(fill.clone()))
                        .add_after(&lead, path);
                }
                if let Some(stroke) = &state.stroke {
                    open.line
                        .get_or_insert_with(|| LineData::new(stroke.clone()))
                        .add_after(&lead, path);
                }
            }
            GraphicsData::TrianglePath(triangles) => {
                open.close_solid(out);
                open.close_line(out);
                out.push(RenderData::Triangles(TriangleData {
                    fill: state.fill.clone(),
                    stroke: state.stroke.clone(),
                    triangles: Rc::clone(triangles),
                }));
            }
        }
    }

    open.close_solid(out);
    open.close_line(out);

    let emitted = out.len() - before;
    log::trace!("converted {} items into {} batches", items.len(), emitted);
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::SolidFill;
    use crate::path::{Path, PathCommand, TrianglePath};

    fn square(x: f32) -> Path {
        let mut p = Path::new();
        p.move_to(x, 0.0);
        p.line_to(x + 1.0, 0.0);
        p.line_to(x + 1.0, 1.0);
        p.line_to(x, 1.0);
        p.line_to(x, 0.0);
        p
    }

    fn run(items: Vec<GraphicsData>) -> Vec<RenderData> {
        let mut out = Vec::new();
        convert(&items, &mut ConvertState::default(), &mut out);
        out
    }

    // ── fills ─────────────────────────────────────────────────────────────

    #[test]
    fn paths_without_style_draw_nothing() {
        assert!(run(vec![square(0.0).into()]).is_empty());
    }

    #[test]
    fn solid_batch_concatenates_paths_between_fill_changes() {
        let red = SolidFill::new(0xFF0000, 1.0);
        let blue = SolidFill::new(0x0000FF, 1.0);
        let out = run(vec![
            red.into(),
            square(0.0).into(),
            square(5.0).into(),
            blue.into(),
            square(10.0).into(),
            GraphicsData::EndFill,
            square(20.0).into(),
        ]);

        assert_eq!(out.len(), 2);
        let RenderData::Solid(first) = &out[0] else { panic!("expected solid batch") };
        assert_eq!(first.fill, Fill::Solid(red));
        let mut expected = square(0.0);
        expected.append(&square(5.0));
        assert_eq!(first.commands(), expected.commands());
        assert_eq!(first.data(), expected.data());

        let RenderData::Solid(second) = &out[1] else { panic!("expected solid batch") };
        assert_eq!(second.fill, Fill::Solid(blue));
        assert_eq!(second.commands().len(), 5);
    }

    #[test]
    fn fill_without_geometry_emits_no_batch() {
        let out = run(vec![
            SolidFill::new(1, 1.0).into(),
            SolidFill::new(2, 1.0).into(),
            Path::new().into(),
            GraphicsData::EndFill,
        ]);
        assert!(out.is_empty());
    }

    // ── strokes ───────────────────────────────────────────────────────────

    #[test]
    fn fill_and_stroke_batch_independently() {
        let out = run(vec![
            Stroke::solid(2.0, 0, 1.0).into(),
            SolidFill::new(1, 1.0).into(),
            square(0.0).into(),
            SolidFill::new(2, 1.0).into(),
            square(5.0).into(),
        ]);
        let kinds: Vec<_> = out
            .iter()
            .map(|rd| match rd {
                RenderData::Solid(_) => 's',
                RenderData::Line(_) => 'l',
                RenderData::Triangles(_) => 't',
            })
            .collect();
        assert_eq!(kinds, vec!['s', 's', 'l']);

        let RenderData::Line(line) = &out[2] else { panic!("expected line batch") };
        let closes = line.commands().iter().filter(|&&c| c == PathCommand::CloseDirection).count();
        assert_eq!(closes, 2);
    }

    #[test]
    fn clear_stroke_stops_lines() {
        let out = run(vec![
            Stroke::solid(1.0, 0, 1.0).into(),
            square(0.0).into(),
            Stroke::clear().into(),
            square(5.0).into(),
        ]);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], RenderData::Line(_)));
    }

    // ── triangles ─────────────────────────────────────────────────────────

    #[test]
    fn triangles_split_open_batches() {
        let mesh = TrianglePath::from_vertices(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0], Vec::new()).unwrap();
        let fill = SolidFill::new(0x123456, 1.0);
        let out = run(vec![
            fill.into(),
            square(0.0).into(),
            mesh.into(),
            square(5.0).into(),
        ]);
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], RenderData::Solid(_)));
        let RenderData::Triangles(tri) = &out[1] else { panic!("expected triangle batch") };
        assert_eq!(tri.fill, Some(Fill::Solid(fill)));
        assert_eq!(tri.stroke, None);
        assert_eq!(tri.triangles.triangle_count(), 1);
        assert!(matches!(out[2], RenderData::Solid(_)));
    }

    #[test]
    fn triangles_bind_the_active_stroke() {
        let mesh = TrianglePath::from_vertices(vec![0.0, 0.0, 4.0, 0.0, 0.0, 4.0], Vec::new()).unwrap();
        let stroke = Stroke::solid(3.0, 0x00FF00, 0.5);
        let out = run(vec![
            stroke.clone().into(),
            square(0.0).into(),
            mesh.clone().into(),
            Stroke::clear().into(),
            mesh.into(),
        ]);
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], RenderData::Line(_)));
        let RenderData::Triangles(stroked) = &out[1] else { panic!("expected triangle batch") };
        assert_eq!(stroked.stroke, Some(stroke));
        assert_eq!(stroked.fill, None);
        let RenderData::Triangles(bare) = &out[2] else { panic!("expected triangle batch") };
        assert_eq!(bare.stroke, None);
    }

    // ── wide commands ─────────────────────────────────────────────────────

    #[test]
    fn wide_paths_reach_both_batches_verbatim() {
        let mut wide = Path::new();
        wide.wide_move_to(2.0, 3.0);
        wide.wide_line_to(8.0, 3.0);
        wide.wide_line_to(8.0, 9.0);
        wide.wide_line_to(2.0, 3.0);
        let out = run(vec![
            SolidFill::new(9, 1.0).into(),
            Stroke::solid(1.0, 0, 1.0).into(),
            wide.clone().into(),
        ]);
        assert_eq!(out.len(), 2);

        let RenderData::Solid(solid) = &out[0] else { panic!("expected solid batch") };
        // Already back at (2, 3): no extra edge.
        assert_eq!(solid.commands(), wide.commands());
        assert_eq!(solid.data(), wide.data());

        let RenderData::Line(line) = &out[1] else { panic!("expected line batch") };
        assert_eq!(&line.commands()[..4], wide.commands());
        assert_eq!(&line.data()[..16], wide.data());
        assert_eq!(line.commands()[4], PathCommand::CloseDirection);
        assert_eq!(&line.data()[16..], &[1.0, 0.0]);
    }

    // ── incremental ───────────────────────────────────────────────────────

    #[test]
    fn loop_spanning_passes_closes_once() {
        let mut head = Path::new();
        head.move_to(0.0, 0.0);
        head.line_to(10.0, 0.0);
        head.line_to(10.0, 10.0);
        let mut tail = Path::new();
        tail.line_to(0.0, 0.0);
        let items: [GraphicsData; 3] = [Stroke::solid(1.0, 0, 1.0).into(), head.into(), tail.into()];

        let closes = |out: &[RenderData]| -> Vec<Vec<f32>> {
            out.iter()
                .filter_map(|rd| match rd {
                    RenderData::Line(l) => Some(l),
                    _ => None,
                })
                .flat_map(|l| l.segments())
                .filter(|(cmd, _)| *cmd == PathCommand::CloseDirection)
                .map(|(_, dir)| dir.to_vec())
                .collect()
        };

        let mut whole = Vec::new();
        convert(&items, &mut ConvertState::default(), &mut whole);

        let mut state = ConvertState::default();
        let mut split = Vec::new();
        convert(&items[..2], &mut state, &mut split);
        convert(&items[2..], &mut state, &mut split);

        assert_eq!(closes(&whole), vec![vec![1.0, 0.0]]);
        assert_eq!(closes(&split), closes(&whole));
        // The second pass opens its batch with a move to where the pen stopped.
        let RenderData::Line(resumed) = &split[1] else { panic!("expected line batch") };
        assert_eq!(&resumed.data()[..2], &[10.0, 10.0]);
    }


    #[test]
    fn state_carries_across_passes() {
        let mut state = ConvertState::default();
        let mut out = Vec::new();
        let first: [GraphicsData; 2] = [SolidFill::new(7, 1.0).into(), square(0.0).into()];
        assert_eq!(convert(&first, &mut state, &mut out), 1);

        let second: [GraphicsData; 1] = [square(3.0).into()];
        assert_eq!(convert(&second, &mut state, &mut out), 1);
        let RenderData::Solid(batch) = &out[1] else { panic!("expected solid batch") };
        assert_eq!(batch.fill, Fill::solid(7, 1.0));
    }
}
