use std::rc::Rc;

use crate::coords::UserPoint;
use crate::paint::{Fill, Stroke};
use crate::path::{Path, PathCommand, Segments, TrianglePath, WindingRule};

/// One renderer-ready batch.
///
/// Every batch is produced under a single fill or stroke; a style change
/// always starts a new batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderData {
    Solid(SolidData),
    Line(LineData),
    Triangles(TriangleData),
}

impl RenderData {
    /// Command stream of path batches; `None` for triangle batches.
    pub fn commands(&self) -> Option<&[PathCommand]> {
        match self {
            RenderData::Solid(s) => Some(s.commands()),
            RenderData::Line(l) => Some(l.commands()),
            RenderData::Triangles(_) => None,
        }
    }
}

impl From<SolidData> for RenderData {
    fn from(data: SolidData) -> Self {
        RenderData::Solid(data)
    }
}

impl From<LineData> for RenderData {
    fn from(data: LineData) -> Self {
        RenderData::Line(data)
    }
}

impl From<TriangleData> for RenderData {
    fn from(data: TriangleData) -> Self {
        RenderData::Triangles(data)
    }
}

// ── command stream ────────────────────────────────────────────────────────

/// Pen position and the state of the subpath it is drawing.
///
/// The converter keeps one across every path it sees, so a batch opened in
/// the middle of a subpath can pick up where the geometry actually is.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct Cursor {
    pub pen: Option<UserPoint>,
    pub subpath_start: Option<UserPoint>,
    /// Unit direction of the subpath's first non-degenerate segment.
    pub first_direction: Option<UserPoint>,
    /// The subpath already carries a `CloseDirection`.
    pub loop_closed: bool,
}

impl Cursor {
    /// A fresh subpath starting at `p`.
    fn at(p: UserPoint) -> Self {
        Self {
            pen: Some(p),
            subpath_start: Some(p),
            ..Self::default()
        }
    }

    /// Advances over one command.
    pub fn advance(&mut self, cmd: PathCommand, ops: &[f32]) {
        if cmd == PathCommand::CloseDirection {
            self.loop_closed = true;
            return;
        }
        let Some(end) = cmd.end_point(ops) else { return };
        if cmd.is_move() {
            *self = Self::at(end);
            return;
        }
        // A segment with no preceding move starts at the origin.
        let from = self.pen.unwrap_or_default();
        self.subpath_start.get_or_insert(from);
        if self.first_direction.is_none() {
            self.first_direction = start_direction(cmd, ops, from);
        }
        self.pen = Some(end);
    }

    pub fn advance_path(&mut self, path: &Path) {
        for (cmd, ops) in path.segments() {
            self.advance(cmd, ops);
        }
    }

    fn is_at_subpath_start(&self) -> bool {
        matches!((self.pen, self.subpath_start), (Some(p), Some(s)) if p == s)
    }
}

/// True when `path` draws from wherever the pen already is.
fn continues_pen(path: &Path) -> bool {
    path.commands().first().is_some_and(|cmd| !cmd.is_move())
}

/// Command/operand pair shared by the path batches.
#[derive(Debug, Clone, Default, PartialEq)]
struct Stream {
    commands: Vec<PathCommand>,
    data: Vec<f32>,
    cursor: Cursor,
}

impl Stream {
    fn push(&mut self, cmd: PathCommand, operands: &[f32]) {
        debug_assert_eq!(cmd.operand_count(), operands.len());
        self.commands.push(cmd);
        self.data.extend_from_slice(operands);
    }

    /// Opens the stream with a move to `cursor`'s pen, adopting `cursor` as
    /// the state of the subpath being continued.
    fn resume(&mut self, cursor: Cursor) {
        if let Some(pen) = cursor.pen {
            self.push(PathCommand::MoveTo, &[pen.x, pen.y]);
            self.cursor = cursor;
        }
    }
}

// ── solid ─────────────────────────────────────────────────────────────────

/// Filled geometry: every path drawn while one fill was active.
///
/// Paths are appended verbatim; [`close`](SolidData::close) adds the final
/// edge back to the start of the last subpath.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidData {
    pub fill: Fill,
    /// Winding rule of the first path added.
    pub winding: WindingRule,
    stream: Stream,
}

impl SolidData {
    pub fn new(fill: Fill) -> Self {
        Self {
            fill,
            winding: WindingRule::default(),
            stream: Stream::default(),
        }
    }

    pub fn add(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        if self.stream.commands.is_empty() {
            self.winding = path.winding;
        }
        for (cmd, ops) in path.segments() {
            self.stream.cursor.advance(cmd, ops);
            self.stream.push(cmd, ops);
        }
    }

    /// Adds `path`, which was drawn with the pen state `lead`. A first path
    /// that continues the pen is preceded by a move to it, so the fill region
    /// starts where the pen is.
    pub(crate) fn add_after(&mut self, lead: &Cursor, path: &Path) {
        if path.is_empty() {
            return;
        }
        if self.is_empty() {
            self.winding = path.winding;
            if let (true, Some(pen)) = (continues_pen(path), lead.pen) {
                self.stream.resume(Cursor::at(pen));
            }
        }
        self.add(path);
    }

    /// Appends one `LineTo` to the last subpath's start unless the pen is
    /// already there. Idempotent.
    pub fn close(&mut self) {
        let Some(start) = self.stream.cursor.subpath_start else { return };
        if self.stream.cursor.is_at_subpath_start() {
            return;
        }
        self.stream.push(PathCommand::LineTo, &[start.x, start.y]);
        self.stream.cursor.pen = Some(start);
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.stream.commands
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.stream.data
    }

    /// Operands as raw bytes, ready for upload.
    #[inline]
    pub fn data_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stream.data)
    }

    #[inline]
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.stream.commands, &self.stream.data)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stream.commands.is_empty()
    }
}

// ── line ──────────────────────────────────────────────────────────────────

/// Stroked geometry: every path drawn while one stroke was active.
///
/// A subpath that ends where it started gets one trailing `CloseDirection`
/// holding the unit direction of its first segment, so the renderer can join
/// the seam instead of capping both ends. Subpaths continued from an earlier
/// batch keep their real start and first direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineData {
    pub stroke: Option<Stroke>,
    stream: Stream,
}

impl LineData {
    pub fn new(stroke: Stroke) -> Self {
        Self {
            stroke: Some(stroke),
            ..Self::default()
        }
    }

    pub fn add(&mut self, path: &Path) {
        for (cmd, ops) in path.segments() {
            if cmd.is_move() {
                self.close_loop();
            }
            self.stream.cursor.advance(cmd, ops);
            self.stream.push(cmd, ops);
        }
    }

    /// Adds `path`, which was drawn with the pen state `lead`. A first path
    /// that continues the pen resumes `lead`'s subpath behind a move to the
    /// pen, so a loop spanning several batches still closes.
    pub(crate) fn add_after(&mut self, lead: &Cursor, path: &Path) {
        if self.is_empty() && continues_pen(path) {
            self.stream.resume(*lead);
        }
        self.add(path);
    }

    /// Closes the last subpath if it forms a loop. Idempotent.
    pub fn close(&mut self) {
        self.close_loop();
    }

    fn close_loop(&mut self) {
        let cursor = &mut self.stream.cursor;
        if cursor.loop_closed || !cursor.is_at_subpath_start() {
            return;
        }
        if let Some(dir) = cursor.first_direction {
            cursor.loop_closed = true;
            self.stream.push(PathCommand::CloseDirection, &[dir.x, dir.y]);
        }
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.stream.commands
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.stream.data
    }

    #[inline]
    pub fn data_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stream.data)
    }

    #[inline]
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.stream.commands, &self.stream.data)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stream.commands.is_empty()
    }
}

/// Unit tangent leaving `from`. Curves whose first control point sits on
/// the pen fall back to the chord.
fn start_direction(cmd: PathCommand, ops: &[f32], from: UserPoint) -> Option<UserPoint> {
    let towards = cmd.first_control(ops)?;
    (towards - from)
        .normalized()
        .or_else(|| cmd.end_point(ops).and_then(|end| (end - from).normalized()))
}

// ── triangles ─────────────────────────────────────────────────────────────

/// A triangle mesh bound to the fill and stroke active when it was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleData {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub triangles: Rc<TrianglePath>,
}
