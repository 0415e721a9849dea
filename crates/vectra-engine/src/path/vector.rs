use crate::coords::UserPoint;

use super::{PathCommand, PathError, WindingRule};

/// Vector path: a command stream paired with a flat operand stream.
///
/// Invariant: `data.len()` equals the sum of
/// [`operand_count`](PathCommand::operand_count) over `commands`. The
/// appending methods keep it; [`from_parts`](Path::from_parts) checks it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    data: Vec<f32>,
    pub winding: WindingRule,
}

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_winding(winding: WindingRule) -> Self {
        Self { winding, ..Self::default() }
    }

    /// Builds a path from raw command tags and operands.
    pub fn from_parts(commands: &[u8], data: Vec<f32>, winding: WindingRule) -> Result<Self, PathError> {
        let commands = commands
            .iter()
            .enumerate()
            .map(|(index, &tag)| PathCommand::from_u8(tag).ok_or(PathError::UnknownCommand { tag, index }))
            .collect::<Result<Vec<_>, _>>()?;

        let expected: usize = commands.iter().map(|c| c.operand_count()).sum();
        if expected != data.len() {
            return Err(PathError::OperandCountMismatch { expected, found: data.len() });
        }

        Ok(Self { commands, data, winding })
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Command stream as raw tags.
    #[inline]
    pub fn command_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.commands)
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Removes all commands. Keeps allocated capacity and the winding rule.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.data.clear();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.push(PathCommand::MoveTo, &[x, y]);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.push(PathCommand::LineTo, &[x, y]);
    }

    /// Quadratic curve from the pen through control `(cx, cy)` to anchor `(ax, ay)`.
    ///
    /// Stored as the equivalent cubic; a path with no pen position starts at the origin.
    pub fn curve_to(&mut self, cx: f32, cy: f32, ax: f32, ay: f32) {
        let p0 = self.current_point().unwrap_or_default();
        self.curve_from(p0, cx, cy, ax, ay);
    }

    /// [`curve_to`](Path::curve_to) starting at `p0`, for paths that continue a
    /// pen position recorded elsewhere.
    pub(crate) fn curve_from(&mut self, p0: UserPoint, cx: f32, cy: f32, ax: f32, ay: f32) {
        let c = UserPoint::new(cx, cy);
        let a = UserPoint::new(ax, ay);
        let c1 = p0 + (c - p0) * (2.0 / 3.0);
        let c2 = a + (c - a) * (2.0 / 3.0);
        self.push(PathCommand::CurveTo, &[c1.x, c1.y, c2.x, c2.y, ax, ay]);
    }

    pub fn cubic_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, ax: f32, ay: f32) {
        self.push(PathCommand::CurveTo, &[c1x, c1y, c2x, c2y, ax, ay]);
    }

    pub fn wide_move_to(&mut self, x: f32, y: f32) {
        self.push(PathCommand::WideMoveTo, &[0.0, 0.0, x, y]);
    }

    pub fn wide_line_to(&mut self, x: f32, y: f32) {
        self.push(PathCommand::WideLineTo, &[0.0, 0.0, x, y]);
    }

    /// Appends one command with its operands.
    pub(crate) fn push(&mut self, command: PathCommand, operands: &[f32]) {
        debug_assert_eq!(command.operand_count(), operands.len());
        self.commands.push(command);
        self.data.extend_from_slice(operands);
    }

    /// Appends every command of `other`. The winding rule of `self` is kept.
    pub fn append(&mut self, other: &Path) {
        self.commands.extend_from_slice(&other.commands);
        self.data.extend_from_slice(&other.data);
    }

    /// Pen position after the last positional command.
    pub fn current_point(&self) -> Option<UserPoint> {
        let mut end = self.data.len();
        for &cmd in self.commands.iter().rev() {
            let start = end - cmd.operand_count();
            if let Some(p) = cmd.end_point(&self.data[start..end]) {
                return Some(p);
            }
            end = start;
        }
        None
    }

    /// Iterates `(command, operands)` pairs in order.
    #[inline]
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.commands, &self.data)
    }
}

/// Iterator over `(command, operands)` pairs of a command/operand stream.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    commands: core::slice::Iter<'a, PathCommand>,
    data: &'a [f32],
}

impl<'a> Segments<'a> {
    /// Walks a raw stream. `data` must satisfy the operand-count invariant.
    pub fn new(commands: &'a [PathCommand], data: &'a [f32]) -> Self {
        Self { commands: commands.iter(), data }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = (PathCommand, &'a [f32]);

    fn next(&mut self) -> Option<Self::Item> {
        let &cmd = self.commands.next()?;
        let (operands, rest) = self.data.split_at(cmd.operand_count());
        self.data = rest;
        Some((cmd, operands))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.commands.size_hint()
    }
}

impl ExactSizeIterator for Segments<'_> {}
