use std::fmt;

/// Malformed path or mesh data.
///
/// These indicate a caller contract violation; well-formed input built with
/// the appending methods never produces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A command tag outside the known set.
    UnknownCommand { tag: u8, index: usize },
    /// Operand stream length disagrees with the command stream.
    OperandCountMismatch { expected: usize, found: usize },
    /// Vertex data must hold `(x, y)` pairs.
    VertexDataLength(usize),
    /// Index data (or sequential vertex count) is not a whole number of triangles.
    IndexCountNotTriangles(usize),
    IndexOutOfRange { index: u32, vertex_count: usize },
    UvtLength { expected: usize, found: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnknownCommand { tag, index } => {
                write!(f, "unknown path command {tag} at index {index}")
            }
            PathError::OperandCountMismatch { expected, found } => {
                write!(f, "path commands need {expected} operands, got {found}")
            }
            PathError::VertexDataLength(len) => {
                write!(f, "vertex data length {len} is not a whole number of points")
            }
            PathError::IndexCountNotTriangles(len) => {
                write!(f, "{len} indices/vertices do not form whole triangles")
            }
            PathError::IndexOutOfRange { index, vertex_count } => {
                write!(f, "triangle index {index} out of range for {vertex_count} vertices")
            }
            PathError::UvtLength { expected, found } => {
                write!(f, "uvt data needs {expected} values, got {found}")
            }
        }
    }
}

impl std::error::Error for PathError {}
