use std::rc::Rc;

use crate::paint::{BitmapFill, Fill, GradientFill, SolidFill, Stroke};
use crate::path::{Path, TrianglePath};

/// Discriminant of [`GraphicsData`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GraphicsDataType {
    EndFill,
    SolidFill,
    GradientFill,
    BitmapFill,
    Path,
    TrianglePath,
    Stroke,
}

/// One entry of a display list, mirroring the Flash `IGraphicsData` family.
///
/// Fill entries change the fill for subsequent paths, stroke entries change
/// the line style, and path entries carry geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsData {
    EndFill,
    SolidFill(SolidFill),
    GradientFill(GradientFill),
    BitmapFill(BitmapFill),
    Path(Path),
    /// Shared so triangle batches reference the mesh without copying it.
    TrianglePath(Rc<TrianglePath>),
    /// A [clear](Stroke::is_clear) stroke turns line drawing off.
    Stroke(Stroke),
}

impl GraphicsData {
    pub fn data_type(&self) -> GraphicsDataType {
        match self {
            GraphicsData::EndFill => GraphicsDataType::EndFill,
            GraphicsData::SolidFill(_) => GraphicsDataType::SolidFill,
            GraphicsData::GradientFill(_) => GraphicsDataType::GradientFill,
            GraphicsData::BitmapFill(_) => GraphicsDataType::BitmapFill,
            GraphicsData::Path(_) => GraphicsDataType::Path,
            GraphicsData::TrianglePath(_) => GraphicsDataType::TrianglePath,
            GraphicsData::Stroke(_) => GraphicsDataType::Stroke,
        }
    }

    /// True for entries that change the current fill (including `EndFill`).
    #[inline]
    pub fn is_fill(&self) -> bool {
        matches!(
            self,
            GraphicsData::EndFill
                | GraphicsData::SolidFill(_)
                | GraphicsData::GradientFill(_)
                | GraphicsData::BitmapFill(_)
        )
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        matches!(self, GraphicsData::Path(_) | GraphicsData::TrianglePath(_))
    }

    /// The fill this entry selects: `Some(None)` for `EndFill`, `None` for
    /// entries that are not fills.
    pub fn to_fill(&self) -> Option<Option<Fill>> {
        match self {
            GraphicsData::EndFill => Some(None),
            GraphicsData::SolidFill(f) => Some(Some(Fill::Solid(*f))),
            GraphicsData::GradientFill(f) => Some(Some(Fill::Gradient(f.clone()))),
            GraphicsData::BitmapFill(f) => Some(Some(Fill::Bitmap(f.clone()))),
            _ => None,
        }
    }
}

impl From<Fill> for GraphicsData {
    fn from(fill: Fill) -> Self {
        match fill {
            Fill::Solid(f) => GraphicsData::SolidFill(f),
            Fill::Gradient(f) => GraphicsData::GradientFill(f),
            Fill::Bitmap(f) => GraphicsData::BitmapFill(f),
        }
    }
}

impl From<Option<Fill>> for GraphicsData {
    fn from(fill: Option<Fill>) -> Self {
        fill.map_or(GraphicsData::EndFill, GraphicsData::from)
    }
}

impl From<SolidFill> for GraphicsData {
    fn from(fill: SolidFill) -> Self {
        GraphicsData::SolidFill(fill)
    }
}

impl From<GradientFill> for GraphicsData {
    fn from(fill: GradientFill) -> Self {
        GraphicsData::GradientFill(fill)
    }
}

impl From<BitmapFill> for GraphicsData {
    fn from(fill: BitmapFill) -> Self {
        GraphicsData::BitmapFill(fill)
    }
}

impl From<Path> for GraphicsData {
    fn from(path: Path) -> Self {
        GraphicsData::Path(path)
    }
}

impl From<TrianglePath> for GraphicsData {
    fn from(path: TrianglePath) -> Self {
        GraphicsData::TrianglePath(Rc::new(path))
    }
}

impl From<Stroke> for GraphicsData {
    fn from(stroke: Stroke) -> Self {
        GraphicsData::Stroke(stroke)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_entries_report_their_fill() {
        let solid = GraphicsData::from(SolidFill::new(0x00FF00, 0.5));
        assert_eq!(solid.data_type(), GraphicsDataType::SolidFill);
        assert!(solid.is_fill());
        assert_eq!(solid.to_fill(), Some(Some(Fill::solid(0x00FF00, 0.5))));

        assert_eq!(GraphicsData::EndFill.to_fill(), Some(None));
        assert_eq!(GraphicsData::from(Path::new()).to_fill(), None);
    }

    #[test]
    fn optional_fill_maps_to_end_fill() {
        assert_eq!(GraphicsData::from(None::<Fill>), GraphicsData::EndFill);
        let g = GraphicsData::from(Some(Fill::Gradient(GradientFill::linear(Vec::new()))));
        assert_eq!(g.data_type(), GraphicsDataType::GradientFill);
    }

    #[test]
    fn path_entries() {
        assert!(GraphicsData::from(Path::new()).is_path());
        assert!(GraphicsData::from(TrianglePath::default()).is_path());
        assert!(!GraphicsData::from(Stroke::clear()).is_path());
    }
}
