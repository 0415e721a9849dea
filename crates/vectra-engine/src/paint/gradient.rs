use crate::coords::Matrix;

/// Gradient geometry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
}

/// Gradient spread behavior outside the [0, 255] ratio range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMethod {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Mirror-repeat the gradient pattern.
    Reflect,
    /// Repeat the gradient pattern.
    Repeat,
}

/// Color space used to interpolate between stops.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum InterpolationMethod {
    LinearRgb,
    #[default]
    Rgb,
}

/// A single gradient stop.
///
/// `ratio` positions the stop along the gradient axis, 0 at the start and
/// 255 at the end.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradStop {
    pub rgb: u32,
    pub alpha: f32,
    pub ratio: u8,
}

impl GradStop {
    #[inline]
    pub fn new(rgb: u32, alpha: f32, ratio: u8) -> Self {
        Self { rgb: rgb & 0x00FF_FFFF, alpha, ratio }
    }
}

/// Gradient fill definition.
///
/// Semantics:
/// - `matrix` maps the gradient box (see [`Matrix::gradient_box`]) into user space.
/// - `focal_point_ratio` only affects radial gradients; it is kept in [-1, 1].
/// - An empty stop list is degenerate and paints nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientFill {
    pub kind: GradientType,
    pub stops: Vec<GradStop>,
    pub matrix: Matrix,
    pub spread: SpreadMethod,
    pub interpolation: InterpolationMethod,
    pub focal_point_ratio: f64,
}

impl GradientFill {
    pub fn new(kind: GradientType, stops: Vec<GradStop>) -> Self {
        Self {
            kind,
            stops,
            matrix: Matrix::identity(),
            spread: SpreadMethod::default(),
            interpolation: InterpolationMethod::default(),
            focal_point_ratio: 0.0,
        }
    }

    #[inline]
    pub fn linear(stops: Vec<GradStop>) -> Self {
        Self::new(GradientType::Linear, stops)
    }

    #[inline]
    pub fn radial(stops: Vec<GradStop>) -> Self {
        Self::new(GradientType::Radial, stops)
    }

    /// Builds stops from the parallel `colors` / `alphas` / `ratios` arrays of
    /// the drawing API. Extra entries in longer arrays are dropped.
    pub fn from_arrays(kind: GradientType, colors: &[u32], alphas: &[f32], ratios: &[u8]) -> Self {
        let n = colors.len().min(alphas.len()).min(ratios.len());
        if n != colors.len() || n != alphas.len() || n != ratios.len() {
            log::warn!(
                "gradient arrays differ in length (colors={}, alphas={}, ratios={}); using {n} stops",
                colors.len(),
                alphas.len(),
                ratios.len()
            );
        }
        let stops = (0..n)
            .map(|i| GradStop::new(colors[i], alphas[i], ratios[i]))
            .collect();
        Self::new(kind, stops)
    }

    pub fn with_matrix(mut self, matrix: Matrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_focal_point_ratio(mut self, ratio: f64) -> Self {
        self.focal_point_ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(-1.0, 1.0) };
        self
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        self.kind == GradientType::Linear
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        !self.stops.is_empty() && self.stops.iter().all(|s| s.alpha >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_arrays_truncates_to_shortest() {
        let g = GradientFill::from_arrays(
            GradientType::Radial,
            &[0xFF0000, 0x00FF00, 0x0000FF],
            &[1.0, 0.5],
            &[0, 128, 255],
        );
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.stops[1], GradStop::new(0x00FF00, 0.5, 128));
        assert!(!g.is_linear());
    }

    #[test]
    fn focal_point_ratio_is_clamped() {
        let g = GradientFill::radial(vec![]).with_focal_point_ratio(4.0);
        assert_eq!(g.focal_point_ratio, 1.0);
        let g = g.with_focal_point_ratio(f64::NAN);
        assert_eq!(g.focal_point_ratio, 0.0);
    }

    #[test]
    fn empty_stops_are_degenerate_not_opaque() {
        let g = GradientFill::linear(Vec::new());
        assert!(g.is_degenerate());
        assert!(!g.is_opaque());
    }
}
