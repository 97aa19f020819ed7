//! Data-bearing scene nodes and their geometry
//!
//! Coordinates are stored as `[x, y, z]` in stored space: a coordinate on a
//! logarithmic axis holds `log10` of the displayed value.

use serde::{Deserialize, Serialize};

use super::{Colormap, Dimension, LineStyle, Marker};
use crate::core::ExportError;

/// A stored-space point
pub type Point = [f32; 3];

/// A polyline with optional markers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePlot {
    #[serde(default)]
    pub line: LineStyle,
    #[serde(default)]
    pub marker: Marker,
    #[serde(default)]
    pub positions: Vec<Point>,
}

impl LinePlot {
    pub fn new(positions: Vec<Point>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    /// Build a 2D line from `(x, y)` pairs
    pub fn from_xy(points: &[(f32, f32)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| [x, y, 0.0]).collect())
    }

    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }
}

/// Y-endpoints of the error bar drawn at one data point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorSpan {
    pub lower: f32,
    pub upper: f32,
}

/// Error bars around a line plot
///
/// The line itself is the node's direct [`LinePlot`] child; `errors[i]`
/// belongs to that line's `positions[i]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBarPlot {
    #[serde(default)]
    pub error_bar: LineStyle,
    #[serde(default)]
    pub errors: Vec<ErrorSpan>,
}

impl ErrorBarPlot {
    pub fn new(errors: Vec<ErrorSpan>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }

    pub fn with_error_bar(mut self, error_bar: LineStyle) -> Self {
        self.error_bar = error_bar;
        self
    }
}

/// Dense `rows x columns` vertex grid, row-major
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceGrid {
    pub rows: usize,
    pub columns: usize,
    pub points: Vec<Point>,
}

impl SurfaceGrid {
    /// Build a grid by evaluating `f(row, column)` for every vertex
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> Point) -> Self {
        let mut points = Vec::with_capacity(rows * columns);
        for i in 0..rows {
            for j in 0..columns {
                points.push(f(i, j));
            }
        }
        Self {
            rows,
            columns,
            points,
        }
    }

    /// Number of vertices the dimensions call for, `None` on overflow
    pub fn vertex_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    /// Fails when the dimensions overflow or there are fewer points than they call for
    pub fn validate(&self) -> Result<(), ExportError> {
        match self.vertex_count() {
            Some(count) if count <= self.points.len() => Ok(()),
            Some(count) => Err(ExportError::scene_error(format!(
                "surface grid of {}x{} needs {} points, got {}",
                self.rows,
                self.columns,
                count,
                self.points.len()
            ))),
            None => Err(ExportError::scene_error(format!(
                "surface grid of {}x{} is too large",
                self.rows, self.columns
            ))),
        }
    }

    /// Vertices in row-major order; surplus points beyond `rows * columns` are ignored
    pub fn vertices(&self) -> impl Iterator<Item = &Point> {
        self.points
            .iter()
            .take(self.rows.saturating_mul(self.columns))
    }
}

/// Surface given as a dense grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Surface {
    #[serde(default)]
    pub colormap: Colormap,
    pub grid: SurfaceGrid,
}

/// Surface given as a flat vertex list; vertices with non-finite coordinates are holes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FastSurface {
    #[serde(default)]
    pub colormap: Colormap,
    pub points: Vec<Point>,
}

/// Bounding box of stored-space data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min: Point,
    max: Point,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }
}

impl Extent {
    /// Widen the extent by every finite coordinate of `point`
    pub fn include(&mut self, point: &Point) {
        for (i, value) in point.iter().enumerate() {
            if value.is_finite() {
                self.min[i] = self.min[i].min(*value);
                self.max[i] = self.max[i].max(*value);
            }
        }
    }

    /// `(min, max)` of one dimension, or `(0, 1)` when it holds no finite data
    pub fn range(&self, dimension: Dimension) -> (f32, f32) {
        let i = dimension.index();
        if self.min[i] <= self.max[i] {
            (self.min[i], self.max[i])
        } else {
            (0.0, 1.0)
        }
    }
}

impl<'a> Extend<&'a Point> for Extent {
    fn extend<I: IntoIterator<Item = &'a Point>>(&mut self, points: I) {
        for point in points {
            self.include(point);
        }
    }
}
