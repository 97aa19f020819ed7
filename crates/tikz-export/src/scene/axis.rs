//! Axis container configuration and its decorations (legend, title)

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Color, DashStyle, NodeId};
use crate::core::ExportError;

/// One of the three plot dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    X,
    Y,
    Z,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::X, Dimension::Y, Dimension::Z];

    /// Key prefix used by pgfplots (`x`, `y`, `z`)
    pub fn prefix(self) -> &'static str {
        match self {
            Dimension::X => "x",
            Dimension::Y => "y",
            Dimension::Z => "z",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Dimension::X => 0,
            Dimension::Y => 1,
            Dimension::Z => 2,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Mapping between stored and displayed coordinates of one axis
///
/// Logarithmic axes store `log10` of the displayed value. Scene files name
/// the mode as a string; any name other than `linear` or `logarithmic` is
/// rejected when the scene is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AxisScale {
    #[default]
    Linear,
    Logarithmic,
}

impl AxisScale {
    pub fn parse(value: &str) -> Result<Self, ExportError> {
        match value.to_lowercase().as_str() {
            "linear" => Ok(AxisScale::Linear),
            "logarithmic" | "log" => Ok(AxisScale::Logarithmic),
            _ => Err(ExportError::unsupported_scale(value)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AxisScale::Linear => "linear",
            AxisScale::Logarithmic => "logarithmic",
        }
    }

    pub fn is_logarithmic(self) -> bool {
        self == AxisScale::Logarithmic
    }

    /// Convert a stored coordinate into displayed (linear) space
    pub fn to_linear(self, value: f32) -> f32 {
        match self {
            AxisScale::Linear => value,
            AxisScale::Logarithmic => 10f64.powf(f64::from(value)) as f32,
        }
    }
}

impl TryFrom<String> for AxisScale {
    type Error = ExportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AxisScale::parse(&value)
    }
}

impl From<AxisScale> for String {
    fn from(scale: AxisScale) -> Self {
        scale.as_str().to_string()
    }
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale mode of each dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleModes {
    pub x: AxisScale,
    pub y: AxisScale,
    pub z: AxisScale,
}

impl ScaleModes {
    pub fn get(&self, dimension: Dimension) -> AxisScale {
        match dimension {
            Dimension::X => self.x,
            Dimension::Y => self.y,
            Dimension::Z => self.z,
        }
    }

    /// Convert a stored point into displayed space, dimension by dimension
    pub fn to_linear(&self, [x, y, z]: [f32; 3]) -> [f32; 3] {
        [self.x.to_linear(x), self.y.to_linear(y), self.z.to_linear(z)]
    }
}

/// How tick positions are chosen
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickMode {
    /// No explicit tick positions
    None,
    /// One tick per data coordinate
    Coordinate,
    /// Fixed tick positions
    Custom(Vec<f32>),
    #[default]
    Auto,
}

fn default_true() -> bool {
    true
}

fn default_tick_length() -> f32 {
    0.5
}

/// Tick configuration of one axis
///
/// The sign of `tick_length` selects the tick alignment: negative ticks
/// point into the plot area, positive ones outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticks {
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub minor_visible: bool,
    #[serde(default = "default_tick_length")]
    pub tick_length: f32,
    #[serde(default)]
    pub mode: TickMode,
}

impl Default for Ticks {
    fn default() -> Self {
        Self {
            visible: true,
            minor_visible: false,
            tick_length: default_tick_length(),
            mode: TickMode::Auto,
        }
    }
}

fn default_grid_width() -> u32 {
    1
}

/// Grid lines of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLines {
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub dash_style: DashStyle,
    #[serde(default = "default_grid_width")]
    pub width: u32,
}

impl Default for GridLines {
    fn default() -> Self {
        Self {
            visible: false,
            color: None,
            dash_style: DashStyle::Solid,
            width: default_grid_width(),
        }
    }
}

/// Configuration of one axis
///
/// `min`/`max` are in stored space; unset bounds fall back to the data extent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Axis {
    pub label: Option<String>,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub ticks: Ticks,
    pub grid_major: GridLines,
    pub grid_minor: GridLines,
}

impl Axis {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_limits(mut self, min: f32, max: f32) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Axes {
    pub x: Axis,
    pub y: Axis,
    pub z: Axis,
}

impl Axes {
    pub fn get(&self, dimension: Dimension) -> &Axis {
        match dimension {
            Dimension::X => &self.x,
            Dimension::Y => &self.y,
            Dimension::Z => &self.z,
        }
    }
}

/// Camera orientation of a 3D axis, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    pub azimuth: f32,
    pub elevation: f32,
}

/// Node holding the axes, the plots and their decorations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisContainer {
    #[serde(default = "default_true")]
    pub two_d_mode: bool,
    #[serde(default)]
    pub view: Option<ViewAngles>,
    #[serde(default)]
    pub scale_modes: ScaleModes,
    #[serde(default)]
    pub axes: Axes,
}

impl Default for AxisContainer {
    fn default() -> Self {
        Self {
            two_d_mode: true,
            view: None,
            scale_modes: ScaleModes::default(),
            axes: Axes::default(),
        }
    }
}

impl AxisContainer {
    pub fn three_d() -> Self {
        Self {
            two_d_mode: false,
            ..Self::default()
        }
    }
}

/// Legend anchor in relative axis coordinates, measured from the top left
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendLocation {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_legend_location")]
    pub location: LegendLocation,
    #[serde(default)]
    pub border_color: Option<Color>,
    #[serde(default)]
    pub background_color: Option<Color>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            visible: true,
            location: default_legend_location(),
            border_color: None,
            background_color: None,
        }
    }
}

fn default_legend_location() -> LegendLocation {
    LegendLocation { x: 0.95, y: 0.05 }
}

/// Caption of the plot identified by `provider`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendItem {
    pub provider: NodeId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_parse() {
        assert_eq!(AxisScale::parse("linear").unwrap(), AxisScale::Linear);
        assert_eq!(AxisScale::parse("Logarithmic").unwrap(), AxisScale::Logarithmic);
        assert_eq!(AxisScale::parse("log").unwrap(), AxisScale::Logarithmic);

        let err = AxisScale::parse("symlog").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedScale { ref value } if value == "symlog"));
    }

    #[test]
    fn test_scale_serde_rejects_unknown_mode() {
        let result: Result<ScaleModes, _> = serde_json::from_str(r#"{"x":"polar"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Unsupported axis scale"));
    }

    #[test]
    fn test_scale_to_linear() {
        assert_eq!(AxisScale::Linear.to_linear(2.0), 2.0);
        assert_eq!(AxisScale::Logarithmic.to_linear(2.0), 100.0);
        assert_eq!(AxisScale::Logarithmic.to_linear(0.0), 1.0);
    }

    #[test]
    fn test_scale_modes_apply_per_dimension() {
        let modes = ScaleModes {
            y: AxisScale::Logarithmic,
            ..ScaleModes::default()
        };
        assert_eq!(modes.to_linear([2.0, 2.0, 2.0]), [2.0, 100.0, 2.0]);
        assert_eq!(modes.get(Dimension::Y), AxisScale::Logarithmic);
    }

    #[test]
    fn test_tick_mode_serde() {
        let mode: TickMode = serde_json::from_str(r#"{"custom":[1.0,2.5]}"#).unwrap();
        assert_eq!(mode, TickMode::Custom(vec![1.0, 2.5]));
        let mode: TickMode = serde_json::from_str(r#""coordinate""#).unwrap();
        assert_eq!(mode, TickMode::Coordinate);
    }

    #[test]
    fn test_container_defaults_to_2d() {
        let container: AxisContainer = serde_json::from_str("{}").unwrap();
        assert!(container.two_d_mode);
        assert!(container.view.is_none());
        assert!(container.axes.x.ticks.visible);
    }

    #[test]
    fn test_legend_serde_defaults_match_default() {
        let legend: Legend = serde_json::from_str("{}").unwrap();
        assert_eq!(legend, Legend::default());
    }

    #[test]
    fn test_dimension_prefix() {
        let prefixes: Vec<&str> = Dimension::ALL.iter().map(|d| d.prefix()).collect();
        assert_eq!(prefixes, vec!["x", "y", "z"]);
    }
}
