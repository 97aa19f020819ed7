//! Visual style attributes carried by scene nodes

use std::fmt;

use serde::{Deserialize, Serialize};

fn opaque() -> u8 {
    255
}

/// An RGBA color
///
/// Equality includes the alpha channel: a translucent black is a distinct
/// color from [`Color::BLACK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Dash pattern of a stroked line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    PointDash,
}

/// Shape drawn at each data point of a line plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    #[default]
    None,
    Dot,
    Circle,
    Diamond,
    Square,
    TriangleUp,
    TriangleDown,
    Plus,
    Cross,
    Star,
}

fn default_width() -> u32 {
    1
}

/// Stroke attributes; a missing color is resolved by the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub dash_style: DashStyle,
    #[serde(default = "default_width")]
    pub width: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: None,
            dash_style: DashStyle::Solid,
            width: 1,
        }
    }
}

impl LineStyle {
    pub fn new(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn with_dash_style(mut self, dash_style: DashStyle) -> Self {
        self.dash_style = dash_style;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

fn default_marker_size() -> u32 {
    6
}

/// Marker attributes of a line plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(default)]
    pub style: MarkerStyle,
    #[serde(default = "default_marker_size")]
    pub size: u32,
    #[serde(default)]
    pub fill_color: Option<Color>,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            style: MarkerStyle::None,
            size: default_marker_size(),
            fill_color: None,
        }
    }
}

impl Marker {
    pub fn new(style: MarkerStyle, size: u32) -> Self {
        Self {
            style,
            size,
            fill_color: None,
        }
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }
}

/// One stop of a colormap; `position` runs from 0 to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub position: f32,
    pub color: Color,
}

/// Named color gradient used to shade surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colormap {
    pub name: String,
    pub keypoints: Vec<Keypoint>,
}

impl Colormap {
    pub fn new(name: impl Into<String>, keypoints: Vec<Keypoint>) -> Self {
        Self {
            name: name.into(),
            keypoints,
        }
    }

    /// Blue to red through cyan, yellow
    pub fn jet() -> Self {
        Self::new(
            "jet",
            vec![
                Keypoint {
                    position: 0.0,
                    color: Color::rgb(0, 0, 143),
                },
                Keypoint {
                    position: 0.125,
                    color: Color::rgb(0, 0, 255),
                },
                Keypoint {
                    position: 0.375,
                    color: Color::rgb(0, 255, 255),
                },
                Keypoint {
                    position: 0.625,
                    color: Color::rgb(255, 255, 0),
                },
                Keypoint {
                    position: 0.875,
                    color: Color::rgb(255, 0, 0),
                },
                Keypoint {
                    position: 1.0,
                    color: Color::rgb(128, 0, 0),
                },
            ],
        )
    }

    /// Black to white
    pub fn gray() -> Self {
        Self::new(
            "gray",
            vec![
                Keypoint {
                    position: 0.0,
                    color: Color::BLACK,
                },
                Keypoint {
                    position: 1.0,
                    color: Color::WHITE,
                },
            ],
        )
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::jet()
    }
}
