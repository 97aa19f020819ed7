//! Document-wide pgfplots options
//!
//! The registry is an ordered list of `\pgfplotsset` directives. The first
//! four slots are seeded: compatibility level, layer sorting, major grid
//! style, minor grid style. The compatibility and grid-style slots are
//! replaced in place; everything else is appended.

use crate::core::{format_colormap, format_line, Element, Lines};
use crate::scene::{Color, Colormap, DashStyle};

use super::ColorRegistry;

const COMPATIBILITY_SLOT: usize = 0;
const MAJOR_GRID_SLOT: usize = 2;
const MINOR_GRID_SLOT: usize = 3;

/// Compatibility level emitted unless overridden
pub const DEFAULT_COMPAT: &str = "1.13";

/// Ordered, partially overwritable list of global style directives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    directives: Vec<String>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self {
            directives: vec![
                format!("compat={}", DEFAULT_COMPAT),
                "set layers".to_string(),
                "major grid style={solid,very thin,white!80!black}".to_string(),
                "minor grid style={dashed,very thin,white!90!black}".to_string(),
            ],
        }
    }
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the compatibility level
    pub fn set_compatibility(&mut self, version: &str) {
        self.directives[COMPATIBILITY_SLOT] = format!("compat={}", version);
    }

    /// Replace the major grid style; the grid is drawn at half the given width
    pub fn set_major_grid_style(
        &mut self,
        colors: &mut ColorRegistry,
        color: Color,
        dash_style: DashStyle,
        width: u32,
    ) {
        self.directives[MAJOR_GRID_SLOT] = format!(
            "major grid style={{{}}}",
            grid_line(colors, color, dash_style, width)
        );
    }

    /// Replace the minor grid style; the grid is drawn at half the given width
    pub fn set_minor_grid_style(
        &mut self,
        colors: &mut ColorRegistry,
        color: Color,
        dash_style: DashStyle,
        width: u32,
    ) {
        self.directives[MINOR_GRID_SLOT] = format!(
            "minor grid style={{{}}}",
            grid_line(colors, color, dash_style, width)
        );
    }

    /// Append a colormap definition
    pub fn add_colormap(&mut self, colormap: &Colormap) {
        self.directives.push(format_colormap(colormap));
    }

    /// Append an arbitrary directive
    pub fn add_directive(&mut self, directive: impl Into<String>) {
        self.directives.push(directive.into());
    }

    /// All directives, blank ones included
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

fn grid_line(
    colors: &mut ColorRegistry,
    color: Color,
    dash_style: DashStyle,
    width: u32,
) -> String {
    let name = colors.resolve_name(color);
    format_line(&name, dash_style, 0.5 * width as f32)
}

impl Element for StyleRegistry {
    fn pre_tag(&self) -> String {
        String::new()
    }

    /// One `\pgfplotsset` per non-blank directive
    fn content(&self) -> Lines<'_> {
        Box::new(
            self.directives
                .iter()
                .filter(|directive| !directive.trim().is_empty())
                .map(|directive| format!(r"\pgfplotsset{{{}}}", directive)),
        )
    }

    fn post_tag(&self) -> String {
        String::new()
    }
}
