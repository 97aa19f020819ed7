//! Color registry
//!
//! Every color referenced by the output gets one name. Black and white map to
//! the predefined `black` and `white`; every other color is named
//! `colorDefNN` by the order in which it was first seen.

use tracing::trace;

use crate::core::format_color_definition;
use crate::scene::Color;

const FIXED_NAMES: [(Color, &str); 2] = [(Color::BLACK, "black"), (Color::WHITE, "white")];

/// Deduplicating color table with first-seen naming
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    colors: Vec<Color>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn fixed_name(color: Color) -> Option<&'static str> {
        FIXED_NAMES
            .iter()
            .find(|(fixed, _)| *fixed == color)
            .map(|(_, name)| *name)
    }

    fn generated_name(index: usize) -> String {
        format!("colorDef{:02}", index)
    }

    /// Name of `color`, registering it when it has not been seen yet
    pub fn resolve_name(&mut self, color: Color) -> String {
        if let Some(name) = Self::fixed_name(color) {
            return name.to_string();
        }
        let index = match self.position(color) {
            Some(index) => index,
            None => {
                self.colors.push(color);
                trace!(color = %color, index = self.colors.len() - 1, "Registered color");
                self.colors.len() - 1
            }
        };
        Self::generated_name(index)
    }

    /// Name of an already-known color, without registering
    pub fn name(&self, color: Color) -> Option<String> {
        Self::fixed_name(color)
            .map(str::to_string)
            .or_else(|| self.position(color).map(Self::generated_name))
    }

    /// Register `color` so it receives a definition
    pub fn add(&mut self, color: Color) {
        self.resolve_name(color);
    }

    /// True for black, white, and every registered color
    pub fn contains(&self, color: Color) -> bool {
        Self::fixed_name(color).is_some() || self.position(color).is_some()
    }

    /// Drop a registered color
    ///
    /// Colors registered after it move up one slot and their names change;
    /// removing during an export invalidates names already handed out.
    pub fn remove(&mut self, color: Color) -> bool {
        match self.position(color) {
            Some(index) => {
                self.colors.remove(index);
                true
            }
            None => false,
        }
    }

    /// Registered colors with their names, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (String, Color)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .map(|(index, color)| (Self::generated_name(index), *color))
    }

    /// Number of registered colors, not counting black and white
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// One `\definecolor` line per registered color
    pub fn definitions(&self) -> impl Iterator<Item = String> + '_ {
        self.iter()
            .map(|(name, color)| format_color_definition(&name, color))
    }

    fn position(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|known| *known == color)
    }
}
