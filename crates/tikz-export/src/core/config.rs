//! Export configuration
//!
//! There is no configuration file: callers build an [`ExportConfig`] in code
//! (or the CLI builds one from its flags) and hand it to the entry points.

use std::fmt;

/// Width and height of the exported axis, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Size used when no usable size was given
    pub const FALLBACK: CanvasSize = CanvasSize {
        width: 100,
        height: 100,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the size to export with: a zero width or height means "unset"
    pub fn resolve(self) -> Self {
        if self.width == 0 || self.height == 0 {
            Self::FALLBACK
        } else {
            self
        }
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}mm", self.width, self.height)
    }
}

/// Options for a single export call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportConfig {
    /// Canvas size; `CanvasSize::default()` (0x0) selects the 100x100 fallback
    pub canvas_size: CanvasSize,
    /// Overrides the `compat=` level of the emitted pgfplots options
    pub compat: Option<String>,
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_size = CanvasSize::new(width, height);
        self
    }

    pub fn with_compat(mut self, version: impl Into<String>) -> Self {
        self.compat = Some(version.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size_resolves_to_fallback() {
        assert_eq!(CanvasSize::default().resolve(), CanvasSize::new(100, 100));
    }

    #[test]
    fn test_zero_dimension_resolves_to_fallback() {
        assert_eq!(CanvasSize::new(0, 50).resolve(), CanvasSize::FALLBACK);
        assert_eq!(CanvasSize::new(80, 0).resolve(), CanvasSize::FALLBACK);
    }

    #[test]
    fn test_explicit_size_is_kept() {
        assert_eq!(CanvasSize::new(120, 80).resolve(), CanvasSize::new(120, 80));
    }

    #[test]
    fn test_config_builder() {
        let config = ExportConfig::new()
            .with_canvas_size(160, 90)
            .with_compat("1.18");
        assert_eq!(config.canvas_size, CanvasSize::new(160, 90));
        assert_eq!(config.compat.as_deref(), Some("1.18"));
    }

    #[test]
    fn test_canvas_size_display() {
        assert_eq!(CanvasSize::new(120, 80).to_string(), "120x80mm");
    }
}
