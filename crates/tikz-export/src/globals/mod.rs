//! State shared by all binders of one export

mod colors;
mod options;

pub use colors::*;
pub use options::*;

use crate::core::{CanvasSize, ExportConfig};

/// Registries and canvas size for a single export
///
/// Created fresh for every export and threaded by reference through binding.
#[derive(Debug, Clone, Default)]
pub struct ExportContext {
    pub colors: ColorRegistry,
    pub options: StyleRegistry,
    pub canvas_size: CanvasSize,
}

impl ExportContext {
    pub fn new(config: &ExportConfig) -> Self {
        let mut options = StyleRegistry::new();
        if let Some(version) = &config.compat {
            options.set_compatibility(version);
        }
        Self {
            colors: ColorRegistry::new(),
            options,
            canvas_size: config.canvas_size.resolve(),
        }
    }

    /// Register `color` and return its name
    pub fn color_name(&mut self, color: crate::scene::Color) -> String {
        self.colors.resolve_name(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_resolves_canvas_size() {
        let context = ExportContext::new(&ExportConfig::default());
        assert_eq!(context.canvas_size, CanvasSize::FALLBACK);

        let context = ExportContext::new(&ExportConfig::new().with_canvas_size(120, 80));
        assert_eq!(context.canvas_size, CanvasSize::new(120, 80));
    }

    #[test]
    fn test_context_applies_compat() {
        let context = ExportContext::new(&ExportConfig::new().with_compat("1.17"));
        assert_eq!(context.options.directives()[0], "compat=1.17");
    }

    #[test]
    fn test_contexts_are_independent() {
        let config = ExportConfig::default();
        let mut first = ExportContext::new(&config);
        first.color_name(crate::scene::Color::rgb(9, 9, 9));
        let second = ExportContext::new(&config);
        assert!(second.colors.is_empty());
    }
}
