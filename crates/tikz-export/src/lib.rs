//! tikz-export - Convert plot scenes to PGF/TikZ (pgfplots) markup
//!
//! A library for turning a scene graph of axes, line plots, error bars and
//! surfaces into a `tikzpicture` that LaTeX can typeset.
//!
//! # Quick Start
//!
//! ```rust
//! use tikz_export::prelude::*;
//!
//! let scene = Scene::new(
//!     Node::new(1, NodeKind::AxisContainer(AxisContainer::default())).with_child(Node::new(
//!         2,
//!         NodeKind::LinePlot(LinePlot::from_xy(&[(0.0, 0.0), (1.0, 2.0)])),
//!     )),
//! );
//!
//! let tikz = tikz_export::export_string(&scene, &ExportConfig::default()).unwrap();
//! assert!(tikz.contains(r"\begin{tikzpicture}"));
//! ```
//!
//! # Advanced Usage
//!
//! Binding and rendering are separate steps, so a bound picture can be
//! inspected or adjusted first:
//!
//! ```rust
//! use tikz_export::prelude::*;
//!
//! let scene = Scene::new(
//!     Node::new(1, NodeKind::AxisContainer(AxisContainer::default())).with_child(Node::new(
//!         2,
//!         NodeKind::LinePlot(LinePlot::from_xy(&[(0.0, 0.0), (1.0, 2.0)])),
//!     )),
//! );
//!
//! let mut picture = tikz_export::bind(&scene, &ExportConfig::default()).unwrap();
//! if let Some(axis) = picture.axis_mut() {
//!     axis.set_grid(true);
//! }
//!
//! let mut writer = TikzWriter::new(Vec::new());
//! writer.write(&picture).unwrap();
//! ```

pub mod core;
pub mod elements;
pub mod globals;
pub mod scene;

use std::io::Write;
use std::path::Path;

use tracing::{info, span, Level};

pub use crate::core::*;
use elements::TikzPicture;
use scene::Scene;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        escape_text, CanvasSize, Element, ExportConfig, ExportError, TikzWriter,
    };
    pub use crate::elements::{AxisElement, TickAlign, TikzPicture};
    pub use crate::globals::{ColorRegistry, ExportContext, StyleRegistry};
    pub use crate::scene::{
        Axis, AxisContainer, AxisScale, Color, Colormap, DashStyle, ErrorBarPlot, ErrorSpan,
        FastSurface, Legend, LegendItem, LinePlot, LineStyle, Marker, MarkerStyle, Node, NodeId,
        NodeKind, Scene, Surface, SurfaceGrid, Title,
    };
}

/// Bind a scene without rendering it
///
/// The picture borrows the scene's geometry; the scene must outlive it.
///
/// # Example
/// ```rust
/// use tikz_export::prelude::*;
///
/// let scene = Scene::new(Node::group(0));
/// let picture = tikz_export::bind(&scene, &ExportConfig::default()).unwrap();
/// assert!(picture.is_empty());
/// ```
pub fn bind<'a>(scene: &'a Scene, config: &ExportConfig) -> anyhow::Result<TikzPicture<'a>> {
    Ok(TikzPicture::bind(scene, config)?)
}

/// Export a scene to an output sink
///
/// Lines are written as they are produced. A scene with nothing to draw
/// writes nothing.
pub fn export<W: Write>(scene: &Scene, writer: W, config: &ExportConfig) -> anyhow::Result<()> {
    let export_span = span!(Level::INFO, "export_scene", canvas = %config.canvas_size.resolve());
    let _enter = export_span.enter();

    let picture = TikzPicture::bind(scene, config)?;
    let mut writer = TikzWriter::new(writer);
    let lines = writer.write(&picture)?;

    info!(lines, empty = picture.is_empty(), "Export completed");
    Ok(())
}

/// Export a scene to a string
///
/// # Example
/// ```rust
/// use tikz_export::prelude::*;
///
/// let scene = Scene::new(Node::group(0));
/// let tikz = tikz_export::export_string(&scene, &ExportConfig::default()).unwrap();
/// assert!(tikz.is_empty());
/// ```
pub fn export_string(scene: &Scene, config: &ExportConfig) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    export(scene, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

/// Export a scene to a file, replacing its contents
///
/// An empty path is rejected before anything is bound.
pub fn export_file(
    scene: &Scene,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ExportError::invalid_argument("file path must not be empty").into());
    }

    let file = std::fs::File::create(path).map_err(ExportError::from)?;
    export(scene, std::io::BufWriter::new(file), config)
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::*;

    fn line_scene() -> Scene {
        Scene::new(
            Node::new(1, NodeKind::AxisContainer(AxisContainer::default())).with_child(Node::new(
                2,
                NodeKind::LinePlot(LinePlot::from_xy(&[(0.0, 1.0)])),
            )),
        )
    }

    #[test]
    fn test_export_string() {
        let output = export_string(&line_scene(), &ExportConfig::default()).unwrap();
        assert!(output.starts_with("% Created via tikz-export\n"));
        assert!(output.ends_with("\\end{tikzpicture}\n"));
    }

    #[test]
    fn test_export_to_writer_matches_string() {
        let scene = line_scene();
        let config = ExportConfig::new().with_canvas_size(80, 60);
        let mut buffer = Vec::new();
        export(&scene, &mut buffer, &config).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            export_string(&scene, &config).unwrap()
        );
    }

    #[test]
    fn test_export_file_rejects_empty_path() {
        let err = export_file(&line_scene(), "", &ExportConfig::default()).unwrap_err();
        let export_err = err.downcast_ref::<ExportError>().unwrap();
        assert!(matches!(export_err, ExportError::InvalidArgument { .. }));
    }

    #[test]
    fn test_bind_propagates_configuration_errors() {
        let mut scene = line_scene();
        if let NodeKind::AxisContainer(container) = &mut scene.root.kind {
            container.axes.x.ticks.tick_length = f32::NAN;
        }
        let err = bind(&scene, &ExportConfig::default()).unwrap_err();
        assert!(err
            .downcast_ref::<ExportError>()
            .is_some_and(ExportError::is_configuration_error));
    }
}
