//! Document root: the `tikzpicture` environment

use tracing::{debug, span, Level};

use crate::core::{element_lines, Element, ExportConfig, ExportError, Lines};
use crate::globals::ExportContext;
use crate::scene::{NodeTag, Scene};

use super::{has_plots, AxisElement};

/// Comment emitted ahead of every non-empty document
pub const HEADER_COMMENT: &str = "% Created via tikz-export";

/// A bound scene, ready to render
///
/// A scene without an axis container, or whose container holds no supported
/// plot, binds to an empty picture that renders to nothing.
#[derive(Debug)]
pub struct TikzPicture<'a> {
    context: ExportContext,
    axis: Option<AxisElement<'a>>,
}

impl<'a> TikzPicture<'a> {
    /// Bind `scene` with a fresh export context
    pub fn bind(scene: &'a Scene, config: &ExportConfig) -> Result<Self, ExportError> {
        let picture_span = span!(Level::DEBUG, "bind_picture", canvas = %config.canvas_size.resolve());
        let _enter = picture_span.enter();

        let mut context = ExportContext::new(config);
        let axis = match scene.root.first(NodeTag::AxisContainer) {
            Some(container) if has_plots(container) => {
                Some(AxisElement::bind(container, &mut context)?)
            }
            Some(container) => {
                debug!(container = %container.id, "Axis container holds no supported plots");
                None
            }
            None => {
                debug!("Scene has no axis container");
                None
            }
        };

        Ok(Self { context, axis })
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_none()
    }

    pub fn axis(&self) -> Option<&AxisElement<'a>> {
        self.axis.as_ref()
    }

    /// Adjust the bound axis before rendering
    pub fn axis_mut(&mut self) -> Option<&mut AxisElement<'a>> {
        self.axis.as_mut()
    }

    pub fn context(&self) -> &ExportContext {
        &self.context
    }
}

impl Element for TikzPicture<'_> {
    fn pre_tag(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            HEADER_COMMENT.to_string()
        }
    }

    /// Color definitions, a blank line, then the picture with its global
    /// options and the axis
    fn content(&self) -> Lines<'_> {
        let Some(axis) = &self.axis else {
            return Box::new(std::iter::empty());
        };

        Box::new(
            self.context
                .colors
                .definitions()
                .chain(std::iter::once(String::new()))
                .chain(std::iter::once(r"\begin{tikzpicture}".to_string()))
                .chain(element_lines(&self.context.options))
                .chain(element_lines(axis)),
        )
    }

    fn post_tag(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            r"\end{tikzpicture}".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AxisContainer, Color, LinePlot, LineStyle, Node, NodeKind, Title};

    fn scene_with(children: Vec<Node>) -> Scene {
        Scene::new(
            Node::group(0).with_child(
                Node::new(1, NodeKind::AxisContainer(AxisContainer::default()))
                    .with_children(children),
            ),
        )
    }

    #[test]
    fn test_scene_without_container_is_empty() {
        let scene = Scene::new(Node::group(0));
        let picture = TikzPicture::bind(&scene, &ExportConfig::default()).unwrap();
        assert!(picture.is_empty());
        assert_eq!(element_lines(&picture).count(), 0);
    }

    #[test]
    fn test_container_without_plots_is_empty() {
        let scene = scene_with(vec![Node::new(
            2,
            NodeKind::Title(Title {
                text: "nothing".to_string(),
            }),
        )]);
        let picture = TikzPicture::bind(&scene, &ExportConfig::default()).unwrap();
        assert!(picture.is_empty());
        assert!(picture.axis().is_none());
        assert_eq!(element_lines(&picture).count(), 0);
    }

    #[test]
    fn test_document_layout() {
        let scene = scene_with(vec![Node::new(
            2,
            NodeKind::LinePlot(
                LinePlot::from_xy(&[(0.0, 0.0), (1.0, 1.0)])
                    .with_line(LineStyle::new(Color::rgb(200, 0, 0))),
            ),
        )]);
        let picture = TikzPicture::bind(&scene, &ExportConfig::default()).unwrap();
        assert!(!picture.is_empty());

        let lines: Vec<String> = element_lines(&picture).collect();
        assert_eq!(lines[0], HEADER_COMMENT);
        assert_eq!(
            lines[1],
            r"\definecolor{colorDef00}{rgb}{0.901961,0.901961,0.901961}"
        );
        assert_eq!(
            lines[2],
            r"\definecolor{colorDef01}{rgb}{0.784314,0.000000,0.000000}"
        );
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], r"\begin{tikzpicture}");
        assert_eq!(lines[5], r"\pgfplotsset{compat=1.13}");
        assert_eq!(lines[9], r"\begin{axis}[");
        assert_eq!(lines[lines.len() - 2], r"\end{axis}");
        assert_eq!(lines[lines.len() - 1], r"\end{tikzpicture}");
    }

    #[test]
    fn test_context_is_per_picture() {
        let scene = scene_with(vec![Node::new(
            2,
            NodeKind::LinePlot(LinePlot::from_xy(&[(0.0, 0.0)])),
        )]);
        let config = ExportConfig::default();
        let first = TikzPicture::bind(&scene, &config).unwrap();
        let second = TikzPicture::bind(&scene, &config).unwrap();
        assert_eq!(first.context().colors.len(), second.context().colors.len());

        let a: Vec<String> = element_lines(&first).collect();
        let b: Vec<String> = element_lines(&second).collect();
        assert_eq!(a, b);
    }
}
