//! 3D surface element

use tracing::trace;

use crate::core::{format_number, Element, Lines};
use crate::globals::ExportContext;
use crate::scene::{Node, NodeKind, Point, ScaleModes, SurfaceGrid};

use super::PlotScope;

/// Vertex source of a surface
#[derive(Debug, Clone, Copy)]
pub enum SurfaceVertices<'a> {
    /// Dense row-major grid; every vertex is emitted
    Grid(&'a SurfaceGrid),
    /// Flat list; vertices with a non-finite coordinate are skipped
    Flat(&'a [Point]),
}

/// `\addplot3` surface with an `x`/`y`/`z` table
#[derive(Debug)]
pub struct SurfaceElement<'a> {
    vertices: SurfaceVertices<'a>,
    scales: ScaleModes,
    colormap: String,
}

impl<'a> SurfaceElement<'a> {
    /// Bind a [`NodeKind::Surface`] or [`NodeKind::FastSurface`] node
    ///
    /// Registers the node's colormap as a global option.
    pub fn bind(
        node: &'a Node,
        context: &mut ExportContext,
        scope: &PlotScope<'a>,
    ) -> Option<Self> {
        let (vertices, colormap) = match &node.kind {
            NodeKind::Surface(surface) => (SurfaceVertices::Grid(&surface.grid), &surface.colormap),
            NodeKind::FastSurface(surface) => {
                (SurfaceVertices::Flat(&surface.points[..]), &surface.colormap)
            }
            _ => return None,
        };

        context.options.add_colormap(colormap);
        trace!(node = %node.id, colormap = %colormap.name, "Bound surface");

        Some(Self {
            vertices,
            scales: scope.scales,
            colormap: colormap.name.clone(),
        })
    }

    pub fn vertices(&self) -> SurfaceVertices<'a> {
        self.vertices
    }

    pub fn colormap(&self) -> &str {
        &self.colormap
    }

    fn row(&self, point: &Point) -> Option<String> {
        let [x, y, z] = self.scales.to_linear(*point);
        if matches!(self.vertices, SurfaceVertices::Flat(_))
            && !(x.is_finite() && y.is_finite() && z.is_finite())
        {
            return None;
        }
        Some(format!(
            "  {}  {} {}\\\\",
            format_number(x),
            format_number(y),
            format_number(z)
        ))
    }
}

impl Element for SurfaceElement<'_> {
    fn pre_tag(&self) -> String {
        let mut options = vec![
            "surf".to_string(),
            "z buffer=sort".to_string(),
            "shader=faceted".to_string(),
            format!("colormap name={}", self.colormap),
        ];
        if let SurfaceVertices::Grid(grid) = self.vertices {
            options.push(format!("mesh/cols={}", grid.columns));
        }
        format!(r"\addplot3[{}]", options.join(","))
    }

    fn content(&self) -> Lines<'_> {
        let points: Box<dyn Iterator<Item = &Point> + '_> = match self.vertices {
            SurfaceVertices::Grid(grid) => Box::new(grid.vertices()),
            SurfaceVertices::Flat(points) => Box::new(points.iter()),
        };
        let rows = points.filter_map(|point| self.row(point));

        Box::new(
            std::iter::once("  table[row sep=crcr]{".to_string())
                .chain(rows)
                .chain(std::iter::once("};".to_string())),
        )
    }

    fn post_tag(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{element_lines, ExportConfig};
    use crate::scene::{AxisScale, Colormap, FastSurface, Surface};

    fn context() -> ExportContext {
        ExportContext::new(&ExportConfig::default())
    }

    #[test]
    fn test_grid_surface() {
        let node = Node::new(
            1,
            NodeKind::Surface(Surface {
                colormap: Colormap::jet(),
                grid: SurfaceGrid::from_fn(2, 2, |i, j| [j as f32, i as f32, (i + j) as f32]),
            }),
        );
        let scope = PlotScope::new(ScaleModes::default(), None);
        let mut context = context();
        let element = SurfaceElement::bind(&node, &mut context, &scope).unwrap();

        let lines: Vec<String> = element_lines(&element).collect();
        assert_eq!(
            lines,
            vec![
                r"\addplot3[surf,z buffer=sort,shader=faceted,colormap name=jet,mesh/cols=2]",
                "  table[row sep=crcr]{",
                "  0  0 0\\\\",
                "  1  0 1\\\\",
                "  0  1 1\\\\",
                "  1  1 2\\\\",
                "};",
            ]
        );
    }

    #[test]
    fn test_binding_registers_colormap() {
        let node = Node::new(
            1,
            NodeKind::FastSurface(FastSurface {
                colormap: Colormap::gray(),
                points: vec![],
            }),
        );
        let scope = PlotScope::new(ScaleModes::default(), None);
        let mut context = context();
        let before = context.options.len();
        let element = SurfaceElement::bind(&node, &mut context, &scope).unwrap();
        assert_eq!(context.options.len(), before + 1);
        assert!(context.options.directives()[before].starts_with("colormap={gray}"));
        assert_eq!(element.colormap(), "gray");
    }

    #[test]
    fn test_flat_surface_skips_non_finite_vertices() {
        let node = Node::new(
            1,
            NodeKind::FastSurface(FastSurface {
                colormap: Colormap::jet(),
                points: vec![
                    [0.0, 0.0, 1.0],
                    [f32::NAN, 1.0, 1.0],
                    [1.0, f32::INFINITY, 1.0],
                    [1.0, 1.0, 2.0],
                ],
            }),
        );
        let scope = PlotScope::new(ScaleModes::default(), None);
        let mut context = context();
        let element = SurfaceElement::bind(&node, &mut context, &scope).unwrap();

        assert_eq!(
            element.pre_tag(),
            r"\addplot3[surf,z buffer=sort,shader=faceted,colormap name=jet]"
        );
        let rows: Vec<String> = element.content().collect();
        assert_eq!(rows, vec!["  table[row sep=crcr]{", "  0  0 1\\\\", "  1  1 2\\\\", "};"]);
    }

    #[test]
    fn test_log_z_axis() {
        let node = Node::new(
            1,
            NodeKind::FastSurface(FastSurface {
                colormap: Colormap::jet(),
                points: vec![[1.0, 2.0, 3.0]],
            }),
        );
        let scales = ScaleModes {
            z: AxisScale::Logarithmic,
            ..ScaleModes::default()
        };
        let scope = PlotScope::new(scales, None);
        let mut context = context();
        let element = SurfaceElement::bind(&node, &mut context, &scope).unwrap();
        let rows: Vec<String> = element.content().collect();
        assert_eq!(rows[1], "  1  2 1000\\\\");
    }

    #[test]
    fn test_other_variants_are_rejected() {
        let node = Node::group(1);
        let scope = PlotScope::new(ScaleModes::default(), None);
        let mut context = context();
        assert!(SurfaceElement::bind(&node, &mut context, &scope).is_none());
        assert_eq!(context.options.len(), 4);
    }
}
