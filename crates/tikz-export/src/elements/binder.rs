//! Discovery and dispatch of plot nodes
//!
//! [`PLOT_BINDERS`] maps every supported plot variant to the function that
//! turns such a node into a document element. The table order is the
//! emission order of the variants inside an axis.

use tracing::{debug, span, trace, Level};

use crate::core::{Element, ElementGroup};
use crate::globals::ExportContext;
use crate::scene::{Node, NodeId, NodeKind, NodeTag, ScaleModes};

use super::{ErrorBarPlotElement, PlotElement, SurfaceElement};

/// Axis-level information every plot binder needs
#[derive(Debug, Clone, Copy)]
pub struct PlotScope<'a> {
    pub scales: ScaleModes,
    /// The axis container's first legend, if any
    pub legend: Option<&'a Node>,
}

impl<'a> PlotScope<'a> {
    pub fn new(scales: ScaleModes, legend: Option<&'a Node>) -> Self {
        Self { scales, legend }
    }

    /// Legend caption registered for the plot with the given identity
    ///
    /// Missing legends, missing items and empty captions all yield `None`.
    pub fn caption(&self, provider: NodeId) -> Option<&'a str> {
        self.legend?
            .find(NodeTag::LegendItem)
            .find_map(|entry| match &entry.node.kind {
                NodeKind::LegendItem(item) if item.provider == provider => Some(item.text.as_str()),
                _ => None,
            })
            .filter(|text| !text.is_empty())
    }
}

/// Constructs the element for one plot node, or `None` when the node cannot be drawn
pub type BindFn =
    for<'a> fn(&'a Node, &mut ExportContext, &PlotScope<'a>) -> Option<Box<dyn Element + 'a>>;

/// Supported plot variants in emission order
pub const PLOT_BINDERS: [(NodeTag, BindFn); 4] = [
    (NodeTag::ErrorBarPlot, bind_error_bar_plot),
    (NodeTag::LinePlot, bind_line_plot),
    (NodeTag::Surface, bind_surface),
    (NodeTag::FastSurface, bind_surface),
];

fn bind_line_plot<'a>(
    node: &'a Node,
    context: &mut ExportContext,
    scope: &PlotScope<'a>,
) -> Option<Box<dyn Element + 'a>> {
    PlotElement::bind(node, context, scope).map(|e| Box::new(e) as Box<dyn Element + 'a>)
}

fn bind_error_bar_plot<'a>(
    node: &'a Node,
    context: &mut ExportContext,
    scope: &PlotScope<'a>,
) -> Option<Box<dyn Element + 'a>> {
    ErrorBarPlotElement::bind(node, context, scope).map(|e| Box::new(e) as Box<dyn Element + 'a>)
}

fn bind_surface<'a>(
    node: &'a Node,
    context: &mut ExportContext,
    scope: &PlotScope<'a>,
) -> Option<Box<dyn Element + 'a>> {
    SurfaceElement::bind(node, context, scope).map(|e| Box::new(e) as Box<dyn Element + 'a>)
}

/// True when `container` holds at least one supported plot node
pub fn has_plots(container: &Node) -> bool {
    PLOT_BINDERS
        .iter()
        .any(|(tag, _)| container.first(*tag).is_some())
}

/// Bind every plot below `container`
///
/// Line plots that are the direct child of an error-bar plot are drawn by that
/// error-bar plot and skipped here.
pub fn bind_plots<'a>(
    container: &'a Node,
    context: &mut ExportContext,
    scope: &PlotScope<'a>,
) -> ElementGroup<'a> {
    let plots_span = span!(Level::DEBUG, "bind_plots", container = %container.id);
    let _enter = plots_span.enter();

    let mut group = ElementGroup::new();
    for (tag, bind) in PLOT_BINDERS {
        for entry in container.find(tag) {
            let owned_by_error_bars = tag == NodeTag::LinePlot
                && entry
                    .parent
                    .is_some_and(|parent| parent.tag() == NodeTag::ErrorBarPlot);
            if owned_by_error_bars {
                trace!(node = %entry.node.id, "Skipping line plot drawn by its error bars");
                continue;
            }

            match bind(entry.node, context, scope) {
                Some(element) => {
                    trace!(node = %entry.node.id, kind = %tag, "Bound plot");
                    group.push(element);
                }
                None => debug!(node = %entry.node.id, kind = %tag, "Plot has nothing to draw"),
            }
        }
    }

    debug!(plots = group.len(), "Plots bound");
    group
}
