//! Line plot with symmetric y error bars

use tracing::{debug, trace};

use crate::core::{format_error_bars, format_number, Element, Lines};
use crate::globals::ExportContext;
use crate::scene::{ErrorSpan, Node, NodeKind, NodeTag};

use super::{BoundLine, PlotElement, PlotScope};

/// `\addplot+` of an error-bar plot with an `x`/`y`/`ye` table
///
/// pgfplots has no asymmetric explicit errors: each row carries the larger
/// of the two distances from the point to its error-bar endpoints.
#[derive(Debug)]
pub struct ErrorBarPlotElement<'a> {
    plot: PlotElement<'a>,
    errors: &'a [ErrorSpan],
    error_bar: BoundLine,
}

impl<'a> ErrorBarPlotElement<'a> {
    /// Bind an error-bar node together with its direct line plot child
    ///
    /// Returns `None` for other variants and for error bars without a line.
    /// The caption belongs to the line; the error-bar node's own identity is
    /// tried when the line has none.
    pub fn bind(
        node: &'a Node,
        context: &mut ExportContext,
        scope: &PlotScope<'a>,
    ) -> Option<Self> {
        let NodeKind::ErrorBarPlot(error_bars) = &node.kind else {
            return None;
        };
        let Some(line_node) = node.child(NodeTag::LinePlot) else {
            debug!(node = %node.id, "Error bars without a line plot");
            return None;
        };
        let NodeKind::LinePlot(line_plot) = &line_node.kind else {
            return None;
        };

        let error_bar = BoundLine::bind(
            context,
            error_bars.error_bar.color,
            error_bars.error_bar.dash_style,
            error_bars.error_bar.width,
        );

        let caption = scope
            .caption(line_node.id)
            .or_else(|| scope.caption(node.id));
        let plot = PlotElement::from_line_plot(line_plot, context, scope.scales, caption);

        trace!(
            points = line_plot.positions.len(),
            errors = error_bars.errors.len(),
            "Bound error bar plot"
        );

        Some(Self {
            plot,
            errors: &error_bars.errors,
            error_bar,
        })
    }

    pub fn plot(&self) -> &PlotElement<'a> {
        &self.plot
    }

    pub fn error_bar(&self) -> &BoundLine {
        &self.error_bar
    }

    /// Symmetric error for a point at displayed-space `y`
    ///
    /// The endpoints are converted into displayed space before measuring; a
    /// point without an error span gets zero.
    fn symmetric_error(&self, index: usize, y: f32) -> f32 {
        let scale = self.plot.scales().y;
        match self.errors.get(index) {
            Some(span) => {
                let lower = scale.to_linear(span.lower);
                let upper = scale.to_linear(span.upper);
                (lower - y).abs().max((upper - y).abs())
            }
            None => 0.0,
        }
    }
}

impl Element for ErrorBarPlotElement<'_> {
    fn pre_tag(&self) -> String {
        let mut options = self.plot.style_options();
        options.push(format_error_bars(&self.error_bar.options()));
        format!(r"\addplot+[{}]", options.join(","))
    }

    fn content(&self) -> Lines<'_> {
        let header = [
            "  table[x=x, y=y, y error=ye, row sep=crcr]{".to_string(),
            "  x\ty  ye\\\\".to_string(),
        ];
        let rows = self
            .plot
            .positions()
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let (x, y) = self.plot.xy(point);
                let ye = self.symmetric_error(index, y);
                format!(
                    "  {}\t{}  {}\\\\",
                    format_number(x),
                    format_number(y),
                    format_number(ye)
                )
            });

        Box::new(
            header
                .into_iter()
                .chain(rows)
                .chain(std::iter::once("};".to_string())),
        )
    }

    fn post_tag(&self) -> String {
        self.plot.legend_entry()
    }
}
