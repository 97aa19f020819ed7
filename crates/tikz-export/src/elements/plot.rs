//! 2D line plot element

use tracing::trace;

use crate::core::{escape_text, format_line, format_marker, format_number, Element, Lines};
use crate::globals::ExportContext;
use crate::scene::{Color, DashStyle, LinePlot, MarkerStyle, Node, NodeKind, Point, ScaleModes};

use super::PlotScope;

/// Stroke of a bound line, with its color already registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundLine {
    pub color: String,
    pub dash_style: DashStyle,
    pub width: u32,
}

impl BoundLine {
    /// Register the line's color (black when unset) and capture its stroke
    pub fn bind(
        context: &mut ExportContext,
        color: Option<Color>,
        dash_style: DashStyle,
        width: u32,
    ) -> Self {
        Self {
            color: context.color_name(color.unwrap_or(Color::BLACK)),
            dash_style,
            width,
        }
    }

    pub fn options(&self) -> String {
        format_line(&self.color, self.dash_style, self.width as f32)
    }
}

/// Marker of a bound line plot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundMarker {
    pub color: String,
    pub style: MarkerStyle,
    pub size: u32,
}

impl BoundMarker {
    pub fn options(&self) -> Option<String> {
        format_marker(&self.color, self.style, self.size)
    }
}

/// `\addplot` of a line plot with an `x`/`y` table
#[derive(Debug)]
pub struct PlotElement<'a> {
    positions: &'a [Point],
    scales: ScaleModes,
    line: BoundLine,
    marker: BoundMarker,
    caption: Option<String>,
}

impl<'a> PlotElement<'a> {
    /// Bind a [`NodeKind::LinePlot`] node; other variants yield `None`
    pub fn bind(
        node: &'a Node,
        context: &mut ExportContext,
        scope: &PlotScope<'a>,
    ) -> Option<Self> {
        let NodeKind::LinePlot(plot) = &node.kind else {
            return None;
        };
        Some(Self::from_line_plot(
            plot,
            context,
            scope.scales,
            scope.caption(node.id),
        ))
    }

    /// Bind the line plot's style and keep a reference to its positions
    ///
    /// The marker takes the line color when it has no fill color of its own;
    /// the marker size is halved with a floor of 1.
    pub fn from_line_plot(
        plot: &'a LinePlot,
        context: &mut ExportContext,
        scales: ScaleModes,
        caption: Option<&str>,
    ) -> Self {
        let line_color = plot.line.color.unwrap_or(Color::BLACK);
        let line = BoundLine::bind(
            context,
            Some(line_color),
            plot.line.dash_style,
            plot.line.width,
        );

        let marker_color = plot.marker.fill_color.unwrap_or(line_color);
        let marker = BoundMarker {
            color: context.color_name(marker_color),
            style: plot.marker.style,
            size: (plot.marker.size / 2).max(1),
        };

        trace!(
            points = plot.positions.len(),
            color = %line.color,
            has_caption = caption.is_some(),
            "Bound line plot"
        );

        Self {
            positions: &plot.positions,
            scales,
            line,
            marker,
            caption: caption.map(str::to_string),
        }
    }

    pub fn line(&self) -> &BoundLine {
        &self.line
    }

    pub fn marker(&self) -> &BoundMarker {
        &self.marker
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub(crate) fn positions(&self) -> &'a [Point] {
        self.positions
    }

    pub(crate) fn scales(&self) -> ScaleModes {
        self.scales
    }

    /// Plot options shared with the error-bar variant: line, then marker
    pub(crate) fn style_options(&self) -> Vec<String> {
        let mut options = vec![self.line.options()];
        options.extend(self.marker.options());
        options
    }

    /// Displayed-space `(x, y)` of a stored point
    pub(crate) fn xy(&self, point: &Point) -> (f32, f32) {
        (
            self.scales.x.to_linear(point[0]),
            self.scales.y.to_linear(point[1]),
        )
    }

    pub(crate) fn legend_entry(&self) -> String {
        match &self.caption {
            Some(caption) => format!(r"\addlegendentry{{{}}}", escape_text(caption)),
            None => String::new(),
        }
    }
}

impl Element for PlotElement<'_> {
    fn pre_tag(&self) -> String {
        format!(r"\addplot[{}]", self.style_options().join(","))
    }

    fn content(&self) -> Lines<'_> {
        let header = [
            "  table[x=x, y=y, row sep=crcr]{".to_string(),
            "  x\ty\\\\".to_string(),
        ];
        let rows = self.positions.iter().map(|point| {
            let (x, y) = self.xy(point);
            format!("  {}\t{}\\\\", format_number(x), format_number(y))
        });

        Box::new(
            header
                .into_iter()
                .chain(rows)
                .chain(std::iter::once("};".to_string())),
        )
    }

    fn post_tag(&self) -> String {
        self.legend_entry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{element_lines, ExportConfig};
    use crate::scene::{AxisScale, LineStyle, Marker};

    fn context() -> ExportContext {
        ExportContext::new(&ExportConfig::default())
    }

    #[test]
    fn test_plain_line() {
        let plot = LinePlot::from_xy(&[(0.0, 1.0), (2.0, 3.5)]);
        let mut context = context();
        let element = PlotElement::from_line_plot(&plot, &mut context, ScaleModes::default(), None);

        let lines: Vec<String> = element_lines(&element).collect();
        assert_eq!(
            lines,
            vec![
                r"\addplot[color=black,solid,line width=1pt]",
                "  table[x=x, y=y, row sep=crcr]{",
                "  x\ty\\\\",
                "  0\t1\\\\",
                "  2\t3.5\\\\",
                "};",
            ]
        );
    }

    #[test]
    fn test_marker_defaults_to_line_color() {
        let red = Color::rgb(255, 0, 0);
        let plot = LinePlot::from_xy(&[(0.0, 0.0)])
            .with_line(LineStyle::new(red).with_dash_style(DashStyle::Dashed).with_width(2))
            .with_marker(Marker::new(MarkerStyle::Square, 7));
        let mut context = context();
        let element = PlotElement::from_line_plot(&plot, &mut context, ScaleModes::default(), None);

        assert_eq!(element.marker().color, "colorDef00");
        assert_eq!(element.marker().size, 3);
        assert_eq!(context.colors.len(), 1);
        assert_eq!(
            element.pre_tag(),
            r"\addplot[color=colorDef00,dashed,line width=2pt,mark=square,mark size=3pt,mark options={solid,fill=colorDef00,draw=colorDef00}]"
        );
    }

    #[test]
    fn test_marker_size_floor() {
        let plot = LinePlot::default().with_marker(Marker::new(MarkerStyle::Dot, 1));
        let mut context = context();
        let element = PlotElement::from_line_plot(&plot, &mut context, ScaleModes::default(), None);
        assert_eq!(element.marker().size, 1);
    }

    #[test]
    fn test_marker_fill_color_registered() {
        let plot = LinePlot::default().with_marker(
            Marker::new(MarkerStyle::Circle, 4).with_fill_color(Color::rgb(0, 128, 0)),
        );
        let mut context = context();
        let element = PlotElement::from_line_plot(&plot, &mut context, ScaleModes::default(), None);
        assert_eq!(element.line().color, "black");
        assert_eq!(element.marker().color, "colorDef00");
    }

    #[test]
    fn test_log_axes_exponentiate_each_coordinate() {
        let plot = LinePlot::from_xy(&[(1.0, 2.0)]);
        let scales = ScaleModes {
            x: AxisScale::Linear,
            y: AxisScale::Logarithmic,
            z: AxisScale::Linear,
        };
        let mut context = context();
        let element = PlotElement::from_line_plot(&plot, &mut context, scales, None);
        let rows: Vec<String> = element.content().collect();
        assert_eq!(rows[2], "  1\t100\\\\");
    }

    #[test]
    fn test_caption_is_escaped() {
        let plot = LinePlot::default();
        let mut context = context();
        let element =
            PlotElement::from_line_plot(&plot, &mut context, ScaleModes::default(), Some("v_max"));
        assert_eq!(element.post_tag(), r"\addlegendentry{v\_max}");
    }

    #[test]
    fn test_no_caption_no_legend_entry() {
        let plot = LinePlot::default();
        let mut context = context();
        let element = PlotElement::from_line_plot(&plot, &mut context, ScaleModes::default(), None);
        assert_eq!(element.post_tag(), "");
    }
}
