//! Axis environment element
//!
//! Binding copies everything the `axis` options need out of the container:
//! title, view, per-dimension limits/ticks/grids, and the legend. It also
//! publishes the shared grid style and binds the contained plots.

use std::fmt;

use tracing::{debug, span, trace, Level};

use crate::core::{
    escape_text, format_number, format_ticks, CanvasSize, Element, ElementGroup, ExportError,
    Lines,
};
use crate::globals::ExportContext;
use crate::scene::{
    Axis, AxisContainer, AxisScale, Color, Dimension, Extent, LegendLocation, Node, NodeKind,
    NodeTag, TickMode, ViewAngles,
};

use super::{bind_plots, PlotScope};

/// View used for 3D axes that specify none
pub const DEFAULT_3D_VIEW: ViewAngles = ViewAngles {
    azimuth: 60.0,
    elevation: 60.0,
};

/// Grid color used when the designated axis has none
pub const DEFAULT_GRID_COLOR: Color = Color::rgb(230, 230, 230);

/// Position of tick marks relative to the axis line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAlign {
    Inside,
    Center,
    Outside,
}

impl TickAlign {
    /// Negative lengths point inside, positive outside, zero straddles the line
    ///
    /// NaN has no sign and is rejected.
    pub fn from_tick_length(tick_length: f32) -> Result<Self, ExportError> {
        if tick_length < 0.0 {
            Ok(TickAlign::Inside)
        } else if tick_length > 0.0 {
            Ok(TickAlign::Outside)
        } else if tick_length == 0.0 {
            Ok(TickAlign::Center)
        } else {
            Err(ExportError::unsupported_tick_alignment(tick_length))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TickAlign::Inside => "inside",
            TickAlign::Center => "center",
            TickAlign::Outside => "outside",
        }
    }
}

impl fmt::Display for TickAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bound options of one axis dimension
///
/// `min` and `max` are in displayed space.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    pub label: Option<String>,
    pub scale: AxisScale,
    pub min: f32,
    pub max: f32,
    pub tick_mode: TickMode,
    pub tick_align: TickAlign,
    pub major_ticks: bool,
    pub minor_ticks: bool,
    pub major_grid: bool,
    pub minor_grid: bool,
}

impl AxisConfig {
    fn bind(
        dimension: Dimension,
        axis: &Axis,
        scale: AxisScale,
        extent: &Extent,
    ) -> Result<Self, ExportError> {
        let (data_min, data_max) = extent.range(dimension);
        let min = scale.to_linear(axis.min.unwrap_or(data_min));
        let max = scale.to_linear(axis.max.unwrap_or(data_max));

        trace!(axis = %dimension, %scale, min, max, "Bound axis limits");

        Ok(Self {
            label: axis.label.clone().filter(|label| !label.is_empty()),
            scale,
            min,
            max,
            tick_mode: axis.ticks.mode.clone(),
            tick_align: TickAlign::from_tick_length(axis.ticks.tick_length)?,
            major_ticks: axis.ticks.visible,
            minor_ticks: axis.ticks.minor_visible,
            major_grid: axis.grid_major.visible,
            minor_grid: axis.grid_minor.visible,
        })
    }

    fn lines(&self, dimension: Dimension) -> Vec<String> {
        let p = dimension.prefix();
        let mut lines = Vec::new();

        if let Some(label) = &self.label {
            lines.push(format!("  {}label={{{}}},", p, escape_text(label)));
        }
        let mode = match self.scale {
            AxisScale::Linear => "normal",
            AxisScale::Logarithmic => "log",
        };
        lines.push(format!("  {}mode={},", p, mode));
        lines.push(format!("  {}min={},", p, format_number(self.min)));
        lines.push(format!("  {}max={},", p, format_number(self.max)));

        match &self.tick_mode {
            TickMode::Coordinate => lines.push(format!("  {}tick=data,", p)),
            TickMode::Custom(positions) => {
                lines.push(format!("  {}tick={{{}}},", p, format_ticks(positions)))
            }
            TickMode::None | TickMode::Auto => {}
        }

        lines.push(format!("  {}tick align={},", p, self.tick_align));
        lines.push(format!("  {}majorticks={},", p, self.major_ticks));
        lines.push(format!("  {}minorticks={},", p, self.minor_ticks));
        if self.major_grid {
            lines.push(format!("  {}majorgrids,", p));
        }
        if self.minor_grid {
            lines.push(format!("  {}minorgrids,", p));
        }
        lines
    }
}

/// Bound legend style, with both colors registered
#[derive(Debug, Clone, PartialEq)]
pub struct LegendConfig {
    pub visible: bool,
    pub location: LegendLocation,
    pub border: String,
    pub background: String,
}

impl LegendConfig {
    /// The anchor's y is flipped: legends are placed from the top, pgfplots
    /// measures from the bottom
    fn line(&self) -> String {
        format!(
            "  legend style={{legend cell align=left,align=left,fill={},draw={},at={{({},{})}}}},",
            self.background,
            self.border,
            format_number(self.location.x),
            format_number(1.0 - self.location.y)
        )
    }
}

/// `axis` environment with its options and plots
pub struct AxisElement<'a> {
    canvas_size: CanvasSize,
    title: Option<String>,
    two_d_mode: bool,
    view: ViewAngles,
    axes: [AxisConfig; 3],
    legend: Option<LegendConfig>,
    plots: ElementGroup<'a>,
}

impl<'a> AxisElement<'a> {
    /// Bind an axis container node and every plot below it
    ///
    /// Fails on a tick length without a sign and on a surface grid with fewer
    /// points than its dimensions call for. Grid styling is shared by all
    /// dimensions and taken from the X axis.
    pub fn bind(node: &'a Node, context: &mut ExportContext) -> Result<Self, ExportError> {
        let NodeKind::AxisContainer(container) = &node.kind else {
            return Err(ExportError::scene_error(format!(
                "node {} is a {}, not an axis container",
                node.id,
                node.tag()
            )));
        };

        let axis_span = span!(Level::DEBUG, "bind_axis", node = %node.id, two_d = container.two_d_mode);
        let _enter = axis_span.enter();

        let title = node.first(NodeTag::Title).and_then(|title| match &title.kind {
            NodeKind::Title(title) if !title.text.is_empty() => Some(title.text.clone()),
            _ => None,
        });
        let view = if container.two_d_mode {
            ViewAngles {
                azimuth: 0.0,
                elevation: 0.0,
            }
        } else {
            container.view.unwrap_or(DEFAULT_3D_VIEW)
        };

        for entry in node.find(NodeTag::Surface) {
            if let NodeKind::Surface(surface) = &entry.node.kind {
                surface.grid.validate()?;
            }
        }

        let extent = node.data_extent();
        let axes = [
            Self::bind_dimension(container, Dimension::X, &extent)?,
            Self::bind_dimension(container, Dimension::Y, &extent)?,
            Self::bind_dimension(container, Dimension::Z, &extent)?,
        ];

        Self::bind_grid_style(container, context);

        let legend_node = node.first(NodeTag::Legend);
        let legend = legend_node.and_then(|legend| match &legend.kind {
            NodeKind::Legend(legend) => Some(LegendConfig {
                visible: legend.visible,
                location: legend.location,
                border: context.color_name(legend.border_color.unwrap_or(Color::BLACK)),
                background: context.color_name(legend.background_color.unwrap_or(Color::WHITE)),
            }),
            _ => None,
        });

        let scope = PlotScope::new(container.scale_modes, legend_node);
        let plots = bind_plots(node, context, &scope);

        debug!(
            title = title.as_deref().unwrap_or(""),
            has_legend = legend.is_some(),
            plots = plots.len(),
            "Bound axis"
        );

        Ok(Self {
            canvas_size: context.canvas_size,
            title,
            two_d_mode: container.two_d_mode,
            view,
            axes,
            legend,
            plots,
        })
    }

    fn bind_dimension(
        container: &AxisContainer,
        dimension: Dimension,
        extent: &Extent,
    ) -> Result<AxisConfig, ExportError> {
        AxisConfig::bind(
            dimension,
            container.axes.get(dimension),
            container.scale_modes.get(dimension),
            extent,
        )
    }

    /// pgfplots has one grid style per document, so the X axis' grid lines
    /// style every axis
    fn bind_grid_style(container: &AxisContainer, context: &mut ExportContext) {
        let major = &container.axes.x.grid_major;
        let minor = &container.axes.x.grid_minor;
        let ExportContext {
            colors, options, ..
        } = context;

        options.set_major_grid_style(
            colors,
            major.color.unwrap_or(DEFAULT_GRID_COLOR),
            major.dash_style,
            major.width,
        );
        options.set_minor_grid_style(
            colors,
            minor.color.unwrap_or(DEFAULT_GRID_COLOR),
            minor.dash_style,
            minor.width,
        );
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_two_d(&self) -> bool {
        self.two_d_mode
    }

    pub fn view(&self) -> ViewAngles {
        self.view
    }

    pub fn axis(&self, dimension: Dimension) -> &AxisConfig {
        &self.axes[dimension.index()]
    }

    pub fn axis_mut(&mut self, dimension: Dimension) -> &mut AxisConfig {
        &mut self.axes[dimension.index()]
    }

    pub fn legend(&self) -> Option<&LegendConfig> {
        self.legend.as_ref()
    }

    pub fn plots(&self) -> &ElementGroup<'a> {
        &self.plots
    }

    /// Set the tick alignment of every dimension
    pub fn set_tick_align(&mut self, align: TickAlign) {
        self.axes.iter_mut().for_each(|axis| axis.tick_align = align);
    }

    pub fn set_major_ticks(&mut self, visible: bool) {
        self.axes.iter_mut().for_each(|axis| axis.major_ticks = visible);
    }

    pub fn set_minor_ticks(&mut self, visible: bool) {
        self.axes.iter_mut().for_each(|axis| axis.minor_ticks = visible);
    }

    pub fn set_major_grid(&mut self, visible: bool) {
        self.axes.iter_mut().for_each(|axis| axis.major_grid = visible);
    }

    pub fn set_minor_grid(&mut self, visible: bool) {
        self.axes.iter_mut().for_each(|axis| axis.minor_grid = visible);
    }

    /// Show or hide both major and minor grids on every dimension
    pub fn set_grid(&mut self, visible: bool) {
        self.set_major_grid(visible);
        self.set_minor_grid(visible);
    }

    fn option_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("  width={}mm,", self.canvas_size.width),
            format!("  height={}mm,", self.canvas_size.height),
        ];
        if let Some(title) = &self.title {
            lines.push(format!("  title={{{}}},", escape_text(title)));
        }
        lines.push(format!(
            "  view={{({})}}{{({})}},",
            format_number(self.view.azimuth),
            format_number(self.view.elevation)
        ));

        for dimension in Dimension::ALL {
            if dimension == Dimension::Z && self.two_d_mode {
                continue;
            }
            lines.extend(self.axis(dimension).lines(dimension));
        }

        if let Some(legend) = self.legend.as_ref().filter(|legend| legend.visible) {
            lines.push(legend.line());
        }
        lines.push("]".to_string());
        lines
    }
}

impl Element for AxisElement<'_> {
    fn pre_tag(&self) -> String {
        r"\begin{axis}[".to_string()
    }

    fn content(&self) -> Lines<'_> {
        Box::new(self.option_lines().into_iter().chain(self.plots.lines()))
    }

    fn post_tag(&self) -> String {
        r"\end{axis}".to_string()
    }
}

impl fmt::Debug for AxisElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisElement")
            .field("canvas_size", &self.canvas_size)
            .field("title", &self.title)
            .field("two_d_mode", &self.two_d_mode)
            .field("view", &self.view)
            .field("axes", &self.axes)
            .field("legend", &self.legend)
            .field("plots", &self.plots)
            .finish()
    }
}
