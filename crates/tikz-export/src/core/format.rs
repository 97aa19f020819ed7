//! Formatting of numbers and style options
//!
//! Colors are passed in by their registered name; resolving names is the
//! color registry's job.

use crate::scene::{Color, Colormap, DashStyle, MarkerStyle};

/// Format a coordinate for a data table or an axis bound
///
/// Uses the shortest representation that reads back to the same `f32`, never
/// scientific notation.
pub fn format_number(value: f32) -> String {
    value.to_string()
}

/// Format a value with a fixed number of decimals
pub fn format_fixed(value: f32, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Comma-separated custom tick positions, two decimals each
pub fn format_ticks(positions: &[f32]) -> String {
    positions
        .iter()
        .map(|&p| format_fixed(p, 2))
        .collect::<Vec<_>>()
        .join(",")
}

/// `\definecolor` statement with channels scaled to `0..1`
pub fn format_color_definition(name: &str, color: Color) -> String {
    let channel = |c: u8| format!("{:.6}", f64::from(c) / 255.0);
    format!(
        r"\definecolor{{{}}}{{rgb}}{{{},{},{}}}",
        name,
        channel(color.r),
        channel(color.g),
        channel(color.b)
    )
}

pub fn format_dash_style(dash_style: DashStyle) -> &'static str {
    match dash_style {
        DashStyle::Solid => "solid",
        DashStyle::Dashed => "dashed",
        DashStyle::Dotted => "dotted",
        DashStyle::PointDash => "dashdotted",
    }
}

/// Stroke options: `color=..,<dash>,line width=..pt`
pub fn format_line(color_name: &str, dash_style: DashStyle, width: f32) -> String {
    format!(
        "color={},{},line width={}pt",
        color_name,
        format_dash_style(dash_style),
        format_number(width)
    )
}

/// Marker options, or `None` when the style draws no marker
///
/// Markers are always stroked solid, independent of the line's dash style.
pub fn format_marker(color_name: &str, style: MarkerStyle, size: u32) -> Option<String> {
    let (mark, rotate) = match style {
        MarkerStyle::None => return None,
        MarkerStyle::Dot => ("*", false),
        MarkerStyle::Circle => ("o", false),
        MarkerStyle::Diamond => ("diamond", false),
        MarkerStyle::Square => ("square", false),
        MarkerStyle::TriangleUp => ("triangle", false),
        MarkerStyle::TriangleDown => ("triangle", true),
        MarkerStyle::Plus => ("+", false),
        MarkerStyle::Cross => ("x", false),
        MarkerStyle::Star => ("asterisk", false),
    };
    let rotate = if rotate { "rotate=180," } else { "" };

    Some(format!(
        "mark={},mark size={}pt,mark options={{solid,{}fill={},draw={}}}",
        mark, size, rotate, color_name, color_name
    ))
}

/// Symmetric, explicit y error bars drawn with the given stroke options
pub fn format_error_bars(line: &str) -> String {
    format!(
        "error bars/.cd,y dir=both,y explicit,error bar style={{{}}}",
        line
    )
}

/// Global colormap definition; keypoint positions are relative, scaled to `0..1000`
pub fn format_colormap(colormap: &Colormap) -> String {
    let stops = colormap
        .keypoints
        .iter()
        .map(|keypoint| {
            let color = keypoint.color;
            format!(
                "rgb255({}pt)=({},{},{})",
                (keypoint.position.clamp(0.0, 1.0) * 1000.0).round() as u32,
                color.r,
                color.g,
                color.b
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!("colormap={{{}}}{{{}}}", colormap.name, stops)
}
