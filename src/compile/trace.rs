use serde::Serialize;

use crate::{
    dataset::table::Cell,
    figure::spec::{LineStyle, MarkerSymbol},
    foundation::{color::Color, error::FigResult},
};

/// Kind of derived trace attached to a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivedKind {
    /// Filled ±1 SD band.
    StdDevBand,
    /// 10th percentile line.
    Percentile10,
    /// 90th percentile line.
    Percentile90,
    /// Mean line.
    Mean,
}

/// What a trace represents; not serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceRole {
    /// Evaluation period or event marker.
    Overlay,
    /// Main data trace of line `index`.
    Line {
        /// One-based line index.
        index: u32,
    },
    /// Statistic derived from line `index`.
    Derived {
        /// One-based line index.
        index: u32,
        /// Which statistic.
        kind: DerivedKind,
    },
}

impl TraceRole {
    /// `true` for overlays.
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::Overlay)
    }

    /// Line index for line and derived traces.
    pub fn line_index(self) -> Option<u32> {
        match self {
            Self::Overlay => None,
            Self::Line { index } | Self::Derived { index, .. } => Some(index),
        }
    }
}

/// Line styling of a trace.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TraceLine {
    /// Stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Dash pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<LineStyle>,
    /// Stroke width in px.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Marker styling of a trace.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceMarker {
    /// Fill color.
    pub color: Color,
    /// Glyph.
    pub symbol: MarkerSymbol,
    /// Size in px.
    pub size: u8,
}

/// Symmetric per-point error bars.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorBars {
    /// Always `"data"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Per-point magnitudes.
    pub array: Vec<f64>,
    /// Always `true`.
    pub visible: bool,
    /// Bar color.
    pub color: Color,
    /// Stroke thickness.
    pub thickness: f64,
    /// Cross-bar width.
    pub width: f64,
}

impl ErrorBars {
    /// Error bars with the fixed styling used for every line.
    pub fn new(array: Vec<f64>, color: Color) -> Self {
        Self {
            kind: "data",
            array,
            visible: true,
            color,
            thickness: 1.5,
            width: 8.0,
        }
    }
}

/// One renderable series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    /// What this trace represents.
    #[serde(skip)]
    pub role: TraceRole,
    /// Always `"scatter"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// X values.
    pub x: Vec<Cell>,
    /// Y values.
    pub y: Vec<Cell>,
    /// `"lines"` or `"lines+markers"`.
    pub mode: &'static str,
    /// Legend and hover name.
    pub name: String,
    /// Legend visibility.
    pub showlegend: bool,
    /// Legend group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    /// Line styling.
    pub line: TraceLine,
    /// Marker styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<TraceMarker>,
    /// Error bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_y: Option<ErrorBars>,
    /// Area fill mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<&'static str>,
    /// Area fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<Color>,
    /// Hover info flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    /// Hover template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    /// Connect across blank rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectgaps: Option<bool>,
}

impl Trace {
    /// Plain `lines` scatter trace; callers fill in the rest.
    pub fn lines(role: TraceRole, name: impl Into<String>, x: Vec<Cell>, y: Vec<Cell>) -> Self {
        Self {
            role,
            kind: "scatter",
            x,
            y,
            mode: "lines",
            name: name.into(),
            showlegend: false,
            legendgroup: None,
            line: TraceLine::default(),
            marker: None,
            error_y: None,
            fill: None,
            fillcolor: None,
            hoverinfo: None,
            hovertemplate: None,
            connectgaps: None,
        }
    }
}

/// Axis title wrapper.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisTitle {
    /// Title text.
    pub text: String,
}

/// One axis of the layout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title.
    pub title: AxisTitle,
    /// `"date"` or `"linear"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Axis line color.
    pub linecolor: &'static str,
    /// Axis line width.
    pub linewidth: f64,
    /// Fixed range when both bounds are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Tick mode override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<&'static str>,
    /// Tick placement override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<&'static str>,
    /// Tick label format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<&'static str>,
    /// Grid lines.
    pub showgrid: bool,
}

/// Legend placement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    /// `"h"` for horizontal.
    pub orientation: &'static str,
    /// Horizontal position in paper units.
    pub x: f64,
    /// Vertical position in paper units.
    pub y: f64,
    /// Horizontal anchor.
    pub xanchor: &'static str,
    /// Vertical anchor.
    pub yanchor: &'static str,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            orientation: "h",
            x: 0.5,
            y: 1.1,
            xanchor: "center",
            yanchor: "bottom",
        }
    }
}

/// Plot margins in px.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Margin {
    /// Top.
    pub t: u32,
    /// Bottom.
    pub b: u32,
    /// Left.
    pub l: u32,
    /// Right.
    pub r: u32,
}

/// Stroke of a layout shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeLine {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

/// Straight line drawn in the layout, spanning the paper on one axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    /// Always `"line"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// X reference (`"x"` or `"paper"`).
    pub xref: &'static str,
    /// Y reference (`"y"` or `"paper"`).
    pub yref: &'static str,
    /// Start x.
    pub x0: Cell,
    /// End x.
    pub x1: Cell,
    /// Start y.
    pub y0: Cell,
    /// End y.
    pub y1: Cell,
    /// Stroke.
    pub line: ShapeLine,
}

/// Layout descriptor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    /// X axis.
    pub xaxis: Axis,
    /// Y axis.
    pub yaxis: Axis,
    /// Legend placement.
    pub legend: Legend,
    /// Fill the container.
    pub autosize: bool,
    /// Margins.
    pub margin: Margin,
    /// Hover mode.
    pub hovermode: &'static str,
    /// Event marker shapes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
}

/// Charting library options.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    /// Resize with the container.
    pub responsive: bool,
    /// Library logo in the mode bar.
    pub displaylogo: bool,
    /// Mode bar visibility.
    pub display_mode_bar: bool,
    /// Mode bar buttons to hide.
    pub mode_bar_buttons_to_remove: Vec<&'static str>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            displaylogo: false,
            display_mode_bar: true,
            mode_bar_buttons_to_remove: vec![
                "zoom2d",
                "lasso2d",
                "autoScale2d",
                "hoverClosestCartesian",
                "hoverCompareCartesian",
            ],
        }
    }
}

/// Compiled figure: ordered traces, layout and config.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceSet {
    /// Traces; overlays first, then lines in index order.
    pub data: Vec<Trace>,
    /// Layout.
    pub layout: Layout,
    /// Library options.
    pub config: PlotConfig,
}

impl TraceSet {
    /// Roles in trace order.
    pub fn roles(&self) -> Vec<TraceRole> {
        self.data.iter().map(|t| t.role).collect()
    }

    /// Traces belonging to line `index` (main and derived).
    pub fn line_traces(&self, index: u32) -> impl Iterator<Item = &Trace> {
        self.data
            .iter()
            .filter(move |t| t.role.line_index() == Some(index))
    }

    /// JSON text handed to the charting library.
    pub fn to_json(&self, pretty: bool) -> FigResult<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }
}
