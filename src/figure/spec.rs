use serde::Serialize;

use crate::{
    config::{store::ConfigStore, value::parse_number},
    foundation::{
        color::Color,
        error::{FigError, FigResult},
    },
    schema::{
        generator::{saved_line_count, saved_marker_count},
        ids::{self, line_attr, marker_attr},
    },
};

/// Line dash pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dashed.
    Dash,
    /// Dotted.
    Dot,
    /// Dash-dot.
    DashDot,
    /// Long dashes.
    LongDash,
    /// Long dash-dot.
    LongDashDot,
}

impl LineStyle {
    /// Parse the persisted select value.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "solid" => Self::Solid,
            "dash" => Self::Dash,
            "dot" => Self::Dot,
            "dashdot" => Self::DashDot,
            "longdash" => Self::LongDash,
            "longdashdot" => Self::LongDashDot,
            _ => return None,
        })
    }
}

/// Marker glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    /// Circle.
    #[default]
    Circle,
    /// Square.
    Square,
    /// Diamond.
    Diamond,
    /// Diagonal cross.
    X,
    /// Upward triangle.
    TriangleUp,
    /// Downward triangle.
    TriangleDown,
    /// Pentagon.
    Pentagon,
    /// Hexagon.
    Hexagon,
    /// Star.
    Star,
    /// Hourglass.
    Hourglass,
    /// Bowtie.
    Bowtie,
    /// Upright cross.
    Cross,
}

impl MarkerSymbol {
    /// Parse the persisted select value.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "circle" => Self::Circle,
            "square" => Self::Square,
            "diamond" => Self::Diamond,
            "x" => Self::X,
            "triangle-up" => Self::TriangleUp,
            "triangle-down" => Self::TriangleDown,
            "pentagon" => Self::Pentagon,
            "hexagon" => Self::Hexagon,
            "star" => Self::Star,
            "hourglass" => Self::Hourglass,
            "bowtie" => Self::Bowtie,
            "cross" => Self::Cross,
            _ => return None,
        })
    }
}

/// Marker size in px, restricted to the sizes the editor offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MarkerSize(u8);

impl MarkerSize {
    /// Sizes offered by the editor.
    pub const ALLOWED: [u8; 13] = [0, 1, 2, 3, 4, 6, 8, 10, 12, 14, 16, 18, 20];

    /// Checked constructor.
    pub fn new(px: u8) -> Option<Self> {
        Self::ALLOWED.contains(&px).then_some(Self(px))
    }

    /// Size in px.
    pub fn px(self) -> u8 {
        self.0
    }
}

impl Default for MarkerSize {
    fn default() -> Self {
        Self(10)
    }
}

/// Where a derived statistic takes its values from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatSource {
    /// Computed from the line's own column.
    Auto,
    /// Taken from another dataset column.
    Column(String),
}

impl StatSource {
    fn parse(s: &str) -> Self {
        match s {
            "" | ids::AUTO_SOURCE => Self::Auto,
            col => Self::Column(col.to_owned()),
        }
    }
}

/// Source plus color for the stddev band or error bars.
#[derive(Clone, Debug, PartialEq)]
pub struct SourcedOverlay {
    /// Value source.
    pub source: StatSource,
    /// Configured color.
    pub color: Color,
}

/// Resolved settings for one line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSpec {
    /// One-based line index.
    pub index: u32,
    /// Source column; `None` when unset.
    pub column: Option<String>,
    /// Display title.
    pub title: String,
    /// Line and marker color.
    pub color: Color,
    /// Dash pattern.
    pub line_style: LineStyle,
    /// Marker glyph.
    pub marker: MarkerSymbol,
    /// Marker size.
    pub marker_size: MarkerSize,
    /// Show in legend.
    pub legend: bool,
    /// Connect across blank rows.
    pub connect_gaps: bool,
    /// Mean reference line.
    pub mean: Option<StatSource>,
    /// Filled ±1 SD band.
    pub std_dev: Option<SourcedOverlay>,
    /// Symmetric error bars on the main trace.
    pub error_bars: Option<SourcedOverlay>,
    /// 10th and 90th percentile reference lines.
    pub percentiles: bool,
}

/// Shaded date range.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationPeriod {
    /// Start date as entered.
    pub start: String,
    /// End date as entered.
    pub end: String,
    /// Fill color; `None` uses the context overlay color.
    pub fill_color: Option<Color>,
    /// Legend label.
    pub label: String,
}

/// Position of an event marker.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerAt {
    /// Vertical line at a date on the x axis.
    Date(String),
    /// Horizontal line at a y value.
    Value(f64),
}

/// One event marker.
#[derive(Clone, Debug, PartialEq)]
pub struct EventMarker {
    /// Zero-based marker index.
    pub index: u32,
    /// Position.
    pub at: MarkerAt,
    /// Legend label.
    pub label: String,
    /// Line color.
    pub color: Color,
}

/// Title and optional bounds of one axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisSpec {
    /// Axis title.
    pub title: String,
    /// Lower bound.
    pub low: Option<f64>,
    /// Upper bound.
    pub high: Option<f64>,
}

impl AxisSpec {
    /// `[low, high]` when both bounds are set.
    pub fn range(&self) -> Option<[f64; 2]> {
        Some([self.low?, self.high?])
    }
}

/// X tick label format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum XAxisFormat {
    /// `YYYY`.
    #[default]
    Year,
    /// `YYYY-MM-DD`.
    YearMonthDay,
}

impl XAxisFormat {
    /// Charting library tick format.
    pub fn tickformat(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::YearMonthDay => "%Y-%m-%d",
        }
    }
}

/// Typed view of a whole figure configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureSpec {
    /// Grid lines on both axes.
    pub show_grid: bool,
    /// Library-default ticks when set; outside auto ticks otherwise.
    pub graph_ticks: bool,
    /// X axis title and bounds.
    pub x_axis: AxisSpec,
    /// Y axis title and bounds.
    pub y_axis: AxisSpec,
    /// X tick format.
    pub x_format: XAxisFormat,
    /// X column; `None` when unset.
    pub x_column: Option<String>,
    /// Evaluation period overlay, when enabled.
    pub evaluation: Option<EvaluationPeriod>,
    /// Event markers, when enabled.
    pub event_markers: Vec<EventMarker>,
    /// One spec per active line, in index order.
    pub lines: Vec<LineSpec>,
}

impl FigureSpec {
    /// Read a figure from its stored configuration.
    ///
    /// Unknown enum text and unparseable colors fall back to defaults with
    /// a warning. Only a graph type other than the line graph is an error.
    #[tracing::instrument(skip(store), fields(keys = store.len()))]
    pub fn from_config(store: &ConfigStore) -> FigResult<Self> {
        let r = Reader { store };

        let graph_type = r.text(ids::GRAPH_TYPE);
        if !graph_type.is_empty() && graph_type != ids::LINE_GRAPH_TYPE {
            return Err(FigError::compile(format!(
                "unsupported graph type '{graph_type}'"
            )));
        }

        let x_format = match r.text(ids::X_AXIS_FORMAT) {
            "YYYY-MM-DD" => XAxisFormat::YearMonthDay,
            "" | "YYYY" => XAxisFormat::Year,
            other => {
                tracing::warn!(value = other, "unknown XAxisFormat; using YYYY");
                XAxisFormat::Year
            }
        };

        let evaluation = store.is_on(ids::EVALUATION_PERIOD).then(|| EvaluationPeriod {
            start: r.text(ids::EVALUATION_START).to_owned(),
            end: r.text(ids::EVALUATION_END).to_owned(),
            fill_color: r.optional_color(ids::EVALUATION_FILL),
            label: r.text(ids::EVALUATION_TEXT).to_owned(),
        });

        let event_markers = if store.is_on(ids::EVENT_MARKERS) {
            (0..saved_marker_count(store))
                .filter_map(|k| r.event_marker(k))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            show_grid: store.is_on(ids::SHOW_GRID),
            graph_ticks: store.is_on(ids::GRAPH_TICKS),
            x_axis: AxisSpec {
                title: r.text(ids::X_AXIS_TITLE).to_owned(),
                low: r.number(ids::X_AXIS_LOW),
                high: r.number(ids::X_AXIS_HIGH),
            },
            y_axis: AxisSpec {
                title: r.text(ids::Y_AXIS_TITLE).to_owned(),
                low: r.number(ids::Y_AXIS_LOW),
                high: r.number(ids::Y_AXIS_HIGH),
            },
            x_format,
            x_column: r.column(ids::X_AXIS_COLUMN),
            evaluation,
            event_markers,
            lines: (1..=saved_line_count(store)).map(|i| r.line(i)).collect(),
        })
    }
}

struct Reader<'a> {
    store: &'a ConfigStore,
}

impl<'a> Reader<'a> {
    fn text(&self, id: &str) -> &'a str {
        self.store.fill(id).unwrap_or("")
    }

    fn number(&self, id: &str) -> Option<f64> {
        parse_number(self.text(id))
    }

    fn column(&self, id: &str) -> Option<String> {
        match self.text(id) {
            "" | ids::NONE_COLUMN => None,
            col => Some(col.to_owned()),
        }
    }

    fn optional_color(&self, id: &str) -> Option<Color> {
        let raw = self.text(id);
        if raw.trim().is_empty() {
            return None;
        }
        match Color::parse_hex(raw) {
            Ok(c) => Some(c),
            Err(err) => {
                tracing::warn!(id, %err, "ignoring unparseable color");
                None
            }
        }
    }

    fn color(&self, id: &str, fallback: Color) -> Color {
        self.optional_color(id).unwrap_or(fallback)
    }

    fn parsed<T: Default>(&self, id: &str, parse: impl Fn(&str) -> Option<T>) -> T {
        let raw = self.text(id);
        if raw.is_empty() {
            return T::default();
        }
        parse(raw).unwrap_or_else(|| {
            tracing::warn!(id, value = raw, "unknown value; using default");
            T::default()
        })
    }

    fn line(&self, i: u32) -> LineSpec {
        let id = |attr: &str| ids::line(i, attr);
        let on = |attr: &str| self.store.is_on(&id(attr));

        let color = self.color(&id(line_attr::COLOR), Color::BLACK);
        let sourced = |flag: &str, source: &str, color_attr: &str| {
            on(flag).then(|| SourcedOverlay {
                source: StatSource::parse(self.text(&id(source))),
                color: self.color(&id(color_attr), color),
            })
        };

        LineSpec {
            index: i,
            column: self.column(&id(line_attr::COLUMN)),
            title: self.text(&id(line_attr::TITLE)).to_owned(),
            color,
            line_style: self.parsed(&id(line_attr::LINE_TYPE), LineStyle::parse),
            marker: self.parsed(&id(line_attr::MARKER_TYPE), MarkerSymbol::parse),
            marker_size: self.parsed(&id(line_attr::MARKER_SIZE), |s| {
                s.trim().parse::<u8>().ok().and_then(MarkerSize::new)
            }),
            legend: on(line_attr::LEGEND),
            connect_gaps: on(line_attr::CONNECT_GAPS),
            mean: on(line_attr::MEAN)
                .then(|| StatSource::parse(self.text(&id(line_attr::MEAN_SOURCE)))),
            std_dev: sourced(
                line_attr::STD_DEV,
                line_attr::STD_DEV_SOURCE,
                line_attr::STD_DEV_COLOR,
            ),
            error_bars: sourced(
                line_attr::ERROR_BARS,
                line_attr::ERROR_BARS_SOURCE,
                line_attr::ERROR_BARS_COLOR,
            ),
            percentiles: on(line_attr::PERCENTILES),
        }
    }

    fn event_marker(&self, k: u32) -> Option<EventMarker> {
        let id = |stem: &str| ids::marker(stem, k);
        let at = match self.text(&id(marker_attr::AXIS)) {
            "y" => match self.number(&id(marker_attr::Y_VALUE)) {
                Some(v) => MarkerAt::Value(v),
                None => {
                    tracing::warn!(marker = k, "y event marker has no value; skipping");
                    return None;
                }
            },
            _ => match self.text(&id(marker_attr::DATE)) {
                "" => {
                    tracing::warn!(marker = k, "x event marker has no date; skipping");
                    return None;
                }
                date => MarkerAt::Date(date.to_owned()),
            },
        };
        Some(EventMarker {
            index: k,
            at,
            label: self.text(&id(marker_attr::TEXT)).to_owned(),
            color: self.color(&id(marker_attr::COLOR), Color::BLACK),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/figure/spec.rs"]
mod tests;
