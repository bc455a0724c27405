//! Persisted field ids. These strings are the storage keys of every saved
//! figure; renaming one orphans existing data.

pub const GRAPH_TYPE: &str = "graphType";
pub const SHOW_GRID: &str = "showGrid";
pub const GRAPH_TICKS: &str = "graphTicks";
pub const X_AXIS_TITLE: &str = "XAxisTitle";
pub const Y_AXIS_TITLE: &str = "YAxisTitle";
pub const X_AXIS_LOW: &str = "XAxisLowBound";
pub const X_AXIS_HIGH: &str = "XAxisHighBound";
pub const Y_AXIS_LOW: &str = "YAxisLowBound";
pub const Y_AXIS_HIGH: &str = "YAxisHighBound";
pub const NUMBER_OF_LINES: &str = "NumberOfLines";
pub const X_AXIS_FORMAT: &str = "XAxisFormat";
pub const X_AXIS_COLUMN: &str = "XAxis";

pub const EVALUATION_PERIOD: &str = "EvaluationPeriod";
pub const EVALUATION_START: &str = "EvaluationPeriodStartDate";
pub const EVALUATION_END: &str = "EvaluationPeriodEndDate";
pub const EVALUATION_FILL: &str = "EvaluationPeriodFillColor";
pub const EVALUATION_TEXT: &str = "EvaluationPeriodText";

pub const EVENT_MARKERS: &str = "EventMarkers";
pub const EVENT_MARKER_COUNT: &str = "EventMarkersField";

pub const LINE_GRAPH_TYPE: &str = "Plotly line graph (time series)";
pub const NONE_COLUMN: &str = "None";
pub const AUTO_SOURCE: &str = "auto";

pub const MAX_LINES: u32 = 14;
pub const MAX_EVENT_MARKERS: u32 = 6;

/// Per-line attribute suffixes, in the order the editor renders them.
pub mod line_attr {
    pub const COLUMN: &str = "";
    pub const TITLE: &str = "Title";
    pub const COLOR: &str = "Color";
    pub const LINE_TYPE: &str = "LineType";
    pub const MARKER_TYPE: &str = "MarkerType";
    pub const MARKER_SIZE: &str = "MarkerSize";
    pub const LEGEND: &str = "Legend";
    pub const CONNECT_GAPS: &str = "ConnectGaps";
    pub const MEAN: &str = "Mean";
    pub const MEAN_SOURCE: &str = "MeanField";
    pub const STD_DEV: &str = "StdDev";
    pub const STD_DEV_SOURCE: &str = "StdDevInputValues";
    pub const STD_DEV_COLOR: &str = "StdDevColor";
    pub const ERROR_BARS: &str = "ErrorBars";
    pub const ERROR_BARS_SOURCE: &str = "ErrorBarsInputValues";
    pub const ERROR_BARS_COLOR: &str = "ErrorBarsColor";
    pub const PERCENTILES: &str = "Percentiles";
}

/// Per-marker attribute stems; the zero-based marker index is appended.
pub mod marker_attr {
    pub const AXIS: &str = "EventMarkersEventAxis";
    pub const DATE: &str = "EventMarkersEventDate";
    pub const Y_VALUE: &str = "EventMarkersEventYValue";
    pub const TEXT: &str = "EventMarkersEventText";
    pub const COLOR: &str = "EventMarkersEventColor";
}

/// `Line{index}{attr}`.
pub fn line(index: u32, attr: &str) -> String {
    format!("Line{index}{attr}")
}

/// `{stem}{index}` for event marker fields.
pub fn marker(stem: &str, index: u32) -> String {
    format!("{stem}{index}")
}

/// Line index encoded in a `Line{i}...` id.
///
/// Digits are read greedily, so `Line10Color` belongs to line 10 and never
/// to line 1.
pub fn line_index(id: &str) -> Option<u32> {
    let rest = id.strip_prefix("Line")?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    rest[..digits].parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/schema/ids.rs"]
mod tests;
