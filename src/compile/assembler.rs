use crate::{
    compile::trace::{
        Axis, AxisTitle, DerivedKind, ErrorBars, Layout, Legend, Margin, PlotConfig, Shape,
        ShapeLine, Trace, TraceLine, TraceMarker, TraceRole, TraceSet,
    },
    dataset::table::{Cell, Dataset, domain},
    figure::spec::{
        EvaluationPeriod, EventMarker, FigureSpec, LineSpec, LineStyle, MarkerAt, StatSource,
    },
    foundation::{
        color::Color,
        error::{FigError, FigResult},
    },
    stats::summary::{mean, percentile, standard_deviation},
};

/// Knobs for [`assemble`].
#[derive(Clone, Debug)]
pub struct AssembleOpts {
    /// Evaluation period fill when none is configured.
    pub overlay_color: Color,
    /// Alpha applied to evaluation period fills.
    pub overlay_alpha: u8,
    /// Alpha applied to the stddev band fill.
    pub band_alpha: u8,
    /// Alpha applied to percentile and mean reference lines.
    pub reference_alpha: u8,
}

impl Default for AssembleOpts {
    fn default() -> Self {
        Self {
            overlay_color: Color::rgb(0x99, 0x99, 0x99),
            overlay_alpha: 0x15,
            band_alpha: 0x27,
            reference_alpha: 0x60,
        }
    }
}

/// Compile a figure against its dataset.
///
/// Output order: evaluation period, event markers, then per line its main
/// trace followed by stddev band, percentiles and mean. Lines whose column
/// is unset or missing are omitted; derived traces whose statistic is
/// undefined are omitted. A missing X column aborts the figure.
#[tracing::instrument(skip_all, fields(lines = spec.lines.len()))]
pub fn assemble(spec: &FigureSpec, data: &Dataset, opts: &AssembleOpts) -> FigResult<TraceSet> {
    let x_name = spec
        .x_column
        .as_deref()
        .ok_or_else(|| FigError::compile("no X axis column selected"))?;
    let x = data
        .column(x_name)
        .ok_or_else(|| FigError::compile(format!("X axis column '{x_name}' not in dataset")))?;

    let hover = format!(
        "{}: %{{x}}<br>{}: %{{y}}",
        spec.x_axis.title, spec.y_axis.title
    );

    let mut line_traces = Vec::new();
    let mut plotted_y = Vec::new();
    for line in &spec.lines {
        let Some(y) = resolve_line_column(line, data) else {
            continue;
        };
        plotted_y.extend(y.iter().filter_map(Cell::as_f64));
        let ctx = LineCtx {
            line,
            x,
            y,
            data,
            opts,
        };
        line_traces.extend(ctx.traces(&hover));
    }

    let y_extent = spec
        .y_axis
        .range()
        .or_else(|| min_max(&plotted_y))
        .unwrap_or([0.0, 1.0]);

    let mut data_out = Vec::with_capacity(line_traces.len() + 1 + spec.event_markers.len());
    if let Some(period) = &spec.evaluation {
        data_out.push(evaluation_trace(period, y_extent, opts));
    }
    let x_domain = domain(x);
    for marker in &spec.event_markers {
        match marker_trace(marker, y_extent, x_domain) {
            Some(t) => data_out.push(t),
            None => tracing::warn!(marker = marker.index, "x column has no values; skipping y marker"),
        }
    }
    let overlays = data_out.len();
    data_out.extend(line_traces);

    tracing::debug!(overlays, traces = data_out.len(), "assembled trace set");
    Ok(TraceSet {
        data: data_out,
        layout: layout(spec),
        config: PlotConfig::default(),
    })
}

fn resolve_line_column<'a>(line: &LineSpec, data: &'a Dataset) -> Option<&'a [Cell]> {
    let Some(name) = line.column.as_deref() else {
        tracing::debug!(line = line.index, "no column selected; omitting line");
        return None;
    };
    let col = data.column(name);
    if col.is_none() {
        tracing::warn!(line = line.index, column = name, "column not in dataset; omitting line");
    }
    col
}

struct LineCtx<'a> {
    line: &'a LineSpec,
    x: &'a [Cell],
    y: &'a [Cell],
    data: &'a Dataset,
    opts: &'a AssembleOpts,
}

impl LineCtx<'_> {
    fn traces(&self, hover: &str) -> Vec<Trace> {
        let values: Vec<f64> = self.y.iter().filter_map(Cell::as_f64).collect();
        // x of rows with a numeric y; the line's own domain
        let xs: Vec<Cell> = self
            .x
            .iter()
            .zip(self.y)
            .filter(|(xc, yc)| !xc.is_blank() && yc.as_f64().is_some())
            .map(|(xc, _)| xc.clone())
            .collect();
        let sd = standard_deviation(&values);

        let mut out = vec![self.main_trace(&values, sd, hover)];
        out.extend(self.std_dev_band(&values, sd, &xs));
        out.extend(self.percentile_lines(&values, &xs));
        out.extend(self.mean_line(&values, &xs));
        out
    }

    fn source_values(&self, source: &StatSource, own: &[f64], what: &str) -> Option<Vec<f64>> {
        match source {
            StatSource::Auto => Some(own.to_vec()),
            StatSource::Column(name) => {
                let vals = self.data.numbers(name);
                if vals.is_none() {
                    tracing::warn!(line = self.line.index, column = %name, what, "source column not in dataset; omitting");
                }
                vals
            }
        }
    }

    fn main_trace(&self, values: &[f64], sd: Option<f64>, hover: &str) -> Trace {
        let line = self.line;
        let error_y = line.error_bars.as_ref().and_then(|eb| {
            let array = match &eb.source {
                StatSource::Auto => vec![sd?; self.y.len()],
                src => self.source_values(src, values, "error bars")?,
            };
            Some(ErrorBars::new(array, eb.color))
        });

        let mut t = Trace::lines(
            TraceRole::Line { index: line.index },
            line.title.clone(),
            self.x.to_vec(),
            self.y.to_vec(),
        );
        t.mode = "lines+markers";
        t.showlegend = line.legend;
        t.line = TraceLine {
            color: Some(line.color),
            dash: Some(line.line_style),
            width: None,
        };
        t.marker = Some(TraceMarker {
            color: line.color,
            symbol: line.marker,
            size: line.marker_size.px(),
        });
        t.error_y = error_y;
        t.connectgaps = Some(line.connect_gaps);
        t.hovertemplate = Some(hover.to_owned());
        t
    }

    fn std_dev_band(&self, values: &[f64], sd: Option<f64>, xs: &[Cell]) -> Option<Trace> {
        let band = self.line.std_dev.as_ref()?;
        let center = mean(values)?;
        let half = match &band.source {
            StatSource::Auto => sd?,
            src => mean(&self.source_values(src, values, "stddev")?)?,
        };

        let upper = center + half;
        let lower = center - half;
        let x: Vec<Cell> = xs.iter().chain(xs.iter().rev()).cloned().collect();
        let y: Vec<Cell> = std::iter::repeat_n(Cell::Number(upper), xs.len())
            .chain(std::iter::repeat_n(Cell::Number(lower), xs.len()))
            .collect();

        let name = format!("{} Mean ±1 SD", self.line.title);
        let fill = band.color.with_alpha(self.opts.band_alpha);
        let mut t = Trace::lines(
            TraceRole::Derived {
                index: self.line.index,
                kind: DerivedKind::StdDevBand,
            },
            name.clone(),
            x,
            y,
        );
        t.legendgroup = Some(name);
        t.showlegend = self.line.legend;
        t.fill = Some("toself");
        t.fillcolor = Some(fill);
        t.line = TraceLine {
            color: Some(fill),
            dash: None,
            width: Some(0.0),
        };
        t.hoverinfo = Some("skip".to_owned());
        Some(t)
    }

    fn percentile_lines(&self, values: &[f64], xs: &[Cell]) -> Vec<Trace> {
        if !self.line.percentiles {
            return Vec::new();
        }
        let (Some(p10), Some(p90)) = (percentile(values, 10.0), percentile(values, 90.0)) else {
            tracing::warn!(line = self.line.index, "no numeric values; omitting percentiles");
            return Vec::new();
        };
        let title = &self.line.title;
        [
            (
                DerivedKind::Percentile10,
                p10,
                format!("{title} 10th Percentile (Bottom)"),
                false,
            ),
            (
                DerivedKind::Percentile90,
                p90,
                format!("{title} 10th & 90th Percentile"),
                self.line.legend,
            ),
        ]
        .into_iter()
        .filter_map(|(kind, v, name, legend)| self.reference_line(kind, v, name, LineStyle::Dot, legend, xs))
        .collect()
    }

    fn mean_line(&self, values: &[f64], xs: &[Cell]) -> Option<Trace> {
        let source = self.line.mean.as_ref()?;
        let v = mean(&self.source_values(source, values, "mean")?)?;
        self.reference_line(
            DerivedKind::Mean,
            v,
            format!("{} Mean", self.line.title),
            LineStyle::Dash,
            self.line.legend,
            xs,
        )
    }

    fn reference_line(
        &self,
        kind: DerivedKind,
        v: f64,
        name: String,
        dash: LineStyle,
        legend: bool,
        xs: &[Cell],
    ) -> Option<Trace> {
        let (lo, hi) = domain(xs)?;
        let mut t = Trace::lines(
            TraceRole::Derived {
                index: self.line.index,
                kind,
            },
            name,
            vec![lo.clone(), hi.clone()],
            vec![Cell::Number(v), Cell::Number(v)],
        );
        t.showlegend = legend;
        t.line = TraceLine {
            color: Some(self.line.color.with_alpha(self.opts.reference_alpha)),
            dash: Some(dash),
            width: None,
        };
        Some(t)
    }
}

fn min_max(values: &[f64]) -> Option<[f64; 2]> {
    let first = *values.first()?;
    Some(values.iter().fold([first, first], |[lo, hi], &v| [lo.min(v), hi.max(v)]))
}

fn evaluation_trace(period: &EvaluationPeriod, [y_min, y_max]: [f64; 2], opts: &AssembleOpts) -> Trace {
    let fill = period
        .fill_color
        .unwrap_or(opts.overlay_color)
        .with_alpha(opts.overlay_alpha);
    let start = Cell::Text(period.start.clone());
    let end = Cell::Text(period.end.clone());
    let mut t = Trace::lines(
        TraceRole::Overlay,
        period.label.clone(),
        vec![start.clone(), end.clone(), end, start],
        vec![
            Cell::Number(y_max),
            Cell::Number(y_max),
            Cell::Number(y_min),
            Cell::Number(y_min),
        ],
    );
    t.showlegend = true;
    t.fill = Some("toself");
    t.fillcolor = Some(fill);
    t.line = TraceLine {
        color: Some(fill),
        dash: None,
        width: Some(0.0),
    };
    t
}

fn marker_trace(
    marker: &EventMarker,
    [y_min, y_max]: [f64; 2],
    x_domain: Option<(&Cell, &Cell)>,
) -> Option<Trace> {
    let (x, y, hover) = match &marker.at {
        MarkerAt::Date(date) => {
            let d = Cell::Text(date.clone());
            (
                vec![d.clone(), d],
                vec![Cell::Number(y_min), Cell::Number(y_max)],
                "x",
            )
        }
        MarkerAt::Value(v) => {
            let (lo, hi) = x_domain?;
            (
                vec![lo.clone(), hi.clone()],
                vec![Cell::Number(*v), Cell::Number(*v)],
                "name+y",
            )
        }
    };
    let mut t = Trace::lines(TraceRole::Overlay, marker.label.clone(), x, y);
    t.showlegend = true;
    t.line = TraceLine {
        color: Some(marker.color),
        dash: None,
        width: Some(2.0),
    };
    t.hoverinfo = Some(hover.to_owned());
    Some(t)
}

fn marker_shape(marker: &EventMarker) -> Shape {
    let line = ShapeLine {
        color: marker.color,
        width: 2.0,
    };
    match &marker.at {
        MarkerAt::Date(date) => Shape {
            kind: "line",
            xref: "x",
            yref: "paper",
            x0: Cell::Text(date.clone()),
            x1: Cell::Text(date.clone()),
            y0: Cell::Number(0.0),
            y1: Cell::Number(1.0),
            line,
        },
        MarkerAt::Value(v) => Shape {
            kind: "line",
            xref: "paper",
            yref: "y",
            x0: Cell::Number(0.0),
            x1: Cell::Number(1.0),
            y0: Cell::Number(*v),
            y1: Cell::Number(*v),
            line,
        },
    }
}

fn layout(spec: &FigureSpec) -> Layout {
    let (tickmode, ticks) = if spec.graph_ticks {
        (None, None)
    } else {
        (Some("auto"), Some("outside"))
    };
    let axis = |title: &str, kind, range, tickformat| Axis {
        title: AxisTitle {
            text: title.to_owned(),
        },
        kind,
        linecolor: "black",
        linewidth: 1.0,
        range,
        tickmode,
        ticks,
        tickformat,
        showgrid: spec.show_grid,
    };

    Layout {
        xaxis: axis(
            &spec.x_axis.title,
            "date",
            spec.x_axis.range(),
            Some(spec.x_format.tickformat()),
        ),
        yaxis: axis(&spec.y_axis.title, "linear", spec.y_axis.range(), None),
        legend: Legend::default(),
        autosize: true,
        margin: Margin {
            t: 60,
            b: 60,
            l: 60,
            r: 60,
        },
        hovermode: "closest",
        shapes: spec.event_markers.iter().map(marker_shape).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/assembler.rs"]
mod tests;
