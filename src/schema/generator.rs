use crate::{
    config::{store::ConfigStore, value::parse_number},
    foundation::error::{FigError, FigResult},
    schema::{
        field::{Block, BlockKind, Condition, Field, FieldSchema, FieldTree, Node, SelectOption},
        ids::{self, line_attr, marker_attr},
    },
};

/// Default number of event marker sub-blocks when nothing is saved.
pub const DEFAULT_EVENT_MARKERS: u32 = 1;

const LINE_STYLES: [(&str, &str); 6] = [
    ("solid", "Solid"),
    ("dash", "Dash"),
    ("dot", "Dot"),
    ("dashdot", "Dash Dot"),
    ("longdash", "Long Dash"),
    ("longdashdot", "Long Dash Dot"),
];

const MARKER_SYMBOLS: [(&str, &str); 12] = [
    ("circle", "Circle"),
    ("square", "Square"),
    ("diamond", "Diamond"),
    ("x", "X"),
    ("triangle-up", "Triangle Up"),
    ("triangle-down", "Triangle Down"),
    ("pentagon", "Pentagon"),
    ("hexagon", "Hexagon"),
    ("star", "Star"),
    ("hourglass", "Hourglass"),
    ("bowtie", "Bowtie"),
    ("cross", "Cross"),
];

const MARKER_SIZES: [u32; 13] = [0, 1, 2, 3, 4, 6, 8, 10, 12, 14, 16, 18, 20];

/// Everything the generator needs to lay out one figure's fields.
#[derive(Clone, Copy, Debug)]
pub struct SchemaInputs<'a> {
    /// Number of line blocks, `1..=14`.
    pub line_count: u32,
    /// Number of event marker sub-blocks, `0..=6`.
    pub marker_count: u32,
    /// Dataset column names, in document order.
    pub columns: &'a [String],
    /// Values used to repopulate the generated fields.
    pub store: &'a ConfigStore,
}

/// Build the field tree for the given counts, repopulated from `store`.
///
/// Every field whose id is present in `store` takes the saved value; ids
/// beyond the requested counts are simply not generated.
#[tracing::instrument(skip(inputs), fields(lines = inputs.line_count, markers = inputs.marker_count))]
pub fn generate(inputs: &SchemaInputs<'_>) -> FigResult<FieldTree> {
    if !(1..=ids::MAX_LINES).contains(&inputs.line_count) {
        return Err(FigError::validation(format!(
            "line count must be in 1..={}, got {}",
            ids::MAX_LINES,
            inputs.line_count
        )));
    }
    if inputs.marker_count > ids::MAX_EVENT_MARKERS {
        return Err(FigError::validation(format!(
            "event marker count must be in 0..={}, got {}",
            ids::MAX_EVENT_MARKERS,
            inputs.marker_count
        )));
    }

    let b = Builder { store: inputs.store };
    let mut roots = vec![
        b.global_block(),
        b.evaluation_block(),
        b.event_markers_block(inputs.marker_count),
        b.x_axis_block(inputs.columns),
    ];
    roots.extend((1..=inputs.line_count).map(|i| b.line_block(i, inputs.columns)));

    Ok(FieldTree { roots })
}

/// Generate using the counts saved in `store` (clamped into range).
pub fn generate_from_store(columns: &[String], store: &ConfigStore) -> FigResult<FieldTree> {
    generate(&SchemaInputs {
        line_count: saved_line_count(store),
        marker_count: saved_marker_count(store),
        columns,
        store,
    })
}

/// `NumberOfLines` from `store`, clamped to `1..=14`; 1 when unset.
pub fn saved_line_count(store: &ConfigStore) -> u32 {
    saved_count(store, ids::NUMBER_OF_LINES, 1, 1, ids::MAX_LINES)
}

/// `EventMarkersField` from `store`, clamped to `0..=6`; 1 when unset.
pub fn saved_marker_count(store: &ConfigStore) -> u32 {
    saved_count(
        store,
        ids::EVENT_MARKER_COUNT,
        DEFAULT_EVENT_MARKERS,
        0,
        ids::MAX_EVENT_MARKERS,
    )
}

fn saved_count(store: &ConfigStore, id: &str, default: u32, min: u32, max: u32) -> u32 {
    match store.fill(id).and_then(parse_number) {
        Some(v) => (v.max(0.0) as u32).clamp(min, max),
        None => default,
    }
}

struct Builder<'a> {
    store: &'a ConfigStore,
}

impl Builder<'_> {
    fn field(&self, schema: FieldSchema) -> Node {
        let saved = self.store.fill(&schema.id);
        let value = match (saved, schema.default.as_deref()) {
            (Some(v), Some(d)) if v.is_empty() && !d.is_empty() => d.to_owned(),
            (Some(v), _) => v.to_owned(),
            (None, d) => d.unwrap_or_default().to_owned(),
        };
        Node::Field(Field { schema, value })
    }

    fn global_block(&self) -> Block {
        let mut block = Block::new("global", "Chart", BlockKind::Global);
        block.children = vec![
            self.field(FieldSchema::select(
                ids::GRAPH_TYPE,
                "Graph Type",
                vec![SelectOption::plain(ids::LINE_GRAPH_TYPE)],
            )),
            self.field(FieldSchema::checkbox(ids::SHOW_GRID, "Show Grid")),
            self.field(FieldSchema::checkbox(ids::GRAPH_TICKS, "Show Graph Ticks")),
            self.field(FieldSchema::text(ids::X_AXIS_TITLE, "X Axis Title")),
            self.field(FieldSchema::number(ids::X_AXIS_LOW, "X Axis Low Bound")),
            self.field(FieldSchema::number(ids::X_AXIS_HIGH, "X Axis High Bound")),
            self.field(FieldSchema::text(ids::Y_AXIS_TITLE, "Y Axis Title")),
            self.field(FieldSchema::number(ids::Y_AXIS_LOW, "Y Axis Low Bound")),
            self.field(FieldSchema::number(ids::Y_AXIS_HIGH, "Y Axis High Bound")),
            self.field(FieldSchema::select(
                ids::NUMBER_OF_LINES,
                "Number of Lines",
                (1..=ids::MAX_LINES)
                    .map(|n| SelectOption::plain(n.to_string()))
                    .collect(),
            )),
            self.field(FieldSchema::select(
                ids::X_AXIS_FORMAT,
                "X Axis Date Format",
                vec![SelectOption::plain("YYYY"), SelectOption::plain("YYYY-MM-DD")],
            )),
        ];
        block
    }

    fn evaluation_block(&self) -> Block {
        let mut detail = Block::detail(
            "EvaluationPeriodDetails",
            Condition::Checked {
                id: ids::EVALUATION_PERIOD.to_owned(),
            },
        );
        detail.children = vec![
            self.field(FieldSchema::date(ids::EVALUATION_START, "Start Date")),
            self.field(FieldSchema::date(ids::EVALUATION_END, "End Date")),
            self.field(FieldSchema::color(ids::EVALUATION_FILL, "Fill Color")),
            self.field(FieldSchema::text(ids::EVALUATION_TEXT, "Label")),
        ];

        let mut block = Block::new("EvaluationPeriodBlock", "Evaluation Period", BlockKind::Overlay);
        block.children = vec![
            self.field(FieldSchema::checkbox(
                ids::EVALUATION_PERIOD,
                "Show Evaluation Period",
            )),
            Node::Block(detail),
        ];
        block
    }

    fn event_markers_block(&self, count: u32) -> Block {
        let mut detail = Block::detail(
            "EventMarkersDetails",
            Condition::Checked {
                id: ids::EVENT_MARKERS.to_owned(),
            },
        );
        detail.children.push(self.field(
            FieldSchema::select(
                ids::EVENT_MARKER_COUNT,
                "Number of Event Markers",
                (0..=ids::MAX_EVENT_MARKERS)
                    .map(|n| SelectOption::plain(n.to_string()))
                    .collect(),
            )
            .with_default(DEFAULT_EVENT_MARKERS.to_string()),
        ));
        detail
            .children
            .extend((0..count).map(|k| Node::Block(self.marker_block(k))));

        let mut block = Block::new("EventMarkersBlock", "Event Markers", BlockKind::Overlay);
        block.children = vec![
            self.field(FieldSchema::checkbox(ids::EVENT_MARKERS, "Show Event Markers")),
            Node::Block(detail),
        ];
        block
    }

    fn marker_block(&self, k: u32) -> Block {
        let axis_id = ids::marker(marker_attr::AXIS, k);
        let axis_is = |value: &str| Condition::Equals {
            id: axis_id.clone(),
            value: value.to_owned(),
        };

        let mut x_only = Block::detail(format!("EventMarker{k}X"), axis_is("x"));
        x_only.children = vec![self.field(FieldSchema::date(
            ids::marker(marker_attr::DATE, k),
            "Event Date",
        ))];
        let mut y_only = Block::detail(format!("EventMarker{k}Y"), axis_is("y"));
        y_only.children = vec![self.field(FieldSchema::number(
            ids::marker(marker_attr::Y_VALUE, k),
            "Event Y Value",
        ))];

        let mut block = Block::new(
            format!("EventMarker{k}"),
            format!("Event Marker {}", k + 1),
            BlockKind::EventMarker { index: k },
        );
        block.children = vec![
            self.field(FieldSchema::select(
                axis_id.clone(),
                "Event Axis",
                vec![
                    SelectOption::new("x", "X Axis (date)"),
                    SelectOption::new("y", "Y Axis (value)"),
                ],
            )),
            Node::Block(x_only),
            Node::Block(y_only),
            self.field(FieldSchema::text(ids::marker(marker_attr::TEXT, k), "Event Text")),
            self.field(FieldSchema::color(ids::marker(marker_attr::COLOR, k), "Event Color")),
        ];
        block
    }

    fn x_axis_block(&self, columns: &[String]) -> Block {
        let mut block = Block::new("XAxisBlock", "X Axis", BlockKind::XAxis);
        block.children = vec![self.field(FieldSchema::select(
            ids::X_AXIS_COLUMN,
            "X Axis Column",
            column_options(None, columns),
        ))];
        block
    }

    fn line_block(&self, i: u32, columns: &[String]) -> Block {
        let id = |attr: &str| ids::line(i, attr);
        let checked = |attr: &str| Condition::Checked { id: id(attr) };

        let mut mean = Block::detail(format!("Line{i}MeanDetails"), checked(line_attr::MEAN));
        mean.children = vec![self.field(FieldSchema::select(
            id(line_attr::MEAN_SOURCE),
            "Mean Values",
            column_options(Some("Auto Calculate Based on Line Column Selection"), columns),
        ))];

        let mut std_dev = Block::detail(format!("Line{i}StdDevDetails"), checked(line_attr::STD_DEV));
        std_dev.children = vec![
            self.field(FieldSchema::select(
                id(line_attr::STD_DEV_SOURCE),
                "Standard Deviation Values",
                column_options(Some("Auto Calculate Based on Line Column Selection"), columns),
            )),
            self.field(FieldSchema::color(
                id(line_attr::STD_DEV_COLOR),
                "Standard Deviation Color",
            )),
        ];

        let mut error_bars =
            Block::detail(format!("Line{i}ErrorBarsDetails"), checked(line_attr::ERROR_BARS));
        error_bars.children = vec![
            self.field(FieldSchema::select(
                id(line_attr::ERROR_BARS_SOURCE),
                "Error Bar Values",
                column_options(Some("Auto Calculate Based on Line Column Selection"), columns),
            )),
            self.field(FieldSchema::color(
                id(line_attr::ERROR_BARS_COLOR),
                "Error Bar Color",
            )),
        ];

        let mut block = Block::new(format!("Line{i}Block"), format!("Line {i}"), BlockKind::Line { index: i });
        block.children = vec![
            self.field(FieldSchema::select(
                id(line_attr::COLUMN),
                "Column",
                column_options(None, columns),
            )),
            self.field(FieldSchema::text(id(line_attr::TITLE), "Title")),
            self.field(FieldSchema::color(id(line_attr::COLOR), "Color")),
            self.field(FieldSchema::select(
                id(line_attr::LINE_TYPE),
                "Line Type",
                LINE_STYLES.iter().map(|(v, l)| SelectOption::new(*v, *l)).collect(),
            )),
            self.field(FieldSchema::select(
                id(line_attr::MARKER_TYPE),
                "Marker Type",
                MARKER_SYMBOLS.iter().map(|(v, l)| SelectOption::new(*v, *l)).collect(),
            )),
            self.field(
                FieldSchema::select(
                    id(line_attr::MARKER_SIZE),
                    "Marker Size",
                    MARKER_SIZES
                        .iter()
                        .map(|s| SelectOption::plain(s.to_string()))
                        .collect(),
                )
                .with_default("10"),
            ),
            self.field(FieldSchema::checkbox(id(line_attr::LEGEND), "Show Legend")),
            self.field(FieldSchema::checkbox(id(line_attr::CONNECT_GAPS), "Connect Gaps")),
            self.field(FieldSchema::checkbox(id(line_attr::MEAN), "Show Mean")),
            Node::Block(mean),
            self.field(FieldSchema::checkbox(id(line_attr::STD_DEV), "Show Standard Deviation")),
            Node::Block(std_dev),
            self.field(FieldSchema::checkbox(id(line_attr::ERROR_BARS), "Show Error Bars")),
            Node::Block(error_bars),
            self.field(FieldSchema::checkbox(id(line_attr::PERCENTILES), "Show Percentiles")),
        ];
        block
    }
}

fn column_options(auto_label: Option<&str>, columns: &[String]) -> Vec<SelectOption> {
    let head = match auto_label {
        Some(label) => SelectOption::new(ids::AUTO_SOURCE, label),
        None => SelectOption::plain(ids::NONE_COLUMN),
    };
    std::iter::once(head)
        .chain(columns.iter().map(|c| SelectOption::plain(c.as_str())))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/schema/generator.rs"]
mod tests;
