use super::*;

#[test]
fn empty_config_reads_as_one_default_line() {
    let spec = FigureSpec::from_config(&ConfigStore::new()).unwrap();
    assert_eq!(spec.lines.len(), 1);
    let line = &spec.lines[0];
    assert_eq!(line.index, 1);
    assert_eq!(line.column, None);
    assert_eq!(line.color, Color::BLACK);
    assert_eq!(line.line_style, LineStyle::Solid);
    assert_eq!(line.marker, MarkerSymbol::Circle);
    assert_eq!(line.marker_size.px(), 10);
    assert!(!line.legend);
    assert!(line.mean.is_none() && line.std_dev.is_none() && line.error_bars.is_none());
    assert_eq!(spec.x_column, None);
    assert_eq!(spec.x_format, XAxisFormat::Year);
    assert!(spec.evaluation.is_none());
    assert!(spec.event_markers.is_empty());
}

#[test]
fn line_count_matches_number_of_lines() {
    let store = ConfigStore::from_pairs([("NumberOfLines", "3")]);
    let spec = FigureSpec::from_config(&store).unwrap();
    let idx: Vec<u32> = spec.lines.iter().map(|l| l.index).collect();
    assert_eq!(idx, vec![1, 2, 3]);
}

#[test]
fn line_fields_are_typed() {
    let store = ConfigStore::from_pairs([
        ("XAxis", "Year"),
        ("Line1", "Temp"),
        ("Line1Title", "Temperature"),
        ("Line1Color", "#ff0000"),
        ("Line1LineType", "longdashdot"),
        ("Line1MarkerType", "triangle-down"),
        ("Line1MarkerSize", "14"),
        ("Line1Legend", "on"),
        ("Line1ConnectGaps", "on"),
        ("Line1Mean", "on"),
        ("Line1MeanField", "auto"),
        ("Line1StdDev", "on"),
        ("Line1StdDevInputValues", "TempSD"),
        ("Line1StdDevColor", "#00ff00"),
        ("Line1ErrorBars", "on"),
        ("Line1ErrorBarsInputValues", "auto"),
        ("Line1ErrorBarsColor", ""),
        ("Line1Percentiles", "on"),
    ]);
    let spec = FigureSpec::from_config(&store).unwrap();
    assert_eq!(spec.x_column.as_deref(), Some("Year"));
    let l = &spec.lines[0];
    assert_eq!(l.column.as_deref(), Some("Temp"));
    assert_eq!(l.title, "Temperature");
    assert_eq!(l.color, Color::rgb(255, 0, 0));
    assert_eq!(l.line_style, LineStyle::LongDashDot);
    assert_eq!(l.marker, MarkerSymbol::TriangleDown);
    assert_eq!(l.marker_size.px(), 14);
    assert!(l.legend && l.connect_gaps && l.percentiles);
    assert_eq!(l.mean, Some(StatSource::Auto));
    assert_eq!(
        l.std_dev,
        Some(SourcedOverlay {
            source: StatSource::Column("TempSD".into()),
            color: Color::rgb(0, 255, 0),
        })
    );
    // blank color falls back to the line color
    assert_eq!(l.error_bars.as_ref().map(|e| e.color), Some(Color::rgb(255, 0, 0)));
}

#[test]
fn unknown_values_fall_back_to_defaults() {
    let store = ConfigStore::from_pairs([
        ("Line1", "None"),
        ("Line1Color", "red"),
        ("Line1LineType", "wavy"),
        ("Line1MarkerType", "blob"),
        ("Line1MarkerSize", "5"),
        ("XAxisFormat", "MM/YYYY"),
    ]);
    let spec = FigureSpec::from_config(&store).unwrap();
    let l = &spec.lines[0];
    assert_eq!(l.column, None);
    assert_eq!(l.color, Color::BLACK);
    assert_eq!(l.line_style, LineStyle::Solid);
    assert_eq!(l.marker, MarkerSymbol::Circle);
    assert_eq!(l.marker_size, MarkerSize::default());
    assert_eq!(spec.x_format, XAxisFormat::Year);
}

#[test]
fn other_graph_types_are_rejected() {
    let store = ConfigStore::from_pairs([("graphType", "Plotly bar graph")]);
    let err = FigureSpec::from_config(&store).unwrap_err();
    assert!(matches!(err, FigError::Compile(_)));
}

#[test]
fn overlays_are_read_only_when_enabled() {
    let base = [
        ("EvaluationPeriodStartDate", "2000-01-01"),
        ("EvaluationPeriodEndDate", "2005-01-01"),
        ("EvaluationPeriodText", "Study"),
        ("EventMarkersField", "3"),
        ("EventMarkersEventAxis0", "x"),
        ("EventMarkersEventDate0", "2002-06-01"),
        ("EventMarkersEventText0", "Storm"),
        ("EventMarkersEventAxis1", "y"),
        ("EventMarkersEventYValue1", "4.5"),
        ("EventMarkersEventColor1", "#0000ff"),
        ("EventMarkersEventAxis2", "y"),
        ("EventMarkersEventYValue2", ""),
    ];
    let off = FigureSpec::from_config(&ConfigStore::from_pairs(base)).unwrap();
    assert!(off.evaluation.is_none());
    assert!(off.event_markers.is_empty());

    let mut pairs = base.to_vec();
    pairs.push(("EvaluationPeriod", "on"));
    pairs.push(("EventMarkers", "on"));
    let on = FigureSpec::from_config(&ConfigStore::from_pairs(pairs)).unwrap();

    let eval = on.evaluation.unwrap();
    assert_eq!(eval.start, "2000-01-01");
    assert_eq!(eval.label, "Study");
    assert_eq!(eval.fill_color, None);

    // the blank y marker is skipped
    assert_eq!(on.event_markers.len(), 2);
    assert_eq!(on.event_markers[0].at, MarkerAt::Date("2002-06-01".into()));
    assert_eq!(on.event_markers[0].label, "Storm");
    assert_eq!(on.event_markers[1].at, MarkerAt::Value(4.5));
    assert_eq!(on.event_markers[1].color, Color::rgb(0, 0, 255));
}

#[test]
fn axis_range_needs_both_bounds() {
    let store = ConfigStore::from_pairs([
        ("YAxisLowBound", "0"),
        ("YAxisHighBound", "10"),
        ("XAxisLowBound", "1990"),
    ]);
    let spec = FigureSpec::from_config(&store).unwrap();
    assert_eq!(spec.y_axis.range(), Some([0.0, 10.0]));
    assert_eq!(spec.x_axis.range(), None);
}
