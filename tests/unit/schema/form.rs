use super::*;
use crate::foundation::error::FigError;

fn columns() -> Vec<String> {
    vec!["Year".into(), "Temp".into(), "Rain".into()]
}

#[test]
fn open_on_empty_persists_every_default() {
    let form = FigureForm::open("", columns()).unwrap();
    let store = form.store();
    assert_eq!(store.fill("NumberOfLines"), Some("1"));
    assert_eq!(store.fill("Line1Color"), Some("#000000"));
    assert_eq!(store.fill("Line2Color"), None);
    assert_eq!(store.len(), form.tree().fields().len());
}

#[test]
fn malformed_persisted_string_opens_with_defaults() {
    let form = FigureForm::open("[[not json", columns()).unwrap();
    assert_eq!(form.store().fill("XAxisFormat"), Some("YYYY"));
}

#[test]
fn fill_after_edit_returns_edited_value() {
    let mut form = FigureForm::open("", columns()).unwrap();
    form.set_value("XAxisTitle", "Year").unwrap();
    form.set_value("Line1Legend", "on").unwrap();
    form.set_value("YAxisLowBound", "-2.5").unwrap();
    assert_eq!(form.store().fill("XAxisTitle"), Some("Year"));
    assert_eq!(form.store().fill("Line1Legend"), Some("on"));
    assert_eq!(form.store().fill("YAxisLowBound"), Some("-2.5"));

    let reopened = FigureForm::open(&form.persisted().unwrap(), columns()).unwrap();
    assert_eq!(reopened.store(), form.store());
}

#[test]
fn unknown_or_invalid_edits_are_validation_errors() {
    let mut form = FigureForm::open("", columns()).unwrap();
    assert!(matches!(
        form.set_value("Nope", "x"),
        Err(FigError::Validation(_))
    ));
    assert!(matches!(
        form.set_value("Line1Legend", "yes"),
        Err(FigError::Validation(_))
    ));
    assert!(matches!(
        form.set_value("Line1", "Missing"),
        Err(FigError::Validation(_))
    ));
    assert!(matches!(
        form.set_value("YAxisHighBound", "high"),
        Err(FigError::Validation(_))
    ));
}

#[test]
fn growing_line_count_keeps_existing_values() {
    let mut form = FigureForm::open("", columns()).unwrap();
    form.set_value("Line1Color", "#ff0000").unwrap();
    form.set_value("NumberOfLines", "3").unwrap();
    assert_eq!(form.tree().line_block_count(), 3);
    assert_eq!(form.store().fill("Line1Color"), Some("#ff0000"));
    assert_eq!(form.store().fill("Line3Color"), Some("#000000"));

    form.set_value("NumberOfLines", "1").unwrap();
    assert_eq!(form.tree().line_block_count(), 1);
    assert_eq!(form.store().fill("Line3Color"), None);
}

#[test]
fn changing_marker_count_from_two_to_four_keeps_first_two() {
    let mut form = FigureForm::open("", columns()).unwrap();
    form.set_value("EventMarkers", "on").unwrap();
    form.set_value("EventMarkersField", "2").unwrap();
    form.set_value("EventMarkersEventText0", "Dam built").unwrap();
    form.set_value("EventMarkersEventAxis1", "y").unwrap();
    form.set_value("EventMarkersEventYValue1", "12.5").unwrap();

    form.set_value("EventMarkersField", "4").unwrap();
    assert_eq!(form.tree().marker_block_count(), 4);
    let s = form.store();
    assert_eq!(s.fill("EventMarkersEventText0"), Some("Dam built"));
    assert_eq!(s.fill("EventMarkersEventAxis1"), Some("y"));
    assert_eq!(s.fill("EventMarkersEventYValue1"), Some("12.5"));
    for k in 2..4 {
        assert_eq!(s.fill(&format!("EventMarkersEventText{k}")), Some(""));
        assert_eq!(s.fill(&format!("EventMarkersEventDate{k}")), Some(""));
        assert_eq!(s.fill(&format!("EventMarkersEventYValue{k}")), Some(""));
    }
}

#[test]
fn shrinking_then_growing_lines_restores_their_values() {
    let mut form = FigureForm::open("", columns()).unwrap();
    form.set_value("NumberOfLines", "3").unwrap();
    form.set_value("Line3Color", "#ff0000").unwrap();
    form.set_value("Line3Title", "Kept?").unwrap();

    form.set_value("NumberOfLines", "1").unwrap();
    assert_eq!(form.store().fill("Line3Color"), None);
    assert!(!form.persisted().unwrap().contains("Line3"));

    form.set_value("NumberOfLines", "3").unwrap();
    assert_eq!(form.store().fill("Line3Color"), Some("#ff0000"));
    assert_eq!(form.store().fill("Line3Title"), Some("Kept?"));
    assert_eq!(form.store().fill("Line2Color"), Some("#000000"));
}

#[test]
fn saved_lines_beyond_the_count_come_back_when_grown() {
    let persisted = r##"[["NumberOfLines","1"],["Line2Color","#00ff00"]]"##;
    let mut form = FigureForm::open(persisted, columns()).unwrap();
    assert_eq!(form.store().fill("Line2Color"), None);

    form.set_value("NumberOfLines", "2").unwrap();
    assert_eq!(form.store().fill("Line2Color"), Some("#00ff00"));
}

#[test]
fn shrinking_then_growing_markers_restores_their_values() {
    let mut form = FigureForm::open("", columns()).unwrap();
    form.set_value("EventMarkers", "on").unwrap();
    form.set_value("EventMarkersField", "4").unwrap();
    form.set_value("EventMarkersEventText3", "Flood").unwrap();
    form.set_value("EventMarkersEventAxis3", "y").unwrap();
    form.set_value("EventMarkersEventYValue3", "7").unwrap();

    form.set_value("EventMarkersField", "2").unwrap();
    assert_eq!(form.tree().marker_block_count(), 2);
    assert_eq!(form.store().fill("EventMarkersEventText3"), None);

    form.set_value("EventMarkersField", "4").unwrap();
    assert_eq!(form.tree().marker_block_count(), 4);
    let s = form.store();
    assert_eq!(s.fill("EventMarkersEventText3"), Some("Flood"));
    assert_eq!(s.fill("EventMarkersEventAxis3"), Some("y"));
    assert_eq!(s.fill("EventMarkersEventYValue3"), Some("7"));
    assert_eq!(s.fill("EventMarkersEventText2"), Some(""));
}

#[test]
fn choosing_a_column_fills_an_empty_title_only() {
    let mut form = FigureForm::open("", columns()).unwrap();
    form.set_value("Line1", "Temp").unwrap();
    assert_eq!(form.store().fill("Line1Title"), Some("Temp"));

    form.set_value("Line1Title", "Temperature").unwrap();
    form.set_value("Line1", "Rain").unwrap();
    assert_eq!(form.store().fill("Line1Title"), Some("Temperature"));
}

#[test]
fn visibility_follows_toggles() {
    let mut form = FigureForm::open("", columns()).unwrap();
    let visible = |f: &FigureForm, id: &str| f.visible_fields().iter().any(|x| x.id() == id);
    assert!(!visible(&form, "Line1MeanField"));
    form.set_value("Line1Mean", "on").unwrap();
    assert!(visible(&form, "Line1MeanField"));
    form.set_value("Line1Mean", "").unwrap();
    assert!(!visible(&form, "Line1MeanField"));
    // hidden but still persisted
    assert_eq!(form.store().fill("Line1MeanField"), Some("auto"));
}

#[test]
fn apply_defaults_restyles_active_lines() {
    let mut form = FigureForm::open("", columns()).unwrap();
    form.set_value("NumberOfLines", "2").unwrap();
    form.set_value("showGrid", "on").unwrap();
    let defaults: ConfigMap = [
        ("Line1Color", "#123456"),
        ("Line2LineType", "dot"),
        ("showGrid", ""),
    ]
    .into_iter()
    .collect();
    form.apply_defaults(&defaults).unwrap();
    let s = form.store();
    assert_eq!(s.fill("Line1Color"), Some("#123456"));
    assert_eq!(s.fill("Line2LineType"), Some("dot"));
    assert_eq!(s.fill("showGrid"), Some(""));
    assert_eq!(s.fill("graphTicks"), Some("on"));
    assert_eq!(form.tree().value("Line1Color"), Some("#123456"));
}
