use super::*;

#[test]
fn cells_are_classified() {
    let ds = Dataset::from_json_str(
        r#"{"Year":["1990-01-01","1991-01-01",null],"Temp":[1.5,"2","NA"," ",null,"n/a"]}"#,
    )
    .unwrap();
    assert_eq!(
        ds.column("Year").unwrap(),
        &[
            Cell::Text("1990-01-01".into()),
            Cell::Text("1991-01-01".into()),
            Cell::Blank,
        ]
    );
    assert_eq!(
        ds.column("Temp").unwrap(),
        &[
            Cell::Number(1.5),
            Cell::Number(2.0),
            Cell::Blank,
            Cell::Blank,
            Cell::Blank,
            Cell::Text("n/a".into()),
        ]
    );
    assert_eq!(ds.numbers("Temp").unwrap(), vec![1.5, 2.0]);
    assert_eq!(ds.row_count(), 6);
}

#[test]
fn columns_keep_document_order() {
    let ds = Dataset::from_json_str(r#"{"z":[1],"a":[2],"m":[3]}"#).unwrap();
    assert_eq!(ds.column_names(), vec!["z", "a", "m"]);
    assert_eq!(ds.width(), 3);
}

#[test]
fn single_data_wrapper_is_unwrapped() {
    let ds = Dataset::from_json_str(r#"{"data":{"x":[1,2],"y":[3,4]}}"#).unwrap();
    assert_eq!(ds.column_names(), vec!["x", "y"]);
}

#[test]
fn data_wrapper_with_metadata_sibling_is_unwrapped() {
    let ds = Dataset::from_json_str(
        r#"{"data":{"Year":["2015-01-01"],"Temp":[1.0]},"metadata":{"source":"buoy"}}"#,
    )
    .unwrap();
    assert_eq!(ds.column_names(), vec!["Year", "Temp"]);
    assert_eq!(ds.column("Temp").unwrap(), &[Cell::Number(1.0)]);
}

#[test]
fn non_object_data_member_is_a_plain_column() {
    let ds = Dataset::from_json_str(r#"{"data":[1,2],"other":[3,4]}"#).unwrap();
    assert_eq!(ds.column_names(), vec!["data", "other"]);
}

#[test]
fn bad_shapes_are_dataset_errors() {
    for doc in ["[1,2]", r#"{"x":3}"#, "not json"] {
        let err = Dataset::from_json_str(doc).unwrap_err();
        assert!(matches!(err, FigError::Dataset(_)), "{doc}");
    }
}

#[test]
fn domain_orders_numbers_and_dates() {
    let nums = [Cell::Number(3.0), Cell::Blank, Cell::Number(-1.0), Cell::Number(2.0)];
    let (lo, hi) = domain(&nums).unwrap();
    assert_eq!((lo, hi), (&Cell::Number(-1.0), &Cell::Number(3.0)));

    let dates = [
        Cell::Text("2001-05-01".into()),
        Cell::Text("1999-12-31".into()),
        Cell::Text("2010-01-01".into()),
    ];
    let (lo, hi) = domain(&dates).unwrap();
    assert_eq!(lo, &Cell::Text("1999-12-31".into()));
    assert_eq!(hi, &Cell::Text("2010-01-01".into()));

    assert!(domain(&[Cell::Blank]).is_none());
}

#[test]
fn blank_cells_serialize_as_null() {
    let cells = vec![Cell::Number(1.0), Cell::Blank, Cell::Text("a".into())];
    assert_eq!(serde_json::to_string(&cells).unwrap(), r#"[1.0,null,"a"]"#);
}
