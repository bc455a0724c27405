use super::*;

#[test]
fn checkbox_values_round_trip() {
    let on = ConfigValue::from_wire(FieldKind::Checkbox, "on");
    let off = ConfigValue::from_wire(FieldKind::Checkbox, "");
    assert!(on.is_on());
    assert!(!off.is_on());
    assert_eq!(on.to_wire(), "on");
    assert_eq!(off.to_wire(), "");
}

#[test]
fn anything_but_on_is_unchecked() {
    assert!(!ConfigValue::from_wire(FieldKind::Checkbox, "true").is_on());
    assert!(!ConfigValue::from_wire(FieldKind::Checkbox, "ON").is_on());
}

#[test]
fn numbers_encode_as_decimal_text() {
    assert_eq!(ConfigValue::from_wire(FieldKind::Number, "12").to_wire(), "12");
    assert_eq!(
        ConfigValue::from_wire(FieldKind::Number, " 2.5 ").to_wire(),
        "2.5"
    );
    assert_eq!(
        ConfigValue::from_wire(FieldKind::Number, ""),
        ConfigValue::Number(None)
    );
    assert_eq!(
        ConfigValue::from_wire(FieldKind::Number, "abc"),
        ConfigValue::Number(None)
    );
}

#[test]
fn text_kinds_pass_through_verbatim() {
    for kind in [FieldKind::Select, FieldKind::Color, FieldKind::Date, FieldKind::Text] {
        assert_eq!(
            ConfigValue::from_wire(kind, " keep spaces ").to_wire(),
            " keep spaces "
        );
    }
}
