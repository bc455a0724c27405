use super::*;

#[test]
fn parses_color_input_values() {
    assert_eq!(Color::parse_hex("#ff8000").unwrap(), Color::rgb(255, 128, 0));
    assert_eq!(Color::parse_hex("FF8000").unwrap(), Color::rgb(255, 128, 0));
    assert_eq!(
        Color::parse_hex("#00000080").unwrap(),
        Color::BLACK.with_alpha(0x80)
    );
}

#[test]
fn rejects_short_and_garbage() {
    assert!(Color::parse_hex("#fff").is_err());
    assert!(Color::parse_hex("#gg0000").is_err());
    assert!(Color::parse_hex("").is_err());
    assert!(Color::parse_hex("#ééé").is_err());
}

#[test]
fn hex_output_appends_alpha_only_when_translucent() {
    let c = Color::rgb(0x12, 0xab, 0xef);
    assert_eq!(c.to_hex(), "#12abef");
    assert_eq!(c.with_alpha(0x60).to_hex(), "#12abef60");
}

#[test]
fn serde_uses_hex_strings() {
    let s = serde_json::to_string(&Color::rgb(1, 2, 3).with_alpha(4)).unwrap();
    assert_eq!(s, "\"#01020304\"");
    let c: Color = serde_json::from_str("\"#010203\"").unwrap();
    assert_eq!(c, Color::rgb(1, 2, 3));
}
