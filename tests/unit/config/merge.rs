use super::*;

fn config() -> ConfigStore {
    ConfigStore::from_pairs([
        ("XAxisTitle", "Year"),
        ("Line1", "Temp"),
        ("Line1Color", "#111111"),
        ("Line1LineType", "solid"),
        ("Line2Color", "#222222"),
        ("Line3Color", "#333333"),
        ("Line10Color", "#aaaaaa"),
        ("showGrid", ""),
    ])
}

fn defaults() -> ConfigMap {
    [
        ("Line1Color", "#ff0000"),
        ("Line1LineType", "dash"),
        ("Line2Color", "#00ff00"),
        ("Line3Color", "#0000ff"),
        ("Line10Color", "#abcdef"),
        ("Line4Color", "#444444"),
        ("XAxisTitle", "ignored"),
        ("graphTicks", ""),
    ]
    .into_iter()
    .collect()
}

#[test]
fn overwrites_only_active_line_keys_present_in_both() {
    let merged = merge(&config(), &defaults(), 2);
    assert_eq!(merged.fill("Line1Color"), Some("#ff0000"));
    assert_eq!(merged.fill("Line1LineType"), Some("dash"));
    assert_eq!(merged.fill("Line2Color"), Some("#00ff00"));
    // beyond N
    assert_eq!(merged.fill("Line3Color"), Some("#333333"));
    // plain prefix match: Line10Color starts with Line1
    assert_eq!(merged.fill("Line10Color"), Some("#abcdef"));
    // present in config only
    assert_eq!(merged.fill("Line1"), Some("Temp"));
    // non-line keys pass through
    assert_eq!(merged.fill("XAxisTitle"), Some("Year"));
}

#[test]
fn single_line_prefix_also_restyles_line_ten_keys() {
    let cfg = ConfigStore::from_pairs([("Line10Color", "#aaaaaa"), ("Line2Color", "#222222")]);
    let merged = merge(&cfg, &defaults(), 1);
    assert_eq!(merged.fill("Line10Color"), Some("#abcdef"));
    assert_eq!(merged.fill("Line2Color"), Some("#222222"));
}

#[test]
fn never_introduces_line_keys_absent_from_config() {
    let merged = merge(&config(), &defaults(), 14);
    assert_eq!(merged.fill("Line4Color"), None);
    assert_eq!(merged.fill("Line10Color"), Some("#abcdef"));
}

#[test]
fn global_keys_are_always_set() {
    let merged = merge(&config(), &defaults(), 1);
    // from defaults where given
    assert_eq!(merged.fill("graphTicks"), Some(""));
    // fallback when defaults omit it, even over an existing value
    assert_eq!(merged.fill("showGrid"), Some("on"));
    assert_eq!(merged.fill("XAxisFormat"), Some("YYYY"));
}

#[test]
fn preserves_config_order_and_appends_new_globals() {
    let merged = merge(&config(), &defaults(), 2);
    let keys: Vec<&str> = merged.pairs().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "XAxisTitle",
            "Line1",
            "Line1Color",
            "Line1LineType",
            "Line2Color",
            "Line3Color",
            "Line10Color",
            "showGrid",
            "graphTicks",
            "XAxisFormat",
        ]
    );
}

#[test]
fn every_other_key_is_unchanged() {
    let cfg = config();
    let merged = merge(&cfg, &defaults(), 2);
    let globals = ["showGrid", "graphTicks", "XAxisFormat"];
    for (k, v) in cfg.pairs() {
        let active_line = k.starts_with("Line1") || k.starts_with("Line2");
        if active_line || globals.contains(&k.as_str()) {
            continue;
        }
        assert_eq!(merged.fill(k), Some(v.as_str()), "key {k}");
    }
}

#[test]
fn defaults_accept_pairs_objects_and_key_values() {
    let pairs = parse_defaults(r##"[["Line1Color","#ff0000"],["showGrid","on"]]"##);
    assert_eq!(pairs.get("Line1Color"), Some("#ff0000"));

    let obj = parse_defaults(r##"{"Line1Color":"#00ff00","Line1MarkerSize":8}"##);
    assert_eq!(obj.get("Line1Color"), Some("#00ff00"));
    assert_eq!(obj.get("Line1MarkerSize"), Some("8"));

    let kv = parse_defaults("Line1Color=#0000ff; Line1LineType: dot ,showGrid=");
    assert_eq!(kv.get("Line1Color"), Some("#0000ff"));
    assert_eq!(kv.get("Line1LineType"), Some("dot"));
    assert_eq!(kv.get("showGrid"), Some(""));
}

#[test]
fn unusable_defaults_are_empty() {
    assert!(parse_defaults("").is_empty());
    assert!(parse_defaults("42").is_empty());
    assert!(parse_defaults("\"text\"").is_empty());
}

#[test]
fn empty_defaults_still_set_globals() {
    let merged = merge(&ConfigStore::new(), &ConfigMap::default(), 3);
    assert_eq!(merged.len(), 3);
    assert!(merged.is_on("showGrid"));
    assert!(merged.is_on("graphTicks"));
    assert_eq!(merged.fill("XAxisFormat"), Some("YYYY"));
}
