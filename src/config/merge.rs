use crate::{
    config::store::{ConfigMap, ConfigStore, json_to_wire},
    schema::ids,
};

/// Global keys that every merge rewrites, with their fallback values.
const ALWAYS_SET: [(&str, &str); 3] = [
    (ids::SHOW_GRID, "on"),
    (ids::GRAPH_TICKS, "on"),
    (ids::X_AXIS_FORMAT, "YYYY"),
];

/// Apply line-style defaults onto a live configuration.
///
/// - keys starting with `Line{i}` for `i` in `1..=line_count` that are
///   present in both `config` and `defaults` take the default value;
/// - `showGrid`, `graphTicks` and `XAxisFormat` are always set (from
///   `defaults`, else `"on"`, `"on"`, `"YYYY"`);
/// - everything else passes through; `config` key order is preserved and
///   newly set global keys are appended.
///
/// This is the only bulk-overwrite path; callers invoke it explicitly.
#[tracing::instrument(skip(config, defaults), fields(keys = config.len()))]
pub fn merge(config: &ConfigStore, defaults: &ConfigMap, line_count: u32) -> ConfigStore {
    let mut out = config.to_map();

    let line_keys: Vec<String> = out
        .keys()
        .filter(|k| is_active_line_key(k, line_count))
        .map(str::to_owned)
        .collect();

    let mut overwritten = 0usize;
    for key in line_keys {
        if let Some(v) = defaults.get(&key) {
            out.insert(key, v.to_owned());
            overwritten += 1;
        }
    }

    for (key, fallback) in ALWAYS_SET {
        let v = defaults.get(key).unwrap_or(fallback);
        out.insert(key.to_owned(), v.to_owned());
    }

    tracing::debug!(overwritten, "applied line defaults");
    out.into_store()
}

/// `true` when `key` starts with `Line{i}` for some `1 <= i <= line_count`.
///
/// This is a plain prefix test, so with one line `Line10Color` matches
/// `Line1` as well.
fn is_active_line_key(key: &str, line_count: u32) -> bool {
    (1..=line_count).any(|i| key.starts_with(&ids::line(i, ids::line_attr::COLUMN)))
}

/// Parse a defaults document.
///
/// Accepts the persisted pairs array, a JSON object of `id: value`, or a
/// loose `key=value;key:value` list. Anything else is empty defaults.
pub fn parse_defaults(raw: &str) -> ConfigMap {
    let raw = raw.trim();
    if raw.is_empty() {
        return ConfigMap::default();
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(_)) => ConfigStore::decode(raw).to_map(),
        Ok(serde_json::Value::Object(obj)) => obj
            .iter()
            .map(|(k, v)| (k.clone(), json_to_wire(v)))
            .collect(),
        Ok(other) => {
            tracing::warn!(kind = %json_kind(&other), "defaults document is not an object; ignoring");
            ConfigMap::default()
        }
        Err(_) => parse_key_values(raw),
    }
}

fn parse_key_values(raw: &str) -> ConfigMap {
    raw.split([';', ','])
        .filter_map(|part| {
            let mut kv = part.splitn(2, [':', '=']);
            let key = kv.next()?.trim();
            if key.is_empty() {
                return None;
            }
            let value = kv.next().unwrap_or("").trim();
            Some((key.to_owned(), value.to_owned()))
        })
        .collect()
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/merge.rs"]
mod tests;
