use crate::{
    config::value::ConfigValue,
    foundation::error::{FigError, FigResult},
    schema::field::FieldKind,
};

/// Ordered `(field id, value)` pairs: the persisted figure configuration.
///
/// Order is first-appearance order among the fields that were rendered when
/// [`ConfigStore::log`] last ran. The persisted form is the JSON array of
/// two-element arrays, e.g. `[["XAxisTitle","Year"],["Line1Legend","on"]]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigStore {
    pairs: Vec<(String, String)>,
}

impl ConfigStore {
    /// Empty configuration, as on first load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap pairs verbatim (duplicates are kept; lookups take the last one).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Decode a persisted string.
    ///
    /// Blank or malformed input yields an empty store; nothing is thrown.
    /// Entries that are not `[id, value]` arrays are skipped.
    pub fn decode(persisted: &str) -> Self {
        if persisted.trim().is_empty() {
            return Self::new();
        }
        match try_decode(persisted) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(%err, "persisted figure configuration is malformed; starting empty");
                Self::new()
            }
        }
    }

    /// Encode to the persisted JSON pairs string.
    pub fn encode(&self) -> FigResult<String> {
        Ok(serde_json::to_string(&self.pairs)?)
    }

    /// Replace the whole sequence with a fresh scan of the rendered fields.
    ///
    /// `fields` must be in tree order. An id seen twice keeps its first
    /// position and its last value.
    pub fn log<I, K, V>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = ConfigMap::default();
        for (k, v) in fields {
            map.insert(k.into(), v.into());
        }
        self.pairs = map.entries;
    }

    /// Value for `id` (last occurrence wins), or `None` when absent.
    pub fn fill(&self, id: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
    }

    /// Typed lookup through [`ConfigValue::from_wire`].
    pub fn typed(&self, id: &str, kind: FieldKind) -> Option<ConfigValue> {
        self.fill(id).map(|raw| ConfigValue::from_wire(kind, raw))
    }

    /// `true` when `id` is a checked checkbox.
    pub fn is_on(&self, id: &str) -> bool {
        self.fill(id) == Some(ConfigValue::ON)
    }

    /// Object view: one entry per id, first-appearance order, last value.
    pub fn to_map(&self) -> ConfigMap {
        let mut map = ConfigMap::default();
        for (k, v) in &self.pairs {
            map.insert(k.clone(), v.clone());
        }
        map
    }

    /// Raw pairs in stored order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn try_decode(persisted: &str) -> FigResult<ConfigStore> {
    let value: serde_json::Value = serde_json::from_str(persisted)?;
    let serde_json::Value::Array(items) = value else {
        return Err(FigError::config("top-level value is not an array of pairs"));
    };

    let mut pairs = Vec::with_capacity(items.len());
    for item in items {
        match item {
            serde_json::Value::Array(kv) if kv.len() >= 2 => {
                pairs.push((json_to_wire(&kv[0]), json_to_wire(&kv[1])));
            }
            other => tracing::warn!(entry = %other, "skipping malformed configuration entry"),
        }
    }
    Ok(ConfigStore { pairs })
}

/// String form of a JSON scalar as an input element would report it.
pub(crate) fn json_to_wire(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Insertion-ordered id -> value map with replace-in-place semantics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigMap {
    entries: Vec<(String, String)>,
}

impl ConfigMap {
    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    /// `true` when `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Overwrite in place, or append when `key` is new.
    pub fn insert(&mut self, key: String, value: String) {
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Back to an ordered store.
    pub fn into_store(self) -> ConfigStore {
        ConfigStore {
            pairs: self.entries,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (k, v) in iter {
            map.insert(k.into(), v.into());
        }
        map
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/store.rs"]
mod tests;
