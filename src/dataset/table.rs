use std::{cmp::Ordering, path::Path};

use serde::Serialize;

use crate::{
    config::value::parse_number,
    foundation::error::{FigError, FigResult},
};

/// One dataset value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric value (JSON numbers and numeric-looking strings).
    Number(f64),
    /// Any other non-blank text, typically a date.
    Text(String),
    /// `null`, `""` or `"NA"`. Serialized as `null`.
    Blank,
}

impl Cell {
    fn from_json(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Blank,
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Blank, Self::Number),
            serde_json::Value::String(s) => Self::from_text(s),
            serde_json::Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    fn from_text(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("na") {
            return Self::Blank;
        }
        match parse_number(t) {
            Some(v) => Self::Number(v),
            None => Self::Text(s.to_owned()),
        }
    }

    /// Numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// `true` for blanks.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Ordering used for axis extents: numbers before text, text compared
    /// lexically (ISO dates sort correctly). Blanks sort last.
    pub fn domain_cmp(&self, other: &Self) -> Ordering {
        fn rank(c: &Cell) -> u8 {
            match c {
                Cell::Number(_) => 0,
                Cell::Text(_) => 1,
                Cell::Blank => 2,
            }
        }
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

/// Named column of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column name as in the document.
    pub name: String,
    /// Row values.
    pub cells: Vec<Cell>,
}

/// Column-oriented table loaded wholesale; immutable during a compile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build from named columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Parse a dataset document.
    pub fn from_json_str(s: &str) -> FigResult<Self> {
        let v: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| FigError::dataset(format!("dataset is not valid JSON: {e}")))?;
        Self::from_value(&v)
    }

    /// Read and parse a dataset document from disk.
    pub fn from_path(path: &Path) -> FigResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| FigError::dataset(format!("read {}: {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    /// Interpret a parsed document: an object of column -> array, possibly
    /// wrapped in a `data` member (siblings such as `metadata` are ignored).
    pub fn from_value(v: &serde_json::Value) -> FigResult<Self> {
        let serde_json::Value::Object(obj) = v else {
            return Err(FigError::dataset("top-level value must be an object of columns"));
        };
        let obj = match obj.get("data") {
            Some(serde_json::Value::Object(inner)) => inner,
            _ => obj,
        };

        let mut columns = Vec::with_capacity(obj.len());
        for (name, values) in obj {
            let serde_json::Value::Array(items) = values else {
                return Err(FigError::dataset(format!("column '{name}' is not an array")));
            };
            columns.push(Column {
                name: name.clone(),
                cells: items.iter().map(Cell::from_json).collect(),
            });
        }
        Ok(Self { columns })
    }

    /// Column names in document order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Cells of column `name`.
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.cells.as_slice())
    }

    /// Numeric values of column `name` with blanks and text filtered out.
    pub fn numbers(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|cells| cells.iter().filter_map(Cell::as_f64).collect())
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Longest column length.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }
}

/// `(min, max)` of the non-blank cells, in [`Cell::domain_cmp`] order.
pub fn domain(cells: &[Cell]) -> Option<(&Cell, &Cell)> {
    let mut it = cells.iter().filter(|c| !c.is_blank());
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), c| {
        (
            if c.domain_cmp(lo) == Ordering::Less { c } else { lo },
            if c.domain_cmp(hi) == Ordering::Greater { c } else { hi },
        )
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/table.rs"]
mod tests;
