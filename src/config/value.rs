use crate::schema::field::FieldKind;

/// Typed view of one persisted field value.
///
/// The wire format stays a plain string per field; this type exists only at
/// the store boundary so callers stop comparing against `"on"` by hand.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// Checkbox state. Persisted as `"on"` / `""`.
    Flag(bool),
    /// Numeric input. Persisted as decimal text; `None` when blank.
    Number(Option<f64>),
    /// Any other input (select, text, color, date).
    Text(String),
}

impl ConfigValue {
    /// Wire string for a checked checkbox.
    pub const ON: &'static str = "on";

    /// Interpret a persisted string according to the field kind it belongs to.
    pub fn from_wire(kind: FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Checkbox => Self::Flag(raw == Self::ON),
            FieldKind::Number => Self::Number(parse_number(raw)),
            FieldKind::Select | FieldKind::Color | FieldKind::Date | FieldKind::Text => {
                Self::Text(raw.to_owned())
            }
        }
    }

    /// Encode back to the persisted string form.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Flag(true) => Self::ON.to_owned(),
            Self::Flag(false) => String::new(),
            Self::Number(Some(v)) => format_number(*v),
            Self::Number(None) => String::new(),
            Self::Text(s) => s.clone(),
        }
    }

    /// `true` only for a set flag.
    pub fn is_on(&self) -> bool {
        matches!(self, Self::Flag(true))
    }
}

/// Lenient decimal parse; blank and non-finite input is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decimal text without a trailing `.0` for integral values.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/value.rs"]
mod tests;
