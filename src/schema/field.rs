use serde::{Deserialize, Serialize};

use crate::{
    config::value::{ConfigValue, parse_number},
    foundation::{
        color::Color,
        error::{FigError, FigResult},
    },
};

/// Input kind of a field; decides how its string value is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Closed set of options.
    Select,
    /// Boolean, persisted as `"on"` / `""`.
    Checkbox,
    /// `#RRGGBB` color.
    Color,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Free text.
    Text,
    /// Decimal number, may be blank.
    Number,
}

/// One choice of a select field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Persisted value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl SelectOption {
    /// Option whose label differs from its value.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option labelled with its own value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Declarative description of one input. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSchema {
    /// Persisted id.
    pub id: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Display label.
    pub label: String,
    /// Choices for selects; empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Value used when nothing (or an empty string) was saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSchema {
    fn new(id: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            options: Vec::new(),
            default: None,
        }
    }

    /// Free-text input.
    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Text, label)
    }

    /// Number input.
    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Number, label)
    }

    /// Checkbox, unchecked by default.
    pub fn checkbox(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Checkbox, label)
    }

    /// Date input.
    pub fn date(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Date, label)
    }

    /// Color input; an untouched color input reports black.
    pub fn color(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Color, label).with_default(Color::BLACK.to_hex())
    }

    /// Select input; defaults to its first option unless overridden.
    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        let default = options.first().map(|o| o.value.clone());
        Self {
            options,
            default,
            ..Self::new(id, FieldKind::Select, label)
        }
    }

    /// Replace the default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Check that `value` is acceptable for this input.
    pub fn accepts(&self, value: &str) -> FigResult<()> {
        let ok = match self.kind {
            FieldKind::Checkbox => value.is_empty() || value == ConfigValue::ON,
            FieldKind::Number => value.trim().is_empty() || parse_number(value).is_some(),
            FieldKind::Color => Color::parse_hex(value).is_ok(),
            FieldKind::Select => self.options.iter().any(|o| o.value == value),
            FieldKind::Date | FieldKind::Text => true,
        };
        if ok {
            Ok(())
        } else {
            Err(FigError::validation(format!(
                "value {value:?} is not valid for {:?} field '{}'",
                self.kind, self.id
            )))
        }
    }
}

/// A field together with its current value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    /// Static description.
    #[serde(flatten)]
    pub schema: FieldSchema,
    /// Current persisted-form value.
    pub value: String,
}

impl Field {
    /// Persisted id.
    pub fn id(&self) -> &str {
        &self.schema.id
    }

    /// Typed view of the current value.
    pub fn typed(&self) -> ConfigValue {
        ConfigValue::from_wire(self.schema.kind, &self.value)
    }
}

/// Visibility rule attached to a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum Condition {
    /// Visible while the checkbox `id` is checked.
    Checked {
        /// Checkbox field id.
        id: String,
    },
    /// Visible while field `id` holds exactly `value`.
    Equals {
        /// Field id.
        id: String,
        /// Required value.
        value: String,
    },
}

/// Role of a block in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum BlockKind {
    /// Axis titles, bounds, toggles and counts.
    Global,
    /// Evaluation period or event marker group.
    Overlay,
    /// One event marker sub-block.
    EventMarker {
        /// Zero-based marker index.
        index: u32,
    },
    /// X-axis column chooser.
    XAxis,
    /// One data line.
    Line {
        /// One-based line index.
        index: u32,
    },
    /// Dependent inputs shown or hidden by a condition.
    Detail,
}

/// Group of nodes sharing a visibility rule.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    /// Stable block id (not persisted).
    pub id: String,
    /// Display label.
    pub label: String,
    /// Role of the block.
    pub kind: BlockKind,
    /// Rule gating visibility; `None` means always visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Condition>,
    /// Child nodes in render order.
    pub children: Vec<Node>,
}

impl Block {
    /// Always-visible block.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            visible_when: None,
            children: Vec::new(),
        }
    }

    /// Detail block visible under `cond`.
    pub fn detail(id: impl Into<String>, cond: Condition) -> Self {
        Self {
            visible_when: Some(cond),
            ..Self::new(id, "", BlockKind::Detail)
        }
    }
}

/// Tree node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Leaf input.
    Field(Field),
    /// Nested group.
    Block(Block),
}

/// Rendered field tree; the render-agnostic stand-in for the editor form.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FieldTree {
    /// Top-level blocks in render order.
    pub roots: Vec<Block>,
}

impl FieldTree {
    /// All fields in render order, hidden ones included.
    pub fn fields(&self) -> Vec<&Field> {
        let mut out = Vec::new();
        for block in &self.roots {
            collect_fields(block, &mut out);
        }
        out
    }

    /// `(id, value)` pairs in render order, ready for `ConfigStore::log`.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.fields()
            .into_iter()
            .map(|f| (f.schema.id.clone(), f.value.clone()))
            .collect()
    }

    /// Field by id.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields().into_iter().find(|f| f.schema.id == id)
    }

    /// Current value of field `id`.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.field(id).map(|f| f.value.as_str())
    }

    /// Set a field value after validating it against the field schema.
    pub fn set(&mut self, id: &str, value: &str) -> FigResult<()> {
        let field = self
            .roots
            .iter_mut()
            .find_map(|b| find_field_mut(b, id))
            .ok_or_else(|| FigError::validation(format!("unknown field id '{id}'")))?;
        field.schema.accepts(value)?;
        field.value = value.to_owned();
        Ok(())
    }

    /// Fields whose enclosing blocks are all visible, in render order.
    pub fn visible_fields(&self) -> Vec<&Field> {
        let mut out = Vec::new();
        for block in &self.roots {
            self.collect_visible(block, &mut out);
        }
        out
    }

    /// `true` when field `id` exists and every enclosing block is visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible_fields().iter().any(|f| f.schema.id == id)
    }

    /// Blocks of the given kind anywhere in the tree.
    pub fn blocks(&self, pred: impl Fn(&BlockKind) -> bool) -> Vec<&Block> {
        let mut out = Vec::new();
        for block in &self.roots {
            collect_blocks(block, &pred, &mut out);
        }
        out
    }

    /// Number of per-line blocks.
    pub fn line_block_count(&self) -> usize {
        self.blocks(|k| matches!(k, BlockKind::Line { .. })).len()
    }

    /// Number of event marker sub-blocks.
    pub fn marker_block_count(&self) -> usize {
        self.blocks(|k| matches!(k, BlockKind::EventMarker { .. })).len()
    }

    fn condition_holds(&self, cond: &Condition) -> bool {
        match cond {
            Condition::Checked { id } => self.value(id) == Some(ConfigValue::ON),
            Condition::Equals { id, value } => self.value(id) == Some(value.as_str()),
        }
    }

    fn collect_visible<'a>(&'a self, block: &'a Block, out: &mut Vec<&'a Field>) {
        if let Some(cond) = &block.visible_when
            && !self.condition_holds(cond)
        {
            return;
        }
        for child in &block.children {
            match child {
                Node::Field(f) => out.push(f),
                Node::Block(b) => self.collect_visible(b, out),
            }
        }
    }
}

fn collect_fields<'a>(block: &'a Block, out: &mut Vec<&'a Field>) {
    for child in &block.children {
        match child {
            Node::Field(f) => out.push(f),
            Node::Block(b) => collect_fields(b, out),
        }
    }
}

fn collect_blocks<'a>(block: &'a Block, pred: &impl Fn(&BlockKind) -> bool, out: &mut Vec<&'a Block>) {
    if pred(&block.kind) {
        out.push(block);
    }
    for child in &block.children {
        if let Node::Block(b) = child {
            collect_blocks(b, pred, out);
        }
    }
}

fn find_field_mut<'a>(block: &'a mut Block, id: &str) -> Option<&'a mut Field> {
    for child in &mut block.children {
        match child {
            Node::Field(f) if f.schema.id == id => return Some(f),
            Node::Field(_) => {}
            Node::Block(b) => {
                if let Some(f) = find_field_mut(b, id) {
                    return Some(f);
                }
            }
        }
    }
    None
}
