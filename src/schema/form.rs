use crate::{
    config::{
        merge::merge,
        store::{ConfigMap, ConfigStore},
    },
    foundation::error::FigResult,
    schema::{
        field::{Field, FieldTree},
        generator::{generate_from_store, saved_line_count},
        ids::{self, line_attr},
    },
};

/// Render-agnostic editor session for one figure.
///
/// Every edit re-scans the whole field tree into the store (`log`). Count
/// changes rebuild the tree from every value seen since opening, so a line
/// or marker that is removed and added back gets its old values again.
#[derive(Clone, Debug)]
pub struct FigureForm {
    columns: Vec<String>,
    store: ConfigStore,
    retained: ConfigMap,
    tree: FieldTree,
}

impl FigureForm {
    /// Open the editor on a persisted string; malformed input starts empty.
    #[tracing::instrument(skip(persisted, columns), fields(columns = columns.len()))]
    pub fn open(persisted: &str, columns: Vec<String>) -> FigResult<Self> {
        Self::from_store(ConfigStore::decode(persisted), columns)
    }

    /// Open the editor on an already-decoded store.
    pub fn from_store(store: ConfigStore, columns: Vec<String>) -> FigResult<Self> {
        let tree = generate_from_store(&columns, &store)?;
        let retained = store.to_map();
        let mut form = Self {
            columns,
            store,
            retained,
            tree,
        };
        form.log();
        Ok(form)
    }

    /// Apply one edit event.
    ///
    /// Count selects rebuild the tree. Picking a column for a line whose
    /// title is empty copies the column name into the title.
    pub fn set_value(&mut self, id: &str, value: &str) -> FigResult<()> {
        self.tree.set(id, value)?;

        if ids::line_index(id).is_some()
            && id.trim_start_matches("Line").bytes().all(|b| b.is_ascii_digit())
            && value != ids::NONE_COLUMN
        {
            let title_id = format!("{id}{}", line_attr::TITLE);
            if self.tree.value(&title_id) == Some("") {
                self.tree.set(&title_id, value)?;
            }
        }

        self.log();
        if id == ids::NUMBER_OF_LINES || id == ids::EVENT_MARKER_COUNT {
            self.regenerate()?;
        }
        Ok(())
    }

    /// The explicit "apply styles to all lines" action.
    pub fn apply_defaults(&mut self, defaults: &ConfigMap) -> FigResult<()> {
        let lines = saved_line_count(&self.store);
        self.store = merge(&self.store, defaults, lines);
        self.retain_store();
        self.regenerate()
    }

    /// Fields currently shown after evaluating visibility rules.
    pub fn visible_fields(&self) -> Vec<&Field> {
        self.tree.visible_fields()
    }

    /// Current field tree.
    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }

    /// Current store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Dataset column names offered by column selects.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Persisted JSON pairs string.
    pub fn persisted(&self) -> FigResult<String> {
        self.store.encode()
    }

    fn regenerate(&mut self) -> FigResult<()> {
        let source = self.retained.clone().into_store();
        self.tree = generate_from_store(&self.columns, &source)?;
        self.log();
        tracing::debug!(
            lines = self.tree.line_block_count(),
            markers = self.tree.marker_block_count(),
            "regenerated field tree"
        );
        Ok(())
    }

    fn log(&mut self) {
        self.store.log(self.tree.entries());
        self.retain_store();
    }

    fn retain_store(&mut self) {
        for (k, v) in self.store.pairs() {
            self.retained.insert(k.clone(), v.clone());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/form.rs"]
mod tests;
