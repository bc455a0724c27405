use std::collections::BTreeMap;

use crate::{compile::trace::TraceSet, foundation::error::FigResult};

/// Seam to the external charting library.
///
/// Contract: `plot` adds to whatever the target already shows; callers
/// `purge` first when replacing a figure.
pub trait RenderAdapter: Send {
    /// Discard everything rendered into `target`.
    fn purge(&mut self, target: &str);
    /// Draw `set` into `target`.
    fn plot(&mut self, target: &str, set: &TraceSet) -> FigResult<()>;
}

/// Adapter that records plots per target, for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryAdapter {
    targets: BTreeMap<String, Vec<TraceSet>>,
    purges: usize,
}

impl InMemoryAdapter {
    /// Create an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace sets currently drawn into `target`, oldest first.
    pub fn plotted(&self, target: &str) -> &[TraceSet] {
        self.targets
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total trace count currently drawn into `target`.
    pub fn trace_count(&self, target: &str) -> usize {
        self.plotted(target).iter().map(|s| s.data.len()).sum()
    }

    /// Number of purge calls seen.
    pub fn purges(&self) -> usize {
        self.purges
    }
}

impl RenderAdapter for InMemoryAdapter {
    fn purge(&mut self, target: &str) {
        self.targets.remove(target);
        self.purges += 1;
    }

    fn plot(&mut self, target: &str, set: &TraceSet) -> FigResult<()> {
        self.targets
            .entry(target.to_owned())
            .or_default()
            .push(set.clone());
        Ok(())
    }
}
