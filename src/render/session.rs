use std::time::Duration;

use crate::{
    compile::{
        assembler::{AssembleOpts, assemble},
        trace::TraceSet,
    },
    config::store::ConfigStore,
    dataset::{fetch::DatasetClient, table::Dataset},
    figure::spec::FigureSpec,
    foundation::{
        color::Color,
        error::{FigError, FigResult},
    },
    render::{adapter::RenderAdapter, readiness::Readiness},
};

/// Wait budgets and compile knobs for a [`PreviewSession`].
#[derive(Clone, Debug)]
pub struct PreviewOpts {
    /// How long to wait for the charting library.
    pub library_timeout: Duration,
    /// How long to wait for each render target.
    pub target_timeout: Duration,
    /// Assembler options; the overlay color is taken from the context.
    pub assemble: AssembleOpts,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            library_timeout: Duration::from_millis(1000),
            target_timeout: Duration::from_millis(1000),
            assemble: AssembleOpts::default(),
        }
    }
}

/// Per-session preview state, threaded explicitly through every render.
#[derive(Clone, Debug)]
pub struct PreviewContext {
    /// `true` until the first figure has been drawn; the first render
    /// skips the purge.
    pub first_load: bool,
    /// Fill used for evaluation periods without a configured color.
    pub overlay_color: Color,
}

impl Default for PreviewContext {
    fn default() -> Self {
        Self {
            first_load: true,
            overlay_color: AssembleOpts::default().overlay_color,
        }
    }
}

/// Where a figure's dataset comes from.
#[derive(Clone, Debug)]
pub enum DataSource {
    /// Already loaded.
    Loaded(Dataset),
    /// Fetched once per render through the session's [`DatasetClient`].
    Url(String),
}

/// One figure to render.
#[derive(Clone, Debug)]
pub struct FigureJob {
    /// Target the figure is drawn into, resolving to its id.
    pub target: Readiness<String>,
    /// Stored figure configuration.
    pub config: ConfigStore,
    /// Dataset source.
    pub data: DataSource,
}

/// Drives compile-and-plot for figures in a page or editor preview.
pub struct PreviewSession<A: RenderAdapter> {
    adapter: A,
    library: Readiness<()>,
    client: Option<DatasetClient>,
    ctx: PreviewContext,
    opts: PreviewOpts,
}

impl<A: RenderAdapter> PreviewSession<A> {
    /// New session drawing through `adapter` once `library` is ready.
    pub fn new(adapter: A, library: Readiness<()>, opts: PreviewOpts) -> Self {
        Self {
            adapter,
            library,
            client: None,
            ctx: PreviewContext::default(),
            opts,
        }
    }

    /// Enable [`DataSource::Url`] jobs.
    pub fn with_client(mut self, client: DatasetClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Current context.
    pub fn context(&self) -> &PreviewContext {
        &self.ctx
    }

    /// Mutable context, e.g. to change the overlay color.
    pub fn context_mut(&mut self) -> &mut PreviewContext {
        &mut self.ctx
    }

    /// The adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Render one figure, replacing anything already drawn in its target.
    ///
    /// The target is purged before plotting, except on the session's first
    /// load when nothing can have been drawn yet.
    #[tracing::instrument(skip_all, fields(awaited = ?job.target.awaited()))]
    pub async fn render_figure(&mut self, job: &FigureJob) -> FigResult<TraceSet> {
        self.library.wait(self.opts.library_timeout).await?;

        let fetched;
        let data = match &job.data {
            DataSource::Loaded(ds) => ds,
            DataSource::Url(url) => {
                let client = self
                    .client
                    .as_ref()
                    .ok_or_else(|| FigError::dataset("no dataset client configured"))?;
                fetched = client.fetch(url).await?;
                &fetched
            }
        };

        let target = job.target.wait(self.opts.target_timeout).await?;

        let spec = FigureSpec::from_config(&job.config)?;
        let opts = AssembleOpts {
            overlay_color: self.ctx.overlay_color,
            ..self.opts.assemble.clone()
        };
        let set = assemble(&spec, data, &opts)?;

        // nothing has been drawn before the first load
        if self.ctx.first_load {
            tracing::debug!(figure_target = %target, "first figure; skipping purge");
        } else {
            self.adapter.purge(&target);
        }
        self.adapter.plot(&target, &set)?;
        self.ctx.first_load = false;
        Ok(set)
    }

    /// Render several figures in order. A failure is logged and only
    /// affects its own figure.
    pub async fn render_all(&mut self, jobs: &[FigureJob]) -> Vec<FigResult<TraceSet>> {
        let mut out = Vec::with_capacity(jobs.len());
        for (i, job) in jobs.iter().enumerate() {
            let res = self.render_figure(job).await;
            if let Err(err) = &res {
                tracing::error!(figure = i, awaited = ?job.target.awaited(), %err, "figure failed to render");
            }
            out.push(res);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
