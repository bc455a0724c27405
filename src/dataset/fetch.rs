use std::time::Duration;

use anyhow::Context as _;

use crate::{
    dataset::table::Dataset,
    foundation::error::{FigError, FigResult},
};

/// Options for [`DatasetClient`].
#[derive(Clone, Debug)]
pub struct FetchOpts {
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for FetchOpts {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Single-shot dataset loader over HTTP. Nothing is cached.
#[derive(Clone, Debug)]
pub struct DatasetClient {
    http: reqwest::Client,
}

impl DatasetClient {
    /// Build a client with a bounded request timeout.
    pub fn new(opts: FetchOpts) -> FigResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(opts.timeout)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { http })
    }

    /// GET `url` and parse the body as a dataset document.
    ///
    /// Non-2xx responses and unparseable bodies are dataset errors.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> FigResult<Dataset> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to fetch dataset from {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FigError::dataset(format!("GET {url} returned {status}")));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| FigError::dataset(format!("dataset body from {url} is not JSON: {e}")))?;
        let ds = Dataset::from_value(&body)?;
        tracing::debug!(columns = ds.width(), rows = ds.row_count(), "dataset loaded");
        Ok(ds)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/fetch.rs"]
mod tests;
