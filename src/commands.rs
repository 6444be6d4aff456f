//! Command handlers.
//!
//! Each handler performs one request/render cycle and returns the text to
//! print on stdout. Errors are left for `main` to report.

use crate::api::{JobBoardClient, ReferenceKind, SearchParams};
use crate::config::ConfigStore;
use crate::render::{self, Renderer};
use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// How results are shown: renderer plus whether a spinner may be drawn.
pub struct Output {
    renderer: Renderer,
    spinners: bool,
}

impl Output {
    pub fn new(renderer: Renderer, spinners: bool) -> Self {
        Self { renderer, spinners }
    }

    /// Spinner on stderr while a request is in flight. Hidden when stderr
    /// is not a terminal.
    fn spinner(&self, message: &str) -> ProgressBar {
        if !self.spinners {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&[
                    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
                ])
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Raw JSON when asked for it, the human view otherwise.
    fn present(
        &self,
        data: &Value,
        json: bool,
        view: impl FnOnce(&Renderer, &Value) -> String,
    ) -> Result<String> {
        if json {
            Ok(render::json(data)?)
        } else {
            Ok(view(&self.renderer, data))
        }
    }
}

/// Build an API client from the stored configuration.
pub fn connect(store: &ConfigStore) -> Result<JobBoardClient> {
    if !store.is_configured() {
        bail!("workbc is not configured. Run: workbc config --base-url <url>");
    }
    debug!("Reading config from {}", store.path().display());
    let client = JobBoardClient::from_config(&store.get())?;
    debug!("Using API at {}", client.base_url());
    Ok(client)
}

/// `config [--base-url <url>] [--show]`
pub fn config(
    store: &ConfigStore,
    out: &Output,
    base_url: Option<String>,
    show: bool,
) -> Result<String> {
    if show {
        return Ok(serde_json::to_string_pretty(&store.get())?);
    }

    match base_url {
        Some(url) => {
            store.set("baseUrl", &url)?;
            Ok(out.renderer.success(&format!("Base URL set to: {}", url)))
        }
        None => Ok(String::new()),
    }
}

/// `search [filters] [--json]`
pub async fn search(
    client: &JobBoardClient,
    out: &Output,
    params: SearchParams,
    json: bool,
) -> Result<String> {
    debug!("Searching with {:?}", params);
    let spinner = out.spinner("Searching jobs...");
    let result = client.search_jobs(&params).await;
    spinner.finish_and_clear();

    let data = result?;
    out.present(&data, json, |r, d| r.job_search(d))
}

/// `job <id> [--json]`
pub async fn job(client: &JobBoardClient, out: &Output, id: &str, json: bool) -> Result<String> {
    let spinner = out.spinner("Fetching job details...");
    let result = client.get_job(id).await;
    spinner.finish_and_clear();

    let data = result?;
    out.present(&data, json, |r, d| r.job_detail(d))
}

/// `types | industries | regions [--json]`
pub async fn reference(
    client: &JobBoardClient,
    out: &Output,
    kind: ReferenceKind,
    json: bool,
) -> Result<String> {
    let spinner = out.spinner(&format!("Fetching {}...", render::noun(kind)));
    let result = client.get_reference(kind).await;
    spinner.finish_and_clear();

    let data = result?;
    out.present(&data, json, |r, d| r.reference_list(kind, d))
}
