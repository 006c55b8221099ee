use crate::prelude::{eprintln, *};
use airq_core::openaq::MeasurementsQuery;
use airq_core::pipeline::{run_pipeline, CycleReport};
use airq_core::plot::PlotSpec;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::openaq::fetch_measurements;
use crate::render::render_plot;

/// Something that can run one fetch cycle and draw its plot
///
/// The shell only talks to this trait, so its event loop can be driven
/// without a network.
pub trait CycleRunner {
    async fn run_fetch_cycle(&self, country: &str, limit: u32) -> Result<CycleReport>;

    fn render_plot(&self, plot: &PlotSpec) -> Result<PathBuf>;
}

/// Application object: configuration plus the HTTP client
#[derive(Debug, Clone)]
pub struct AirQualityApp {
    client: reqwest::Client,
    api_url: String,
    output: PathBuf,
    verbose: bool,
}

impl AirQualityApp {
    pub fn new(api_url: impl Into<String>, output: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            output: output.into(),
            verbose,
        }
    }

    pub fn from_global(global: &crate::Global) -> Self {
        Self::new(global.api_url.clone(), global.output.clone(), global.verbose)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    fn spinner(&self, query: &MeasurementsQuery) -> Option<ProgressBar> {
        if !std::io::stderr().is_terminal() {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!(
            "Fetching {} measurements for '{}'...",
            query.limit, query.country
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }
}

impl CycleRunner for AirQualityApp {
    /// Fetch, clean, analyze and lay out the plot for one country/limit pair
    ///
    /// Every call issues a fresh request.
    async fn run_fetch_cycle(&self, country: &str, limit: u32) -> Result<CycleReport> {
        let query = MeasurementsQuery::new(country, limit);

        if self.verbose {
            eprintln!("Measurements API: {}", self.api_url);
        }

        let spinner = self.spinner(&query);
        let body = fetch_measurements(&self.client, &self.api_url, &query).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let report = run_pipeline(&query, &body?).map_err(Error::from)?;
        log::info!(
            "fetched {} rows, kept {} after cleaning",
            report.fetched_rows,
            report.cleaned_rows
        );

        Ok(report)
    }

    fn render_plot(&self, plot: &PlotSpec) -> Result<PathBuf> {
        render_plot(plot, &self.output)
            .with_context(|| format!("Failed to render plot to {}", self.output.display()))?;
        Ok(self.output.clone())
    }
}
