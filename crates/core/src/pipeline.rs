//! The fetch → clean → analyze → plot pipeline, minus the network call

use serde::Serialize;
use serde_json::Value;

use crate::analyze::{analyze, Analysis};
use crate::clean::clean;
use crate::error::PipelineError;
use crate::openaq::{parse_measurements, MeasurementsQuery};
use crate::plot::{build_plot_spec, PlotSpec};

pub const NO_PLOT_NOTICE: &str = "No data available to plot.";

/// Everything one fetch cycle produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub country: String,
    pub limit: u32,
    pub fetched_rows: usize,
    pub cleaned_rows: usize,
    /// Informational messages, in the order the stages produced them
    pub notices: Vec<String>,
    pub analysis: Analysis,
    /// `None` when the cleaned table had no rows or lacked a plotted column
    pub plot: Option<PlotSpec>,
}

/// Parse a limit typed by the user
pub fn parse_limit(input: &str) -> Result<u32, PipelineError> {
    match input.trim().parse::<u32>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(PipelineError::InvalidLimit(input.trim().to_string())),
    }
}

/// Run every pure stage over a decoded response body
pub fn run_pipeline(query: &MeasurementsQuery, body: &Value) -> Result<CycleReport, PipelineError> {
    let mut notices = Vec::new();

    let fetched = parse_measurements(body)?;
    notices.extend(fetched.notice);
    let fetched_rows = fetched.table.len();

    let cleaned = clean(fetched.table)?;

    let analysis = analyze(&cleaned);
    if let Some(notice) = analysis.notice() {
        notices.push(notice.to_string());
    }

    // Plot-step schema errors drop only the plot.
    let plot = if cleaned.is_empty() {
        notices.push(NO_PLOT_NOTICE.to_string());
        None
    } else {
        match build_plot_spec(&cleaned) {
            Ok(spec) => {
                if spec.skipped_rows > 0 {
                    notices.push(format!(
                        "{} row(s) with a missing or non-scalar location or parameter were left out of the plot.",
                        spec.skipped_rows
                    ));
                }
                Some(spec)
            }
            Err(e) => {
                notices.push(format!("Plot skipped: {e}."));
                None
            }
        }
    };

    Ok(CycleReport {
        country: query.country.clone(),
        limit: query.limit,
        fetched_rows,
        cleaned_rows: cleaned.len(),
        notices,
        analysis,
        plot,
    })
}
