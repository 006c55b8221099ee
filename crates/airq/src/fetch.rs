use crate::prelude::{eprintln, print, println, *};
use airq_core::pipeline::parse_limit;
use colored::Colorize;

use crate::cycle::{AirQualityApp, CycleRunner};
use crate::output::{format_report_json, format_report_text};

#[derive(Debug, Clone, clap::Args)]
pub struct FetchOptions {
    /// Country code to query (e.g. US, IN, GB)
    #[arg(short, long, env = "AIRQ_COUNTRY")]
    pub country: String,

    /// Maximum number of measurements to request
    #[arg(short, long, env = "AIRQ_LIMIT", default_value = "100")]
    pub limit: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip rendering the scatter plot
    #[arg(long)]
    pub no_plot: bool,
}

/// One fetch cycle without the interactive form
pub async fn run(options: FetchOptions, global: crate::Global) -> Result<()> {
    let limit = parse_limit(&options.limit).map_err(Error::from)?;
    let app = AirQualityApp::from_global(&global);

    if global.verbose {
        eprintln!(
            "Fetching up to {} measurements for '{}'...",
            limit, options.country
        );
    }

    let report = app.run_fetch_cycle(&options.country, limit).await?;

    if options.json {
        println!("{}", format_report_json(&report)?);
    } else {
        print!("{}", format_report_text(&report));
    }

    if options.no_plot {
        return Ok(());
    }

    if let Some(plot) = &report.plot {
        let path = app.render_plot(plot)?;
        eprintln!(
            "{}: {}",
            "Plot written to".green(),
            path.display().to_string().cyan().underline()
        );
    }

    Ok(())
}
