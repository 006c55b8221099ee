#![allow(async_fn_in_trait)]

use crate::prelude::*;
use clap::Parser;

mod cycle;
mod error;
mod fetch;
mod openaq;
mod output;
mod prelude;
mod render;
mod shell;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetch OpenAQ measurements, print their correlations and plot them"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Measurements endpoint
    #[clap(
        long,
        env = "AIRQ_API_URL",
        global = true,
        default_value = airq_core::openaq::DEFAULT_API_URL
    )]
    api_url: String,

    /// Where the scatter plot SVG is written (overwritten on every fetch)
    #[clap(
        long,
        env = "AIRQ_OUTPUT",
        global = true,
        default_value = "air_quality_scatter.svg"
    )]
    output: std::path::PathBuf,

    /// Whether to display additional information.
    #[clap(long, env = "AIRQ_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Interactive form: enter a country code and a limit, fetch, repeat
    Shell(crate::shell::ShellOptions),

    /// Run a single fetch cycle
    Fetch(crate::fetch::FetchOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Shell(options) => crate::shell::run(options, app.global).await,
        SubCommands::Fetch(options) => crate::fetch::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
