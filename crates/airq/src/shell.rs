use crate::prelude::{eprintln, *};
use airq_core::pipeline::{parse_limit, CycleReport};
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::cycle::{AirQualityApp, CycleRunner};
use crate::output::{format_report_json, format_report_text};

pub const WINDOW_TITLE: &str = "Air Quality Data Analysis";
pub const COUNTRY_PROMPT: &str = "Country Code: ";
pub const LIMIT_PROMPT: &str = "Limit: ";

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShellOptions {
    /// Print each cycle's report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Skip rendering the scatter plot
    #[arg(long)]
    pub no_plot: bool,
}

/// Where the event loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    Fetching,
    Closed,
}

/// Interactive form: two inputs and a fetch trigger, one cycle at a time
pub struct Shell<R, W> {
    reader: R,
    writer: W,
    options: ShellOptions,
    state: ShellState,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, options: ShellOptions) -> Self {
        Self {
            reader,
            writer,
            options,
            state: ShellState::Idle,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Prompt and read one line; `None` once input is exhausted
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.write(&prompt.bright_white().bold().to_string()).await?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Run until input ends or the user quits; returns the number of completed cycles
    pub async fn run<C: CycleRunner>(&mut self, runner: &C) -> Result<usize> {
        self.write(&format!("{}\n", "=".repeat(80).bright_cyan()))
            .await?;
        self.write(&format!("{}\n", WINDOW_TITLE.bright_cyan().bold()))
            .await?;
        self.write(&format!(
            "{}\n",
            "Enter a country code and a limit to fetch data; 'quit' or Ctrl-D closes.".bright_black()
        ))
        .await?;
        self.write(&format!("{}\n", "=".repeat(80).bright_cyan()))
            .await?;

        let mut completed = 0;
        loop {
            self.state = ShellState::Idle;

            let Some(country) = self.ask(COUNTRY_PROMPT).await? else {
                break;
            };
            if matches!(country.as_str(), "quit" | "exit") {
                break;
            }

            let Some(limit_input) = self.ask(LIMIT_PROMPT).await? else {
                break;
            };

            let limit = match parse_limit(&limit_input) {
                Ok(limit) => limit,
                Err(e) => {
                    self.write(&format!("{} {}\n", "Error:".red().bold(), e)).await?;
                    continue;
                }
            };

            self.state = ShellState::Fetching;
            log::debug!("fetch cycle: country={} limit={}", country, limit);

            match runner.run_fetch_cycle(&country, limit).await {
                Ok(report) => {
                    self.present(&report, runner).await?;
                    completed += 1;
                }
                Err(e) => {
                    log::warn!("fetch cycle failed: {e}");
                    self.write(&format!("{} {}\n", "Error:".red().bold(), e)).await?;
                }
            }
        }

        self.state = ShellState::Closed;
        self.write("\n").await?;
        Ok(completed)
    }

    async fn present<C: CycleRunner>(&mut self, report: &CycleReport, runner: &C) -> Result<()> {
        if self.options.json {
            let json = format_report_json(report)?;
            self.write(&format!("{json}\n")).await?;
        } else {
            self.write(&format_report_text(report)).await?;
        }

        if self.options.no_plot {
            return Ok(());
        }

        if let Some(plot) = &report.plot {
            match runner.render_plot(plot) {
                Ok(path) => {
                    self.write(&format!(
                        "{}: {}\n",
                        "Plot written to".green(),
                        path.display().to_string().cyan().underline()
                    ))
                    .await?;
                }
                Err(e) => {
                    self.write(&format!("{} {:#}\n", "Error:".red().bold(), e))
                        .await?;
                }
            }
        }

        Ok(())
    }
}

pub async fn run(options: ShellOptions, global: crate::Global) -> Result<()> {
    let app = AirQualityApp::from_global(&global);

    if global.verbose {
        eprintln!("Measurements API: {}", app.api_url());
        eprintln!("Plot output: {}", app.output().display());
        eprintln!();
    }

    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(reader, tokio::io::stdout(), options);
    let completed = shell.run(&app).await?;

    log::info!("shell closed after {} fetch cycle(s)", completed);
    Ok(())
}
