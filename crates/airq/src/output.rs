use crate::prelude::*;
use airq_core::analyze::{Analysis, CorrelationMatrix};
use airq_core::pipeline::CycleReport;
use colored::Colorize;

/// Format a coefficient the way the console table shows it
pub fn format_coefficient(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => "NaN".to_string(),
    }
}

/// Correlation matrix as a console table, column names on both axes
pub fn matrix_table(matrix: &CorrelationMatrix) -> prettytable::Table {
    let mut table = new_table();

    let mut header = vec![prettytable::Cell::new("")];
    header.extend(matrix.columns.iter().map(|c| prettytable::Cell::new(c)));
    table.add_row(prettytable::Row::new(header));

    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut cells = vec![prettytable::Cell::new(name)];
        cells.extend(
            row.iter()
                .map(|v| prettytable::Cell::new(&format_coefficient(*v))),
        );
        table.add_row(prettytable::Row::new(cells));
    }

    table
}

/// Human-readable rendition of a fetch cycle
pub fn format_report_text(report: &CycleReport) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "AIR QUALITY CORRELATIONS (country {}, limit {})",
            report.country, report.limit
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "\n{}: {} | {}: {}\n",
        "Fetched".green(),
        report.fetched_rows.to_string().bright_white(),
        "Cleaned".green(),
        report.cleaned_rows.to_string().bright_white()
    ));

    for notice in &report.notices {
        result.push_str(&format!("{}\n", notice.yellow()));
    }

    match &report.analysis {
        Analysis::Correlations { matrix } => {
            result.push_str(&format!("\n{}\n", "Correlation matrix".bright_white().bold()));
            result.push_str(&matrix_table(matrix).to_string());
        }
        Analysis::NoResult { .. } => {
            result.push_str(&format!("\n{}\n", "No correlation result.".bright_black()));
        }
    }

    result
}

pub fn format_report_json(report: &CycleReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| eyre!("JSON serialization failed: {}", e))
}
