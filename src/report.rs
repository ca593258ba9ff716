//! Rendered estimation tables.

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::models::mnl::{ConfidenceInterval, MleFit, ParameterSummary};

/// Rendered tables for an estimation report.
#[derive(Debug, Clone)]
pub struct EstimationTables {
    pub mle: String,
    pub posterior: String,
}

/// Render the MLE coefficient table.
#[must_use]
pub fn render_mle_table(
    fit: &MleFit,
    intervals: &[ConfidenceInterval],
    names: &[&str],
) -> String {
    let mut table = make_table(&["parameter", "estimate", "std error", "2.5%", "97.5%"]);
    for (index, name) in names.iter().enumerate() {
        table.add_row(vec![
            Cell::new(*name),
            Cell::new(format!("{:.4}", fit.beta[index])),
            Cell::new(format!("{:.4}", fit.std_errors[index])),
            Cell::new(format!("{:.4}", intervals[index].lower)),
            Cell::new(format!("{:.4}", intervals[index].upper)),
        ]);
    }
    table.to_string()
}

/// Render the posterior summary table.
#[must_use]
pub fn render_posterior_table(summaries: &[ParameterSummary], names: &[&str]) -> String {
    let mut table = make_table(&["parameter", "mean", "std", "2.5%", "97.5%"]);
    for (summary, name) in summaries.iter().zip(names.iter()) {
        table.add_row(vec![
            Cell::new(*name),
            Cell::new(format!("{:.4}", summary.mean)),
            Cell::new(format!("{:.4}", summary.std_dev)),
            Cell::new(format!("{:.4}", summary.q025)),
            Cell::new(format!("{:.4}", summary.q975)),
        ]);
    }
    table.to_string()
}

/// Render both estimation tables using `comfy_table`.
#[must_use]
pub fn render_estimation_tables(
    fit: &MleFit,
    intervals: &[ConfidenceInterval],
    summaries: &[ParameterSummary],
    names: &[&str],
) -> EstimationTables {
    EstimationTables {
        mle: render_mle_table(fit, intervals, names),
        posterior: render_posterior_table(summaries, names),
    }
}

fn make_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(*h)).collect::<Vec<_>>());
    table
}
