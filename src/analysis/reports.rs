//! Report formatting for the fee distribution
//!
//! Supports Console, JSON and Plotly output formats. The Plotly document
//! is the primary output: the cumulative curve on a linear megabyte axis
//! against fee rate on a logarithmic axis.

use serde::Serialize;

use crate::analysis::fee_distribution::{FeeDistribution, VSIZE_BIN_WIDTH};
use crate::errors::{AppError, AppResult};
use crate::types::{PlotlyChart, PlotlyLayout, PlotlyTrace};
use crate::utils::currency::format_tapyrus_as_tpc;

/// Output format options for the distribution report
#[derive(Debug, Clone, Default)]
pub enum OutputFormat {
    Console,
    Json,
    #[default]
    Plotly,
}

/// Parse output format string to OutputFormat enum
pub fn parse_format(format_str: &str) -> OutputFormat {
    match format_str.to_lowercase().as_str() {
        "console" => OutputFormat::Console,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Plotly,
    }
}

/// Render a distribution in the requested format
pub fn format_distribution(
    distribution: &FeeDistribution,
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(distribution),
        OutputFormat::Plotly => export_json(&to_plotly_chart(distribution)),
        OutputFormat::Console => Ok(console_report(distribution)),
    }
}

/// Build the chart document handed to the Plotly sink
///
/// Values are already in final units: cumulative size in megabytes, rate
/// in tapyrus per vbyte. The sink only draws.
pub fn to_plotly_chart(distribution: &FeeDistribution) -> PlotlyChart {
    let trace = PlotlyTrace::line(
        distribution.cumulative_megabytes(),
        distribution.fee_rates(),
        "Fee rate",
        "#3498DB",
    )
    .with_hovertemplate("%{y:.2f} tapyrus/vbyte at %{x:.3f} MB<extra></extra>");

    PlotlyChart {
        data: vec![trace],
        layout: PlotlyLayout::semilog(
            &format!("{} transactions", distribution.len()),
            "Mempool size (MB)",
            "Fee rate (tapyrus/vbyte)",
        ),
    }
}

fn console_report(distribution: &FeeDistribution) -> String {
    let mut output = String::new();

    output.push_str("\n=== MEMPOOL FEE DISTRIBUTION ===\n\n");
    output.push_str(&format!(
        "{} transactions\n",
        format_number(distribution.len())
    ));
    if distribution.skipped_degenerate > 0 {
        output.push_str(&format!(
            "Skipped degenerate (zero-vsize) entries: {}\n",
            format_number(distribution.skipped_degenerate)
        ));
    }

    if distribution.is_empty() {
        output.push_str("Mempool is empty, nothing to report\n");
        return output;
    }

    let total_fees: u64 = distribution.entries.iter().map(|e| e.fee).sum();
    output.push_str(&format!(
        "Total vsize: {:.2} MB ({} vbytes)\n",
        distribution.total_vsize() as f64 / 1e6,
        format_number(distribution.total_vsize() as usize)
    ));
    output.push_str(&format!(
        "Total fees: {}\n",
        format_tapyrus_as_tpc(total_fees)
    ));

    let rates = distribution.fee_rates();
    output.push_str(&format!(
        "Fee rate (tapyrus/vbyte): max {:.2} / median {:.2} / min {:.2}\n\n",
        rates[0],
        rates[rates.len() / 2],
        rates[rates.len() - 1]
    ));

    output.push_str("FEE HISTOGRAM:\n");
    output.push_str(&format!(
        "  {:>18} │ {:>14} │\n",
        "Rate >= (tap/vB)", "Bin vsize"
    ));
    output.push_str("  ───────────────────┼────────────────┤\n");
    for (rate, vsize) in distribution.histogram(VSIZE_BIN_WIDTH) {
        output.push_str(&format!(
            "  {:>18.2} │ {:>14} │\n",
            rate,
            format_number(vsize as usize)
        ));
    }
    output.push('\n');

    output
}

/// Export data as JSON for programmatic use
fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
}

/// Format number with thousand separators for console output
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
