//! Turning command-line arguments into a chart request and a chart into
//! printable output.

use std::fmt::Write as _;

use zap_core::{Chart, ChartRequest, NetworkAverages, QueryFilter};

use crate::Cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Builds the chart request. Repeated `--show`/`--network` values become
/// alternatives of one filter; no values means no filter.
pub(crate) fn build_request(cli: &Cli) -> ChartRequest {
    let mut request = match cli.date {
        Some(date) => ChartRequest::new(cli.category, date),
        None => ChartRequest::yesterday(cli.category),
    };
    if !cli.show.is_empty() {
        request = request.with_show(QueryFilter::new(cli.show.iter().cloned()));
    }
    if !cli.network.is_empty() {
        request = request.with_network(QueryFilter::new(cli.network.iter().cloned()));
    }
    if let Some(limit) = cli.limit {
        request = request.with_limit(limit);
    }
    request
}

pub(crate) fn render(
    chart: &Chart,
    averages: Option<&NetworkAverages>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let value = match averages {
                Some(averages) => serde_json::json!({ "chart": chart, "averages": averages }),
                None => serde_json::to_value(chart)?,
            };
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Text => {
            let mut out = chart.to_string();
            if let Some(averages) = averages {
                out.push_str("\n\n");
                out.push_str(&render_averages(averages)?);
            }
            Ok(out)
        }
    }
}

fn render_averages(averages: &NetworkAverages) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Network Averages")?;
    writeln!(
        out,
        "|{:<7}|{:<7}|{:<7}|{:<7}|",
        "Network", "Viewers", "Rating", "Share"
    )?;
    write!(out, "+{}+", "-".repeat(31))?;
    for (network, average) in averages {
        write!(
            out,
            "\n|{:<7}|{:>7}|{:>7}|{:>7}|",
            network, average.viewers, average.rating, average.share
        )?;
    }
    Ok(out)
}
