//! Table extraction for the two chart layouts.
//!
//! Both layouts share one loop: walk candidate rows in document order, stop
//! once the request's limit is reached, and turn each row into at most one
//! [`Entry`]. Rows that fail the show/network filter or lack required cells
//! are skipped, never fatal.

mod broadcast;
mod cable;

use scraper::Html;
use zap_core::dates::render_date;
use zap_core::{Category, ChartRequest, Entry, NetworkAverages};

pub use broadcast::network_averages;

/// Row layout of a chart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLayout {
    /// One row per show: show, network, time, viewers, rating.
    Cable,
    /// Time cells merged across a slot, `Show (NET)` cells, a combined
    /// `rating/share` cell and a footer block.
    Broadcast,
}

impl ChartLayout {
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        if category.is_cable() {
            ChartLayout::Cable
        } else {
            ChartLayout::Broadcast
        }
    }

    /// Extracts the entries of `document` that satisfy `request`.
    #[must_use]
    pub fn extract(self, document: &Html, request: &ChartRequest) -> Vec<Entry> {
        let date = render_date(request.date);
        match self {
            ChartLayout::Cable => {
                collect_entries(cable::candidate_rows(document), request, |cells| {
                    cable::parse_row(cells, request, &date)
                })
            }
            ChartLayout::Broadcast => {
                let mut parser = broadcast::RowParser::default();
                collect_entries(broadcast::candidate_rows(document), request, |cells| {
                    parser.parse_row(cells, request, &date)
                })
            }
        }
    }

    /// Five-network daily averages; only broadcast pages carry them.
    #[must_use]
    pub fn network_averages(self, document: &Html) -> Option<NetworkAverages> {
        match self {
            ChartLayout::Cable => None,
            ChartLayout::Broadcast => Some(network_averages(document)),
        }
    }
}

fn collect_entries<I, P>(rows: I, request: &ChartRequest, mut parse: P) -> Vec<Entry>
where
    I: IntoIterator<Item = Vec<String>>,
    P: FnMut(&[String]) -> Option<Entry>,
{
    let mut entries = Vec::new();
    for row in rows {
        if request.limit_reached(entries.len()) {
            break;
        }
        if let Some(entry) = parse(&row) {
            entries.push(entry);
        }
    }
    entries
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
