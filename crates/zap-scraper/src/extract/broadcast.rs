use scraper::Html;
use zap_core::{ChartRequest, Entry, Metric, NetworkAverage, NetworkAverages};

use crate::html::{cells, text_of, AVERAGE_CELL, NETWORK_NAME, ROW};

/// Rows at the bottom of the chart holding averages and notes.
const FOOTER_ROWS: usize = 3;

/// ABC, CBS, NBC, FOX and the CW.
const MAJOR_NETWORKS: usize = 5;

/// Cell texts of the rows between the header and the footer whose fourth
/// cell (viewers) is filled in.
pub(super) fn candidate_rows(document: &Html) -> Vec<Vec<String>> {
    let rows = document.select(&ROW).skip(1).map(cells).collect::<Vec<_>>();
    let body_len = rows.len().saturating_sub(FOOTER_ROWS);
    rows.into_iter()
        .take(body_len)
        .filter(|row| row.get(3).is_some_and(|viewers| !viewers.is_empty()))
        .collect()
}

/// Carries the time slot across rows, since a slot's time cell spans every
/// show in it.
#[derive(Debug, Default)]
pub(super) struct RowParser {
    current_time: String,
}

impl RowParser {
    /// Columns: time, `Show (NET)`, `rating/share`, viewers.
    pub(super) fn parse_row(
        &mut self,
        cells: &[String],
        request: &ChartRequest,
        date: &str,
    ) -> Option<Entry> {
        let [time, show_cell, rating_cell, viewers, ..] = cells else {
            tracing::warn!(cells = cells.len(), "skipping malformed broadcast row");
            return None;
        };

        if !time.is_empty() {
            self.current_time.clone_from(time);
        }

        let (show, network) = split_show_network(show_cell);
        if show.is_empty() || network.is_empty() || !request.accepts(show, network) {
            return None;
        }

        let (rating, share) = split_rating_share(rating_cell);
        Some(Entry {
            show: show.to_owned(),
            network: network.to_owned(),
            air_time: self.current_time.clone(),
            date: date.to_owned(),
            viewers: Metric::parse(viewers.trim_matches('*')),
            rating: Metric::parse(rating),
            share: Some(Metric::parse(share)),
        })
    }
}

/// `"Big Brother (CBS)"` → `("Big Brother", "CBS")`.
fn split_show_network(cell: &str) -> (&str, &str) {
    match cell.split_once('(') {
        Some((show, rest)) => {
            let network = rest.split_once(')').map_or(rest, |(network, _)| network);
            (show.trim_end(), network.trim())
        }
        None => (cell.trim(), ""),
    }
}

/// `"1.5/6*"` → `("1.5", "6")`. Asterisks are stripped from both ends of
/// the share. A cell without a slash keeps its text as the rating and leaves
/// the share empty.
fn split_rating_share(cell: &str) -> (&str, &str) {
    match cell.split_once('/') {
        Some((rating, share)) => (rating.trim(), share.trim().trim_matches('*')),
        None => (cell.trim(), ""),
    }
}

/// Reads the daily network averages block.
///
/// The block lists the network names in `td[width="77"]` cells, then five
/// `rating/share` cells followed by the viewer cells, all styled with a
/// `font` rule. The layout is taken as given: a page with a different
/// number of networks yields a partial map.
#[must_use]
pub fn network_averages(document: &Html) -> NetworkAverages {
    let networks = document.select(&NETWORK_NAME).map(text_of);
    let styled = document.select(&AVERAGE_CELL).map(text_of).collect::<Vec<_>>();

    let rate_shares = styled
        .iter()
        .take(MAJOR_NETWORKS)
        .filter(|text| !text.is_empty())
        .map(|text| split_rating_share(text));
    let viewers = styled
        .iter()
        .skip(MAJOR_NETWORKS)
        .filter(|text| !text.is_empty());

    networks
        .zip(rate_shares)
        .zip(viewers)
        .map(|((network, (rating, share)), viewers)| {
            (
                network,
                NetworkAverage {
                    viewers: Metric::parse(viewers),
                    rating: Metric::parse(rating),
                    share: Metric::parse(share),
                },
            )
        })
        .collect()
}
