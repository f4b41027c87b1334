use scraper::Html;
use zap_core::{ChartRequest, Entry, Metric};

use crate::html::{cells, ROW};

/// Cell texts of every row after the header.
pub(super) fn candidate_rows(document: &Html) -> Vec<Vec<String>> {
    document.select(&ROW).skip(1).map(cells).collect()
}

/// Columns: show, network, time, viewers, rating.
pub(super) fn parse_row(cells: &[String], request: &ChartRequest, date: &str) -> Option<Entry> {
    let [show, network, time, viewers, rating, ..] = cells else {
        tracing::warn!(cells = cells.len(), "skipping malformed cable row");
        return None;
    };
    if show.is_empty() || network.is_empty() || !request.accepts(show, network) {
        return None;
    }

    Some(Entry {
        show: show.clone(),
        network: network.clone(),
        air_time: time.clone(),
        date: date.to_owned(),
        viewers: Metric::parse(&cable_viewers(viewers)),
        rating: Metric::parse(rating),
        share: None,
    })
}

/// The cable chart prints viewers in thousands: `"1,234"` is 1.234 million
/// and `"987"` is 0.987 million.
fn cable_viewers(raw: &str) -> String {
    if raw.contains(',') {
        raw.replace(',', ".")
    } else {
        format!("0.{raw}")
    }
}
