//! A fetched ratings page and the checks that decide whether it is the
//! chart that was asked for.

use chrono::NaiveDate;
use scraper::Html;
use zap_core::dates::{render_date, strip_punctuation};
use zap_core::{Category, Chart, ChartRequest, NetworkAverages};

use crate::error::ScraperError;
use crate::extract::ChartLayout;
use crate::html::{strings, BOLD, STRONG};

/// A parsed ratings page for one category and date.
///
/// Owns the document for the lifetime of one resolution; the chart and the
/// network averages are both read from it on demand.
#[derive(Debug)]
pub struct ResolvedPage {
    pub category: Category,
    pub date: NaiveDate,
    pub url: String,
    document: Html,
}

impl ResolvedPage {
    /// Parses `body` without checking that it is the requested chart.
    #[must_use]
    pub fn parse(category: Category, date: NaiveDate, url: String, body: &str) -> Self {
        Self {
            category,
            date,
            url,
            document: Html::parse_document(body),
        }
    }

    /// Parses `body` and keeps it only if its title carries `date`.
    pub(crate) fn accept(
        category: Category,
        date: NaiveDate,
        url: String,
        body: &str,
    ) -> Option<Self> {
        let page = Self::parse(category, date, url, body);
        if page.matches_date() {
            Some(page)
        } else {
            tracing::debug!(url = %page.url, title = %page.title(), "page title does not match requested date");
            None
        }
    }

    #[must_use]
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// The chart heading: the first `<strong>` on cable pages; on broadcast
    /// pages the `<b>` strings joined, or only the first when the last one
    /// is the "Fast" affiliate note.
    #[must_use]
    pub fn title(&self) -> String {
        if self.category.is_cable() {
            return strings(&self.document, &STRONG)
                .into_iter()
                .next()
                .unwrap_or_default();
        }

        let bold = strings(&self.document, &BOLD);
        match (bold.first(), bold.last()) {
            (Some(first), Some(last)) if last.contains("Fast") => first.clone(),
            _ => bold.concat(),
        }
    }

    /// Whether the title mentions the requested date.
    #[must_use]
    pub fn matches_date(&self) -> bool {
        title_matches_date(&self.title(), self.date)
    }

    /// Extracts the chart rows selected by `request`.
    #[must_use]
    pub fn chart(&self, request: &ChartRequest) -> Chart {
        let entries = ChartLayout::for_category(self.category).extract(&self.document, request);
        Chart::new(self.category, self.date, self.url.clone(), entries)
    }

    /// Daily averages for the five broadcast networks.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::AveragesUnavailable`] on a cable page.
    pub fn network_averages(&self) -> Result<NetworkAverages, ScraperError> {
        ChartLayout::for_category(self.category)
            .network_averages(&self.document)
            .ok_or(ScraperError::AveragesUnavailable(self.category))
    }
}

/// Every token of the requested date, month cut to three letters, must
/// appear somewhere in the title. Short tokens can match by coincidence
/// (`"2"` inside `"2017"`).
pub(crate) fn title_matches_date(title: &str, date: NaiveDate) -> bool {
    let title = strip_punctuation(title).to_lowercase();
    render_date(date)
        .to_lowercase()
        .split_whitespace()
        .enumerate()
        .all(|(idx, token)| {
            let token = if idx == 0 {
                token.get(..3).unwrap_or(token)
            } else {
                token
            };
            title.contains(token)
        })
}
