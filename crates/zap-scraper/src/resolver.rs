//! Page resolution: guess the chart URL, then fall back to site search.
//!
//! The site's URL scheme is inconsistent about month abbreviations and
//! posts some charts late, so resolution runs three attempts in order and
//! stops at the first page whose title carries the requested date.

use chrono::NaiveDate;
use scraper::Html;
use zap_core::dates::{day_of_week, normalize_month, render_date};
use zap_core::{Category, Chart, ChartRequest, NetworkAverages};

use crate::client::RatingsClient;
use crate::error::ScraperError;
use crate::page::ResolvedPage;
use crate::search::SearchQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// Direct URL with the month spelled short (`aug`) or long (`august`).
    Direct { shorten: bool },
    /// Scan the search listing for a matching post.
    Search,
}

const ATTEMPTS: [Attempt; 3] = [
    Attempt::Direct { shorten: true },
    Attempt::Direct { shorten: false },
    Attempt::Search,
];

/// Direct chart URL, e.g.
/// `{base}/daily-ratings/tuesday-final-ratings-july-25-2017/`.
///
/// Fast-affiliate charts put the category before the weekday
/// (`tv-ratings-tuesday-...`).
#[must_use]
pub fn chart_url(base_url: &str, category: Category, date: NaiveDate, shorten: bool) -> String {
    let day = day_of_week(date).to_lowercase();
    let slug = format!("{}-ratings", category.slug());
    let date_slug = normalize_month(&render_date(date), shorten, category.is_cable())
        .to_lowercase()
        .replace(' ', "-");

    let (first, second) = if category == Category::FastAffiliate {
        (slug, day)
    } else {
        (day, slug)
    };

    format!(
        "{}/daily-ratings/{first}-{second}-{date_slug}/",
        base_url.trim_end_matches('/')
    )
}

impl RatingsClient {
    /// Finds the ratings page for `category` on `date`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::PageNotFound`] when neither direct URL nor the
    ///   search listing yields a page titled with `date`.
    /// - Fetch faults ([`ScraperError::Http`], [`ScraperError::UnexpectedStatus`])
    ///   from the direct attempts or the search listing are propagated. A
    ///   matched search link that is malformed or cannot be fetched ends in
    ///   `PageNotFound`.
    pub async fn resolve(
        &self,
        category: Category,
        date: NaiveDate,
    ) -> Result<ResolvedPage, ScraperError> {
        for attempt in ATTEMPTS {
            tracing::debug!(?attempt, %category, %date, "resolving ratings page");
            let found = match attempt {
                Attempt::Direct { shorten } => self.try_direct(category, date, shorten).await?,
                Attempt::Search => self.try_search(category, date).await?,
            };
            if let Some(page) = found {
                tracing::info!(url = %page.url, ?attempt, "resolved ratings page");
                return Ok(page);
            }
        }

        Err(ScraperError::PageNotFound {
            category,
            date: render_date(date),
        })
    }

    /// Resolves the page for `request` and extracts its chart.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::resolve`].
    pub async fn fetch_chart(&self, request: &ChartRequest) -> Result<Chart, ScraperError> {
        let page = self.resolve(request.category, request.date).await?;
        let chart = page.chart(request);
        tracing::info!(entries = chart.len(), url = %chart.url, "extracted chart");
        Ok(chart)
    }

    /// Resolves a broadcast page and reads its network averages.
    ///
    /// # Errors
    ///
    /// [`ScraperError::AveragesUnavailable`] for cable, before any request is
    /// made; otherwise any error from [`Self::resolve`].
    pub async fn fetch_network_averages(
        &self,
        category: Category,
        date: NaiveDate,
    ) -> Result<NetworkAverages, ScraperError> {
        if category.is_cable() {
            return Err(ScraperError::AveragesUnavailable(category));
        }
        self.resolve(category, date).await?.network_averages()
    }

    async fn try_direct(
        &self,
        category: Category,
        date: NaiveDate,
        shorten: bool,
    ) -> Result<Option<ResolvedPage>, ScraperError> {
        let url = chart_url(&self.base_url, category, date, shorten);
        let Some(body) = self.fetch_page(&url).await? else {
            return Ok(None);
        };
        Ok(ResolvedPage::accept(category, date, url, &body))
    }

    async fn try_search(
        &self,
        category: Category,
        date: NaiveDate,
    ) -> Result<Option<ResolvedPage>, ScraperError> {
        let query = SearchQuery::new(category, date);
        let listing_url = query.url(&self.base_url);
        let Some(body) = self.fetch_page(&listing_url).await? else {
            tracing::debug!(url = %listing_url, "search listing not found");
            return Ok(None);
        };

        let href = {
            let listing = Html::parse_document(&body);
            query.pick_result(&listing, self.search_window_days)
        };
        let Some(href) = href else {
            tracing::debug!(url = %listing_url, "no search result matched");
            return Ok(None);
        };

        let url = match self.absolute_url(&href) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(href = %href, error = %err, "search result link is not a valid URL");
                return Ok(None);
            }
        };
        match self.fetch_page(&url).await {
            Ok(Some(body)) => Ok(ResolvedPage::accept(category, date, url, &body)),
            Ok(None) => Ok(None),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "search result could not be fetched");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn july_25() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 7, 25).unwrap()
    }

    #[test]
    fn final_url_puts_weekday_first() {
        assert_eq!(
            chart_url("http://ratings.test", Category::Final, july_25(), true),
            "http://ratings.test/daily-ratings/tuesday-final-ratings-july-25-2017/"
        );
    }

    #[test]
    fn fast_affiliate_url_puts_category_first() {
        assert_eq!(
            chart_url("http://ratings.test/", Category::FastAffiliate, july_25(), true),
            "http://ratings.test/daily-ratings/tv-ratings-tuesday-july-25-2017/"
        );
    }

    #[test]
    fn cable_url_uses_cable_slug() {
        assert_eq!(
            chart_url("http://ratings.test", Category::Cable, july_25(), false),
            "http://ratings.test/daily-ratings/tuesday-cable-ratings-july-25-2017/"
        );
    }

    #[test]
    fn month_spelling_follows_shorten_flag() {
        let date = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
        assert!(chart_url("http://r.test", Category::Final, date, true).ends_with("-aug-1-2017/"));
        assert!(
            chart_url("http://r.test", Category::Final, date, false).ends_with("-august-1-2017/")
        );
    }

    #[test]
    fn september_differs_between_cable_and_broadcast() {
        let date = NaiveDate::from_ymd_opt(2017, 9, 5).unwrap();
        assert!(chart_url("http://r.test", Category::Cable, date, true)
            .ends_with("-september-5-2017/"));
        assert!(chart_url("http://r.test", Category::Final, date, false)
            .ends_with("-sept-5-2017/"));
    }

    #[test]
    fn attempts_run_direct_before_search() {
        assert_eq!(ATTEMPTS[0], Attempt::Direct { shorten: true });
        assert_eq!(ATTEMPTS[1], Attempt::Direct { shorten: false });
        assert_eq!(ATTEMPTS[2], Attempt::Search);
    }
}
