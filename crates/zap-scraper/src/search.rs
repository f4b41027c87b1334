//! Search-listing fallback for charts whose URL cannot be guessed.

use chrono::{Datelike, NaiveDate};
use scraper::{ElementRef, Html};
use zap_core::dates::{date_in_range, day_of_week, parse_date};
use zap_core::Category;

use crate::html::{first_text, BOOKMARK, CATEGORY_TAG, SEARCH_RESULT, TIME};

const DAILY_RATINGS_TAG: &str = "Daily Ratings";

/// A site search for one day's chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    pub category: Category,
    pub date: NaiveDate,
}

impl SearchQuery {
    #[must_use]
    pub fn new(category: Category, date: NaiveDate) -> Self {
        Self { category, date }
    }

    /// Listing URL, e.g.
    /// `{base}/?s=final+ratings+Tuesday&year=2017&monthnum=7&day&category=daily-ratings`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/?s={}+ratings+{}&year={}&monthnum={}&day&category=daily-ratings",
            base_url.trim_end_matches('/'),
            self.category.slug(),
            day_of_week(self.date),
            self.date.year(),
            self.date.month(),
        )
    }

    /// Link of the first listing entry that is tagged as daily ratings, was
    /// published within `window_days` of the requested date, and whose title
    /// agrees with the requested category on the word "cable".
    #[must_use]
    pub fn pick_result(&self, listing: &Html, window_days: i64) -> Option<String> {
        listing.select(&SEARCH_RESULT).find_map(|result| {
            let href = result
                .select(&BOOKMARK)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))?;
            self.accepts(result, window_days).then(|| href.to_owned())
        })
    }

    fn accepts(&self, result: ElementRef<'_>, window_days: i64) -> bool {
        let (Some(tag), Some(title), Some(published)) = (
            first_text(result, &CATEGORY_TAG),
            first_text(result, &BOOKMARK),
            first_text(result, &TIME),
        ) else {
            return false;
        };

        if tag != DAILY_RATINGS_TAG {
            return false;
        }

        let in_window = parse_date(&published)
            .is_ok_and(|published| date_in_range(self.date, published, window_days));
        if !in_window {
            return false;
        }

        title.to_lowercase().contains("cable") == self.category.is_cable()
    }
}
