//! Scraper for the daily TV ratings charts.
//!
//! [`RatingsClient::fetch_chart`] resolves the page for a category and date
//! (direct URL first, site search as fallback) and extracts its rows.

pub mod client;
pub mod error;
pub mod extract;
mod html;
pub mod page;
pub mod resolver;
mod retry;
pub mod search;

pub use client::RatingsClient;
pub use error::ScraperError;
pub use extract::{network_averages, ChartLayout};
pub use page::ResolvedPage;
pub use resolver::chart_url;
pub use search::SearchQuery;
