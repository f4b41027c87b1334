use thiserror::Error;
use zap_core::{Category, CoreError};

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Neither direct URL nor the search fallback produced a page for the
    /// requested chart.
    #[error("no {category} ratings page found for {date}")]
    PageNotFound { category: Category, date: String },

    #[error("network averages are only published on broadcast charts, not {0}")]
    AveragesUnavailable(Category),

    #[error(transparent)]
    Core(#[from] CoreError),
}
