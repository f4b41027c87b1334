//! HTTP client for the ratings site.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use zap_core::AppConfig;

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

/// Fetches ratings pages and search listings.
///
/// A 404 is reported as `Ok(None)` rather than an error: the resolver treats
/// a missing page as "try the next URL". Network failures and 5xx
/// responses are retried with exponential backoff up to `max_retries`
/// additional attempts.
pub struct RatingsClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_secs: u64,
    pub(crate) search_window_days: i64,
}

impl RatingsClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
            search_window_days: i64::from(config.search_window_days),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `url` and returns its body, or `None` on HTTP 404.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` does not parse.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status
    ///   (5xx after retries are exhausted).
    /// - [`ScraperError::Http`] on network or TLS failure after retries.
    pub async fn fetch_page(&self, url: &str) -> Result<Option<String>, ScraperError> {
        let url = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "text/html,*/*;q=0.8")
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::NOT_FOUND {
                    tracing::debug!(url = %url, "page not found");
                    return Ok(None);
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                Ok(Some(response.text().await?))
            }
        })
        .await
    }

    /// Resolves `href` (absolute or site-relative) against the base URL.
    pub(crate) fn absolute_url(&self, href: &str) -> Result<String, ScraperError> {
        let invalid = |reason: String| ScraperError::InvalidUrl {
            url: href.to_owned(),
            reason,
        };
        let base = Url::parse(&format!("{}/", self.base_url)).map_err(|e| invalid(e.to_string()))?;
        base.join(href)
            .map(String::from)
            .map_err(|e| invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> RatingsClient {
        let config = AppConfig {
            base_url: base_url.to_owned(),
            ..AppConfig::default()
        };
        RatingsClient::new(&config).unwrap()
    }

    #[test]
    fn new_trims_trailing_slash() {
        assert_eq!(client("http://ratings.test/").base_url(), "http://ratings.test");
    }

    #[test]
    fn absolute_url_joins_relative_href() {
        let url = client("http://ratings.test")
            .absolute_url("/daily-ratings/page/")
            .unwrap();
        assert_eq!(url, "http://ratings.test/daily-ratings/page/");
    }

    #[test]
    fn absolute_url_keeps_absolute_href() {
        let url = client("http://ratings.test")
            .absolute_url("http://other.test/a/")
            .unwrap();
        assert_eq!(url, "http://other.test/a/");
    }

    #[tokio::test]
    async fn fetch_page_rejects_invalid_url() {
        let err = client("http://ratings.test")
            .fetch_page("not a url")
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::InvalidUrl { .. }));
    }
}
