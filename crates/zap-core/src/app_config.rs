/// Runtime settings shared by the scraper and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Site root used for direct chart URLs and the search listing.
    pub base_url: String,
    pub log_level: String,
    /// Suppresses diagnostics below `error`, whatever `log_level` says.
    pub quiet: bool,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// How many days after the requested date a search result may be
    /// published and still be accepted.
    pub search_window_days: u32,
}

impl AppConfig {
    /// Tracing filter directive implied by `quiet` and `log_level`.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        if self.quiet {
            "error"
        } else {
            &self.log_level
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://tvbythenumbers.zap2it.com".to_owned(),
            log_level: "info".to_owned(),
            quiet: false,
            request_timeout_secs: 30,
            user_agent: "zap/0.1 (tv-ratings)".to_owned(),
            max_retries: 2,
            retry_backoff_base_secs: 1,
            search_window_days: 5,
        }
    }
}
