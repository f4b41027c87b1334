use thiserror::Error;

/// Errors raised by the pure (network-free) parts of the ratings pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The date text does not follow the `Month Day Year` token order.
    #[error("invalid date \"{input}\": expected \"Month Day Year\" (e.g. \"July 25 2017\")")]
    DateFormat { input: String },

    #[error("\"{0}\" is not a valid category; expected one of: cable, broadcast, final, tv")]
    InvalidCategory(String),

    #[error("\"{field}\" is not a valid sort field; valid fields: {valid}")]
    InvalidSortField { field: String, valid: String },

    /// The field exists but the chart variant does not carry it
    /// (`share` on a cable chart).
    #[error("\"{field}\" cannot be used with {category} ratings")]
    SortFieldUnsupported { field: String, category: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
