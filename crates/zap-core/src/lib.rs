//! Data model and pure logic for daily TV ratings charts: date handling,
//! show/network matching and entry sorting.

pub mod app_config;
pub mod chart;
pub mod config;
pub mod dates;
pub mod error;
pub mod matcher;
pub mod sort;

pub use app_config::AppConfig;
pub use chart::{
    Category, Chart, ChartRequest, Entry, FieldValue, Metric, NetworkAverage, NetworkAverages,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use matcher::{matches, QueryFilter};
pub use sort::{sort_entries, SortField};
