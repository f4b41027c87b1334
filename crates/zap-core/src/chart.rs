//! Ratings chart data model.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::CoreError;
use crate::matcher::{filter_accepts, QueryFilter};
use crate::sort::{sort_entries, SortField};

/// Which daily chart a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Cable,
    /// Finalized broadcast numbers.
    Final,
    /// Preliminary broadcast numbers, posted before the finals.
    FastAffiliate,
}

impl Category {
    /// Path/search slug used by the ratings site.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Category::Cable => "cable",
            Category::Final => "final",
            Category::FastAffiliate => "tv",
        }
    }

    #[must_use]
    pub fn is_cable(self) -> bool {
        self == Category::Cable
    }

    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Category::Cable => "Cable Ratings",
            Category::Final => "Final Broadcast Ratings",
            Category::FastAffiliate => "Fast Affiliate Broadcast Ratings",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Cable => write!(f, "cable"),
            Category::Final => write!(f, "final"),
            Category::FastAffiliate => write!(f, "fast-affiliate"),
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cable" => Ok(Category::Cable),
            "final" | "broadcast" => Ok(Category::Final),
            "tv" | "fast-affiliate" => Ok(Category::FastAffiliate),
            _ => Err(CoreError::InvalidCategory(s.to_owned())),
        }
    }
}

/// A numeric chart cell. The site renders data that is not available yet
/// as text (`"n/a"`, `"TBD"`); that text is kept as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Value(f64),
    Placeholder(String),
}

impl Metric {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Metric::Value(value),
            _ => Metric::Placeholder(text.to_owned()),
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(value) => Some(*value),
            Metric::Placeholder(_) => None,
        }
    }

    /// Placeholders rank as zero.
    #[must_use]
    pub fn sort_key(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(value) => fmt::Display::fmt(value, f),
            Metric::Placeholder(text) => f.pad(text),
        }
    }
}

/// One show's row in a daily chart.
///
/// `share` is only present on broadcast charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub show: String,
    pub network: String,
    pub air_time: String,
    /// Chart date the show aired on, `Month Day Year`.
    pub date: String,
    pub viewers: Metric,
    pub rating: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<Metric>,
}

impl Entry {
    /// Fixed-width table row, or `None` when a numeric cell holds a
    /// placeholder and the row cannot be laid out.
    #[must_use]
    pub fn render_row(&self) -> Option<String> {
        let width = if self.share.is_some() { 7 } else { 16 };
        let mut row = format!(
            "|{:<30.30}|{:>10}|{:>width$.width$}|{:7.2}|{:7.1}|",
            self.show,
            self.air_time,
            self.network,
            self.viewers.value()?,
            self.rating.value()?,
        );
        if let Some(share) = &self.share {
            row.push_str(&format!("{:7.1}|", share.value()?));
        }
        Some(row)
    }

    /// Returns the value of `field` for this entry.
    #[must_use]
    pub fn field(&self, field: SortField) -> Option<FieldValue> {
        let value = match field {
            SortField::Show => FieldValue::Text(self.show.clone()),
            SortField::Network => FieldValue::Text(self.network.clone()),
            SortField::Time => FieldValue::Text(self.air_time.clone()),
            SortField::Date => FieldValue::Text(self.date.clone()),
            SortField::Viewers => FieldValue::Metric(self.viewers.clone()),
            SortField::Rating => FieldValue::Metric(self.rating.clone()),
            SortField::Share => FieldValue::Metric(self.share.clone()?),
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Metric(Metric),
}

/// Daily average for one broadcast network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAverage {
    pub viewers: Metric,
    pub rating: Metric,
    pub share: Metric,
}

pub type NetworkAverages = BTreeMap<String, NetworkAverage>;

/// What the caller wants out of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub category: Category,
    pub date: NaiveDate,
    pub show: Option<QueryFilter>,
    pub network: Option<QueryFilter>,
    /// `None` or `Some(0)` means unlimited.
    pub limit: Option<usize>,
}

impl ChartRequest {
    #[must_use]
    pub fn new(category: Category, date: NaiveDate) -> Self {
        Self {
            category,
            date,
            show: None,
            network: None,
            limit: None,
        }
    }

    /// Request for yesterday's chart, the most recent one normally posted.
    #[must_use]
    pub fn yesterday(category: Category) -> Self {
        Self::new(category, Local::now().date_naive() - Duration::days(1))
    }

    #[must_use]
    pub fn with_show(mut self, show: QueryFilter) -> Self {
        self.show = Some(show);
        self
    }

    #[must_use]
    pub fn with_network(mut self, network: QueryFilter) -> Self {
        self.network = Some(network);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies the show and network filters to one row.
    #[must_use]
    pub fn accepts(&self, show: &str, network: &str) -> bool {
        filter_accepts(self.show.as_ref(), show) && filter_accepts(self.network.as_ref(), network)
    }

    #[must_use]
    pub fn limit_reached(&self, collected: usize) -> bool {
        matches!(self.limit, Some(limit) if limit > 0 && collected >= limit)
    }
}

/// One resolved ratings page: its rows plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub category: Category,
    pub date: String,
    pub day: String,
    pub next_week: String,
    pub last_week: String,
    pub entries: Vec<Entry>,
    pub url: String,
}

impl Chart {
    #[must_use]
    pub fn new(category: Category, date: NaiveDate, url: String, entries: Vec<Entry>) -> Self {
        Self {
            category,
            date: dates::render_date(date),
            day: dates::day_of_week(date),
            next_week: dates::next_week(date),
            last_week: dates::last_week(date),
            entries,
            url,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Reorders the entries by `field`, replacing the entry list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SortFieldUnsupported`] for `share` on a cable chart.
    pub fn sort(&mut self, field: SortField) -> Result<&mut Self, CoreError> {
        self.entries = sort_entries(&self.entries, self.category, field)?;
        Ok(self)
    }

    /// Collects `field` from every entry, in chart order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SortFieldUnsupported`] for `share` on a cable chart.
    pub fn as_list(&self, field: SortField) -> Result<Vec<FieldValue>, CoreError> {
        if field == SortField::Share && self.category.is_cable() {
            return Err(CoreError::SortFieldUnsupported {
                field: field.to_string(),
                category: self.category.to_string(),
            });
        }
        Ok(self.iter().filter_map(|entry| entry.field(field)).collect())
    }
}

impl Index<usize> for Chart {
    type Output = Entry;

    fn index(&self, index: usize) -> &Entry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a Chart {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} for {}, {}", self.category.heading(), self.day, self.date)?;
        if self.category.is_cable() {
            writeln!(
                f,
                "|{:<30}|{:<10}|{:<16}|{:<7}|{:<7}|",
                "Show", "Time", "Network", "Viewers", "Rating"
            )?;
            write!(f, "+{}+", "-".repeat(74))?;
        } else {
            writeln!(
                f,
                "|{:<30}|{:<10}|{:<7}|{:<7}|{:<7}|{:<7}|",
                "Show", "Time", "Network", "Viewers", "Rating", "Share"
            )?;
            write!(f, "+{}+", "-".repeat(73))?;
        }
        for row in self.iter().filter_map(Entry::render_row) {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
