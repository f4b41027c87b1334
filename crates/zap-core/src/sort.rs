//! Ordering of chart entries by a named field.
//!
//! Numeric fields sort highest first, text and temporal fields sort
//! ascending. Sorting is stable and returns a new vector.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::chart::{Category, Entry};
use crate::dates::{parse_date, to_24h_time};
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Show,
    Network,
    Time,
    Date,
    Viewers,
    Rating,
    Share,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Show,
        SortField::Network,
        SortField::Time,
        SortField::Date,
        SortField::Viewers,
        SortField::Rating,
        SortField::Share,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SortField::Show => "show",
            SortField::Network => "network",
            SortField::Time => "time",
            SortField::Date => "date",
            SortField::Viewers => "viewers",
            SortField::Rating => "rating",
            SortField::Share => "share",
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SortField::Viewers | SortField::Rating | SortField::Share
        )
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|field| field.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "show" => Ok(SortField::Show),
            "network" | "net" => Ok(SortField::Network),
            "time" | "air_time" => Ok(SortField::Time),
            "date" => Ok(SortField::Date),
            "viewers" => Ok(SortField::Viewers),
            "rating" => Ok(SortField::Rating),
            "share" => Ok(SortField::Share),
            _ => Err(CoreError::InvalidSortField {
                field: s.to_owned(),
                valid: SortField::valid_names(),
            }),
        }
    }
}

enum SortKey {
    Number(f64),
    Text(String),
    Date(Option<NaiveDate>),
}

impl SortKey {
    fn of(entry: &Entry, field: SortField) -> Self {
        match field {
            SortField::Show => SortKey::Text(entry.show.clone()),
            SortField::Network => SortKey::Text(entry.network.clone()),
            SortField::Time => SortKey::Text(to_24h_time(&entry.air_time)),
            SortField::Date => SortKey::Date(parse_date(&entry.date).ok()),
            SortField::Viewers => SortKey::Number(entry.viewers.sort_key()),
            SortField::Rating => SortKey::Number(entry.rating.sort_key()),
            SortField::Share => {
                SortKey::Number(entry.share.as_ref().map_or(0.0, |share| share.sort_key()))
            }
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Returns `entries` ordered by `field` in the field's default direction.
///
/// # Errors
///
/// Returns [`CoreError::SortFieldUnsupported`] when sorting a cable chart by
/// `share`.
pub fn sort_entries(
    entries: &[Entry],
    category: Category,
    field: SortField,
) -> Result<Vec<Entry>, CoreError> {
    if field == SortField::Share && category.is_cable() {
        return Err(CoreError::SortFieldUnsupported {
            field: field.to_string(),
            category: category.to_string(),
        });
    }

    let mut keyed = entries
        .iter()
        .map(|entry| (SortKey::of(entry, field), entry))
        .collect::<Vec<_>>();

    if field.is_numeric() {
        keyed.sort_by(|(a, _), (b, _)| b.compare(a));
    } else {
        keyed.sort_by(|(a, _), (b, _)| a.compare(b));
    }

    Ok(keyed.into_iter().map(|(_, entry)| entry.clone()).collect())
}
