//! Date and time normalization for ratings URLs, page titles and sort keys.
//!
//! The ratings site spells months inconsistently in its URLs (`aug` vs
//! `august`, and September differs between cable and broadcast charts), so
//! every conversion goes through [`normalize_month`] first.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::CoreError;

/// Canonical rendering of a chart date: `"July 25 2017"`.
pub const DATE_FORMAT: &str = "%B %-d %Y";

const PARSE_FORMAT: &str = "%B %d %Y";

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const SHORT_MONTHS: [&str; 12] = [
    "jan", "feb", "march", "april", "may", "june", "july", "aug", "sept", "oct", "nov", "dec",
];

/// Separators replaced by a single space before a date or title is matched.
const STRIPPED: [&str; 6] = [",", ".", "-", "/", ":", "  "];

/// Swaps the month token at the start of `date_text` between its long and
/// short spelling.
///
/// September ignores `shorten`: cable charts always spell it out and
/// broadcast charts always use `sept`. A month token found in neither table
/// is title-cased and passed through.
#[must_use]
pub fn normalize_month(date_text: &str, shorten: bool, is_cable: bool) -> String {
    let mut tokens = date_text.split_whitespace();
    let Some(first) = tokens.next() else {
        return String::new();
    };

    let month = first.to_lowercase();
    let shorten = if month.contains("sept") {
        !is_cable
    } else {
        shorten
    };

    let (from, to) = if shorten {
        (&MONTHS, &SHORT_MONTHS)
    } else {
        (&SHORT_MONTHS, &MONTHS)
    };

    let month = from
        .iter()
        .position(|m| *m == month)
        .map_or_else(|| title_case(&month), |idx| to[idx].to_owned());

    let rest = tokens.collect::<Vec<_>>();
    if rest.is_empty() {
        month
    } else {
        format!("{month} {}", rest.join(" "))
    }
}

/// Replaces date/title punctuation with spaces and collapses whitespace.
#[must_use]
pub fn strip_punctuation(text: &str) -> String {
    let mut cleaned = text.to_owned();
    for sep in STRIPPED {
        cleaned = cleaned.replace(sep, " ");
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a human date such as `"July 25, 2017"` or `"Sept. 3 2017"`.
///
/// # Errors
///
/// Returns [`CoreError::DateFormat`] when the tokens are not in
/// `Month Day Year` order (for example `"2017 July 25"`).
pub fn parse_date(date_text: &str) -> Result<NaiveDate, CoreError> {
    let cleaned = normalize_month(&strip_punctuation(date_text), false, true);
    NaiveDate::parse_from_str(&cleaned, PARSE_FORMAT).map_err(|_| CoreError::DateFormat {
        input: date_text.to_owned(),
    })
}

/// Renders a date in the canonical `Month Day Year` form.
#[must_use]
pub fn render_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Full English weekday name, e.g. `"Tuesday"`.
#[must_use]
pub fn day_of_week(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Shifts `date` by `days` and renders the result with [`DATE_FORMAT`].
///
/// The result is a string; re-parse it with [`parse_date`] for further
/// arithmetic.
#[must_use]
pub fn shift_days(date: NaiveDate, days: i64) -> String {
    render_date(date + Duration::days(days))
}

#[must_use]
pub fn next_week(date: NaiveDate) -> String {
    shift_days(date, 7)
}

#[must_use]
pub fn last_week(date: NaiveDate) -> String {
    shift_days(date, -7)
}

/// Returns `true` if `published` falls on `requested` or up to `days` after it.
#[must_use]
pub fn date_in_range(requested: NaiveDate, published: NaiveDate, days: i64) -> bool {
    (0..=days).contains(&(published - requested).num_days())
}

/// Converts `"8:30 PM"` into `"20:30 PM"`.
///
/// Periods are dropped from the meridian marker (`p.m.`), and an hour-only
/// clock (`"8 PM"`) is accepted. Input without a meridian token, or that
/// does not parse, is returned unchanged.
#[must_use]
pub fn to_24h_time(time_text: &str) -> String {
    let mut parts = time_text.split_whitespace();
    let (Some(clock), Some(meridian)) = (parts.next(), parts.next()) else {
        return time_text.to_owned();
    };
    let meridian = meridian.replace('.', "").to_uppercase();

    NaiveTime::parse_from_str(&format!("{clock} {meridian}"), "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(&format!("{clock}:00 {meridian}"), "%I:%M %p"))
        .map_or_else(
            |_| time_text.to_owned(),
            |time| time.format("%H:%M %p").to_string(),
        )
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "dates_test.rs"]
mod tests;
