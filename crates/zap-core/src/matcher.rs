//! Stop-word-insensitive matching of show and network names.

use serde::{Deserialize, Serialize};

const STOPWORDS: [&str; 4] = ["the", "a", "in", "to"];

/// Lower-cases `phrase`, splits it on whitespace and drops stop words.
fn significant_words(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Returns `true` if every significant word of every query term occurs in
/// `candidate`.
///
/// Matching is by substring against the candidate's significant words
/// joined with spaces, so `"sunny"` matches `"It's Always Sunny"` and
/// `"philadelphia"` matches regardless of a dropped `"in"`.
#[must_use]
pub fn matches<S: AsRef<str>>(query_terms: &[S], candidate: &str) -> bool {
    let haystack = significant_words(candidate).join(" ");
    query_terms
        .iter()
        .flat_map(|term| significant_words(term.as_ref()))
        .all(|word| haystack.contains(&word))
}

/// A set of alternative queries; a candidate passes if any one matches.
///
/// `QueryFilter::new(["Survivor", "Big Brother"])` accepts either show. An
/// empty-string alternative has no significant words and accepts every
/// candidate. Callers model "no filter" as `Option::<QueryFilter>::None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    alternatives: Vec<String>,
}

impl QueryFilter {
    pub fn new<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Tries each alternative in order and stops at the first match.
    /// A filter with no alternatives accepts everything.
    #[must_use]
    pub fn accepts(&self, candidate: &str) -> bool {
        self.alternatives.is_empty()
            || self
                .alternatives
                .iter()
                .any(|alt| matches(std::slice::from_ref(alt), candidate))
    }
}

/// Applies an optional filter; an absent filter always passes.
#[must_use]
pub fn filter_accepts(filter: Option<&QueryFilter>, candidate: &str) -> bool {
    filter.is_none_or(|f| f.accepts(candidate))
}
