//! Element queries over parsed pages.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

pub(crate) static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
pub(crate) static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
pub(crate) static STRONG: LazyLock<Selector> = LazyLock::new(|| selector("strong"));
pub(crate) static BOLD: LazyLock<Selector> = LazyLock::new(|| selector("b"));
pub(crate) static SEARCH_RESULT: LazyLock<Selector> =
    LazyLock::new(|| selector("div.container.container-small"));
pub(crate) static BOOKMARK: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"a[rel="bookmark"]"#));
pub(crate) static CATEGORY_TAG: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"a[rel="category tag"]"#));
pub(crate) static TIME: LazyLock<Selector> = LazyLock::new(|| selector("time"));
pub(crate) static NETWORK_NAME: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"td[width="77"]"#));
pub(crate) static AVERAGE_CELL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"td[style^="font"]"#));

/// Concatenated text of `element`, with non-breaking spaces unescaped and
/// surrounding whitespace trimmed.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .replace('\u{a0}', " ")
        .trim()
        .to_owned()
}

/// Non-empty texts of every element matching `selector`, in document order.
pub(crate) fn strings(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(text_of)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Texts of a row's `td` cells.
pub(crate) fn cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL).map(text_of).collect()
}

/// First non-empty text under `element` matching `selector`.
pub(crate) fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .map(text_of)
        .find(|text| !text.is_empty())
}
