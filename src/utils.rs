use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::debug;

pub(crate) const DEFAULT_DIMENSION: u32 = 0;
pub(crate) const DEFAULT_COUNT: u64 = 0;
pub(crate) const DEFAULT_TAG_ID: u64 = 0;
pub(crate) const DEFAULT_PAGE: u32 = 1;

/// First entry of `table` whose class marker is present on `el`, else `default`.
pub(crate) fn lookup_class<T: Copy>(el: &ElementRef, table: &[(&str, T)], default: T) -> T {
    let element = el.value();
    table
        .iter()
        .find(|(marker, _)| element.classes().any(|c| c == *marker))
        .map_or(default, |(_, value)| *value)
}

pub(crate) fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub(crate) fn select_text(el: &ElementRef, selector: &Selector) -> Option<String> {
    el.select(selector).next().map(|e| text_of(&e))
}

pub(crate) fn select_attr(el: &ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    el.select(selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(ToString::to_string)
}

/// Counts rendered as `1,234`.
pub(crate) fn parse_count(text: &str) -> u64 {
    text.trim()
        .replace(',', "")
        .parse()
        .unwrap_or_else(|_| {
            debug!("Unparseable count {:?}", text);
            DEFAULT_COUNT
        })
}

/// `"1920 x 1080"` into `(1920, 1080)`; each side falls back on its own.
pub(crate) fn parse_resolution(text: &str) -> (u32, u32) {
    let Some((width, height)) = text.split('x').collect_tuple() else {
        debug!("Unparseable resolution {:?}", text);
        return (DEFAULT_DIMENSION, DEFAULT_DIMENSION);
    };
    let dimension = |s: &str| s.trim().parse().unwrap_or(DEFAULT_DIMENSION);
    (dimension(width), dimension(height))
}

/// `"Page 2 / 5"` into `(2, 5)`. Anything else is a single page.
pub(crate) fn parse_pagination(text: &str) -> (u32, u32) {
    let text = text.trim();
    let text = text.strip_prefix("Page").unwrap_or(text);
    text.split(" / ")
        .map(|s| s.trim().parse::<u32>())
        .collect_tuple()
        .and_then(|(current, total)| Some((current.ok()?, total.ok()?)))
        .unwrap_or((DEFAULT_PAGE, DEFAULT_PAGE))
}

/// Forces `https:` onto scheme-relative URLs.
pub(crate) fn with_https(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}
