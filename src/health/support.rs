// Support forum parsing - share of recent threads marked resolved

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

const MARKER: &str = "support threads in the last two months";

static RESOLVED_OF_TOTAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+of\s+(\d+)").ok());

static RESOLVED_SENTENCE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+of\s+(\d+)\s+support threads in the last two months").ok()
});

/// Resolved percentage (0-100) from a support forum page, 0 when not found
pub fn support_percent(html: &str) -> f64 {
    from_paragraphs(html)
        .or_else(|| {
            tracing::debug!("support summary not found in paragraphs, scanning raw html");
            from_raw_html(html)
        })
        .unwrap_or(0.0)
}

fn from_paragraphs(html: &str) -> Option<f64> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("p").ok()?;
    let text = document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.contains(MARKER))?;

    let caps = RESOLVED_OF_TOTAL.as_ref()?.captures(&text)?;
    ratio(&caps[1], &caps[2])
}

fn from_raw_html(html: &str) -> Option<f64> {
    let caps = RESOLVED_SENTENCE.as_ref()?.captures(html)?;
    ratio(&caps[1], &caps[2])
}

fn ratio(resolved: &str, total: &str) -> Option<f64> {
    let resolved: f64 = resolved.parse().ok()?;
    let total: f64 = total.parse().ok()?;
    (total > 0.0).then(|| resolved / total * 100.0)
}
