use serde::{Deserialize, Serialize};

/// Structured book metadata assembled from a product page.
///
/// `asin` and `url` are always populated on a successful fetch; `url` is the
/// canonical `https://www.amazon.co.jp/dp/<ASIN>` form regardless of the
/// original URL shape. `authors` is never empty (a sentinel is substituted
/// when extraction finds nothing). Everything else is best-effort and may be
/// an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookInfo {
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,
    /// Publication date in `YYYY-MM-DD` form, or empty.
    pub published: String,
    pub asin: String,
    pub isbn10: String,
    pub isbn13: String,
    /// Cover image URL; may be overwritten with a local filename after a
    /// successful image download.
    pub thumbnail: String,
    pub url: String,
    pub series: String,
    /// Volume number within the series, as a string.
    pub volume: String,
}
