//! Fetch orchestration: URL resolution, page fetch, and record assembly

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::warn;

use super::asin::{extract_asin_from_document, extract_asin_from_url, is_short_url};
use super::book::BookInfo;
use super::classify::is_book;
use super::fields::{
    extract_authors, extract_description, extract_isbn, extract_paperback_asin,
    extract_publish_date, extract_series, extract_thumbnail, extract_title, IsbnPair,
};
use crate::error::FetchError;

/// Domain used for canonical product URLs.
pub const AMAZON_DOMAIN: &str = "www.amazon.co.jp";

/// Deadline for the overall metadata fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "ja,en-US;q=0.7,en;q=0.3";

/// Canonical product URL for an ASIN.
pub fn canonical_url(asin: &str) -> String {
    format!("https://{}/dp/{}", AMAZON_DOMAIN, asin)
}

/// Fetch a URL as HTML with the fixed desktop headers. A single attempt, no
/// retries.
async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<Html, FetchError> {
    let body = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", ACCEPT)
        .header("Accept-Language", ACCEPT_LANGUAGE)
        .send()
        .await?
        .text()
        .await?;

    Ok(Html::parse_document(&body))
}

/// Read an ASIN out of a resolved short-link page: the canonical-link
/// element first, then the `og:url` meta tag, then the full document chain.
fn resolve_asin_from_document_links(document: &Html) -> Option<String> {
    let canonical_sel = Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    if let Some(asin) = document
        .select(&canonical_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(extract_asin_from_url)
    {
        return Some(asin);
    }

    let og_url_sel = Selector::parse(r#"meta[property="og:url"]"#).unwrap();
    if let Some(asin) = document
        .select(&og_url_sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .and_then(extract_asin_from_url)
    {
        return Some(asin);
    }

    extract_asin_from_document(document)
}

/// Resolve a shortened URL (`a.co`, `amzn.to`) to an ASIN. The shortener
/// serves the full product page.
async fn resolve_asin_from_short_url(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<String>, FetchError> {
    let document = fetch_document(client, url).await?;
    Ok(resolve_asin_from_document_links(&document))
}

/// Fetch the paper edition's page and pull ISBNs from it. Failures here
/// degrade to empty ISBNs.
async fn fetch_isbn_from_paperback(client: &reqwest::Client, asin: &str) -> IsbnPair {
    match fetch_document(client, &canonical_url(asin)).await {
        Ok(document) => extract_isbn(&document),
        Err(e) => {
            warn!("paperback page fetch for {} failed: {}", asin, e);
            IsbnPair::default()
        }
    }
}

/// Fetch and assemble the full metadata record for a product URL.
///
/// Short links are resolved first; the resulting page must classify as a
/// book and must yield an ASIN, otherwise the fetch fails. Field extraction
/// never fails, and the paperback ISBN cross-reference is best-effort.
pub async fn fetch_book_info(
    client: &reqwest::Client,
    url: &str,
) -> Result<BookInfo, FetchError> {
    let mut asin_from_url: Option<String> = None;
    let mut final_url = url.to_string();

    if is_short_url(url) {
        match resolve_asin_from_short_url(client, url).await? {
            Some(asin) => {
                final_url = canonical_url(&asin);
                asin_from_url = Some(asin);
            }
            None => return Err(FetchError::ShortUrlAsin),
        }
    }

    let document = fetch_document(client, &final_url).await?;

    if !is_book(&document) {
        return Err(FetchError::NotABook);
    }

    let asin = asin_from_url
        .or_else(|| extract_asin_from_url(&final_url))
        .or_else(|| extract_asin_from_document(&document))
        .ok_or(FetchError::AsinNotFound)?;

    let url = canonical_url(&asin);
    let title = extract_title(&document);
    let authors = extract_authors(&document);
    let description = extract_description(&document);
    let published = extract_publish_date(&document);
    let thumbnail = extract_thumbnail(&document);
    let (series, volume) = extract_series(&document);

    let mut isbn = extract_isbn(&document);
    if isbn.is_empty() {
        if let Some(paperback_asin) = extract_paperback_asin(&document) {
            isbn = fetch_isbn_from_paperback(client, &paperback_asin).await;
        }
    }

    Ok(BookInfo {
        title,
        authors,
        description,
        published,
        asin,
        isbn10: isbn.isbn10,
        isbn13: isbn.isbn13,
        thumbnail,
        url,
        series,
        volume,
    })
}

/// [`fetch_book_info`] under the fixed overall deadline. On timeout the
/// pending result is discarded and a timeout error surfaces to the caller.
pub async fn fetch_book_info_with_timeout(
    client: &reqwest::Client,
    url: &str,
) -> Result<BookInfo, FetchError> {
    match tokio::time::timeout(FETCH_TIMEOUT, fetch_book_info(client, url)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_url() {
        assert_eq!(
            canonical_url("B08XYZ12AB"),
            "https://www.amazon.co.jp/dp/B08XYZ12AB"
        );
    }

    #[test]
    fn test_short_link_page_canonical_link_wins() {
        let html = r#"
        <html><head>
            <link rel="canonical" href="https://www.amazon.co.jp/dp/B01ABCDEFG">
            <meta property="og:url" content="https://www.amazon.co.jp/dp/B09OTHER00">
        </head><body></body></html>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(
            resolve_asin_from_document_links(&document),
            Some("B01ABCDEFG".to_string())
        );
    }

    #[test]
    fn test_short_link_page_og_url_fallback() {
        let html = r#"
        <html><head>
            <meta property="og:url" content="https://www.amazon.co.jp/dp/B09OTHER00">
        </head><body></body></html>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(
            resolve_asin_from_document_links(&document),
            Some("B09OTHER00".to_string())
        );
    }

    #[test]
    fn test_short_link_page_falls_through_to_document_chain() {
        // Neither link element carries a usable URL; the data-asin
        // attribute on the page body still resolves
        let html = r#"
        <html><head>
            <link rel="canonical" href="https://www.amazon.co.jp/">
        </head><body><div data-asin="B01ABCDEFG"></div></body></html>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(
            resolve_asin_from_document_links(&document),
            Some("B01ABCDEFG".to_string())
        );
    }

    #[test]
    fn test_short_link_page_without_asin() {
        let html = "<html><head></head><body><p>redirecting...</p></body></html>";
        let document = Html::parse_document(html);
        assert_eq!(resolve_asin_from_document_links(&document), None);
    }
}
