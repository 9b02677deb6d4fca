//! ASIN extraction from URLs and product pages
//!
//! Amazon product URLs carry the ASIN in several shapes (`/dp/`, `/product/`,
//! `/gp/product/`, or an `asin` query parameter on Kindle share links). When
//! the URL carries nothing usable, the rendered page itself usually does.

use regex::Regex;
use scraper::{Html, Selector};

/// Check if a string is a valid ASIN: exactly 10 alphanumeric characters.
pub fn is_valid_asin(s: &str) -> bool {
    s.len() == 10 && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Check if a URL points at one of Amazon's link shorteners.
pub fn is_short_url(url: &str) -> bool {
    url.contains("a.co/") || url.contains("amzn.to/")
}

/// Extract an ASIN from a product URL.
///
/// Tries, in order:
/// 1. an `asin` query parameter (Kindle share links)
/// 2. a `/dp/<ASIN>`, `/product/<ASIN>`, or `/gp/product/<ASIN>` path segment
pub fn extract_asin_from_url(url: &str) -> Option<String> {
    // Query parameter first: when both are present and disagree, the share
    // link parameter is the one the sender meant.
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some((_, value)) = parsed.query_pairs().find(|(k, _)| k == "asin") {
            if is_valid_asin(&value) {
                return Some(value.to_string());
            }
        }
    }

    let path_re = Regex::new(r"(?i)/(?:dp|product|gp/product)/([A-Z0-9]{10})").unwrap();
    path_re.captures(url).map(|caps| caps[1].to_string())
}

/// Extract an ASIN from a parsed product page.
///
/// Fallback chain for pages reached through URLs that carry no identifier:
/// `data-asin` attributes, the hidden `ASIN` form field, JSON-LD `productID`,
/// and finally a raw scan of the document body. The raw scan is fragile and
/// stays last.
pub fn extract_asin_from_document(document: &Html) -> Option<String> {
    // data-asin on any element
    let data_asin_sel = Selector::parse("[data-asin]").unwrap();
    if let Some(element) = document.select(&data_asin_sel).next() {
        if let Some(asin) = element.value().attr("data-asin") {
            if !asin.is_empty() {
                return Some(asin.to_string());
            }
        }
    }

    // data-asin on the root html element
    let html_sel = Selector::parse("html").unwrap();
    if let Some(element) = document.select(&html_sel).next() {
        if let Some(asin) = element.value().attr("data-asin") {
            if !asin.is_empty() {
                return Some(asin.to_string());
            }
        }
    }

    // hidden form field
    let input_sel = Selector::parse(r#"input[name="ASIN"]"#).unwrap();
    if let Some(element) = document.select(&input_sel).next() {
        if let Some(value) = element.value().attr("value") {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    // JSON-LD productID, formatted as "ASIN:XXXXXXXXXX"
    if let Some(asin) = extract_asin_from_jsonld(document) {
        return Some(asin);
    }

    // Last resort: scan the raw body for embedded JSON fragments or a bare
    // Kindle-shaped token.
    extract_asin_from_body_text(document)
}

fn extract_asin_from_jsonld(document: &Html) -> Option<String> {
    let script_sel = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let product_id_re = Regex::new(r"ASIN:([A-Z0-9]{10})").unwrap();

    for element in document.select(&script_sel) {
        let text = element.text().collect::<String>();
        let Ok(json) = serde_json::from_str::<serde_json::Value>(&text) else {
            continue;
        };
        if let Some(product_id) = json.get("productID").and_then(|v| v.as_str()) {
            if let Some(caps) = product_id_re.captures(product_id) {
                return Some(caps[1].to_string());
            }
        }
    }

    None
}

fn extract_asin_from_body_text(document: &Html) -> Option<String> {
    let body_sel = Selector::parse("body").unwrap();
    let body = document.select(&body_sel).next()?;
    let body_html = body.html();

    let quoted_re = Regex::new(r#"(?i)"ASIN":\s*"([A-Z0-9]{10})""#).unwrap();
    if let Some(caps) = quoted_re.captures(&body_html) {
        return Some(caps[1].to_string());
    }

    let loose_re = Regex::new(r#"(?i)["']ASIN["']:\s*["']([A-Z0-9]{10})"#).unwrap();
    if let Some(caps) = loose_re.captures(&body_html) {
        return Some(caps[1].to_string());
    }

    // Kindle-shaped token, as observed on e-book pages
    let bare_re = Regex::new(r"B[A-Z0-9]{8}").unwrap();
    bare_re.find(&body_html).map(|m| m.as_str().to_string())
}
