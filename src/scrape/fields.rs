//! Field extractors for Amazon book product pages
//!
//! Amazon's product HTML is not schema-driven: the same piece of metadata
//! shows up under different elements depending on edition type (Kindle vs.
//! paper), page version, and locale. Every extractor here is a pure function
//! over the parsed document that walks an ordered list of selectors and stops
//! at the first non-empty result.

use regex::Regex;
use scraper::{Html, Selector};

use super::asin::extract_asin_from_url;

/// ISBN pair scraped from the product detail section. Both entries may be
/// empty; Kindle editions frequently carry neither.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsbnPair {
    pub isbn10: String,
    pub isbn13: String,
}

impl IsbnPair {
    pub fn is_empty(&self) -> bool {
        self.isbn10.is_empty() && self.isbn13.is_empty()
    }
}

/// Content of a `<meta>` tag matched by `selector`, if present.
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(String::from)
        .filter(|s| !s.is_empty())
}

/// Trimmed text content of the first element matched by `selector`.
fn element_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Attribute value of the first element matched by `selector`.
fn element_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(String::from)
        .filter(|s| !s.is_empty())
}

/// Strip zero-width and bidi control characters and collapse whitespace.
///
/// Amazon pads detail-bullet labels with invisible control characters, which
/// break naive substring matching against "ISBN-13" and friends.
fn clean_text(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{FEFF}'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the book title.
pub fn extract_title(document: &Html) -> String {
    meta_content(document, r#"meta[property="og:title"]"#)
        .or_else(|| element_text(document, "#productTitle"))
        .or_else(|| element_text(document, "#ebooksProductTitle"))
        .unwrap_or_else(|| "Unknown Title".to_string())
}

/// Extract the author list, deduplicated in first-appearance order.
/// Never returns an empty vector.
pub fn extract_authors(document: &Html) -> Vec<String> {
    let mut authors = collect_author_links(document, ".author a.contributorNameID");

    if authors.is_empty() {
        authors = collect_author_links(document, "#bylineInfo .author a");
    }

    if authors.is_empty() {
        authors.push("Unknown Author".to_string());
    }

    authors
}

fn collect_author_links(document: &Html, selector: &str) -> Vec<String> {
    let sel = Selector::parse(selector).unwrap();
    let mut authors: Vec<String> = Vec::new();

    for element in document.select(&sel) {
        let name = element.text().collect::<String>().trim().to_string();
        if !name.is_empty() && !authors.contains(&name) {
            authors.push(name);
        }
    }

    authors
}

/// Extract the book description, possibly empty.
pub fn extract_description(document: &Html) -> String {
    meta_content(document, r#"meta[property="og:description"]"#)
        .or_else(|| element_text(document, "#bookDescription_feature_div noscript"))
        .or_else(|| element_text(document, "#bookDescription_feature_div"))
        .or_else(|| meta_content(document, r#"meta[name="description"]"#))
        .unwrap_or_default()
}

/// Extract the publication date as `YYYY-MM-DD`, or empty.
///
/// The date lives inside the detail-bullet line that names the publisher,
/// formatted either Japanese-style (`2020年1月9日`) or with slashes.
pub fn extract_publish_date(document: &Html) -> String {
    scan_detail_items(document, "#detailBullets_feature_div li", parse_publisher_date)
        .or_else(|| {
            scan_detail_items(
                document,
                ".detail-bullet-list span.a-list-item",
                parse_publisher_date,
            )
        })
        .unwrap_or_default()
}

fn parse_publisher_date(text: &str) -> Option<String> {
    if !text.contains("出版社") && !text.contains("Publisher") {
        return None;
    }

    let date_re = Regex::new(r"(\d{4})[年/](\d{1,2})[月/](\d{1,2})").unwrap();
    date_re
        .captures(text)
        .map(|caps| format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]))
}

/// Run `parse` over each detail item's text, returning the first hit.
fn scan_detail_items(
    document: &Html,
    selector: &str,
    parse: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .find_map(|el| parse(&el.text().collect::<String>()))
}

/// Extract the cover image URL, possibly empty.
pub fn extract_thumbnail(document: &Html) -> String {
    meta_content(document, r#"meta[property="og:image"]"#)
        .or_else(|| element_attr(document, "#landingImage", "src"))
        .or_else(|| element_attr(document, "#ebooksImgBlkFront img", "src"))
        .or_else(|| element_attr(document, "#imgBlkFront img", "src"))
        .unwrap_or_default()
}

/// Extract ISBN-10 and ISBN-13 from the detail bullets.
///
/// Tolerates full-width colons (ISBN-13：) and strips dashes from the
/// captured digits. The alternate detail-list selector is only consulted
/// when the primary one yields neither ISBN.
pub fn extract_isbn(document: &Html) -> IsbnPair {
    let mut pair = scan_isbn_items(document, "#detailBullets_feature_div li");

    if pair.is_empty() {
        pair = scan_isbn_items(document, ".detail-bullet-list span.a-list-item");
    }

    pair
}

fn scan_isbn_items(document: &Html, selector: &str) -> IsbnPair {
    let sel = Selector::parse(selector).unwrap();
    let isbn13_re = Regex::new(r"ISBN-13\s*[:：]\s*([0-9-]+)").unwrap();
    let isbn10_re = Regex::new(r"ISBN-10\s*[:：]\s*([0-9-]+)").unwrap();

    let mut pair = IsbnPair::default();

    for element in document.select(&sel) {
        let text = clean_text(&element.text().collect::<String>());

        if pair.isbn13.is_empty() {
            if let Some(caps) = isbn13_re.captures(&text) {
                pair.isbn13 = caps[1].replace('-', "");
                continue;
            }
        }
        if pair.isbn10.is_empty() {
            if let Some(caps) = isbn10_re.captures(&text) {
                pair.isbn10 = caps[1].replace('-', "");
            }
        }
    }

    pair
}

/// Extract series name and volume number from the series widget.
///
/// The widget link reads like 全6巻中第1巻: テルマエ・ロマエ ("volume 1 of
/// 6: <series>"). Returns empty strings when the widget is absent or the
/// text doesn't match.
pub fn extract_series(document: &Html) -> (String, String) {
    let sel = Selector::parse("#seriesBulletWidget_feature_div a").unwrap();

    let Some(element) = document.select(&sel).next() else {
        return (String::new(), String::new());
    };

    let text = clean_text(&element.text().collect::<String>());
    let series_re = Regex::new(r"全\d+巻中第(\d+)巻[:\s]*(.+)$").unwrap();

    match series_re.captures(&text) {
        Some(caps) => (caps[2].trim().to_string(), caps[1].to_string()),
        None => (String::new(), String::new()),
    }
}

/// Physical-format labels that mark a paper edition in the format switcher.
const PAPER_FORMAT_LABELS: &[&str] = &[
    "単行本",
    "文庫",
    "コミック",
    "新書",
    "(紙)",
    "ペーパーバック",
    "Paperback",
    "Hardcover",
];

// The button-group variant recognizes Hardcover but not the English
// Paperback label; the media-tab variant carries only the Japanese labels.
const PAPER_FORMAT_LABELS_BUTTON_GROUP: &[&str] = &[
    "単行本",
    "文庫",
    "コミック",
    "新書",
    "(紙)",
    "ペーパーバック",
    "Hardcover",
];

const PAPER_FORMAT_LABELS_MEDIA_TAB: &[&str] = &["単行本", "文庫", "コミック", "新書", "(紙)"];

fn is_paper_format(text: &str, labels: &[&str]) -> bool {
    labels.iter().any(|label| text.contains(label))
}

/// Find the ASIN of a paper edition cross-referenced from a Kindle page.
///
/// Three widget variants are tried in order (swatches, button groups, media
/// tab headings); the first widget that yields an ASIN wins. Each variant
/// matches its own label set.
pub fn extract_paperback_asin(document: &Html) -> Option<String> {
    // Format swatches (twister)
    let swatch_sel = Selector::parse("#tmmSwatches .swatchElement").unwrap();
    let button_text_sel = Selector::parse(".a-button-text").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    for element in document.select(&swatch_sel) {
        let format_text = element
            .select(&button_text_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if !is_paper_format(&format_text, PAPER_FORMAT_LABELS) {
            continue;
        }

        if let Some(asin) = element
            .select(&link_sel)
            .next()
            .and_then(|link| link.value().attr("href"))
            .and_then(extract_asin_from_url)
        {
            return Some(asin);
        }
    }

    // Format button groups
    let button_sel =
        Selector::parse("#formats .a-button-group a, #format .a-button-group a").unwrap();

    for element in document.select(&button_sel) {
        let text = element.text().collect::<String>().trim().to_string();
        if !is_paper_format(&text, PAPER_FORMAT_LABELS_BUTTON_GROUP) {
            continue;
        }

        if let Some(asin) = element
            .value()
            .attr("href")
            .and_then(extract_asin_from_url)
        {
            return Some(asin);
        }
    }

    // Media tab headings
    let media_tab_sel =
        Selector::parse("#mediaTab_heading_0, #mediaTab_heading_1, #mediaTab_heading_2").unwrap();

    for element in document.select(&media_tab_sel) {
        let text = element.text().collect::<String>().trim().to_string();
        if !is_paper_format(&text, PAPER_FORMAT_LABELS_MEDIA_TAB) {
            continue;
        }

        if let Some(asin) = element
            .select(&link_sel)
            .next()
            .and_then(|link| link.value().attr("href"))
            .and_then(extract_asin_from_url)
        {
            return Some(asin);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_og_tag() {
        let html = r#"
        <html><head><meta property="og:title" content="OG Title"></head>
        <body><span id="productTitle">Element Title</span></body></html>
        "#;
        assert_eq!(extract_title(&Html::parse_document(html)), "OG Title");
    }

    #[test]
    fn test_title_falls_back_to_product_title() {
        let html = r#"<html><body><span id="productTitle"> Spaced Title </span></body></html>"#;
        assert_eq!(extract_title(&Html::parse_document(html)), "Spaced Title");
    }

    #[test]
    fn test_title_ebook_fallback() {
        let html = r#"<html><body><span id="ebooksProductTitle">Kindle Title</span></body></html>"#;
        assert_eq!(extract_title(&Html::parse_document(html)), "Kindle Title");
    }

    #[test]
    fn test_title_sentinel() {
        let html = "<html><body></body></html>";
        assert_eq!(extract_title(&Html::parse_document(html)), "Unknown Title");
    }

    #[test]
    fn test_authors_contributor_links_deduplicated() {
        let html = r#"
        <html><body>
            <div class="author"><a class="contributorNameID">山崎 麻里</a></div>
            <div class="author"><a class="contributorNameID">山崎 麻里</a></div>
            <div class="author"><a class="contributorNameID">著者 二号</a></div>
        </body></html>
        "#;
        assert_eq!(
            extract_authors(&Html::parse_document(html)),
            vec!["山崎 麻里".to_string(), "著者 二号".to_string()]
        );
    }

    #[test]
    fn test_authors_byline_fallback() {
        let html = r#"
        <html><body>
            <div id="bylineInfo"><span class="author"><a>Byline Author</a></span></div>
        </body></html>
        "#;
        assert_eq!(
            extract_authors(&Html::parse_document(html)),
            vec!["Byline Author".to_string()]
        );
    }

    #[test]
    fn test_authors_sentinel_when_elements_empty() {
        let html = r#"
        <html><body>
            <div class="author"><a class="contributorNameID">  </a></div>
        </body></html>
        "#;
        assert_eq!(
            extract_authors(&Html::parse_document(html)),
            vec!["Unknown Author".to_string()]
        );
    }

    #[test]
    fn test_description_noscript_fallback() {
        let html = r#"
        <html><body>
            <div id="bookDescription_feature_div"><noscript>A description.</noscript></div>
        </body></html>
        "#;
        assert_eq!(
            extract_description(&Html::parse_document(html)),
            "A description."
        );
    }

    #[test]
    fn test_description_empty_when_absent() {
        let html = "<html><body></body></html>";
        assert_eq!(extract_description(&Html::parse_document(html)), "");
    }

    #[test]
    fn test_publish_date_japanese_format() {
        let html = r#"
        <html><body><div id="detailBullets_feature_div"><ul>
            <li>出版社 : 講談社 (2020年1月9日)</li>
        </ul></div></body></html>
        "#;
        assert_eq!(
            extract_publish_date(&Html::parse_document(html)),
            "2020-01-09"
        );
    }

    #[test]
    fn test_publish_date_slash_format() {
        let html = r#"
        <html><body><div id="detailBullets_feature_div"><ul>
            <li>Publisher : Example Press (2021/11/3)</li>
        </ul></div></body></html>
        "#;
        assert_eq!(
            extract_publish_date(&Html::parse_document(html)),
            "2021-11-03"
        );
    }

    #[test]
    fn test_publish_date_alternate_detail_list() {
        let html = r#"
        <html><body><div class="detail-bullet-list">
            <span class="a-list-item">出版社: エンターブレイン (2009年4月1日)</span>
        </div></body></html>
        "#;
        assert_eq!(
            extract_publish_date(&Html::parse_document(html)),
            "2009-04-01"
        );
    }

    #[test]
    fn test_publish_date_ignores_non_publisher_lines() {
        let html = r#"
        <html><body><div id="detailBullets_feature_div"><ul>
            <li>発売日 : 2020年1月9日</li>
        </ul></div></body></html>
        "#;
        assert_eq!(extract_publish_date(&Html::parse_document(html)), "");
    }

    #[test]
    fn test_thumbnail_fallback_chain() {
        let html = r#"
        <html><body>
            <img id="landingImage" src="https://m.media-amazon.com/cover.jpg">
        </body></html>
        "#;
        assert_eq!(
            extract_thumbnail(&Html::parse_document(html)),
            "https://m.media-amazon.com/cover.jpg"
        );
    }

    #[test]
    fn test_isbn_with_invisible_characters_and_fullwidth_colon() {
        // Zero-width and bidi controls between label and value, as served
        let html = "<html><body><div id=\"detailBullets_feature_div\"><ul>\
            <li>ISBN-13\u{200F}\u{200E}：978-4-06-384276-2</li>\
            <li>ISBN-10\u{200F}\u{200E}: 4063842762</li>\
        </ul></div></body></html>";
        let pair = extract_isbn(&Html::parse_document(html));
        assert_eq!(pair.isbn13, "9784063842762");
        assert_eq!(pair.isbn10, "4063842762");
    }

    #[test]
    fn test_isbn_alternate_selector() {
        let html = r#"
        <html><body><div class="detail-bullet-list">
            <span class="a-list-item">ISBN-13 : 978-1-23-456789-7</span>
        </div></body></html>
        "#;
        let pair = extract_isbn(&Html::parse_document(html));
        assert_eq!(pair.isbn13, "9781234567897");
        assert_eq!(pair.isbn10, "");
    }

    #[test]
    fn test_isbn_absent() {
        let html = "<html><body></body></html>";
        assert!(extract_isbn(&Html::parse_document(html)).is_empty());
    }

    #[test]
    fn test_series_widget() {
        let html = r#"
        <html><body><div id="seriesBulletWidget_feature_div">
            <a>全6巻中第1巻: テルマエ・ロマエ</a>
        </div></body></html>
        "#;
        let (series, volume) = extract_series(&Html::parse_document(html));
        assert_eq!(series, "テルマエ・ロマエ");
        assert_eq!(volume, "1");
    }

    #[test]
    fn test_series_widget_absent() {
        let html = "<html><body></body></html>";
        assert_eq!(
            extract_series(&Html::parse_document(html)),
            (String::new(), String::new())
        );
    }

    #[test]
    fn test_series_widget_unmatched_text() {
        let html = r#"
        <html><body><div id="seriesBulletWidget_feature_div">
            <a>シリーズの詳細を見る</a>
        </div></body></html>
        "#;
        assert_eq!(
            extract_series(&Html::parse_document(html)),
            (String::new(), String::new())
        );
    }

    #[test]
    fn test_paperback_asin_from_swatches() {
        let html = r#"
        <html><body><div id="tmmSwatches">
            <div class="swatchElement">
                <span class="a-button-text">Kindle版</span>
                <a href="/dp/B000000000"></a>
            </div>
            <div class="swatchElement">
                <span class="a-button-text">文庫</span>
                <a href="/dp/4063842762"></a>
            </div>
        </div></body></html>
        "#;
        assert_eq!(
            extract_paperback_asin(&Html::parse_document(html)),
            Some("4063842762".to_string())
        );
    }

    #[test]
    fn test_paperback_asin_from_button_group() {
        let html = r#"
        <html><body><div id="formats"><div class="a-button-group">
            <a href="/gp/product/4063842762">単行本</a>
        </div></div></body></html>
        "#;
        assert_eq!(
            extract_paperback_asin(&Html::parse_document(html)),
            Some("4063842762".to_string())
        );
    }

    #[test]
    fn test_button_group_ignores_english_paperback_label() {
        // Unlike the swatch widget, the button-group variant does not
        // recognize the English Paperback label
        let html = r#"
        <html><body><div id="formats"><div class="a-button-group">
            <a href="/dp/4063842762">Paperback</a>
        </div></div></body></html>
        "#;
        assert_eq!(extract_paperback_asin(&Html::parse_document(html)), None);
    }

    #[test]
    fn test_button_group_accepts_hardcover_label() {
        let html = r#"
        <html><body><div id="formats"><div class="a-button-group">
            <a href="/dp/4063842762">Hardcover</a>
        </div></div></body></html>
        "#;
        assert_eq!(
            extract_paperback_asin(&Html::parse_document(html)),
            Some("4063842762".to_string())
        );
    }

    #[test]
    fn test_paperback_asin_from_media_tab() {
        let html = r#"
        <html><body>
            <div id="mediaTab_heading_0">文庫 <a href="/dp/4063842762"></a></div>
        </body></html>
        "#;
        assert_eq!(
            extract_paperback_asin(&Html::parse_document(html)),
            Some("4063842762".to_string())
        );
    }

    #[test]
    fn test_no_paperback_edition() {
        let html = r#"
        <html><body><div id="tmmSwatches">
            <div class="swatchElement">
                <span class="a-button-text">Kindle版</span>
                <a href="/dp/B000000000"></a>
            </div>
        </div></body></html>
        "#;
        assert_eq!(extract_paperback_asin(&Html::parse_document(html)), None);
    }
}
