//! Template rendering for notes and filenames
//!
//! A deliberately small Mustache-like engine: literal `{{name}}`
//! substitution over a fixed placeholder set, plus `{{#isbn10}}...{{/isbn10}}`
//! style conditional blocks for the two fields that are frequently absent.
//! Rendering is pure; missing optional fields substitute as empty strings.

use crate::scrape::BookInfo;

/// Available template placeholders with descriptions.
pub const PLACEHOLDERS: &[(&str, &str)] = &[
    ("title", "Book title"),
    ("authors", "Author list (YAML scalar or list)"),
    ("description", "Full description"),
    ("description_short", "Description truncated to 100 characters"),
    ("published", "Publication date (YYYY-MM-DD)"),
    ("created", "Today's date (YYYY-MM-DD)"),
    ("asin", "Amazon ASIN"),
    ("isbn10", "ISBN-10 (also usable as a conditional block)"),
    ("isbn13", "ISBN-13 (also usable as a conditional block)"),
    ("thumbnail", "Cover image URL or local filename"),
    ("thumbnail_display", "Cover embed (Markdown image or wiki link)"),
    ("url", "Canonical product URL"),
    ("series", "Series name"),
    ("volume", "Volume number within the series"),
];

/// Built-in note template used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = r#"---
title: {{title}}
authors: {{authors}}
published: {{published}}
series: {{series}}
volume: {{volume}}
asin: {{asin}}
isbn10: {{isbn10}}
isbn13: {{isbn13}}
thumbnail: {{thumbnail}}
url: {{url}}
description: {{description_short}}
created: {{created}}
---

{{thumbnail_display}}

## Description

{{description}}

## Notes
"#;

fn truncate_chars(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(length).collect();
    truncated + "..."
}

/// Short description for metadata frontmatter: the first 100 characters of
/// the trimmed description, with an ellipsis only when truncated.
pub fn description_short(description: &str) -> String {
    truncate_chars(description.trim(), 100)
}

/// Format the author list as a YAML value: a quoted scalar for a single
/// author, a bracketed quoted list otherwise.
fn format_authors(authors: &[String]) -> String {
    match authors {
        [single] => format!("\"{}\"", single),
        _ => {
            let quoted: Vec<String> = authors.iter().map(|a| format!("\"{}\"", a)).collect();
            format!("[{}]", quoted.join(", "))
        }
    }
}

/// Cover embed fragment: a Markdown image link for remote URLs, a wiki-style
/// embed for local filenames.
fn thumbnail_display(thumbnail: &str) -> String {
    if thumbnail.starts_with("http") {
        format!("![]({})", thumbnail)
    } else {
        format!("![[{}]]", thumbnail)
    }
}

/// Replace a `{{#name}}...{{/name}}` block: kept (delimiters stripped, inner
/// `{{name}}` resolved) when `value` is non-empty, removed entirely when
/// empty. Non-greedy, tolerates multi-line bodies.
fn apply_conditional_block(input: &str, name: &str, value: &str) -> String {
    let open = format!("{{{{#{}}}}}", name);
    let close = format!("{{{{/{}}}}}", name);
    let placeholder = format!("{{{{{}}}}}", name);

    let mut result = String::new();
    let mut rest = input;

    while let Some(start) = rest.find(&open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(&close) else {
            // Unclosed block marker: leave it verbatim
            result.push_str(&rest[..start + open.len()]);
            rest = after_open;
            continue;
        };

        result.push_str(&rest[..start]);
        if !value.is_empty() {
            result.push_str(&after_open[..end].replace(&placeholder, value));
        }
        rest = &after_open[end + close.len()..];
    }

    result.push_str(rest);
    result
}

/// Render a note template against a metadata record.
pub fn render_template(template: &str, data: &BookInfo) -> String {
    let created = chrono::Local::now().format("%Y-%m-%d").to_string();
    render_with_created(template, data, &created)
}

fn render_with_created(template: &str, data: &BookInfo, created: &str) -> String {
    let result = template
        .replace("{{title}}", &data.title)
        .replace("{{authors}}", &format_authors(&data.authors))
        .replace("{{description}}", &data.description)
        .replace("{{description_short}}", &description_short(&data.description))
        .replace("{{published}}", &data.published)
        .replace("{{created}}", created)
        .replace("{{asin}}", &data.asin)
        .replace("{{isbn10}}", &data.isbn10)
        .replace("{{isbn13}}", &data.isbn13)
        // thumbnail_display first: its token contains "{{thumbnail" as a
        // prefix, so the plain thumbnail pattern would corrupt it
        .replace("{{thumbnail_display}}", &thumbnail_display(&data.thumbnail))
        .replace("{{thumbnail}}", &data.thumbnail)
        .replace("{{url}}", &data.url)
        .replace("{{series}}", &data.series)
        .replace("{{volume}}", &data.volume);

    let result = apply_conditional_block(&result, "isbn10", &data.isbn10);
    apply_conditional_block(&result, "isbn13", &data.isbn13)
}

/// Replace filesystem-unsafe characters with a hyphen and collapse
/// whitespace runs.
pub fn sanitize_filename(filename: &str) -> String {
    let replaced: String = filename
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            _ => c,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a filename template. Supports only `{{title}}`, `{{authors}}`
/// (joined by comma-space), and `{{asin}}`; the result is sanitized for
/// filesystem use.
pub fn render_filename(template: &str, data: &BookInfo) -> String {
    let filename = template
        .replace("{{title}}", &data.title)
        .replace("{{authors}}", &data.authors.join(", "))
        .replace("{{asin}}", &data.asin);

    sanitize_filename(&filename)
}
