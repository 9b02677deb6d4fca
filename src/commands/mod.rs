pub mod create;
pub mod fetch;
pub mod fields;
pub mod init;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::FetchError;
use crate::scrape::{fetch_book_info_with_timeout, BookInfo};

/// Pull the first URL out of pasted text.
///
/// Share sheets and clipboards deliver URLs wrapped in surrounding prose
/// ("Check out this book! https://amzn.to/...").
pub fn extract_url(text: &str) -> Option<String> {
    let url_re = Regex::new(r"https?://\S+").unwrap();
    url_re.find(text).map(|m| m.as_str().trim().to_string())
}

/// Run the fetch pipeline on a fresh tokio runtime.
///
/// Commands are synchronous and drive the async pipeline through
/// `block_on`; the parsed HTML documents never cross a task boundary.
pub fn fetch_sync(url: &str) -> Result<std::result::Result<BookInfo, FetchError>> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let client = reqwest::Client::new();
    Ok(rt.block_on(fetch_book_info_with_timeout(&client, url)))
}
